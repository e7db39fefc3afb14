//! Test fixtures and mock types for Cadence development.
//!
//! Provides mock implementations of the core traits
//! ([`EventSource`], [`Observer`]) for unit and integration tests:
//! scripted sources that replay a fixed event sequence, and observers
//! that record or count what they receive.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use cadence_core::{ChannelId, Event, EventSource, Observer};

/// Mock [`EventSource`] that replays a fixed script of events.
///
/// `poll_next` pops events front-to-back; once the script is exhausted
/// the source reports `None` forever (push more with
/// [`feed`](ScriptedSource::feed)).
pub struct ScriptedSource {
    script: VecDeque<Event>,
}

impl ScriptedSource {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            script: events.into_iter().collect(),
        }
    }

    /// Empty source: always exhausted.
    pub fn empty() -> Self {
        Self::new([])
    }

    /// Append events to the end of the script.
    pub fn feed(&mut self, events: impl IntoIterator<Item = Event>) {
        self.script.extend(events);
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl EventSource for ScriptedSource {
    fn poll_next(&mut self) -> Option<Event> {
        self.script.pop_front()
    }
}

/// Mock [`Observer`] that records every `(sender, event)` pair it sees.
///
/// Inspect with [`seen`](RecordingObserver::seen) after dispatch.
#[derive(Default)]
pub struct RecordingObserver {
    seen: Mutex<Vec<(ChannelId, Event)>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything received so far, in delivery order.
    pub fn seen(&self) -> Vec<(ChannelId, Event)> {
        self.seen.lock().unwrap().clone()
    }

    /// Just the events, without sender ids.
    pub fn events(&self) -> Vec<Event> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|(_, event)| *event)
            .collect()
    }
}

impl Observer for RecordingObserver {
    fn on_notice(&self, sender: ChannelId, event: &Event) {
        self.seen.lock().unwrap().push((sender, *event));
    }
}

/// Mock [`Observer`] that only counts notifications.
#[derive(Default)]
pub struct CountingObserver {
    count: AtomicUsize,
}

impl CountingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

impl Observer for CountingObserver {
    fn on_notice(&self, _sender: ChannelId, _event: &Event) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}

/// Mock [`Observer`] that panics on a chosen event, for exercising
/// fault propagation through dispatch.
pub struct PanickingObserver {
    pub trigger: Event,
}

impl Observer for PanickingObserver {
    fn on_notice(&self, _sender: ChannelId, event: &Event) {
        if *event == self.trigger {
            panic!("PanickingObserver triggered by {event:?}");
        }
    }
}
