//! Thread-safe FIFO event relay with synchronous observer fan-out.
//!
//! One producer thread fills the queue (via [`enqueue`](EventChannel::enqueue)
//! or [`poll_events`](EventChannel::poll_events)) while one consumer
//! thread drains it ([`transmit_events`](EventChannel::transmit_events)).
//! The queue is the only state shared between the two loops; locking is
//! coarse-grained — a whole multi-event drain happens under one lock
//! acquisition, trading dispatch concurrency for simplicity.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Weak};

use cadence_core::{ChannelId, Event, EventSource, Observer, ObserverKey};

use crate::registry::ObserverRegistry;

/// Producer/consumer event relay.
///
/// Events are delivered to all observers in exact enqueue order;
/// for a single event, every observer sees it (in registration order)
/// before the next event is popped — breadth-first per event, not per
/// observer.
///
/// Observers run on the consumer thread while the queue lock is held,
/// so an observer must not call back into this channel's queue
/// operations from `on_notice`. Registering or deregistering from a
/// callback is fine: the registry has its own lock, and dispatch works
/// from a snapshot taken before the drain.
pub struct EventChannel {
    id: ChannelId,
    queue: Mutex<VecDeque<Event>>,
    observers: Mutex<ObserverRegistry>,
}

impl EventChannel {
    /// Create an empty channel with a fresh [`ChannelId`].
    pub fn new() -> Self {
        let id = ChannelId::next();
        log::trace!("event channel {id} created");
        Self {
            id,
            queue: Mutex::new(VecDeque::new()),
            observers: Mutex::new(ObserverRegistry::new()),
        }
    }

    /// This channel's unique id, passed to observers as the sender.
    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// Register an observer; it will receive every event dispatched
    /// after this call, in registration order relative to its peers.
    ///
    /// The channel holds only a `Weak` reference — the caller keeps the
    /// `Arc` alive for as long as delivery is wanted, and may either
    /// [`deregister`](Self::deregister) or simply drop the `Arc` (dead
    /// references are skipped at dispatch).
    pub fn register_observer(&self, observer: &Arc<dyn Observer>) -> ObserverKey {
        let key = self
            .observers
            .lock()
            .expect("observer registry poisoned")
            .register(Arc::downgrade(observer));
        log::trace!("channel {}: observer {key} registered", self.id);
        key
    }

    /// Remove a registration in O(1). Returns `false` for stale keys.
    pub fn deregister(&self, key: ObserverKey) -> bool {
        self.observers
            .lock()
            .expect("observer registry poisoned")
            .deregister(key)
    }

    /// Number of live observer registrations.
    pub fn observer_count(&self) -> usize {
        self.observers
            .lock()
            .expect("observer registry poisoned")
            .len()
    }

    /// Append one externally-constructed event to the queue.
    pub fn enqueue(&self, event: Event) {
        self.queue
            .lock()
            .expect("event queue poisoned")
            .push_back(event);
    }

    /// Drain all currently-available events from `source` into the
    /// queue, under a single lock acquisition. Returns the number of
    /// events queued.
    pub fn poll_events<S: EventSource + ?Sized>(&self, source: &mut S) -> usize {
        let mut queue = self.queue.lock().expect("event queue poisoned");
        let mut polled = 0;
        while let Some(event) = source.poll_next() {
            queue.push_back(event);
            polled += 1;
        }
        polled
    }

    /// Pop and dispatch every queued event to every registered observer.
    ///
    /// Per event: all observers are invoked in registration order before
    /// the next event is popped. Returns the number of events
    /// dispatched; an empty queue is a no-op. An observer that panics
    /// unwinds through this call, abandoning the rest of the queue for
    /// this invocation; wrap observers in a catch guard if isolation
    /// is required.
    pub fn transmit_events(&self) -> usize {
        // Snapshot outside the queue lock; dispatch never holds the
        // registry lock, so callbacks may register/deregister freely.
        let observers: Vec<Weak<dyn Observer>> = self
            .observers
            .lock()
            .expect("observer registry poisoned")
            .snapshot();

        let mut queue = self.queue.lock().expect("event queue poisoned");
        let mut dispatched = 0;
        while let Some(event) = queue.pop_front() {
            for weak in &observers {
                if let Some(observer) = weak.upgrade() {
                    observer.on_notice(self.id, &event);
                }
            }
            dispatched += 1;
        }
        dispatched
    }

    /// Number of events currently queued.
    pub fn len(&self) -> usize {
        self.queue.lock().expect("event queue poisoned").len()
    }

    /// Whether the queue is currently empty.
    pub fn is_empty(&self) -> bool {
        self.queue.lock().expect("event queue poisoned").is_empty()
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventChannel")
            .field("id", &self.id)
            .field("queued", &self.len())
            .field("observers", &self.observer_count())
            .finish()
    }
}
