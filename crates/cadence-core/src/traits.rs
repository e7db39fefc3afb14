//! Capability traits at the boundary of the real-time core.
//!
//! Both traits replace inheritance hierarchies with plain capability
//! interfaces: concrete types are built by the application's composition
//! root and handed in by reference, never retrieved through a global
//! accessor.

use crate::event::Event;
use crate::id::ChannelId;

/// A listener invoked synchronously for each dispatched event.
///
/// Channels hold observers as `Weak` references and never own them; the
/// registering caller controls the observer's lifetime. `on_notice` runs
/// on the consumer thread while the channel's queue lock is held, so
/// implementations must be quick, must use interior mutability for any
/// state they keep, and must not call back into the sending channel's
/// queue operations.
pub trait Observer: Send + Sync {
    /// Receive one event from the channel identified by `sender`.
    ///
    /// Called once per event, in enqueue order, after every observer
    /// registered earlier has seen the same event.
    fn on_notice(&self, sender: ChannelId, event: &Event);
}

/// A pollable source of native events.
///
/// The producer loop drains this in a tight loop until it reports
/// exhaustion. Implementations wrap a platform event pump (or a script
/// of events, in tests); they are not required to be thread-safe — a
/// source is owned by exactly one polling loop.
pub trait EventSource {
    /// Return the next pending event, or `None` when the source is
    /// currently exhausted.
    ///
    /// `None` means "nothing available right now", not end-of-stream;
    /// the producer loop will poll again next cycle.
    fn poll_next(&mut self) -> Option<Event>;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn poll_next(&mut self) -> Option<Event> {
        (**self).poll_next()
    }
}
