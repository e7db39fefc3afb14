//! Strongly-typed identifiers for channels and registered observers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`ChannelId`] allocation.
static CHANNEL_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for an event channel.
///
/// Allocated from a monotonic atomic counter via [`ChannelId::next`].
/// Two distinct channel instances always have different IDs, so an
/// observer registered with several channels can tell the senders apart
/// without holding a reference back into the channel (which would create
/// an ownership cycle between channel and observer).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(u64);

impl ChannelId {
    /// Allocate a fresh, unique channel ID.
    ///
    /// Each call returns an ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(CHANNEL_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to an observer registration within a channel's registry.
///
/// Generation-scoped: the `generation` field lets the registry reject a
/// key whose slot was already deregistered, so a stale key held after
/// removal is inert rather than silently detaching a different observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverKey {
    /// Slot index in the registry, in registration order.
    pub index: u32,
    /// Registry generation of the slot when this key was issued.
    pub generation: u32,
}

impl fmt::Display for ObserverKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.index, self.generation)
    }
}
