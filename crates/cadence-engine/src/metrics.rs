//! Per-loop performance counters.
//!
//! Each loop in a [`Runtime`](crate::Runtime) updates one [`LoopStats`]
//! as it runs; consumers read a coherent-enough [`LoopMetrics`] snapshot
//! at any time. Overrun is never an error condition (a late event is
//! delivered a tick late, silently) — it is only counted here so
//! applications can watch for sustained drift.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Shared atomic counters for one loop. Cheap to update from the loop's
/// hot path, safe to read from any thread.
#[derive(Debug, Default)]
pub struct LoopStats {
    cycles: AtomicU64,
    overruns: AtomicU64,
    events: AtomicU64,
    slept_ms: AtomicU64,
}

impl LoopStats {
    /// Fresh, zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed cycle: the delay slept (zero on overrun)
    /// and the number of events handled (polled or dispatched).
    pub fn record_cycle(&self, slept: Duration, events: usize) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
        if slept == Duration::ZERO {
            self.overruns.fetch_add(1, Ordering::Relaxed);
        } else {
            self.slept_ms
                .fetch_add(slept.as_millis() as u64, Ordering::Relaxed);
        }
        self.events.fetch_add(events as u64, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters.
    pub fn snapshot(&self) -> LoopMetrics {
        LoopMetrics {
            cycles: self.cycles.load(Ordering::Relaxed),
            overruns: self.overruns.load(Ordering::Relaxed),
            events: self.events.load(Ordering::Relaxed),
            slept_ms: self.slept_ms.load(Ordering::Relaxed),
        }
    }
}

/// Plain snapshot of one loop's counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopMetrics {
    /// Completed loop cycles.
    pub cycles: u64,
    /// Cycles that overran their budget (zero sleep).
    pub overruns: u64,
    /// Cumulative events handled (polled on the producer side,
    /// dispatched on the consumer side).
    pub events: u64,
    /// Cumulative milliseconds spent sleeping off budget slack.
    pub slept_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let metrics = LoopStats::new().snapshot();
        assert_eq!(metrics, LoopMetrics::default());
    }

    #[test]
    fn record_cycle_accumulates() {
        let stats = LoopStats::new();
        stats.record_cycle(Duration::from_millis(6), 3);
        stats.record_cycle(Duration::from_millis(4), 0);
        let metrics = stats.snapshot();
        assert_eq!(metrics.cycles, 2);
        assert_eq!(metrics.overruns, 0);
        assert_eq!(metrics.events, 3);
        assert_eq!(metrics.slept_ms, 10);
    }

    #[test]
    fn zero_sleep_counts_as_overrun() {
        let stats = LoopStats::new();
        stats.record_cycle(Duration::ZERO, 1);
        let metrics = stats.snapshot();
        assert_eq!(metrics.overruns, 1);
        assert_eq!(metrics.slept_ms, 0);
    }
}
