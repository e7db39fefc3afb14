//! Frame/tick pacing: measure one loop iteration, sleep off the rest.
//!
//! One [`RateRegulator`] instance paces one loop. A cycle is bounded by
//! [`start_update`](RateRegulator::start_update) and
//! [`end_update`](RateRegulator::end_update);
//! [`delay`](RateRegulator::delay) blocks the calling thread for whatever
//! remains of the target period. The instance is reused across
//! iterations — no allocation on the cycle path.

use std::time::{Duration, Instant};

use crate::config::ConfigError;

/// Upper bound on accepted rates: above this, the integral-millisecond
/// period truncates to zero and the regulator would spin instead of pace.
pub const MAX_RATE_HZ: u32 = 1000;

/// Paces a loop to a target iteration rate.
///
/// Durations are integral milliseconds; the target period is derived by
/// truncating integer division (`1000 / rate_hz`), so 30 Hz yields 33 ms
/// and 60 Hz yields 16 ms. Timestamps come from the monotonic clock —
/// wall-clock time is never consulted, so backward clock jumps cannot
/// corrupt elapsed measurements.
#[derive(Debug)]
pub struct RateRegulator {
    rate_hz: u32,
    target_period: Duration,
    cycle_start: Option<Instant>,
    cycle_end: Option<Instant>,
    elapsed: Duration,
    overruns: u64,
}

impl RateRegulator {
    /// Create a regulator targeting `rate_hz` iterations per second.
    ///
    /// Rejects `rate_hz == 0` (undefined period) and rates above
    /// [`MAX_RATE_HZ`] (period truncates to 0 ms).
    pub fn new(rate_hz: u32) -> Result<Self, ConfigError> {
        let mut regulator = Self {
            rate_hz: 0,
            target_period: Duration::ZERO,
            cycle_start: None,
            cycle_end: None,
            elapsed: Duration::ZERO,
            overruns: 0,
        };
        regulator.set_rate(rate_hz)?;
        Ok(regulator)
    }

    /// Change the target rate mid-loop.
    ///
    /// Recomputes the target period; in-flight cycle timestamps are left
    /// alone, so the new period applies from the current cycle's `delay`
    /// onward. Only the most recent rate has any effect.
    pub fn set_rate(&mut self, rate_hz: u32) -> Result<(), ConfigError> {
        if rate_hz == 0 || rate_hz > MAX_RATE_HZ {
            return Err(ConfigError::InvalidRate { rate_hz });
        }
        self.rate_hz = rate_hz;
        self.target_period = Duration::from_millis(1000 / u64::from(rate_hz));
        Ok(())
    }

    /// Begin a cycle: capture the start timestamp and clear the end
    /// sentinel. Call once per iteration, before any timed work.
    pub fn start_update(&mut self) {
        self.cycle_end = None;
        self.cycle_start = Some(Instant::now());
    }

    /// End a cycle: capture the end timestamp and return the elapsed
    /// duration since `start_update`.
    ///
    /// If `start_update` was never called for this cycle the measurement
    /// would be garbage, so the call records zero elapsed and warns
    /// instead.
    pub fn end_update(&mut self) -> Duration {
        let now = Instant::now();
        self.cycle_end = Some(now);
        match self.cycle_start {
            Some(start) => self.elapsed = now - start,
            None => {
                log::warn!("end_update called without start_update; recording zero elapsed");
                self.elapsed = Duration::ZERO;
            }
        }
        self.elapsed
    }

    /// Sleep off the remainder of the target period and return the time
    /// actually slept.
    ///
    /// Calls [`end_update`](Self::end_update) first if the cycle has not
    /// been measured yet. Returns `Duration::ZERO` without sleeping when
    /// the cycle already overran its budget; overruns are counted, not
    /// surfaced as errors. This is the only blocking operation in the
    /// regulator.
    pub fn delay(&mut self) -> Duration {
        if self.cycle_end.is_none() {
            self.end_update();
        }
        match self.target_period.checked_sub(self.elapsed) {
            Some(remaining) if remaining > Duration::ZERO => {
                std::thread::sleep(remaining);
                remaining
            }
            _ => {
                self.overruns += 1;
                log::debug!(
                    "cycle overran budget: elapsed {}ms > period {}ms",
                    self.elapsed.as_millis(),
                    self.target_period.as_millis()
                );
                Duration::ZERO
            }
        }
    }

    /// The current target rate in Hz.
    pub fn rate(&self) -> u32 {
        self.rate_hz
    }

    /// The derived target period (`1000ms / rate`, truncated).
    pub fn target_period(&self) -> Duration {
        self.target_period
    }

    /// Elapsed duration measured by the most recent `end_update`.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Cumulative count of cycles that overran their budget.
    pub fn overruns(&self) -> u64 {
        self.overruns
    }
}
