//! Runtime configuration, validation, and error types.
//!
//! [`RuntimeConfig`] is the builder-input for [`Runtime`](crate::Runtime).
//! Validation happens once, loudly, at construction time: a degenerate
//! rate must never reach a running loop.

use std::error::Error;
use std::fmt;

use crate::regulator::MAX_RATE_HZ;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating loop configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Rate is zero or exceeds the clock granularity bound
    /// ([`MAX_RATE_HZ`]), which would truncate the period to 0 ms.
    InvalidRate {
        /// The rejected rate.
        rate_hz: u32,
    },
    /// A background thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of which thread failed.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRate { rate_hz } => {
                write!(f, "rate must be in 1..={MAX_RATE_HZ} Hz, got {rate_hz}")
            }
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "thread spawn failed: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── ControlError ───────────────────────────────────────────────────

/// Error submitting a control command to the simulation thread.
#[derive(Debug, PartialEq, Eq)]
pub enum ControlError {
    /// The simulation thread has shut down.
    Shutdown,
    /// The control channel is full (back-pressure).
    ChannelFull,
    /// The command carried a rate outside `1..=`[`MAX_RATE_HZ`].
    InvalidRate {
        /// The rejected rate.
        rate_hz: u32,
    },
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shutdown => write!(f, "simulation thread has shut down"),
            Self::ChannelFull => write!(f, "control channel full"),
            Self::InvalidRate { rate_hz } => {
                write!(f, "rate must be in 1..={MAX_RATE_HZ} Hz, got {rate_hz}")
            }
        }
    }
}

impl Error for ControlError {}

// ── RuntimeConfig ──────────────────────────────────────────────────

/// Configuration for a two-loop [`Runtime`](crate::Runtime).
///
/// The simulation loop drains and dispatches events at `simulation_hz`;
/// the presentation loop polls the event source (and runs the frame
/// callback) at `presentation_hz`. The two loops are free-running — no
/// ratio between them is assumed or enforced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Target rate of the fixed-tick simulation loop. Default: 30.
    pub simulation_hz: u32,
    /// Target rate of the polling/presentation loop. Default: 60.
    pub presentation_hz: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            simulation_hz: 30,
            presentation_hz: 60,
        }
    }
}

impl RuntimeConfig {
    /// Validate both rates.
    ///
    /// Pure validation pass; the runtime constructor builds its
    /// regulators from the same values afterwards.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for rate_hz in [self.simulation_hz, self.presentation_hz] {
            if rate_hz == 0 || rate_hz > MAX_RATE_HZ {
                return Err(ConfigError::InvalidRate { rate_hz });
            }
        }
        Ok(())
    }
}
