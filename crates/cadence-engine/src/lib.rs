//! Loop regulation and event distribution for real-time applications.
//!
//! The two primitives a fixed-rate interactive system must get right:
//!
//! - [`RateRegulator`] paces a loop to a target iteration rate,
//!   measuring each cycle and sleeping off the remainder of the budget.
//! - [`EventChannel`] relays opaque events from a polling producer
//!   thread to a consumer thread, fanning each one out synchronously to
//!   registered observers in FIFO order.
//!
//! [`Runtime`] composes them into the canonical two-thread deployment:
//! a fixed-tick simulation loop on a background thread and a polling
//! presentation loop on the caller's thread, terminated cooperatively by
//! a quit event.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod channel;
pub mod config;
pub mod metrics;
pub mod regulator;
mod registry;
pub mod runtime;

pub use channel::EventChannel;
pub use config::{ConfigError, ControlError, RuntimeConfig};
pub use metrics::{LoopMetrics, LoopStats};
pub use regulator::{RateRegulator, MAX_RATE_HZ};
pub use runtime::{Runtime, ShutdownReport};
