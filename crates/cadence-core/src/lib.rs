//! Core types and traits for the Cadence real-time loop kit.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared across the workspace: channel and
//! observer identifiers, the closed native-event enum, and the
//! [`Observer`] / [`EventSource`] capability traits.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod event;
pub mod id;
pub mod traits;

pub use event::{Event, MouseButton, Scancode};
pub use id::{ChannelId, ObserverKey};
pub use traits::{EventSource, Observer};
