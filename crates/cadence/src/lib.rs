//! Cadence: the real-time core of a hobby game engine.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the Cadence sub-crates. For most users, adding `cadence` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use cadence::prelude::*;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! // An observer that counts key presses.
//! #[derive(Default)]
//! struct KeyCounter(AtomicUsize);
//! impl Observer for KeyCounter {
//!     fn on_notice(&self, _sender: ChannelId, event: &Event) {
//!         if matches!(event, Event::KeyDown { .. }) {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//! }
//!
//! // One channel, one observer, three events.
//! let channel = EventChannel::new();
//! let counter: Arc<dyn Observer> = Arc::new(KeyCounter::default());
//! channel.register_observer(&counter);
//!
//! channel.enqueue(Event::KeyDown { scancode: 4 });
//! channel.enqueue(Event::KeyUp { scancode: 4 });
//! channel.enqueue(Event::KeyDown { scancode: 5 });
//! assert_eq!(channel.transmit_events(), 3);
//!
//! // Pace a loop at 60 Hz: 16ms budget per cycle.
//! let mut regulator = RateRegulator::new(60).unwrap();
//! regulator.start_update();
//! // ... simulate, render ...
//! let _slack = regulator.delay();
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cadence-core` | Event enum, ids, `Observer`/`EventSource` traits |
//! | [`engine`] | `cadence-engine` | `RateRegulator`, `EventChannel`, `Runtime`, config, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types: the event enum, ids, and boundary traits (`cadence-core`).
pub mod types {
    pub use cadence_core::*;
}

/// Loop and channel machinery (`cadence-engine`).
pub mod engine {
    pub use cadence_engine::*;
}

/// The types most applications need, in one import.
pub mod prelude {
    pub use cadence_core::{ChannelId, Event, EventSource, Observer, ObserverKey};
    pub use cadence_engine::{
        ConfigError, ControlError, EventChannel, LoopMetrics, RateRegulator, Runtime,
        RuntimeConfig, ShutdownReport,
    };
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use cadence_test_utils::{RecordingObserver, ScriptedSource};
    use std::sync::Arc;

    /// The facade wires the sub-crates together: a scripted source
    /// drains through a channel to a recording observer.
    #[test]
    fn facade_round_trip() {
        let channel = EventChannel::new();
        let recorder = Arc::new(RecordingObserver::new());
        let as_observer: Arc<dyn Observer> = Arc::clone(&recorder) as Arc<dyn Observer>;
        channel.register_observer(&as_observer);

        let mut source = ScriptedSource::new([
            Event::WindowResized {
                width: 640,
                height: 480,
            },
            Event::Quit,
        ]);
        assert_eq!(channel.poll_events(&mut source), 2);
        assert_eq!(channel.transmit_events(), 2);
        assert_eq!(
            recorder.events(),
            vec![
                Event::WindowResized {
                    width: 640,
                    height: 480
                },
                Event::Quit
            ]
        );
    }
}
