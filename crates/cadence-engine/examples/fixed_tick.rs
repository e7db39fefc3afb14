//! Minimal composition-root demo: a scripted event source standing in
//! for a platform event pump, one application observer, and the
//! two-loop runtime ticking until the script's quit event lands.
//!
//! Run with: `cargo run --example fixed_tick -p cadence-engine`

use std::sync::Arc;

use cadence_core::{ChannelId, Event, Observer};
use cadence_engine::{Runtime, RuntimeConfig};
use cadence_test_utils::ScriptedSource;

struct InputLogger;

impl Observer for InputLogger {
    fn on_notice(&self, sender: ChannelId, event: &Event) {
        println!("channel {sender}: {event:?}");
    }
}

fn main() {
    let mut runtime = Runtime::new(RuntimeConfig {
        simulation_hz: 30,
        presentation_hz: 60,
    })
    .expect("default rates are valid");

    let logger: Arc<dyn Observer> = Arc::new(InputLogger);
    runtime.register_observer(&logger);

    // A short input script ending in quit; a real application would wrap
    // its window system's event pump in `EventSource` instead.
    let mut source = ScriptedSource::new([
        Event::FocusGained,
        Event::KeyDown { scancode: 44 },
        Event::KeyUp { scancode: 44 },
        Event::Quit,
    ]);

    let mut frames = 0u64;
    runtime
        .run_presentation(&mut source, || frames += 1)
        .expect("presentation rate is valid");

    let report = runtime.shutdown();
    let sim = runtime.simulation_metrics();
    let pres = runtime.presentation_metrics();
    println!(
        "done: {frames} frames, sim {} ticks ({} overruns), \
         presentation {} cycles, shutdown {}ms",
        sim.cycles, sim.overruns, pres.cycles, report.total_ms
    );
}
