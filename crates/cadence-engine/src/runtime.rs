//! Two-thread composition of regulator and channel.
//!
//! The canonical deployment from which this crate is cut: a fixed-tick
//! simulation loop on a dedicated background thread, a polling
//! presentation loop on the caller's thread, one shared [`EventChannel`]
//! between them, and a shared `running` flag for cooperative shutdown.
//!
//! ```text
//! Caller Thread (presentation)        Sim Thread ("cadence-sim")
//!     |                                   |
//!     | start_update                      | start_update
//!     | channel.poll_events(source)       | drain control channel
//!     | frame callback                    | channel.transmit_events()
//!     | delay()                           |   -> observers, FIFO
//!     |                                   | delay()
//!     |-- set_simulation_rate() --------->| control_rx.try_recv()
//!     |                                   |
//!     |   Event::Quit dispatched => quit observer clears `running`,
//!     |   both loops observe the flag and exit; shutdown() joins.
//! ```
//!
//! Everything is injected at construction — no global accessors, so the
//! two loops are independently testable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};

use cadence_core::{ChannelId, Event, EventSource, Observer, ObserverKey};

use crate::channel::EventChannel;
use crate::config::{ConfigError, ControlError, RuntimeConfig};
use crate::metrics::{LoopMetrics, LoopStats};
use crate::regulator::{RateRegulator, MAX_RATE_HZ};

/// Control-channel capacity; the simulation thread drains it every tick,
/// so a handful of slots absorbs any realistic submission burst.
const CONTROL_CHANNEL_CAPACITY: usize = 16;

// ── ShutdownReport ───────────────────────────────────────────────

/// Report from [`Runtime::shutdown`].
#[derive(Debug)]
pub struct ShutdownReport {
    /// Total time spent in the shutdown sequence, in milliseconds.
    pub total_ms: u64,
    /// Whether the simulation thread was joined cleanly. `false` means
    /// it panicked (e.g. an observer panicked during dispatch).
    pub sim_joined: bool,
}

// ── Control commands ─────────────────────────────────────────────

enum LoopCommand {
    SetRate(u32),
}

// ── Quit observer ────────────────────────────────────────────────

/// Built-in observer that clears the shared running flag on
/// [`Event::Quit`]. Registered first so termination is seen even if no
/// application observer is attached.
struct QuitListener {
    running: Arc<AtomicBool>,
}

impl Observer for QuitListener {
    fn on_notice(&self, sender: ChannelId, event: &Event) {
        if event.is_quit() {
            log::info!("quit event on channel {sender}; stopping loops");
            self.running.store(false, Ordering::Release);
        }
    }
}

// ── Simulation thread ────────────────────────────────────────────

/// State owned by the simulation thread's main loop.
struct SimThreadState {
    channel: Arc<EventChannel>,
    running: Arc<AtomicBool>,
    control_rx: Receiver<LoopCommand>,
    regulator: RateRegulator,
    stats: Arc<LoopStats>,
}

impl SimThreadState {
    /// Fixed-tick loop: runs until the running flag clears.
    fn run(mut self) {
        while self.running.load(Ordering::Acquire) {
            self.regulator.start_update();
            self.drain_control_channel();
            let dispatched = self.channel.transmit_events();
            let slept = self.regulator.delay();
            self.stats.record_cycle(slept, dispatched);
        }
        log::info!(
            "simulation loop stopped after {} cycles ({} overruns)",
            self.stats.snapshot().cycles,
            self.regulator.overruns()
        );
    }

    /// Apply all pending control commands.
    fn drain_control_channel(&mut self) {
        while let Ok(command) = self.control_rx.try_recv() {
            match command {
                LoopCommand::SetRate(rate_hz) => match self.regulator.set_rate(rate_hz) {
                    Ok(()) => log::debug!("simulation rate changed to {rate_hz} Hz"),
                    // Rates are validated at submission; reaching this
                    // means a bug upstream, not a reason to stop ticking.
                    Err(e) => log::warn!("rejected mid-loop rate change: {e}"),
                },
            }
        }
    }
}

// ── Runtime ──────────────────────────────────────────────────────

/// Composition root for the canonical two-loop deployment.
///
/// Construction spawns the simulation thread immediately; the caller
/// then drives the presentation loop via
/// [`run_presentation`](Runtime::run_presentation). The two loops are
/// free-running at independent rates and share nothing but the event
/// channel and the running flag.
pub struct Runtime {
    channel: Arc<EventChannel>,
    running: Arc<AtomicBool>,
    control_tx: Option<Sender<LoopCommand>>,
    sim_thread: Option<JoinHandle<()>>,
    sim_stats: Arc<LoopStats>,
    presentation_stats: Arc<LoopStats>,
    presentation_hz: u32,
    // Keeps the built-in quit observer alive; the channel only holds a Weak.
    _quit_listener: Arc<dyn Observer>,
}

impl Runtime {
    /// Validate `config`, build the shared channel, register the quit
    /// observer, and spawn the simulation thread.
    pub fn new(config: RuntimeConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let channel = Arc::new(EventChannel::new());
        let running = Arc::new(AtomicBool::new(true));

        let quit_listener: Arc<dyn Observer> = Arc::new(QuitListener {
            running: Arc::clone(&running),
        });
        channel.register_observer(&quit_listener);

        let (control_tx, control_rx) = crossbeam_channel::bounded(CONTROL_CHANNEL_CAPACITY);

        let sim_stats = Arc::new(LoopStats::new());
        let regulator = RateRegulator::new(config.simulation_hz)?;

        let sim_channel = Arc::clone(&channel);
        let sim_running = Arc::clone(&running);
        let thread_stats = Arc::clone(&sim_stats);
        let sim_thread = std::thread::Builder::new()
            .name("cadence-sim".into())
            .spawn(move || {
                let state = SimThreadState {
                    channel: sim_channel,
                    running: sim_running,
                    control_rx,
                    regulator,
                    stats: thread_stats,
                };
                state.run()
            })
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;

        log::info!(
            "runtime started: simulation {} Hz, presentation {} Hz",
            config.simulation_hz,
            config.presentation_hz
        );

        Ok(Self {
            channel,
            running,
            control_tx: Some(control_tx),
            sim_thread: Some(sim_thread),
            sim_stats,
            presentation_stats: Arc::new(LoopStats::new()),
            presentation_hz: config.presentation_hz,
            _quit_listener: quit_listener,
        })
    }

    /// Run the presentation loop on the calling thread until the running
    /// flag clears (quit event, or [`stop`](Runtime::stop)).
    ///
    /// Each cycle polls `source` into the channel, runs `frame` (the
    /// application's render/update hook, timed inside the cycle), then
    /// sleeps off the budget. On exit the running flag is forced false
    /// so the simulation loop stops too.
    pub fn run_presentation<S>(
        &self,
        source: &mut S,
        mut frame: impl FnMut(),
    ) -> Result<(), ConfigError>
    where
        S: EventSource + ?Sized,
    {
        let mut regulator = RateRegulator::new(self.presentation_hz)?;
        while self.running.load(Ordering::Acquire) {
            regulator.start_update();
            let polled = self.channel.poll_events(source);
            frame();
            let slept = regulator.delay();
            self.presentation_stats.record_cycle(slept, polled);
        }
        // Presentation exits first; clear the flag again so the
        // simulation loop cannot miss it.
        self.running.store(false, Ordering::Release);
        Ok(())
    }

    /// Change the simulation loop's rate mid-flight.
    ///
    /// Validated here, applied by the simulation thread at the top of
    /// its next tick.
    pub fn set_simulation_rate(&self, rate_hz: u32) -> Result<(), ControlError> {
        if rate_hz == 0 || rate_hz > MAX_RATE_HZ {
            return Err(ControlError::InvalidRate { rate_hz });
        }
        let control_tx = self.control_tx.as_ref().ok_or(ControlError::Shutdown)?;
        control_tx
            .try_send(LoopCommand::SetRate(rate_hz))
            .map_err(|e| match e {
                crossbeam_channel::TrySendError::Full(_) => ControlError::ChannelFull,
                crossbeam_channel::TrySendError::Disconnected(_) => ControlError::Shutdown,
            })
    }

    /// The shared event channel (for registering application observers,
    /// or enqueueing synthesized events).
    pub fn channel(&self) -> &Arc<EventChannel> {
        &self.channel
    }

    /// Register an application observer on the shared channel.
    pub fn register_observer(&self, observer: &Arc<dyn Observer>) -> ObserverKey {
        self.channel.register_observer(observer)
    }

    /// Whether both loops are still meant to be running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Request cooperative shutdown without blocking: both loops observe
    /// the cleared flag at the top of their next cycle.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Counters for the simulation loop.
    pub fn simulation_metrics(&self) -> LoopMetrics {
        self.sim_stats.snapshot()
    }

    /// Counters for the presentation loop.
    pub fn presentation_metrics(&self) -> LoopMetrics {
        self.presentation_stats.snapshot()
    }

    /// Stop both loops and join the simulation thread.
    ///
    /// Idempotent: a second call returns a zeroed report. Worst-case
    /// latency is one simulation period (the flag is polled per tick;
    /// `delay()` sleeps are not interrupted).
    pub fn shutdown(&mut self) -> ShutdownReport {
        let Some(handle) = self.sim_thread.take() else {
            return ShutdownReport {
                total_ms: 0,
                sim_joined: true,
            };
        };

        let start = Instant::now();
        self.running.store(false, Ordering::Release);
        // Disconnect the control channel so late submitters see Shutdown.
        self.control_tx.take();

        let sim_joined = match handle.join() {
            Ok(()) => true,
            Err(_) => {
                log::error!("simulation thread panicked; see panic output above");
                false
            }
        };

        ShutdownReport {
            total_ms: start.elapsed().as_millis() as u64,
            sim_joined,
        }
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        if self.sim_thread.is_some() {
            self.shutdown();
        }
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("channel", &self.channel.id())
            .field("running", &self.is_running())
            .field("presentation_hz", &self.presentation_hz)
            .finish()
    }
}
