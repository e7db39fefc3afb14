//! The core contract without `Runtime`: two hand-rolled loops, one
//! shared channel, one shared flag. This is the minimal deployment an
//! application can build from the primitives directly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cadence_core::{Event, Observer};
use cadence_engine::{EventChannel, RateRegulator};
use cadence_test_utils::{RecordingObserver, ScriptedSource};

#[test]
fn two_free_running_loops_deliver_everything_in_order() {
    let channel = Arc::new(EventChannel::new());
    let running = Arc::new(AtomicBool::new(true));

    let recorder = Arc::new(RecordingObserver::new());
    let as_observer: Arc<dyn Observer> = Arc::clone(&recorder) as Arc<dyn Observer>;
    channel.register_observer(&as_observer);

    // Quit handling is the application's job in manual composition.
    struct Stopper(Arc<AtomicBool>);
    impl Observer for Stopper {
        fn on_notice(&self, _sender: cadence_core::ChannelId, event: &Event) {
            if event.is_quit() {
                self.0.store(false, Ordering::Release);
            }
        }
    }
    let stopper: Arc<dyn Observer> = Arc::new(Stopper(Arc::clone(&running)));
    channel.register_observer(&stopper);

    let script: Vec<Event> = (0..50u32)
        .map(|scancode| Event::KeyDown { scancode })
        .chain([Event::Quit])
        .collect();

    // Presentation loop: polls the source at ~200 Hz until told to stop.
    let producer = {
        let channel = Arc::clone(&channel);
        let running = Arc::clone(&running);
        let mut source = ScriptedSource::new(script.clone());
        std::thread::Builder::new()
            .name("presentation".into())
            .spawn(move || {
                let mut regulator = RateRegulator::new(200).unwrap();
                while running.load(Ordering::Acquire) {
                    regulator.start_update();
                    channel.poll_events(&mut source);
                    regulator.delay();
                }
            })
            .unwrap()
    };

    // Simulation loop on this thread: drains at ~100 Hz until the
    // stopper observer clears the flag.
    let mut regulator = RateRegulator::new(100).unwrap();
    while running.load(Ordering::Acquire) {
        regulator.start_update();
        channel.transmit_events();
        regulator.delay();
    }

    // Defensive re-clear before joining, mirroring loop teardown order.
    running.store(false, Ordering::Release);
    producer.join().unwrap();

    assert_eq!(recorder.events(), script);
    assert!(channel.is_empty());
}

#[test]
fn consumer_sees_nothing_until_producer_polls() {
    let channel = EventChannel::new();
    let recorder = Arc::new(RecordingObserver::new());
    let as_observer: Arc<dyn Observer> = Arc::clone(&recorder) as Arc<dyn Observer>;
    channel.register_observer(&as_observer);

    assert_eq!(channel.transmit_events(), 0);
    assert!(recorder.events().is_empty());

    let mut source = ScriptedSource::new([Event::FocusGained]);
    channel.poll_events(&mut source);
    assert_eq!(channel.transmit_events(), 1);
    assert_eq!(recorder.events(), vec![Event::FocusGained]);
}

#[test]
fn independent_regulators_do_not_interfere() {
    // Two regulators in one thread, alternating cycles: each keeps its
    // own period and measurement state.
    let mut fast = RateRegulator::new(500).unwrap();
    let mut slow = RateRegulator::new(100).unwrap();

    for _ in 0..5 {
        fast.start_update();
        slow.start_update();
        std::thread::sleep(Duration::from_millis(3));
        let fast_elapsed = fast.end_update();
        let slow_elapsed = slow.end_update();
        assert!(fast_elapsed >= Duration::from_millis(3));
        assert!(slow_elapsed >= Duration::from_millis(3));
    }
    assert_eq!(fast.target_period(), Duration::from_millis(2));
    assert_eq!(slow.target_period(), Duration::from_millis(10));
}
