//! Criterion micro-benchmarks for event channel enqueue and dispatch.

use std::sync::Arc;

use cadence_core::{ChannelId, Event, Observer};
use cadence_engine::EventChannel;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

struct Sink;

impl Observer for Sink {
    fn on_notice(&self, _sender: ChannelId, event: &Event) {
        black_box(event);
    }
}

fn bench_enqueue_transmit(c: &mut Criterion) {
    for observers in [1usize, 4, 16] {
        let channel = EventChannel::new();
        let sinks: Vec<Arc<dyn Observer>> = (0..observers)
            .map(|_| Arc::new(Sink) as Arc<dyn Observer>)
            .collect();
        for sink in &sinks {
            channel.register_observer(sink);
        }

        c.bench_function(&format!("transmit_256_events_{observers}_observers"), |b| {
            b.iter(|| {
                for scancode in 0..256u32 {
                    channel.enqueue(Event::KeyDown { scancode });
                }
                black_box(channel.transmit_events())
            })
        });
    }
}

fn bench_enqueue_only(c: &mut Criterion) {
    let channel = EventChannel::new();
    c.bench_function("enqueue_single_event", |b| {
        b.iter(|| {
            channel.enqueue(black_box(Event::MouseMotion { x: 3, y: 4 }));
        });
    });
    // Drain so the queue doesn't grow across iterations unbounded.
    channel.transmit_events();
}

criterion_group!(benches, bench_enqueue_transmit, bench_enqueue_only);
criterion_main!(benches);
