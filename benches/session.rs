use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use input_tracker::capture::EvdevDecoder;
use input_tracker::event::{EventData, EventKind};
use input_tracker::session::report;
use std::time::Duration;

use test_helpers::*;

// Recording into a log that is already full, so every push evicts.
fn bench_record_full_log(c: &mut Criterion) {
    let mut session = tracking_session(10_000);
    for i in 0..10_000 {
        press(&mut session, i as f64 * 0.01, "a");
    }
    let mut t = 100.0;
    c.bench_function("session::record (full log)", |b| {
        b.iter(|| {
            t += 0.001;
            session.record_at(T0 + t, EventKind::KeyPress, EventData::key_press(black_box("w")))
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut session = tracking_session(10_000);
    for i in 0..500 {
        let offset = i as f64 * 0.05;
        press(&mut session, offset, "a");
        click(&mut session, offset + 0.01, "left");
    }
    c.bench_function("session::snapshot", |b| {
        b.iter(|| black_box(session.snapshot_at(T0 + 25.0)))
    });
}

fn bench_document_and_summary(c: &mut Criterion) {
    let mut session = tracking_session(10_000);
    for i in 0..10_000 {
        let offset = i as f64 * 0.01;
        match i % 3 {
            0 => press(&mut session, offset, ["a", "s", "d", "w"][i % 4]),
            1 => click(&mut session, offset, "left"),
            _ => move_to(&mut session, offset, i as i32, 0),
        };
    }
    c.bench_function("session::to_document + summarize", |b| {
        b.iter(|| report::summarize(&session.to_document_at(T0 + 100.0)))
    });
}

fn bench_decoder(c: &mut Criterion) {
    let mut events = Vec::new();
    for i in 0..1_000u64 {
        events.push(rel_ev(i * 8_000, REL_X, 3));
        events.push(rel_ev(i * 8_000, REL_Y, -1));
        events.push(syn_ev(i * 8_000));
        if i % 10 == 0 {
            events.extend(tap(i * 8_000, KEY_A));
        }
    }
    c.bench_function("capture::EvdevDecoder::feed (1k frames)", |b| {
        b.iter_batched(
            || EvdevDecoder::new(Duration::from_millis(100), false),
            |mut decoder| {
                let mut n = 0usize;
                for ev in &events {
                    decoder.feed(ev, |_| n += 1);
                }
                n
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_record_full_log,
    bench_snapshot,
    bench_document_and_summary,
    bench_decoder
);
criterion_main!(benches);
