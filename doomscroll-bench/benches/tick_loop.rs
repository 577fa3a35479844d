//! Doomscroll benchmark suite.
//!
//! The engine has to stay trivially cheap next to a real render loop:
//!   slow_tick_100_loaded ......... < 50μs
//!   fast_tick_20_visible ......... < 10μs
//!   reveal_batch ................. < 10μs
//!   full_run_to_the_end .......... < 10ms
//!
//! Nothing here is CI-enforced yet; the numbers are the review yardstick.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use doomscroll_core::config::DoomscrollConfig;
use doomscroll_core::{MemoryId, MemoryRecord, Session};

fn make_record(i: u32) -> MemoryRecord {
    MemoryRecord {
        id: MemoryId(i),
        kind: "tweet".to_string(),
        content: format!("Memory number {i} from the dying internet, still legible for now"),
        author: format!("user_{i}"),
        year: 1995 + (i as i32 % 30),
        corruption_level: 0.0,
        saved: false,
    }
}

fn make_catalog(n: u32) -> Vec<MemoryRecord> {
    (1..=n).map(make_record).collect()
}

fn loaded_session(records: u32, reveal_all: bool) -> Session {
    let mut session = Session::new(make_catalog(records), DoomscrollConfig::default(), 42);
    if reveal_all {
        while session.request_more_records() > 0 {}
    }
    session.drain_events();
    session
}

/// Benchmark: one slow tick over 100 loaded records.
fn bench_slow_tick(c: &mut Criterion) {
    c.bench_function("slow_tick_100_loaded", |b| {
        b.iter_batched(
            || loaded_session(100, true),
            |mut session| {
                session.advance_by(black_box(1_000));
                black_box(session.drain_events());
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark: one fast tick with 20 visible records.
fn bench_fast_tick(c: &mut Criterion) {
    c.bench_function("fast_tick_20_visible", |b| {
        b.iter_batched(
            || {
                let mut session = loaded_session(100, true);
                let visible: Vec<MemoryId> = (1..=20).map(MemoryId).collect();
                session.observe_visible(&visible);
                session
            },
            |mut session| {
                session.advance_by(black_box(200));
                black_box(session.drain_events());
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark: revealing one pagination batch.
fn bench_reveal_batch(c: &mut Criterion) {
    c.bench_function("reveal_batch", |b| {
        b.iter_batched(
            || loaded_session(500, false),
            |mut session| {
                black_box(session.request_more_records());
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark: the save command, including its event emission.
fn bench_save(c: &mut Criterion) {
    c.bench_function("save_command", |b| {
        b.iter_batched(
            || loaded_session(100, true),
            |mut session| {
                black_box(session.request_save(MemoryId(50))).ok();
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark: an entire stock run, start to summary (200 simulated
/// seconds of ticks plus the dramatic pause).
fn bench_full_run(c: &mut Criterion) {
    c.bench_function("full_run_to_the_end", |b| {
        b.iter_batched(
            || loaded_session(50, true),
            |mut session| {
                session.run_to_completion(700_000);
                black_box(session.finished());
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_slow_tick,
    bench_fast_tick,
    bench_reveal_batch,
    bench_save,
    bench_full_run,
);
criterion_main!(benches);
