use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rayon::prelude::*;
use std::{sync::Arc, time::Duration};
use threadlab::{AtomicState, CounterWatcher, JobCounter, LabState};

// How the snapshot/watcher pattern scales when many readers hit the same
// shared state at once.
fn bench_parallel_readers(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_readers");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    for size in [64usize, 256, 1024] {
        group.bench_with_input(
            BenchmarkId::new("watchers_sequential", size),
            &size,
            |b, &size| {
                let jobs = JobCounter::new();
                jobs.record();
                let mut watchers = vec![CounterWatcher::new(); size];
                b.iter(|| {
                    for watcher in watchers.iter_mut() {
                        black_box(watcher.poll(&jobs));
                    }
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("watchers_parallel", size),
            &size,
            |b, &size| {
                let jobs = JobCounter::new();
                jobs.record();
                let mut watchers = vec![CounterWatcher::new(); size];
                b.iter(|| {
                    watchers.par_iter_mut().for_each(|watcher| {
                        black_box(watcher.poll(&jobs));
                    });
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("snapshots_parallel", size),
            &size,
            |b, &size| {
                let state = Arc::new(LabState::new(250.0));
                state.publish_bounce(125.0);
                b.iter(|| {
                    (0..size).into_par_iter().for_each(|_| {
                        black_box(state.snapshot());
                    });
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    name = parallel_benches;
    config = Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(10));
    targets = bench_parallel_readers
);
criterion_main!(parallel_benches);
