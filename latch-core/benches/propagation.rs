//! Benchmarks for latch-core
//!
//! Run with: cargo bench

use std::cell::Cell;
use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use latch_core::{scope, Controller};

fn bench_set_single_watcher(c: &mut Criterion) {
    let controller = Controller::<u64>::new();
    controller.watch(|value: &u64| {
        black_box(*value);
    });

    c.bench_function("set_single_watcher", |b| {
        b.iter(|| controller.set(black_box(42)))
    });
}

fn bench_set_many_watchers(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_many_watchers");

    for count in [1usize, 10, 100] {
        let controller = Controller::<u64>::new();
        let closes = Rc::new(Cell::new(0u64));
        for _ in 0..count {
            let closes = Rc::clone(&closes);
            controller.watch(move |_: &u64| {
                let closes = Rc::clone(&closes);
                scope::on_close(move || closes.set(closes.get() + 1))
            });
        }

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| controller.set(black_box(7)))
        });
    }

    group.finish();
}

fn bench_chained_watchers(c: &mut Criterion) {
    let controller = Controller::<u64>::new();
    let mut tail = controller.watch(|_: &u64| ());
    for _ in 0..16 {
        tail = tail.watch(|_: &u64| ());
    }

    c.bench_function("chained_watchers_16", |b| {
        b.iter(|| {
            controller.set(black_box(1));
            controller.reset();
        })
    });
}

fn bench_conjunction_cascade(c: &mut Criterion) {
    let left = Controller::<u64>::new();
    let right = Controller::<u64>::new();
    left.and(&right).watch(|pair: &latch_core::Both<u64, u64>| {
        black_box(pair.first() + pair.second());
    });
    right.set(1);

    c.bench_function("conjunction_cascade", |b| {
        b.iter(|| left.set(black_box(2)))
    });
}

fn bench_transform_chain(c: &mut Criterion) {
    let source = Controller::<u64>::new();
    let mut derived = source.transform(|v: &u64| v + 1);
    for _ in 0..8 {
        derived = derived.transform(|v: &u64| v + 1);
    }
    derived.watch(|value: &u64| {
        black_box(*value);
    });

    c.bench_function("transform_chain_9", |b| {
        b.iter(|| source.set(black_box(0)))
    });
}

criterion_group!(
    controller_benches,
    bench_set_single_watcher,
    bench_set_many_watchers,
    bench_chained_watchers,
);

criterion_group!(
    combinator_benches,
    bench_conjunction_cascade,
    bench_transform_chain,
);

criterion_main!(controller_benches, combinator_benches);
