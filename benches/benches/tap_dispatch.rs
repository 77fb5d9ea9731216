// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_tap::binder::Binder;
use understory_tap::config::TapConfig;
use understory_tap::host::SimulatedHost;
use understory_tap::types::{InputKind, TouchSupport};

type Host = SimulatedHost<u32, ()>;

fn bound(n: u32, delay_ms: u32) -> (Binder<u32, ()>, Host, Rc<Cell<u64>>) {
    let taps = Rc::new(Cell::new(0));
    let counter = taps.clone();
    let elements: Vec<u32> = (0..n).collect();
    let mut host = Host::new();
    let mut binder = Binder::new(TouchSupport::Available);
    binder.bind(
        &elements,
        TapConfig::new()
            .with_delay_ms(delay_ms)
            .with_action(move |_: &u32, _: &()| counter.set(counter.get() + 1)),
        &mut host,
    );
    (binder, host, taps)
}

fn bench_bind(c: &mut Criterion) {
    let mut group = c.benchmark_group("bind");
    for &n in &[16u32, 128, 1024] {
        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_function(format!("touch_n{}", n), |b| {
            b.iter(|| {
                let (binder, host, _) = bound(n, 0);
                black_box((binder.len(), host.subscriptions.len()));
            });
        });
    }
    group.finish();
}

fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycle");
    for &n in &[16u32, 128] {
        group.throughput(Throughput::Elements(u64::from(n)));
        // Hold past the delay, then release: start, timer, end per element.
        group.bench_function(format!("hold_release_n{}", n), |b| {
            b.iter_batched(
                || bound(n, 100),
                |(binder, mut host, taps)| {
                    for el in 0..n {
                        let _ = binder.dispatch(&el, InputKind::TouchStart, (), &mut host);
                    }
                    for timer in host.advance_by(100) {
                        let _ = binder.fire(timer, &mut host);
                    }
                    for el in 0..n {
                        let _ = binder.dispatch(&el, InputKind::TouchEnd, (), &mut host);
                    }
                    black_box(taps.get());
                },
                BatchSize::SmallInput,
            )
        });
        // Release before the delay: start, end, timer per element.
        group.bench_function(format!("quick_tap_n{}", n), |b| {
            b.iter_batched(
                || bound(n, 100),
                |(binder, mut host, taps)| {
                    for el in 0..n {
                        let _ = binder.dispatch(&el, InputKind::TouchStart, (), &mut host);
                        let _ = binder.dispatch(&el, InputKind::TouchEnd, (), &mut host);
                    }
                    for timer in host.advance_by(100) {
                        let _ = binder.fire(timer, &mut host);
                    }
                    black_box(taps.get());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bind, bench_cycle);
criterion_main!(benches);
