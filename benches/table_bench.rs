use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use probe_table::{LinkedProbeTable, ProbeTable};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn bench_put_fresh_100k(c: &mut Criterion) {
    c.bench_function("table::put_fresh_100k", |b| {
        b.iter_batched(
            ProbeTable::<u64, u64>::new,
            |mut t| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    t.put(x, i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_put_presized_100k(c: &mut Criterion) {
    c.bench_function("table::put_presized_100k", |b| {
        b.iter_batched(
            || ProbeTable::<u64, u64>::with_capacity(1 << 18).unwrap(),
            |mut t| {
                for (i, x) in lcg(2).take(100_000).enumerate() {
                    t.put(x, i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit_100k(c: &mut Criterion) {
    c.bench_function("table::get_hit_100k", |b| {
        b.iter_batched(
            || {
                let mut t = ProbeTable::<u64, u64>::new();
                for (i, x) in lcg(3).take(100_000).enumerate() {
                    t.put(x, i as u64);
                }
                t
            },
            |t| {
                let mut acc = 0u64;
                for x in lcg(3).take(100_000) {
                    if let Some(v) = t.get(&x) {
                        acc = acc.wrapping_add(*v);
                    }
                }
                black_box(acc)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_miss_100k(c: &mut Criterion) {
    c.bench_function("table::get_miss_100k", |b| {
        b.iter_batched(
            || {
                let mut t = ProbeTable::<u64, u64>::new();
                for (i, x) in lcg(4).take(100_000).enumerate() {
                    t.put(x, i as u64);
                }
                t
            },
            |t| {
                let mut hits = 0usize;
                // A disjoint LCG stream; collisions with the inserted keys
                // are vanishingly rare.
                for x in lcg(0xdead_beef).take(100_000) {
                    if t.contains_key(&x) {
                        hits += 1;
                    }
                }
                black_box(hits)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_remove_random_10k(c: &mut Criterion) {
    c.bench_function("table::remove_random_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let mut t = ProbeTable::<u64, u64>::new();
                let keys: Vec<u64> = lcg(5).take(110_000).collect();
                for (i, &x) in keys.iter().enumerate() {
                    t.put(x, i as u64);
                }
                // Precompute 10k unique indices via a second LCG.
                let n = keys.len();
                let mut sel = std::collections::HashSet::with_capacity(10_000);
                let mut s = 0x9e3779b97f4a7c15u64;
                while sel.len() < 10_000 {
                    s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                    sel.insert((s as usize) % n);
                }
                let to_remove: Vec<u64> = sel.into_iter().map(|i| keys[i]).collect();
                (t, to_remove)
            },
            |(mut t, to_remove)| {
                for k in to_remove {
                    let _ = t.remove(&k);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_linked_put_100k(c: &mut Criterion) {
    c.bench_function("linked::put_fresh_100k", |b| {
        b.iter_batched(
            LinkedProbeTable::<u64, u64>::new,
            |mut t| {
                for (i, x) in lcg(6).take(100_000).enumerate() {
                    t.put(x, i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_linked_lru_churn(c: &mut Criterion) {
    c.bench_function("linked::lru_churn_100k_cap_4096", |b| {
        b.iter_batched(
            || LinkedProbeTable::<u64, u64>::with_capacity(8192).unwrap(),
            |mut t| {
                // Keyspace of 8192 over 100k touches: mostly reorders with
                // occasional inserts and capacity-bound evictions.
                for x in lcg(7).take(100_000) {
                    let k = x & 0x1fff;
                    if !t.move_to_back(&k) {
                        t.put(k, x);
                        if t.len() > 4096 {
                            t.poll_first();
                        }
                    }
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_iterate_100k(c: &mut Criterion) {
    c.bench_function("linked::iterate_100k", |b| {
        b.iter_batched(
            || {
                let mut t = LinkedProbeTable::<u64, u64>::new();
                for (i, x) in lcg(8).take(100_000).enumerate() {
                    t.put(x, i as u64);
                }
                t
            },
            |t| {
                let mut acc = 0u64;
                for (_, v) in t.iter() {
                    acc = acc.wrapping_add(*v);
                }
                black_box(acc)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(3))
        .warm_up_time(Duration::from_secs(1));
    targets =
        bench_put_fresh_100k,
        bench_put_presized_100k,
        bench_get_hit_100k,
        bench_get_miss_100k,
        bench_remove_random_10k,
        bench_linked_put_100k,
        bench_linked_lru_churn,
        bench_iterate_100k,
}
criterion_main!(benches);
