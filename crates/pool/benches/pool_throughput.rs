// Pool throughput benchmarks.
//
// Measures take/return overhead for both available-set backends, and the
// cost of growing from empty.

use std::hint::black_box;
use std::sync::Arc;
use std::thread;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use nebula_pool::{LockFreeSet, LockedSet, Pool};

fn bench_take_return(c: &mut Criterion) {
    let mut group = c.benchmark_group("take_return");

    group.bench_function("lock_free", |b| {
        let pool = Pool::<Vec<u8>>::new(64, 64);
        b.iter(|| {
            let buf = pool.take();
            pool.return_item(black_box(buf));
        });
    });

    group.bench_function("locked", |b| {
        let pool = Pool::<Vec<u8>>::builder()
            .block_size(64)
            .initial_size(64)
            .with_store(LockedSet::default())
            .build();
        b.iter(|| {
            let buf = pool.take();
            pool.return_item(black_box(buf));
        });
    });

    group.bench_function("guard", |b| {
        let pool = Pool::<Vec<u8>>::new(64, 64);
        b.iter(|| {
            let buf = pool.get().unwrap();
            black_box(&*buf);
        });
    });

    group.finish();
}

fn bench_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("growth");

    for block_size in [1usize, 16, 256] {
        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, &block_size| {
                b.iter(|| {
                    let pool = Pool::with_allocator(block_size, 0, || [0u8; 64]);
                    for _ in 0..256 {
                        black_box(pool.take());
                    }
                });
            },
        );
    }

    group.finish();
}

fn contended<S>(pool: &Arc<Pool<u64, S>>, threads: usize)
where
    S: nebula_pool::AvailableSet<u64> + 'static,
{
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let pool = Arc::clone(pool);
            thread::spawn(move || {
                for _ in 0..1_000 {
                    let item = pool.take();
                    pool.return_item(black_box(item));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}

fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("contention");
    group.sample_size(20);

    for threads in [2usize, 8] {
        group.bench_with_input(BenchmarkId::new("lock_free", threads), &threads, |b, &n| {
            let pool = Arc::new(
                Pool::<u64>::builder()
                    .block_size(32)
                    .with_store(LockFreeSet::default())
                    .build(),
            );
            b.iter(|| contended(&pool, n));
        });

        group.bench_with_input(BenchmarkId::new("locked", threads), &threads, |b, &n| {
            let pool = Arc::new(
                Pool::<u64>::builder()
                    .block_size(32)
                    .with_store(LockedSet::default())
                    .build(),
            );
            b.iter(|| contended(&pool, n));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_take_return, bench_growth, bench_contention);
criterion_main!(benches);
