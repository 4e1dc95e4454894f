use criterion::{Criterion, criterion_group, criterion_main};
use rand::Rng;
use std::sync::Arc;
use std::thread;

// Import the cache and the backend seam from the crate
use relcache::cache::{CheckOptions, ExistenceCache};
use relcache::schema::{SchemaBackend, SchemaResult, TableRef};

// Test configuration
const THREAD_COUNT: usize = 8;
const LOOKUPS_PER_THREAD: usize = 10_000;
const TABLE_COUNT: usize = 256;

// Backend stub answering from the table name alone, with no I/O
struct NameParityBackend;

impl SchemaBackend for NameParityBackend {
    fn check_exists(&self, table: &TableRef) -> SchemaResult<bool> {
        Ok(table.name().len() % 2 == 0)
    }
}

fn table(i: usize) -> TableRef {
    TableRef::qualified("public".to_string(), format!("table_{}", i))
}

// Benchmark single-threaded lookups on a fully warmed cache
pub fn bench_cached_hits(c: &mut Criterion) {
    let mut group = c.benchmark_group("ExistenceLookups");

    group.bench_function("CachedHit", |b| {
        let cache = ExistenceCache::new(Arc::new(NameParityBackend));
        for i in 0..TABLE_COUNT {
            cache.exists(&table(i), CheckOptions::default()).unwrap();
        }

        let mut rng = rand::thread_rng();
        b.iter(|| {
            let i = rng.gen_range(0..TABLE_COUNT);
            cache.exists(&table(i), CheckOptions::default()).unwrap()
        });
    });

    group.finish();
}

// Benchmark the bypass path, which skips the cache on every call
pub fn bench_bypass_lookups(c: &mut Criterion) {
    let mut group = c.benchmark_group("ExistenceLookups");

    group.bench_function("Bypass", |b| {
        let cache = ExistenceCache::new(Arc::new(NameParityBackend));

        let mut rng = rand::thread_rng();
        b.iter(|| {
            let i = rng.gen_range(0..TABLE_COUNT);
            cache.exists(&table(i), CheckOptions::bypass()).unwrap()
        });
    });

    group.finish();
}

// Benchmark concurrent lookups against one shared cache
pub fn bench_concurrent_lookups(c: &mut Criterion) {
    let mut group = c.benchmark_group("ConcurrentLookups");

    group.bench_function("SharedCache", |b| {
        b.iter(|| {
            let cache = Arc::new(ExistenceCache::new(Arc::new(NameParityBackend)));

            // Spawn threads for concurrent lookups
            let handles: Vec<_> = (0..THREAD_COUNT)
                .map(|thread_id| {
                    let cache = cache.clone();
                    thread::spawn(move || {
                        for i in 0..LOOKUPS_PER_THREAD {
                            let idx = (thread_id * LOOKUPS_PER_THREAD + i) % TABLE_COUNT;
                            let _ = cache.exists(&table(idx), CheckOptions::default());
                        }
                    })
                })
                .collect();

            // Wait for all threads to complete
            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
}

// Export the benchmark group for criterion
criterion_group!(
    benches,
    bench_cached_hits,
    bench_bypass_lookups,
    bench_concurrent_lookups
);

// Only run the benchmark group when this file is executed directly
criterion_main!(benches);
