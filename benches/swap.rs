//! Benchmarks for the swap ledger.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- settlement
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use swap_market::{InMemoryRegistry, ItemRef, SwapLedger};

const MARKET: u64 = 9;

// ============================================================================
// HELPER FUNCTIONS - Deterministic registry setup
// ============================================================================

/// Mint `pairs` request/offer item pairs, approved for the market.
///
/// Item `2i + 1` belongs to account 100 and item `2i + 2` to account 200.
fn populated_registry(pairs: u64) -> InMemoryRegistry {
    let mut registry = InMemoryRegistry::new();
    for i in 0..pairs {
        let (wanted, offered) = pair(i);
        registry.mint(wanted, 100).unwrap();
        registry.mint(offered, 200).unwrap();
        registry.approve(100, wanted, MARKET).unwrap();
        registry.approve(200, offered, MARKET).unwrap();
    }
    registry
}

fn pair(i: u64) -> (ItemRef, ItemRef) {
    (ItemRef::new(1, 2 * i + 1), ItemRef::new(1, 2 * i + 2))
}

/// Ledger with a request and a matching offer for every pair
fn posted_ledger(registry: &InMemoryRegistry, pairs: u64) -> SwapLedger {
    let mut ledger = SwapLedger::with_capacity(MARKET, pairs as usize);
    for i in 0..pairs {
        let (wanted, offered) = pair(i);
        ledger.add_request(registry, wanted, 100).unwrap();
        ledger.add_offer(registry, wanted, offered, 200).unwrap();
    }
    ledger
}

// ============================================================================
// BENCHMARK: Request / Offer Operations
// ============================================================================

fn bench_book_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("book_operations");

    group.measurement_time(Duration::from_secs(5));

    let registry = populated_registry(1_000);

    group.bench_function("add_request_to_1k_book", |b| {
        b.iter_batched(
            || {
                let mut ledger = SwapLedger::with_capacity(MARKET, 1_000);
                for i in 1..1_000 {
                    ledger.add_request(&registry, pair(i).0, 100).unwrap();
                }
                ledger
            },
            |mut ledger| black_box(ledger.add_request(&registry, pair(0).0, 100)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("remove_request_with_offer", |b| {
        b.iter_batched(
            || posted_ledger(&registry, 1_000),
            |mut ledger| black_box(ledger.remove_request(&registry, pair(500).0, 100)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("add_then_remove_offer", |b| {
        let mut ledger = SwapLedger::with_capacity(MARKET, 16);
        let (wanted, offered) = pair(0);
        ledger.add_request(&registry, wanted, 100).unwrap();

        b.iter(|| {
            ledger.add_offer(&registry, wanted, offered, 200).unwrap();
            black_box(ledger.remove_offer(&registry, offered, 200)).unwrap();
        });
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Settlement
// ============================================================================

fn bench_settlement(c: &mut Criterion) {
    let mut group = c.benchmark_group("settlement");

    group.measurement_time(Duration::from_secs(10));
    group.sample_size(50);

    for pairs in [100u64, 1_000, 10_000] {
        group.throughput(Throughput::Elements(pairs));

        group.bench_with_input(BenchmarkId::new("swaps", pairs), &pairs, |b, &pairs| {
            let registry = populated_registry(pairs);

            b.iter_batched(
                || {
                    let ledger = posted_ledger(&registry, pairs);
                    (registry.clone(), ledger)
                },
                |(mut registry, mut ledger)| {
                    for i in 0..pairs {
                        let (wanted, offered) = pair(i);
                        black_box(ledger.swap(&mut registry, wanted, offered)).unwrap();
                    }
                    ledger.swaps_completed()
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: State Root
// ============================================================================

fn bench_state_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("state_root");

    group.measurement_time(Duration::from_secs(5));

    let registry = populated_registry(10_000);
    let ledger = posted_ledger(&registry, 10_000);

    group.bench_function("10k_requests_10k_offers", |b| {
        b.iter(|| black_box(ledger.compute_state_root()));
    });

    group.finish();
}

// ============================================================================
// CRITERION ENTRY POINT
// ============================================================================

criterion_group!(benches, bench_book_operations, bench_settlement, bench_state_root);

criterion_main!(benches);
