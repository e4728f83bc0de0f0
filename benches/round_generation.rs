//! Performance benchmarks for round generation and headless sessions
//!
//! 1. **generate** - one round of each variant at each difficulty band
//! 2. **session** - a full five-round session with the perfect controller

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use owl_math::{
    core::Variant,
    game::{EngineConfig, GameEngine, PerfectController, SessionRunner},
    rounds::generate_round,
};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for variant in Variant::ALL {
        for round_number in [1, 3, 5] {
            let id = BenchmarkId::new(variant.activity_id(), round_number);
            group.bench_with_input(id, &round_number, |b, &round_number| {
                let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
                b.iter(|| generate_round(variant, black_box(round_number), &mut rng));
            });
        }
    }
    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    for variant in Variant::ALL {
        group.bench_function(variant.activity_id(), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                let mut engine = GameEngine::with_source(
                    variant,
                    EngineConfig::default(),
                    Box::new(Xoshiro256PlusPlus::seed_from_u64(seed)),
                );
                let mut controller = PerfectController::new();
                let result = SessionRunner::new(&mut engine).run_headless(&mut controller);
                black_box(result.score)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_session);
criterion_main!(benches);
