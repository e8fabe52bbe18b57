use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

use kbcore::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Long chain `0 <- 1 <- ... <- n` whose base is submitted last.
fn build_chain(length: u32) -> KnowledgeBase<u32, ()> {
    let mut kb = KnowledgeBase::new();
    for theorem in 1..=length {
        kb.add_derivation(theorem, (), [theorem - 1]).unwrap();
    }
    kb
}

/// Random derivations over `theorems` theorems, roughly a tenth of them axioms.
fn random_derivations(theorems: u32, derivations: usize) -> Vec<(u32, Vec<u32>)> {
    let mut rng = ChaCha20Rng::seed_from_u64(0x42);
    (0..derivations)
        .map(|_| {
            let theorem = rng.random_range(0..theorems);
            let arity = if rng.random_bool(0.1) {
                0
            } else {
                rng.random_range(1..=4)
            };
            let assumptions = (0..arity).map(|_| rng.random_range(0..theorems)).collect();
            (theorem, assumptions)
        })
        .collect()
}

fn bench_chain_cascade(c: &mut Criterion) {
    c.bench_function("chain_cascade_10k", |b| {
        b.iter_batched(
            || build_chain(10_000),
            |mut kb| black_box(kb.add_derivation(0, (), []).unwrap().len()),
            BatchSize::LargeInput,
        )
    });
}

fn bench_random_batch(c: &mut Criterion) {
    let derivations = random_derivations(5_000, 40_000);
    c.bench_function("random_batch_40k", |b| {
        b.iter(|| {
            let mut kb = KnowledgeBase::with_create_info(KnowledgeBaseCreateInfo {
                initial_capacity: derivations.len(),
                ..Default::default()
            });
            for (theorem, assumptions) in &derivations {
                kb.add_derivation(*theorem, (), assumptions.iter().copied())
                    .unwrap();
            }
            black_box(kb.stats())
        })
    });
}

criterion_group!(benches, bench_chain_cascade, bench_random_batch);
criterion_main!(benches);
