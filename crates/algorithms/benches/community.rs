use congraph_algorithms::{
    clustering::{hierarchical_clustering, spectral_partition, Linkage, SpectralOptions},
    community::{leiden, louvain, LeidenOptions, LouvainOptions},
};
use congraph_core::DefaultWeight;
use congraph_generators::planted_bipartition;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn community_detection(c: &mut Criterion) {
    let graph = planted_bipartition(100, 0.2, 0.01, 7);

    c.bench_function("louvain/planted_200", |b| {
        b.iter(|| {
            louvain(
                black_box(&graph),
                &DefaultWeight,
                LouvainOptions {
                    seed: Some(1),
                    ..LouvainOptions::default()
                },
            )
        });
    });

    c.bench_function("leiden/planted_200", |b| {
        b.iter(|| leiden(black_box(&graph), &DefaultWeight, LeidenOptions::default()));
    });
}

fn clustering(c: &mut Criterion) {
    let graph = planted_bipartition(40, 0.3, 0.02, 11);

    c.bench_function("hierarchical/planted_80", |b| {
        b.iter(|| hierarchical_clustering(black_box(&graph), Linkage::Average));
    });

    c.bench_function("spectral/planted_80", |b| {
        b.iter(|| {
            spectral_partition(
                black_box(&graph),
                &DefaultWeight,
                2,
                SpectralOptions {
                    seed: Some(3),
                    ..SpectralOptions::default()
                },
            )
        });
    });
}

criterion_group!(benches, community_detection, clustering);
criterion_main!(benches);
