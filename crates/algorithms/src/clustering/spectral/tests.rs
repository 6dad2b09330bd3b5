use congraph_core::DefaultWeight;
use congraph_utils::graph;

use super::{spectral_partition, SpectralError, SpectralOptions};

fn seeded(seed: u64) -> SpectralOptions {
    SpectralOptions {
        seed: Some(seed),
        ..SpectralOptions::default()
    }
}

#[test]
fn empty_graph_is_rejected() {
    let graph: congraph_core::PropertyGraph<(), ()> = graph!(undirected; [], []);

    let report =
        spectral_partition(&graph, &DefaultWeight, 2, SpectralOptions::default()).expect_err("no nodes");
    assert!(matches!(report.current_context(), SpectralError::EmptyGraph));
}

#[test]
fn partition_count_bounds_are_validated() {
    let graph = graph!(undirected; [a, b, c], [a - b, b - c]);

    let too_few = spectral_partition(&graph, &DefaultWeight, 1, SpectralOptions::default())
        .expect_err("k < 2");
    assert!(matches!(
        too_few.current_context(),
        SpectralError::InvalidPartitionCount { k: 1, node_count: 3 }
    ));

    let too_many = spectral_partition(&graph, &DefaultWeight, 4, SpectralOptions::default())
        .expect_err("k > n");
    assert!(matches!(
        too_many.current_context(),
        SpectralError::InvalidPartitionCount { k: 4, node_count: 3 }
    ));
}

#[test]
fn two_triangle_bridge_splits_on_the_bridge() {
    let graph = graph!(
        undirected;
        [a, b, c, d, e, f],
        [a - b, b - c, c - a, d - e, e - f, d - f, c - d]
    );

    let partitions = spectral_partition(&graph, &DefaultWeight, 2, seeded(7)).unwrap();

    let mut sides: Vec<Vec<String>> = partitions
        .iter()
        .map(|partition| partition.members.clone())
        .collect();
    sides.sort_unstable();

    assert_eq!(sides[0], vec!["a", "b", "c"]);
    assert_eq!(sides[1], vec!["d", "e", "f"]);

    // the only crossing edge is the bridge
    for partition in &partitions {
        assert_eq!(partition.boundary_weight, 1.0);
        assert_eq!(partition.size, 3);
    }
}

#[test]
fn path_of_eight_is_balanced() {
    let graph = graph!(
        undirected;
        [a, b, c, d, e, f, g, h],
        [a - b, b - c, c - d, d - e, e - f, f - g, g - h]
    );

    let partitions = spectral_partition(&graph, &DefaultWeight, 2, seeded(7)).unwrap();

    let mut sizes: Vec<usize> = partitions.iter().map(|partition| partition.size).collect();
    sizes.sort_unstable();

    assert_eq!(sizes.iter().sum::<usize>(), 8);
    assert!(sizes[1] <= 5, "larger side has {} nodes", sizes[1]);

    let mut members: Vec<String> = partitions
        .iter()
        .flat_map(|partition| partition.members.clone())
        .collect();
    members.sort_unstable();
    assert_eq!(members.len(), 8);
    members.dedup();
    assert_eq!(members.len(), 8, "partitions overlap");
}

#[test]
fn balance_ratio_tracks_size() {
    let graph = graph!(
        undirected;
        [a, b, c, d, e, f],
        [a - b, b - c, c - a, d - e, e - f, d - f, c - d]
    );

    let partitions = spectral_partition(&graph, &DefaultWeight, 3, seeded(13)).unwrap();

    #[allow(clippy::cast_precision_loss)]
    for partition in &partitions {
        assert_eq!(partition.balance_ratio, partition.size as f64 / 2.0);
    }
}

#[test]
fn weights_steer_the_boundary_sweep() {
    let graph = graph!(undirected; [a, b, c, d], [a - b: 4.0, c - d: 4.0, b - c: 0.5]);

    let partitions = spectral_partition(&graph, &DefaultWeight, 2, seeded(5)).unwrap();

    let total: f64 = partitions
        .iter()
        .map(|partition| partition.boundary_weight)
        .sum();
    // every crossing edge is counted once per side
    assert!(total >= 0.0);
    let members: usize = partitions.iter().map(|partition| partition.size).sum();
    assert_eq!(members, 4);
}
