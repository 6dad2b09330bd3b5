//! End-to-end scenarios over the public facade.

use congraph::{
    clustering::{
        hierarchical_clustering, spectral_partition, HierarchicalError, Linkage, SpectralError,
        SpectralOptions,
    },
    community::{
        conductance, density, leiden, louvain, modularity, CommunityError, LeidenOptions,
        LouvainOptions,
    },
    expansion::{IdtConfig, IdtError, IdtExpansion, PropertyGraphExpander},
    DefaultWeight,
};
use congraph_utils::graph;

fn two_triangle_bridge() -> congraph::PropertyGraph {
    graph!(
        undirected;
        [a, b, c, d, e, f],
        [a - b, b - c, c - a, d - e, e - f, d - f, c - d]
    )
}

#[test]
fn empty_graph_is_rejected_everywhere() {
    let empty: congraph::PropertyGraph = graph!(undirected; [], []);

    let report = louvain(&empty, &DefaultWeight, LouvainOptions::default()).expect_err("empty");
    assert!(matches!(report.current_context(), CommunityError::EmptyGraph));

    let report = leiden(&empty, &DefaultWeight, LeidenOptions::default()).expect_err("empty");
    assert!(matches!(report.current_context(), CommunityError::EmptyGraph));

    let report = hierarchical_clustering(&empty, Linkage::default()).expect_err("empty");
    assert!(matches!(report.current_context(), HierarchicalError::EmptyGraph));

    let report =
        spectral_partition(&empty, &DefaultWeight, 2, SpectralOptions::default()).expect_err("empty");
    assert!(matches!(report.current_context(), SpectralError::EmptyGraph));

    let expander = PropertyGraphExpander::new(&empty);
    let report = IdtExpansion::new(expander, ["only"], IdtConfig::default())
        .err()
        .expect("one seed");
    assert!(matches!(
        report.current_context(),
        IdtError::InsufficientSeeds { required: 2, actual: 1 }
    ));

    // both seeds absent: construction succeeds, expansion finds nothing
    let expander = PropertyGraphExpander::new(&empty);
    let result = IdtExpansion::new(expander, ["x", "y"], IdtConfig::default())
        .expect("two seeds")
        .run();
    assert!(result.paths.is_empty());
}

#[test]
fn two_triangle_bridge_agrees_across_algorithms() {
    let fixture = two_triangle_bridge();
    let expected = [
        vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
        vec!["d".to_owned(), "e".to_owned(), "f".to_owned()],
    ];

    let louvain_report = louvain(
        &fixture,
        &DefaultWeight,
        LouvainOptions {
            seed: Some(42),
            ..LouvainOptions::default()
        },
    )
    .unwrap();
    let mut louvain_sets: Vec<Vec<String>> = louvain_report
        .communities
        .iter()
        .map(|community| community.members.clone())
        .collect();
    louvain_sets.sort_unstable();
    assert_eq!(louvain_sets, expected);
    assert!(louvain_report.modularity > 0.0);

    let leiden_report = leiden(&fixture, &DefaultWeight, LeidenOptions::default()).unwrap();
    let mut leiden_sets: Vec<Vec<String>> = leiden_report
        .communities
        .iter()
        .map(|community| community.members.clone())
        .collect();
    leiden_sets.sort_unstable();
    assert_eq!(leiden_sets, expected);
    assert!(leiden_report.metrics.modularity > 0.0);

    let partitions = spectral_partition(
        &fixture,
        &DefaultWeight,
        2,
        SpectralOptions {
            seed: Some(7),
            ..SpectralOptions::default()
        },
    )
    .unwrap();
    let mut spectral_sets: Vec<Vec<String>> = partitions
        .iter()
        .map(|partition| partition.members.clone())
        .collect();
    spectral_sets.sort_unstable();
    assert_eq!(spectral_sets, expected);

    // a single bridge edge crosses the cut
    let total_cut: f64 = partitions
        .iter()
        .map(|partition| partition.boundary_weight)
        .sum();
    assert_eq!(total_cut / 2.0, 1.0);
}

#[test]
fn star_clusters_collapse_onto_the_hub() {
    let star = graph!(
        undirected;
        [hub, l1, l2, l3, l4, l5],
        [hub - l1, hub - l2, hub - l3, hub - l4, hub - l5]
    );

    // leaves only ever join the hub's growing cluster
    let average = hierarchical_clustering(&star, Linkage::Average).unwrap();
    let sizes: Vec<usize> = average
        .dendrogram
        .merges()
        .iter()
        .map(|merge| merge.size)
        .collect();
    assert_eq!(sizes, vec![2, 3, 4, 5, 6]);
    assert_eq!(average.dendrogram.merges()[0].distance, 0.0);

    let single = hierarchical_clustering(&star, Linkage::Single).unwrap();
    let forest = single.dendrogram.cut_at_height(0.0);
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].len(), 6);
}

#[test]
fn line_metrics() {
    let line = graph!(undirected; [a, b, c], [a - b, b - c]);
    let all = ["a", "b", "c"].map(str::to_owned).to_vec();
    let prefix = ["a", "b"].map(str::to_owned).to_vec();

    assert!((density(&line, &all) - 2.0 / 3.0).abs() < 1e-12);
    assert!((conductance(&line, &DefaultWeight, &prefix) - 0.5).abs() < 1e-12);
    assert_eq!(modularity(&line, &DefaultWeight, &[all]), 0.0);
}

#[test]
fn idt_connects_two_seeds_across_a_chain() {
    let chain = graph!(undirected; [a, c, b], [a - c, c - b]);
    let expander = PropertyGraphExpander::new(&chain);

    let config = IdtConfig {
        delay_iterations: 5,
        ..IdtConfig::default()
    };
    let result = IdtExpansion::new(expander, ["a", "b"], config)
        .expect("two seeds")
        .run();

    assert_eq!(result.paths.len(), 1);
    let nodes = &result.paths[0].nodes;
    assert!(nodes == &["a", "c", "b"] || nodes == &["b", "c", "a"]);
    assert_eq!(result.sampled_nodes, vec!["a", "b", "c"]);
    assert!(result.stats.iterations <= 100);
}

#[test]
fn idt_exhausts_disconnected_components_without_paths() {
    let split = graph!(undirected; [a, b, c, d], [a - c, b - d]);
    let expander = PropertyGraphExpander::new(&split);

    let result = IdtExpansion::new(expander, ["a", "b"], IdtConfig::default())
        .expect("two seeds")
        .run();

    assert!(result.paths.is_empty());
    assert_eq!(result.sampled_nodes, vec!["a", "b", "c", "d"]);
    assert_eq!(result.visited[0].len(), 2);
    assert_eq!(result.visited[1].len(), 2);
}

#[test]
fn spectral_balances_a_path_of_eight() {
    let path = graph!(
        undirected;
        [a, b, c, d, e, f, g, h],
        [a - b, b - c, c - d, d - e, e - f, f - g, g - h]
    );

    let partitions = spectral_partition(
        &path,
        &DefaultWeight,
        2,
        SpectralOptions {
            seed: Some(19),
            ..SpectralOptions::default()
        },
    )
    .unwrap();

    let mut sizes: Vec<usize> = partitions.iter().map(|partition| partition.size).collect();
    sizes.sort_unstable();

    assert_eq!(sizes.iter().sum::<usize>(), 8);
    assert!(
        sizes == vec![4, 4] || sizes == vec![3, 5],
        "unexpected split {sizes:?}"
    );
}
