use congraph_utils::graph;

use super::{hierarchical_clustering, HierarchicalError, Linkage};

fn sorted(mut clusters: Vec<Vec<String>>) -> Vec<Vec<String>> {
    for cluster in &mut clusters {
        cluster.sort_unstable();
    }
    clusters.sort_unstable();
    clusters
}

#[test]
fn empty_graph_is_rejected() {
    let graph: congraph_core::PropertyGraph<(), ()> = graph!(undirected; [], []);

    let report = hierarchical_clustering(&graph, Linkage::default()).expect_err("no nodes");
    assert!(matches!(
        report.current_context(),
        HierarchicalError::EmptyGraph
    ));
}

#[test]
fn single_node_is_trivial() {
    let graph: congraph_core::PropertyGraph<(), ()> = graph!(undirected; [a], []);

    let clustering = hierarchical_clustering(&graph, Linkage::default()).unwrap();
    assert!(clustering.dendrogram.merges().is_empty());
    assert_eq!(clustering.dendrogram.clusters(1), vec![vec!["a".to_owned()]]);
}

#[test]
fn line_merges_adjacent_nodes_first() {
    let graph = graph!(undirected; [a, b, c], [a - b, b - c]);

    let clustering = hierarchical_clustering(&graph, Linkage::Average).unwrap();
    let merges = clustering.dendrogram.merges();

    assert_eq!(merges.len(), 2);
    assert_eq!(merges[0].distance, 0.0);
    // ties broken by lower first index: (a, b) merges before (b, c)
    assert_eq!((merges[0].left, merges[0].right), (0, 1));

    let two = sorted(clustering.dendrogram.clusters(2));
    assert_eq!(two, vec![
        vec!["a".to_owned(), "b".to_owned()],
        vec!["c".to_owned()],
    ]);
}

#[test]
fn heights_are_non_decreasing() {
    let graph = graph!(undirected; [a, b, c, d, e], [a - b, b - c, c - d, d - e]);

    for linkage in [Linkage::Single, Linkage::Complete, Linkage::Average] {
        let clustering = hierarchical_clustering(&graph, linkage).unwrap();
        let merges = clustering.dendrogram.merges();

        assert_eq!(merges.len(), 4);
        for window in merges.windows(2) {
            assert!(window[0].distance <= window[1].distance);
        }
    }
}

#[test]
fn merge_sizes_add_up() {
    let graph = graph!(undirected; [a, b, c, d], [a - b, c - d]);

    let clustering = hierarchical_clustering(&graph, Linkage::Average).unwrap();
    let dendrogram = &clustering.dendrogram;

    for (step, merge) in dendrogram.merges().iter().enumerate() {
        let left = dendrogram.cluster_size(merge.left).unwrap();
        let right = dendrogram.cluster_size(merge.right).unwrap();
        assert_eq!(merge.size, left + right);
        assert_eq!(dendrogram.cluster_size(4 + step), Some(merge.size));
    }
}

#[test]
fn star_collapses_at_height_zero_with_single_linkage() {
    let graph = graph!(
        undirected;
        [hub, l1, l2, l3, l4, l5],
        [hub - l1, hub - l2, hub - l3, hub - l4, hub - l5]
    );

    let clustering = hierarchical_clustering(&graph, Linkage::Single).unwrap();
    let merges = clustering.dendrogram.merges();

    // every leaf joins the hub's cluster at distance zero
    assert!(merges.iter().all(|merge| merge.distance == 0.0));

    let cut = clustering.dendrogram.cut_at_height(0.0);
    assert_eq!(cut.len(), 1);
    assert_eq!(cut[0].len(), 6);
}

#[test]
fn star_grows_around_the_hub_with_average_linkage() {
    let graph = graph!(
        undirected;
        [hub, l1, l2, l3, l4, l5],
        [hub - l1, hub - l2, hub - l3, hub - l4, hub - l5]
    );

    let clustering = hierarchical_clustering(&graph, Linkage::Average).unwrap();
    let merges = clustering.dendrogram.merges();

    // the hub cluster absorbs one leaf per step; leaves never pair up
    let sizes: Vec<usize> = merges.iter().map(|merge| merge.size).collect();
    assert_eq!(sizes, vec![2, 3, 4, 5, 6]);
    assert_eq!(merges[0].distance, 0.0);
}

#[test]
fn exact_k_boundaries() {
    let graph = graph!(undirected; [a, b, c, d], [a - b, b - c, c - d]);

    let dendrogram = hierarchical_clustering(&graph, Linkage::Average)
        .unwrap()
        .dendrogram;

    assert!(dendrogram.clusters(0).is_empty());
    assert_eq!(dendrogram.clusters(1).len(), 1);
    assert_eq!(dendrogram.clusters(3).len(), 3);
    assert_eq!(dendrogram.clusters(4).len(), 4);
    // k beyond the merge range degenerates to singletons
    assert_eq!(dendrogram.clusters(9).len(), 4);
}

#[test]
fn cut_above_every_height_yields_one_cluster() {
    let graph = graph!(undirected; [a, b, c, d], [a - b]);

    let dendrogram = hierarchical_clustering(&graph, Linkage::Complete)
        .unwrap()
        .dendrogram;

    let forest = dendrogram.cut_at_height(1.0);
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].len(), 4);
}
