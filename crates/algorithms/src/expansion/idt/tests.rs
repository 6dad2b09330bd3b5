use congraph_utils::graph;

use super::{DegreeHistogram, IdtConfig, IdtError, IdtExpansion};
use crate::expansion::expander::PropertyGraphExpander;

fn config(delay_iterations: usize, overlap_threshold: f64) -> IdtConfig {
    IdtConfig {
        delay_iterations,
        overlap_threshold,
    }
}

#[test]
fn fewer_than_two_seeds_is_a_construction_error() {
    let fixture = graph!(undirected; [a, b], [a - b]);

    for seeds in [vec![], vec!["a"]] {
        let expander = PropertyGraphExpander::new(&fixture);
        let report = IdtExpansion::new(expander, seeds.clone(), IdtConfig::default())
            .err()
            .expect("under two seeds");
        assert!(matches!(
            report.current_context(),
            IdtError::InsufficientSeeds { required: 2, actual } if *actual == seeds.len()
        ));
    }
}

#[test]
fn linear_chain_discovers_exactly_one_path() {
    let fixture = graph!(undirected; [a, b, c], [a - c, c - b]);
    let expander = PropertyGraphExpander::new(&fixture);

    let result = IdtExpansion::new(expander, ["a", "b"], config(5, 0.5))
        .unwrap()
        .run();

    assert_eq!(result.paths.len(), 1);
    let nodes = &result.paths[0].nodes;
    assert!(
        nodes == &["a", "c", "b"] || nodes == &["b", "c", "a"],
        "unexpected path {nodes:?}"
    );
    assert_eq!(result.sampled_nodes, vec!["a", "b", "c"]);
    assert!(result.stats.iterations <= 100);
}

#[test]
fn paths_connect_seed_to_seed_with_distinct_nodes() {
    let fixture = graph!(
        undirected;
        [a, b, c, d, e, f],
        [a - c, c - e, e - b, a - d, d - f, f - b]
    );
    let expander = PropertyGraphExpander::new(&fixture);

    let result = IdtExpansion::new(expander, ["a", "b"], config(10, 0.5))
        .unwrap()
        .run();

    for path in &result.paths {
        let first = path.nodes.first().unwrap();
        let last = path.nodes.last().unwrap();
        assert!(["a", "b"].contains(&first.as_str()));
        assert!(["a", "b"].contains(&last.as_str()));
        assert_ne!(first, last);

        let mut unique = path.nodes.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), path.nodes.len(), "repeated node in path");
    }
}

#[test]
fn equal_length_meets_deduplicate_by_signature() {
    // two parallel length-3 routes between the seeds
    let fixture = graph!(undirected; [a, b, c, d], [a - b, b - d, a - c, c - d]);
    let expander = PropertyGraphExpander::new(&fixture);

    let result = IdtExpansion::new(expander, ["a", "d"], config(10, 0.5))
        .unwrap()
        .run();

    assert_eq!(result.paths.len(), 1);
}

#[test]
fn disconnected_components_exhaust_without_paths() {
    let fixture = graph!(undirected; [a, b, c, d], [a - c, b - d]);
    let expander = PropertyGraphExpander::new(&fixture);

    let result = IdtExpansion::new(expander, ["a", "b"], IdtConfig::default())
        .unwrap()
        .run();

    assert!(result.paths.is_empty());
    assert_eq!(result.sampled_nodes, vec!["a", "b", "c", "d"]);
    assert_eq!(result.visited[0], vec!["a", "c"]);
    assert_eq!(result.visited[1], vec!["b", "d"]);
}

#[test]
fn absent_seeds_yield_no_paths() {
    let fixture = graph!(undirected; [a, b], [a - b]);
    let expander = PropertyGraphExpander::new(&fixture);

    let result = IdtExpansion::new(expander, ["x", "y"], IdtConfig::default())
        .unwrap()
        .run();

    assert!(result.paths.is_empty());
    assert!(result.sampled_edges.is_empty());
}

#[test]
fn zero_delay_terminates_on_overlap() {
    let fixture = graph!(undirected; [a, b, c, d], [a - b, a - c, a - d, b - c, b - d, c - d]);
    let expander = PropertyGraphExpander::new(&fixture);

    // any visited intersection counts as overlap, and no grace iterations
    let result = IdtExpansion::new(expander, ["a", "b"], config(0, 0.0))
        .unwrap()
        .run();

    assert_eq!(result.stats.iterations, 1);
    assert_eq!(result.stats.nodes_expanded, 1);
}

#[test]
fn sampled_edges_reach_the_expander_sink() {
    let fixture = graph!(undirected; [a, b, c], [a - c, c - b]);
    let mut expander = PropertyGraphExpander::new(&fixture);

    let result = IdtExpansion::new(&mut expander, ["a", "b"], IdtConfig::default())
        .unwrap()
        .run();

    assert_eq!(expander.sampled().len(), result.sampled_edges.len());
    for (recorded, edge) in expander.sampled().iter().zip(&result.sampled_edges) {
        assert_eq!(recorded.0, edge.source);
        assert_eq!(recorded.1, edge.target);
        assert_eq!(recorded.2, edge.relationship);
    }
    assert!(!result.sampled_edges.is_empty());
}

#[test]
fn degree_histogram_buckets() {
    let mut histogram = DegreeHistogram::default();
    for degree in [1.0, 5.0, 6.0, 10.0, 11.0, 50.0, 51.0, 100.0, 101.0, 500.0, 501.0, 1000.0, 1001.0] {
        histogram.record(degree);
    }

    assert_eq!(histogram.counts(), &[2, 2, 2, 2, 2, 2, 1]);
    assert_eq!(DegreeHistogram::LABELS.len(), histogram.counts().len());
}

#[test]
fn out_of_range_overlap_threshold_falls_back() {
    let fixture = graph!(undirected; [a, b, c], [a - c, c - b]);
    let expander = PropertyGraphExpander::new(&fixture);

    // a threshold above one can never trigger; the default applies instead
    let result = IdtExpansion::new(expander, ["a", "b"], config(5, 7.0))
        .unwrap()
        .run();

    assert_eq!(result.paths.len(), 1);
}
