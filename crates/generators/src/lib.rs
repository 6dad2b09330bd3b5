//! Classic graph generators.
//!
//! Collaborator module around the algorithm core: undirected fixture
//! graphs with `n{i}` node identifiers, built deterministically (the one
//! random generator takes an explicit seed).

use congraph_core::{Edge, Node, PropertyGraph};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn nodes(count: usize) -> PropertyGraph {
    let mut graph = PropertyGraph::undirected();
    for index in 0..count {
        graph.insert_node(Node::new(format!("n{index}"), "node"));
    }
    graph
}

fn link(graph: &mut PropertyGraph, source: usize, target: usize) {
    graph
        .insert_edge(Edge::new(format!("n{source}"), format!("n{target}"), "link"))
        .expect("generator endpoints exist");
}

/// A path of `n` nodes: `n0 - n1 - … - n{n-1}`.
#[must_use]
pub fn path_graph(n: usize) -> PropertyGraph {
    let mut graph = nodes(n);
    for index in 1..n {
        link(&mut graph, index - 1, index);
    }
    graph
}

/// A cycle of `n` nodes. For `n < 3` this degenerates to a path.
#[must_use]
pub fn cycle_graph(n: usize) -> PropertyGraph {
    let mut graph = path_graph(n);
    if n >= 3 {
        link(&mut graph, n - 1, 0);
    }
    graph
}

/// The complete graph on `n` nodes.
#[must_use]
pub fn complete_graph(n: usize) -> PropertyGraph {
    let mut graph = nodes(n);
    for source in 0..n {
        for target in (source + 1)..n {
            link(&mut graph, source, target);
        }
    }
    graph
}

/// A star: hub `n0` connected to `leaves` leaf nodes.
#[must_use]
pub fn star_graph(leaves: usize) -> PropertyGraph {
    let mut graph = nodes(leaves + 1);
    for leaf in 1..=leaves {
        link(&mut graph, 0, leaf);
    }
    graph
}

/// Two planted communities of `size` nodes each.
///
/// Node pairs inside a community are linked with probability `p_in`, pairs
/// across the two communities with probability `p_out`. The same seed
/// always yields the same graph.
#[must_use]
pub fn planted_bipartition(size: usize, p_in: f64, p_out: f64, seed: u64) -> PropertyGraph {
    let mut graph = nodes(size * 2);
    let mut rng = StdRng::seed_from_u64(seed);

    for source in 0..size * 2 {
        for target in (source + 1)..size * 2 {
            let same_side = (source < size) == (target < size);
            let probability = if same_side { p_in } else { p_out };
            if rng.gen_bool(probability) {
                link(&mut graph, source, target);
            }
        }
    }

    graph
}
