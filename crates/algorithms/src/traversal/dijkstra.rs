//! Dijkstra shortest paths over the weight function.

use core::fmt::{Display, Formatter};

use congraph_core::{EdgeWeight, PropertyGraph};
use error_stack::{Context, Report, Result};

use crate::{expansion::queue::MinPriorityQueue, FxHashMap, FxHashSet};

/// Errors of [`dijkstra`].
#[derive(Debug)]
pub enum DijkstraError {
    /// The start node is not part of the graph.
    NodeNotFound {
        /// The unknown identifier.
        id: String,
    },
    /// The weight function returned a negative weight, which Dijkstra
    /// cannot process.
    NegativeWeight {
        /// Source endpoint of the offending edge.
        source: String,
        /// Target endpoint of the offending edge.
        target: String,
        /// The returned weight.
        weight: f64,
    },
}

impl Display for DijkstraError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NodeNotFound { id } => write!(f, "node `{id}` does not exist"),
            Self::NegativeWeight {
                source,
                target,
                weight,
            } => {
                write!(f, "edge `{source}` -> `{target}` has negative weight {weight}")
            }
        }
    }
}

impl Context for DijkstraError {}

/// Distances and predecessors computed by [`dijkstra`].
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    start: String,
    distances: FxHashMap<String, f64>,
    predecessors: FxHashMap<String, String>,
}

impl ShortestPaths {
    /// The start node of the computation.
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Distance from the start to `id`, if reachable.
    #[must_use]
    pub fn distance_to(&self, id: &str) -> Option<f64> {
        self.distances.get(id).copied()
    }

    /// The node sequence from the start to `id`, if reachable.
    #[must_use]
    pub fn path_to(&self, id: &str) -> Option<Vec<String>> {
        if !self.distances.contains_key(id) {
            return None;
        }

        let mut path = vec![id.to_owned()];
        let mut current = id;
        while let Some(previous) = self.predecessors.get(current) {
            path.push(previous.clone());
            current = previous;
        }
        path.reverse();
        Some(path)
    }
}

/// Computes shortest path distances from `start` to every reachable node,
/// stopping early once `goal` is settled.
///
/// Weights come from the weight function, never from the stored edge
/// weight directly.
///
/// # Errors
///
/// [`DijkstraError::NodeNotFound`] when `start` is unknown and
/// [`DijkstraError::NegativeWeight`] when the weight function produces a
/// negative value for a traversed edge.
///
/// # Example
///
/// ```
/// use congraph_algorithms::traversal::dijkstra;
/// use congraph_core::{DefaultWeight, Edge, Node, PropertyGraph};
///
/// let mut graph = PropertyGraph::directed();
/// for id in ["a", "b", "c"] {
///     graph.insert_node(Node::new(id, "node"));
/// }
/// graph.insert_edge(Edge::new("a", "b", "link").with_weight(1.0))?;
/// graph.insert_edge(Edge::new("b", "c", "link").with_weight(2.0))?;
/// graph.insert_edge(Edge::new("a", "c", "link").with_weight(9.0))?;
///
/// let paths = dijkstra(&graph, &DefaultWeight, "a", None).expect("start exists");
/// assert_eq!(paths.distance_to("c"), Some(3.0));
/// assert_eq!(paths.path_to("c").unwrap(), vec!["a", "b", "c"]);
/// # Ok::<(), error_stack::Report<congraph_core::GraphError>>(())
/// ```
pub fn dijkstra<NP, EP>(
    graph: &PropertyGraph<NP, EP>,
    weight: &impl EdgeWeight<NP, EP>,
    start: &str,
    goal: Option<&str>,
) -> Result<ShortestPaths, DijkstraError> {
    if !graph.contains_node(start) {
        return Err(Report::new(DijkstraError::NodeNotFound {
            id: start.to_owned(),
        }));
    }

    let mut distances: FxHashMap<String, f64> = FxHashMap::default();
    let mut predecessors: FxHashMap<String, String> = FxHashMap::default();
    let mut settled: FxHashSet<String> = FxHashSet::default();
    let mut queue = MinPriorityQueue::new();

    distances.insert(start.to_owned(), 0.0);
    queue.push(start.to_owned(), 0.0);

    while let Some(node) = queue.pop() {
        if !settled.insert(node.clone()) {
            continue;
        }
        if goal == Some(node.as_str()) {
            break;
        }

        let cost = distances[&node];
        let edges = graph
            .outgoing_edges(&node)
            .expect("settled nodes exist in the graph");

        for edge in edges {
            let neighbor = if graph.is_directed() {
                edge.target()
            } else {
                edge.other_endpoint(&node)
            };
            if settled.contains(neighbor) {
                continue;
            }

            let source = graph.node(edge.source()).expect("edge endpoints exist");
            let target = graph.node(edge.target()).expect("edge endpoints exist");
            let w = weight.weight(edge, source, target);
            if w < 0.0 {
                return Err(Report::new(DijkstraError::NegativeWeight {
                    source: edge.source().to_owned(),
                    target: edge.target().to_owned(),
                    weight: w,
                }));
            }

            let candidate = cost + w;
            let improved = distances
                .get(neighbor)
                .map_or(true, |&known| candidate < known);
            if improved {
                distances.insert(neighbor.to_owned(), candidate);
                predecessors.insert(neighbor.to_owned(), node.clone());
                queue.push(neighbor.to_owned(), candidate);
            }
        }
    }

    Ok(ShortestPaths {
        start: start.to_owned(),
        distances,
        predecessors,
    })
}
