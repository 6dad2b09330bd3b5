//! The neighbor-retrieval seam consumed by IDT.

use congraph_core::{Node, PropertyGraph};

/// Abstracts the graph IDT expands over.
///
/// Implementations may be backed by anything from an in-memory graph to a
/// remote store: [`neighbors`](Self::neighbors) takes `&mut self` so an
/// implementation is free to block on I/O and cache results. The expansion
/// loop issues one retrieval at a time and never overlaps them.
///
/// [`add_edge`](Self::add_edge) is the sampled-subgraph sink: the
/// expansion calls it for every edge it traverses, and the implementation
/// owns whatever accumulates there.
pub trait GraphExpander {
    /// Property-bag type of the nodes behind this expander.
    type NodeProperties;

    /// Phase-1 expansion priority of a node, typically its degree.
    fn priority(&self, id: &str) -> f64;

    /// Degree of a node; `0.0` for an unknown identifier.
    fn degree(&self, id: &str) -> f64;

    /// Outgoing neighbors as `(target, relationship type)` pairs. An
    /// unknown identifier yields no neighbors.
    fn neighbors(&mut self, id: &str) -> Vec<(String, String)>;

    /// Looks up a node.
    fn node(&self, id: &str) -> Option<Node<Self::NodeProperties>>;

    /// Records a traversed edge into the caller-owned sampled subgraph.
    fn add_edge(&mut self, source: &str, target: &str, relationship: &str);
}

impl<X: GraphExpander + ?Sized> GraphExpander for &mut X {
    type NodeProperties = X::NodeProperties;

    fn priority(&self, id: &str) -> f64 {
        (**self).priority(id)
    }

    fn degree(&self, id: &str) -> f64 {
        (**self).degree(id)
    }

    fn neighbors(&mut self, id: &str) -> Vec<(String, String)> {
        (**self).neighbors(id)
    }

    fn node(&self, id: &str) -> Option<Node<Self::NodeProperties>> {
        (**self).node(id)
    }

    fn add_edge(&mut self, source: &str, target: &str, relationship: &str) {
        (**self).add_edge(source, target, relationship);
    }
}

/// A [`GraphExpander`] over an in-memory [`PropertyGraph`].
///
/// Degree and priority are the neighbor count; the sampled subgraph
/// accumulates as `(source, target, relationship)` triples.
pub struct PropertyGraphExpander<'graph, NP, EP> {
    graph: &'graph PropertyGraph<NP, EP>,
    sampled: Vec<(String, String, String)>,
}

impl<'graph, NP, EP> PropertyGraphExpander<'graph, NP, EP> {
    /// Wraps a graph reference.
    pub fn new(graph: &'graph PropertyGraph<NP, EP>) -> Self {
        Self {
            graph,
            sampled: Vec::new(),
        }
    }

    /// The edges recorded through [`GraphExpander::add_edge`] so far.
    #[must_use]
    pub fn sampled(&self) -> &[(String, String, String)] {
        &self.sampled
    }
}

impl<NP: Clone, EP> GraphExpander for PropertyGraphExpander<'_, NP, EP> {
    type NodeProperties = NP;

    fn priority(&self, id: &str) -> f64 {
        self.degree(id)
    }

    #[allow(clippy::cast_precision_loss)]
    fn degree(&self, id: &str) -> f64 {
        self.graph
            .neighbors(id)
            .map_or(0.0, |neighbors| neighbors.len() as f64)
    }

    fn neighbors(&mut self, id: &str) -> Vec<(String, String)> {
        let Ok(edges) = self.graph.outgoing_edges(id) else {
            return Vec::new();
        };

        edges
            .into_iter()
            .map(|edge| {
                let target = if self.graph.is_directed() {
                    edge.target()
                } else {
                    edge.other_endpoint(id)
                };
                (target.to_owned(), edge.ty().to_owned())
            })
            .collect()
    }

    fn node(&self, id: &str) -> Option<Node<Self::NodeProperties>> {
        self.graph.node(id).cloned()
    }

    fn add_edge(&mut self, source: &str, target: &str, relationship: &str) {
        self.sampled
            .push((source.to_owned(), target.to_owned(), relationship.to_owned()));
    }
}
