//! Edge weight functions.

use crate::{edge::Edge, node::Node};

/// A pure function from an edge and its endpoints to a weight.
///
/// This is the single source of weight truth: no algorithm reads the stored
/// edge weight directly. Implementations must return a non-negative value
/// for the algorithms that require one (modularity optimization, spectral
/// partitioning); negative returns are undefined behavior on those paths.
///
/// Any closure `Fn(&Edge<EP>, &Node<NP>, &Node<NP>) -> f64` is an
/// [`EdgeWeight`], so ad-hoc weightings do not need a named type:
///
/// ```
/// use congraph_core::{Edge, EdgeWeight, Node};
///
/// let doubled = |edge: &Edge, _: &Node, _: &Node| edge.weight().unwrap_or(1.0) * 2.0;
/// let edge = Edge::new("a", "b", "cites").with_weight(3.0);
/// let (a, b) = (Node::new("a", "n"), Node::new("b", "n"));
/// assert_eq!(doubled.weight(&edge, &a, &b), 6.0);
/// ```
pub trait EdgeWeight<NP, EP> {
    /// Returns the weight of `edge` given both endpoint nodes.
    fn weight(&self, edge: &Edge<EP>, source: &Node<NP>, target: &Node<NP>) -> f64;
}

/// The default weighting: the stored edge weight, or `1.0` when absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultWeight;

impl<NP, EP> EdgeWeight<NP, EP> for DefaultWeight {
    fn weight(&self, edge: &Edge<EP>, _source: &Node<NP>, _target: &Node<NP>) -> f64 {
        edge.weight().unwrap_or(1.0)
    }
}

impl<NP, EP, F> EdgeWeight<NP, EP> for F
where
    F: Fn(&Edge<EP>, &Node<NP>, &Node<NP>) -> f64,
{
    fn weight(&self, edge: &Edge<EP>, source: &Node<NP>, target: &Node<NP>) -> f64 {
        self(edge, source, target)
    }
}
