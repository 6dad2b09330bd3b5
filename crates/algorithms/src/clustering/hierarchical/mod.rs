//! Agglomerative hierarchical clustering.
//!
//! Distances start from adjacency (`1 − A_ij`, where `A_ij` is one when an
//! edge exists in either direction) and clusters merge greedily by
//! smallest pairwise distance, with the configured linkage rule updating
//! distances after each merge. The result is a [`Dendrogram`] answering
//! cut-at-height and exact-k queries.

mod dendrogram;
mod error;
#[cfg(test)]
mod tests;

use congraph_core::PropertyGraph;
use error_stack::{Report, Result};

pub use self::{
    dendrogram::{Dendrogram, Merge},
    error::HierarchicalError,
};
use crate::{FxHashMap, FxHashSet};

/// The cluster-distance update rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Linkage {
    /// Minimum over the merged pair's distances.
    Single,
    /// Maximum over the merged pair's distances.
    Complete,
    /// Size-weighted mean of the merged pair's distances.
    #[default]
    Average,
}

/// Metadata of a clustering run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HierarchicalMetadata {
    /// The linkage rule the dendrogram was built with.
    pub linkage: Linkage,
}

/// The result of [`hierarchical_clustering`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HierarchicalClustering {
    /// The merge tree.
    pub dendrogram: Dendrogram,
    /// Run metadata.
    pub metadata: HierarchicalMetadata,
}

fn pair(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

/// Runs agglomerative clustering with the given linkage.
///
/// # Errors
///
/// [`HierarchicalError::EmptyGraph`] when the graph has no nodes. A
/// single-node graph yields a trivial dendrogram with zero merges.
///
/// # Example
///
/// ```
/// use congraph_algorithms::clustering::{hierarchical_clustering, Linkage};
/// use congraph_core::{Edge, Node, PropertyGraph};
///
/// let mut graph = PropertyGraph::undirected();
/// for id in ["a", "b", "c"] {
///     graph.insert_node(Node::new(id, "node"));
/// }
/// graph.insert_edge(Edge::new("a", "b", "link"))?;
///
/// let clustering = hierarchical_clustering(&graph, Linkage::default())
///     .expect("graph is not empty");
/// assert_eq!(clustering.dendrogram.merges().len(), 2);
/// # Ok::<(), error_stack::Report<congraph_core::GraphError>>(())
/// ```
pub fn hierarchical_clustering<NP, EP>(
    graph: &PropertyGraph<NP, EP>,
    linkage: Linkage,
) -> Result<HierarchicalClustering, HierarchicalError> {
    let leaf_count = graph.node_count();
    if leaf_count == 0 {
        return Err(Report::new(HierarchicalError::EmptyGraph));
    }

    let leaves: Vec<String> = graph.nodes().map(|node| node.id().to_owned()).collect();
    let index_of: FxHashMap<&str, usize> = graph
        .nodes()
        .enumerate()
        .map(|(index, node)| (node.id(), index))
        .collect();

    // adjacency in either direction, self-loops ignored
    let mut adjacent: FxHashSet<(usize, usize)> = FxHashSet::default();
    for edge in graph.edges() {
        let u = index_of[edge.source()];
        let v = index_of[edge.target()];
        if u != v {
            adjacent.insert(pair(u, v));
        }
    }

    // upper-triangular distance matrix keyed by (min, max)
    let mut distances: FxHashMap<(usize, usize), f64> = FxHashMap::default();
    for a in 0..leaf_count {
        for b in (a + 1)..leaf_count {
            let distance = if adjacent.contains(&(a, b)) { 0.0 } else { 1.0 };
            distances.insert((a, b), distance);
        }
    }

    let mut active: Vec<usize> = (0..leaf_count).collect();
    let mut sizes: Vec<usize> = vec![1; leaf_count];
    let mut merges: Vec<Merge> = Vec::with_capacity(leaf_count.saturating_sub(1));

    for step in 0..leaf_count.saturating_sub(1) {
        // smallest pairwise distance, ties broken by lower first index
        let mut closest: Option<(usize, usize, f64)> = None;
        for (position, &a) in active.iter().enumerate() {
            for &b in &active[position + 1..] {
                let distance = distances[&pair(a, b)];
                if closest.map_or(true, |(_, _, best)| distance < best) {
                    closest = Some((a, b, distance));
                }
            }
        }
        let (left, right, distance) = closest.expect("at least two active clusters");

        let created = leaf_count + step;
        let size = sizes[left] + sizes[right];
        merges.push(Merge {
            left,
            right,
            distance,
            size,
        });
        sizes.push(size);

        for &other in &active {
            if other == left || other == right {
                continue;
            }
            let to_left = distances[&pair(left, other)];
            let to_right = distances[&pair(right, other)];
            #[allow(clippy::cast_precision_loss)]
            let updated = match linkage {
                Linkage::Single => to_left.min(to_right),
                Linkage::Complete => to_left.max(to_right),
                Linkage::Average => {
                    let (left_size, right_size) = (sizes[left] as f64, sizes[right] as f64);
                    (left_size * to_left + right_size * to_right) / (left_size + right_size)
                }
            };
            distances.insert(pair(created, other), updated);
        }

        active.retain(|&cluster| cluster != left && cluster != right);
        active.push(created);
    }

    Ok(HierarchicalClustering {
        dendrogram: Dendrogram::new(leaves, merges, sizes),
        metadata: HierarchicalMetadata { linkage },
    })
}
