//! Spectral graph partitioning.
//!
//! Embeds the graph with the `k` smallest eigenvectors of the symmetric
//! normalized Laplacian (directed inputs are symmetrized), clusters the
//! embedding with k-means++, then repairs gross size imbalance by moving
//! nodes from the largest partition to the smallest.

mod embedding;
mod error;
mod kmeans;
#[cfg(test)]
mod tests;

use congraph_core::{EdgeWeight, PropertyGraph};
use error_stack::{Report, Result};
use nalgebra::{DMatrix, DVector};
use rand::{rngs::StdRng, SeedableRng};

pub use self::error::SpectralError;
use self::{
    embedding::{normalized_laplacian, smallest_eigenvectors},
    kmeans::kmeans,
};
use crate::FxHashMap;

const MAX_BALANCE_MOVES: usize = 1000;

/// Options for [`spectral_partition`].
///
/// Invalid values fall back to the defaults.
#[derive(Debug, Clone)]
pub struct SpectralOptions {
    /// A partition may exceed the ideal size `n / k` by this factor before
    /// balance repair kicks in. Default `1.2`.
    pub balance_tolerance: f64,
    /// Cap on Lloyd iterations. Default `100`.
    pub max_kmeans_iterations: usize,
    /// Seed for the embedding start vectors and the first k-means center.
    /// Unseeded runs draw from entropy and are not bit-deterministic.
    pub seed: Option<u64>,
}

impl Default for SpectralOptions {
    fn default() -> Self {
        Self {
            balance_tolerance: 1.2,
            max_kmeans_iterations: 100,
            seed: None,
        }
    }
}

impl SpectralOptions {
    fn sanitized(mut self) -> Self {
        if !self.balance_tolerance.is_finite() || self.balance_tolerance < 1.0 {
            self.balance_tolerance = 1.2;
        }
        if self.max_kmeans_iterations == 0 {
            self.max_kmeans_iterations = 100;
        }
        self
    }
}

/// One partition of a spectral split.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partition {
    /// Partition identifier, dense from zero.
    pub id: usize,
    /// Member node identifiers, in graph order.
    pub members: Vec<String>,
    /// Number of members.
    pub size: usize,
    /// Total weight of edges crossing this partition's boundary.
    pub boundary_weight: f64,
    /// `size / (n / k)`.
    pub balance_ratio: f64,
}

/// Splits the graph into `k` partitions.
///
/// # Errors
///
/// [`SpectralError::EmptyGraph`] for a graph with no nodes and
/// [`SpectralError::InvalidPartitionCount`] when `k < 2` or
/// `k > node_count`.
pub fn spectral_partition<NP, EP>(
    graph: &PropertyGraph<NP, EP>,
    weight: &impl EdgeWeight<NP, EP>,
    k: usize,
    options: SpectralOptions,
) -> Result<Vec<Partition>, SpectralError> {
    let node_count = graph.node_count();
    if node_count == 0 {
        return Err(Report::new(SpectralError::EmptyGraph));
    }
    if k < 2 || k > node_count {
        return Err(Report::new(SpectralError::InvalidPartitionCount {
            k,
            node_count,
        }));
    }
    let options = options.sanitized();

    let ids: Vec<&str> = graph.nodes().map(|node| node.id()).collect();
    let index_of: FxHashMap<&str, usize> = ids
        .iter()
        .enumerate()
        .map(|(index, &id)| (id, index))
        .collect();

    // symmetric weighted adjacency; directed inputs contribute both
    // directions, a self-loop lands on the diagonal twice
    let mut adjacency = DMatrix::zeros(node_count, node_count);
    for edge in graph.edges() {
        let (Some(source), Some(target)) = (graph.node(edge.source()), graph.node(edge.target()))
        else {
            continue;
        };
        let w = weight.weight(edge, source, target);
        let u = index_of[edge.source()];
        let v = index_of[edge.target()];
        adjacency[(u, v)] += w;
        adjacency[(v, u)] += w;
    }

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let laplacian = normalized_laplacian(&adjacency);
    let vectors = smallest_eigenvectors(&laplacian, k, &mut rng);

    // node rows across the k eigenvectors
    let points: Vec<DVector<f64>> = (0..node_count)
        .map(|node| DVector::from_iterator(k, vectors.iter().map(|vector| vector[node])))
        .collect();

    let assignment = kmeans(&points, k, options.max_kmeans_iterations, &mut rng);

    let mut partitions: Vec<Vec<usize>> = vec![Vec::new(); k];
    for (node, &cluster) in assignment.iter().enumerate() {
        partitions[cluster].push(node);
    }

    #[allow(clippy::cast_precision_loss)]
    let ideal = node_count as f64 / k as f64;
    rebalance(&mut partitions, options.balance_tolerance * ideal);

    // final assignment for the boundary sweep
    let mut assignment = vec![0_usize; node_count];
    for (partition, members) in partitions.iter().enumerate() {
        for &node in members {
            assignment[node] = partition;
        }
    }

    let mut boundary = vec![0.0; k];
    for edge in graph.edges() {
        let (Some(source), Some(target)) = (graph.node(edge.source()), graph.node(edge.target()))
        else {
            continue;
        };
        let a = assignment[index_of[edge.source()]];
        let b = assignment[index_of[edge.target()]];
        if a != b {
            let w = weight.weight(edge, source, target);
            boundary[a] += w;
            boundary[b] += w;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    Ok(partitions
        .into_iter()
        .enumerate()
        .map(|(id, mut members)| {
            members.sort_unstable();
            Partition {
                id,
                members: members.iter().map(|&node| ids[node].to_owned()).collect(),
                size: members.len(),
                boundary_weight: boundary[id],
                balance_ratio: members.len() as f64 / ideal,
            }
        })
        .collect())
}

/// Moves one node at a time from the largest partition to the smallest
/// until the largest fits under `limit` or the move budget is spent. Any
/// node of the oversized partition is acceptable; selection is not
/// quality-guided.
fn rebalance(partitions: &mut [Vec<usize>], limit: f64) {
    for _ in 0..MAX_BALANCE_MOVES {
        let largest = partitions
            .iter()
            .enumerate()
            .max_by_key(|(_, members)| members.len())
            .map(|(index, _)| index)
            .expect("at least two partitions");
        let smallest = partitions
            .iter()
            .enumerate()
            .min_by_key(|(_, members)| members.len())
            .map(|(index, _)| index)
            .expect("at least two partitions");

        #[allow(clippy::cast_precision_loss)]
        if partitions[largest].len() as f64 <= limit || largest == smallest {
            break;
        }

        let Some(node) = partitions[largest].pop() else {
            break;
        };
        partitions[smallest].push(node);
    }
}
