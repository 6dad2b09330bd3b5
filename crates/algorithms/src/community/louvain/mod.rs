//! Louvain community detection.
//!
//! Greedy modularity optimization in two alternating phases: local moving
//! of super-nodes between neighboring communities, then contraction of
//! each community into a super-node for the next hierarchy level.
//! Iteration caps, the gain threshold and the hierarchy depth all adapt to
//! the input size unless overridden through [`LouvainOptions`].


use std::time::Instant;

use congraph_core::{EdgeWeight, PropertyGraph};
use error_stack::{Report, Result};
use rand::{rngs::StdRng, SeedableRng};

use super::{
    adaptive_threshold, build_communities, collect_membership, convergence_rounds,
    first_level_cap, level::LevelGraph, max_level_count, moving::LocalMoving,
    singleton_membership, CommunityError, CommunityReport, DetectionMetadata,
};

/// How the local-moving loop picks a target community.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborSelection {
    /// Evaluate the gain of every neighboring community, take the argmax.
    #[default]
    Best,
    /// Accept the first strictly-positive gain in shuffled order.
    ///
    /// Experimental: known to degrade modularity on citation-like graphs.
    Random,
}

/// Options for [`louvain`].
///
/// Invalid values do not fail the run; they fall back to the adaptive
/// defaults derived from the node count.
#[derive(Debug, Clone)]
pub struct LouvainOptions {
    /// Resolution of the null model. Default `1.0`.
    pub resolution: f64,
    /// Overrides the per-level round cap.
    pub max_iterations: Option<usize>,
    /// Overrides the adaptive minimum gain a move must exceed.
    pub min_modularity_increase: Option<f64>,
    /// Seed for the visiting order. Runs with the same seed on the same
    /// input are bit-identical.
    pub seed: Option<u64>,
    /// Target-community selection mode.
    pub selection: NeighborSelection,
}

impl Default for LouvainOptions {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            max_iterations: None,
            min_modularity_increase: None,
            seed: None,
            selection: NeighborSelection::default(),
        }
    }
}

impl LouvainOptions {
    pub(crate) fn sanitized(mut self) -> Self {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            self.resolution = 1.0;
        }
        if self.max_iterations == Some(0) {
            self.max_iterations = None;
        }
        if let Some(threshold) = self.min_modularity_increase {
            if !threshold.is_finite() || threshold < 0.0 {
                self.min_modularity_increase = None;
            }
        }
        self
    }
}

const LATER_LEVEL_CAP: usize = 40;

/// Runs Louvain community detection.
///
/// # Errors
///
/// [`CommunityError::EmptyGraph`] when the graph has no nodes. A graph
/// with nodes but zero total edge weight is not an error: every node
/// becomes its own community and zero iterations are reported.
///
/// # Example
///
/// ```
/// use congraph_algorithms::community::{louvain, LouvainOptions};
/// use congraph_core::{DefaultWeight, Edge, Node, PropertyGraph};
///
/// let mut graph = PropertyGraph::undirected();
/// for id in ["a", "b", "c"] {
///     graph.insert_node(Node::new(id, "node"));
/// }
/// graph.insert_edge(Edge::new("a", "b", "link"))?;
/// graph.insert_edge(Edge::new("b", "c", "link"))?;
///
/// let report = louvain(&graph, &DefaultWeight, LouvainOptions::default())
///     .expect("graph is not empty");
/// let total: usize = report.communities.iter().map(|c| c.members.len()).sum();
/// assert_eq!(total, 3);
/// # Ok::<(), error_stack::Report<congraph_core::GraphError>>(())
/// ```
pub fn louvain<NP, EP>(
    graph: &PropertyGraph<NP, EP>,
    weight: &impl EdgeWeight<NP, EP>,
    options: LouvainOptions,
) -> Result<CommunityReport<LouvainOptions>, CommunityError> {
    let started = Instant::now();

    let node_count = graph.node_count();
    if node_count == 0 {
        return Err(Report::new(CommunityError::EmptyGraph));
    }
    let options = options.sanitized();

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let threshold = options
        .min_modularity_increase
        .unwrap_or_else(|| adaptive_threshold(node_count));
    let idle_rounds = convergence_rounds(node_count);
    let max_levels = max_level_count(node_count);

    let mut level = LevelGraph::from_graph(graph, weight);
    let mut membership = singleton_membership(node_count);
    let mut total_iterations = 0;
    let mut levels = 0;

    if level.total_weight > 0.0 {
        let mut moving = LocalMoving::new();

        for depth in 0..max_levels {
            let cap = options.max_iterations.unwrap_or(if depth == 0 {
                first_level_cap(node_count)
            } else {
                LATER_LEVEL_CAP
            });

            let outcome = moving.run(
                &level,
                options.resolution,
                threshold,
                cap,
                idle_rounds,
                options.selection,
                &mut rng,
            );
            total_iterations += outcome.iterations;
            levels += 1;

            membership = collect_membership(&level, &outcome.community_of);
            let contracted = membership.len();
            if contracted == level.len() || contracted == 1 || depth + 1 == max_levels {
                break;
            }
            level = level.aggregate(&outcome.community_of, depth + 1);
        }
    }

    let (communities, modularity) = build_communities(graph, weight, &membership);

    Ok(CommunityReport {
        communities,
        modularity,
        levels,
        metadata: DetectionMetadata {
            runtime: started.elapsed(),
            total_iterations,
            configuration: options,
        },
    })
}
