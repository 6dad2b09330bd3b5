//! Leiden community detection.
//!
//! Louvain's two phases plus a refinement pass that runs after each
//! local-moving phase and before aggregation: every community is checked
//! for connectivity over the level's super-node subgraph, and a
//! disconnected community is replaced by one community per connected
//! component. Every community this algorithm returns therefore induces a
//! connected subgraph, which Louvain does not guarantee.


use std::{collections::VecDeque, time::Instant};

use congraph_core::{EdgeWeight, PropertyGraph};
use error_stack::{Report, Result};
use fixedbitset::FixedBitSet;
use rand::{rngs::StdRng, SeedableRng};

use super::{
    adaptive_threshold, build_communities, collect_membership, convergence_rounds,
    first_level_cap, level::LevelGraph, louvain::NeighborSelection, max_level_count,
    moving::LocalMoving, singleton_membership, Community, CommunityError, DetectionMetadata,
};
use crate::FxHashMap;

/// Options for [`leiden`].
///
/// Invalid values fall back to the adaptive defaults derived from the
/// node count.
#[derive(Debug, Clone)]
pub struct LeidenOptions {
    /// Resolution of the null model. Default `1.0`.
    pub resolution: f64,
    /// Overrides the per-level round cap.
    pub max_iterations: Option<usize>,
    /// Overrides the adaptive minimum gain a move must exceed.
    pub min_modularity_increase: Option<f64>,
}

impl Default for LeidenOptions {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            max_iterations: None,
            min_modularity_increase: None,
        }
    }
}

impl LeidenOptions {
    fn sanitized(mut self) -> Self {
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

/// Partition-level metrics of a Leiden run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeidenMetrics {
    /// Global modularity of the partition.
    pub modularity: f64,
    /// Number of communities.
    pub community_count: usize,
    /// Hierarchy levels processed.
    pub levels: usize,
    /// Communities split by the refinement pass, summed over levels.
    pub refinement_splits: usize,
}

/// The result of a Leiden run.
#[derive(Debug, Clone)]
pub struct LeidenReport {
    /// Detected communities; each induces a connected subgraph.
    pub communities: Vec<Community>,
    /// Partition-level metrics.
    pub metrics: LeidenMetrics,
    /// Run metadata.
    pub metadata: DetectionMetadata<LeidenOptions>,
}

const LATER_LEVEL_CAP: usize = 12;

/// Runs Leiden community detection.
///
/// # Errors
///
/// [`CommunityError::EmptyGraph`] when the graph has no nodes. A graph
/// with nodes but zero total edge weight yields singleton communities and
/// zero iterations.
pub fn leiden<NP, EP>(
    graph: &PropertyGraph<NP, EP>,
    weight: &impl EdgeWeight<NP, EP>,
    options: LeidenOptions,
) -> Result<LeidenReport, CommunityError> {
    let started = Instant::now();

    let node_count = graph.node_count();
    if node_count == 0 {
        return Err(Report::new(CommunityError::EmptyGraph));
    }
    let options = options.sanitized();

    let mut rng = StdRng::from_entropy();
    let threshold = options
        .min_modularity_increase
        .unwrap_or_else(|| adaptive_threshold(node_count));
    let idle_rounds = convergence_rounds(node_count);
    let max_levels = max_level_count(node_count);

    let mut level = LevelGraph::from_graph(graph, weight);
    let mut membership = singleton_membership(node_count);
    let mut total_iterations = 0;
    let mut levels = 0;
    let mut refinement_splits = 0;

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
                NeighborSelection::Best,
                &mut rng,
            );
            total_iterations += outcome.iterations;
            levels += 1;

            let mut community_of = outcome.community_of;
            refinement_splits += refine_connectivity(&level, &mut community_of);

            membership = collect_membership(&level, &community_of);
            let contracted = membership.len();
            if contracted == level.len() || contracted == 1 || depth + 1 == max_levels {
                break;
            }
            level = level.aggregate(&community_of, depth + 1);
        }
    }

    let (communities, modularity) = build_communities(graph, weight, &membership);
    let metrics = LeidenMetrics {
        modularity,
        community_count: communities.len(),
        levels,
        refinement_splits,
    };

    Ok(LeidenReport {
        communities,
        metrics,
        metadata: DetectionMetadata {
            runtime: started.elapsed(),
            total_iterations,
            configuration: options,
        },
    })
}

/// Splits every disconnected community into one community per connected
/// component. The first component keeps the community id, the rest get
/// fresh ids. Returns the number of new communities created.
///
/// Adjacency is symmetric at the level graph, so the sweep covers both
/// edge directions of a directed input.
fn refine_connectivity(level: &LevelGraph, community_of: &mut [usize]) -> usize {
    let len = level.len();

    let mut slot_of: FxHashMap<usize, usize> = FxHashMap::default();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (index, &community) in community_of.iter().enumerate() {
        let slot = *slot_of.entry(community).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(index);
    }

    // fresh ids start above every id the moving phase can produce
    let mut next_fresh = len;
    let mut splits = 0;
    let mut visited = FixedBitSet::with_capacity(len);
    let mut queue = VecDeque::new();

    for group in &groups {
        if group.len() <= 1 {
            continue;
        }
        let community = community_of[group[0]];

        let mut first = true;
        for &start in group {
            if visited.contains(start) {
                continue;
            }
            let target = if first {
                community
            } else {
                splits += 1;
                next_fresh += 1;
                next_fresh - 1
            };
            first = false;

            visited.insert(start);
            queue.push_back(start);
            while let Some(node) = queue.pop_front() {
                community_of[node] = target;
                for &(neighbor, _) in &level.adjacency[node] {
                    if community_of[neighbor] == community && !visited.contains(neighbor) {
                        visited.insert(neighbor);
                        queue.push_back(neighbor);
                    }
                }
            }
        }
    }

    splits
}
