//! Modularity-optimizing community detection.
//!
//! [`louvain`] runs the classic two-phase greedy optimization; [`leiden`]
//! adds a refinement pass after each local-moving phase that guarantees
//! every returned community induces a connected subgraph. Both share the
//! [`modularity`] kernel and the contracted level-graph machinery.

use std::time::Duration;

use congraph_core::{EdgeWeight, PropertyGraph};

use crate::FxHashMap;

pub mod error;
pub(crate) mod level;
pub mod leiden;
pub mod louvain;
pub mod modularity;
pub(crate) mod moving;

pub use self::{
    error::CommunityError,
    leiden::{leiden, LeidenMetrics, LeidenOptions, LeidenReport},
    louvain::{louvain, LouvainOptions, NeighborSelection},
    modularity::{conductance, density, modularity, modularity_delta},
};

/// A detected community with its aggregates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Community {
    /// Community identifier, dense from zero.
    pub id: usize,
    /// Member node identifiers, in graph order.
    pub members: Vec<String>,
    /// Number of edges with both endpoints in this community.
    pub internal_edges: usize,
    /// Sum of weighted degrees of the members (σ_tot).
    pub sigma_total: f64,
    /// Sum of internal edge weights, counted once per endpoint (σ_in).
    pub sigma_internal: f64,
    /// This community's share of the global modularity.
    pub modularity_contribution: f64,
    /// Internal edge density of the member set.
    pub density: f64,
}

/// Run metadata attached to a detection result.
#[derive(Debug, Clone)]
pub struct DetectionMetadata<O> {
    /// Wall-clock runtime of the whole run.
    pub runtime: Duration,
    /// Local-moving rounds summed over all hierarchy levels.
    pub total_iterations: usize,
    /// The effective configuration after defaults were applied.
    pub configuration: O,
}

/// The result of a Louvain run.
#[derive(Debug, Clone)]
pub struct CommunityReport<O> {
    /// Detected communities.
    pub communities: Vec<Community>,
    /// Global modularity of the partition.
    pub modularity: f64,
    /// Hierarchy levels processed.
    pub levels: usize,
    /// Run metadata.
    pub metadata: DetectionMetadata<O>,
}

// Adaptive defaults: thresholds and caps scale with the node count.

pub(crate) fn adaptive_threshold(node_count: usize) -> f64 {
    if node_count <= 500 {
        1e-6
    } else {
        1e-5
    }
}

pub(crate) fn first_level_cap(node_count: usize) -> usize {
    if node_count > 200 {
        20
    } else {
        50
    }
}

pub(crate) fn max_level_count(node_count: usize) -> usize {
    if node_count > 50 {
        3
    } else {
        1
    }
}

pub(crate) fn convergence_rounds(node_count: usize) -> usize {
    if node_count > 500 {
        2
    } else {
        3
    }
}

/// Assembles [`Community`] values plus the global modularity from final
/// membership sets of original node indices.
pub(crate) fn build_communities<NP, EP>(
    graph: &PropertyGraph<NP, EP>,
    weight: &impl EdgeWeight<NP, EP>,
    membership: &[Vec<usize>],
) -> (Vec<Community>, f64) {
    let ids: Vec<&str> = graph.nodes().map(|node| node.id()).collect();
    let mut community_of: FxHashMap<&str, usize> = FxHashMap::default();
    for (community, members) in membership.iter().enumerate() {
        for &member in members {
            community_of.insert(ids[member], community);
        }
    }

    let mut total_weight = 0.0;
    let mut internal_edges = vec![0_usize; membership.len()];
    let mut sigma_internal = vec![0.0; membership.len()];
    let mut sigma_total = vec![0.0; membership.len()];

    for edge in graph.edges() {
        let (Some(source), Some(target)) = (graph.node(edge.source()), graph.node(edge.target()))
        else {
            continue;
        };
        let w = weight.weight(edge, source, target);
        total_weight += w;

        let a = community_of[edge.source()];
        let b = community_of[edge.target()];
        sigma_total[a] += w;
        sigma_total[b] += w;
        if a == b {
            internal_edges[a] += 1;
            sigma_internal[a] += 2.0 * w;
        }
    }

    let two_m = 2.0 * total_weight;
    let mut communities = Vec::with_capacity(membership.len());
    let mut global_modularity = 0.0;

    for (id, members) in membership.iter().enumerate() {
        let mut sorted = members.clone();
        sorted.sort_unstable();
        let member_ids: Vec<String> = sorted.iter().map(|&index| ids[index].to_owned()).collect();

        let contribution = if total_weight > 0.0 {
            sigma_internal[id] / two_m - (sigma_total[id] / two_m).powi(2)
        } else {
            0.0
        };
        global_modularity += contribution;

        let density = modularity::density(graph, &member_ids);
        communities.push(Community {
            id,
            members: member_ids,
            internal_edges: internal_edges[id],
            sigma_total: sigma_total[id],
            sigma_internal: sigma_internal[id],
            modularity_contribution: contribution,
            density,
        });
    }

    (communities, global_modularity)
}

/// Singleton fallback for graphs whose total edge weight is zero.
pub(crate) fn singleton_membership(node_count: usize) -> Vec<Vec<usize>> {
    (0..node_count).map(|index| vec![index]).collect()
}

/// Groups super-node member sets by community, densified in first-seen
/// order over the super-node indices.
pub(crate) fn collect_membership(
    level: &level::LevelGraph,
    community_of: &[usize],
) -> Vec<Vec<usize>> {
    let mut dense: FxHashMap<usize, usize> = FxHashMap::default();
    let mut membership: Vec<Vec<usize>> = Vec::new();

    for (index, super_node) in level.super_nodes.iter().enumerate() {
        let slot = *dense.entry(community_of[index]).or_insert_with(|| {
            membership.push(Vec::new());
            membership.len() - 1
        });
        membership[slot].extend(&super_node.members);
    }

    membership
}
