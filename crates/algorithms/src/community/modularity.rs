//! The modularity kernel: per-move gain, partition quality, and the
//! conductance/density metrics shared by the engines.

use congraph_core::{EdgeWeight, PropertyGraph};

use crate::{FxHashMap, FxHashSet};

/// Modularity gain of moving a super-node into a candidate community.
///
/// `k` is the super-node's weighted degree, `k_in` the weight from the
/// super-node into the candidate community, `sigma_tot`/`sigma_in` the
/// candidate's aggregates, `m` the global total edge weight. `resolution`
/// scales the null-model terms; at `1.0` this is the plain Newman–Girvan
/// gain.
///
/// With `m == 0` no move can improve anything and the gain is `0.0`.
#[must_use]
pub fn modularity_delta(
    k: f64,
    k_in: f64,
    sigma_tot: f64,
    sigma_in: f64,
    m: f64,
    resolution: f64,
) -> f64 {
    if m <= 0.0 {
        return 0.0;
    }

    let two_m = 2.0 * m;
    let joined = (sigma_in + k_in) / two_m - resolution * ((sigma_tot + k) / two_m).powi(2);
    let apart = sigma_in / two_m
        - resolution * (sigma_tot / two_m).powi(2)
        - resolution * (k / two_m).powi(2);

    joined - apart
}

/// Newman–Girvan modularity of a total partition.
///
/// `communities` assigns every node to exactly one community (membership
/// lists of node identifiers). Nodes missing from all lists contribute
/// only to the total weight. Returns `0.0` for a graph with zero total
/// edge weight.
pub fn modularity<NP, EP>(
    graph: &PropertyGraph<NP, EP>,
    weight: &impl EdgeWeight<NP, EP>,
    communities: &[Vec<String>],
) -> f64 {
    let mut community_of: FxHashMap<&str, usize> = FxHashMap::default();
    for (index, members) in communities.iter().enumerate() {
        for member in members {
            community_of.insert(member, index);
        }
    }

    let mut total_weight = 0.0;
    let mut sigma_in = vec![0.0; communities.len()];
    let mut sigma_tot = vec![0.0; communities.len()];

    for edge in graph.edges() {
        let (Some(source), Some(target)) = (graph.node(edge.source()), graph.node(edge.target()))
        else {
            continue;
        };
        let w = weight.weight(edge, source, target);
        total_weight += w;

        let source_community = community_of.get(edge.source()).copied();
        let target_community = community_of.get(edge.target()).copied();

        if let Some(c) = source_community {
            sigma_tot[c] += w;
        }
        if let Some(c) = target_community {
            sigma_tot[c] += w;
        }
        if let (Some(a), Some(b)) = (source_community, target_community) {
            if a == b {
                // counted once per endpoint, matching the 2m normalization
                sigma_in[a] += 2.0 * w;
            }
        }
    }

    if total_weight <= 0.0 {
        return 0.0;
    }

    let two_m = 2.0 * total_weight;
    sigma_in
        .iter()
        .zip(&sigma_tot)
        .map(|(&s_in, &s_tot)| s_in / two_m - (s_tot / two_m).powi(2))
        .sum()
}

/// Conductance of a node set: boundary weight over the smaller side's
/// volume, clamped to `[0, 1]`; `0.0` when the denominator is zero.
pub fn conductance<NP, EP>(
    graph: &PropertyGraph<NP, EP>,
    weight: &impl EdgeWeight<NP, EP>,
    members: &[String],
) -> f64 {
    let inside: FxHashSet<&str> = members.iter().map(String::as_str).collect();

    let mut cut = 0.0;
    let mut internal = 0.0;
    let mut total_weight = 0.0;

    for edge in graph.edges() {
        let (Some(source), Some(target)) = (graph.node(edge.source()), graph.node(edge.target()))
        else {
            continue;
        };
        let w = weight.weight(edge, source, target);
        total_weight += w;

        match (
            inside.contains(edge.source()),
            inside.contains(edge.target()),
        ) {
            (true, true) => internal += w,
            (true, false) | (false, true) => cut += w,
            (false, false) => {}
        }
    }

    let volume = 2.0 * internal + cut;
    let complement_volume = 2.0 * total_weight - 2.0 * internal;
    let denominator = volume.min(complement_volume);

    if denominator <= 0.0 {
        0.0
    } else {
        (cut / denominator).clamp(0.0, 1.0)
    }
}

/// Edge density of a node set: internal simple edges over the maximum
/// possible pairs (`n(n−1)` directed, `n(n−1)/2` undirected), clamped to
/// `[0, 1]`; `0.0` for sets of at most one node.
pub fn density<NP, EP>(graph: &PropertyGraph<NP, EP>, members: &[String]) -> f64 {
    let n = members.len();
    if n <= 1 {
        return 0.0;
    }

    let inside: FxHashSet<&str> = members.iter().map(String::as_str).collect();
    let internal = graph
        .edges()
        .filter(|edge| {
            edge.source() != edge.target()
                && inside.contains(edge.source())
                && inside.contains(edge.target())
        })
        .count();

    let pairs = if graph.is_directed() {
        n * (n - 1)
    } else {
        n * (n - 1) / 2
    };

    #[allow(clippy::cast_precision_loss)]
    ((internal as f64) / (pairs as f64)).clamp(0.0, 1.0)
}
