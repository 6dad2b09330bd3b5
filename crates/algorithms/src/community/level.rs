//! Contracted level graphs: the arena the engines optimize over.
//!
//! Each hierarchy level is a dense, index-addressed view of the current
//! super-nodes. Adjacency is symmetrized up front (directed inputs
//! contribute outgoing plus incoming weight), so the local-moving loop and
//! the Leiden connectivity sweep never consult the original graph again.

use congraph_core::{EdgeWeight, PropertyGraph};

use crate::FxHashMap;

/// A contracted vertex holding the original node indices it represents.
pub(crate) struct SuperNode {
    /// `L{level}_{counter}` for contracted nodes, the node id at level zero.
    #[allow(dead_code)]
    pub(crate) label: String,
    pub(crate) members: Vec<usize>,
}

pub(crate) struct LevelGraph {
    pub(crate) super_nodes: Vec<SuperNode>,
    /// Symmetric adjacency, self-loops excluded.
    pub(crate) adjacency: Vec<Vec<(usize, f64)>>,
    pub(crate) self_loops: Vec<f64>,
    /// Weighted degrees; a self-loop counts twice.
    pub(crate) degrees: Vec<f64>,
    pub(crate) total_weight: f64,
}

impl LevelGraph {
    /// Level zero: one super-node per original node, in graph order.
    pub(crate) fn from_graph<NP, EP>(
        graph: &PropertyGraph<NP, EP>,
        weight: &impl EdgeWeight<NP, EP>,
    ) -> Self {
        let node_count = graph.node_count();
        let mut index_of: FxHashMap<&str, usize> = FxHashMap::default();
        let mut super_nodes = Vec::with_capacity(node_count);

        for (index, node) in graph.nodes().enumerate() {
            index_of.insert(node.id(), index);
            super_nodes.push(SuperNode {
                label: node.id().to_owned(),
                members: vec![index],
            });
        }

        let mut level = Self {
            super_nodes,
            adjacency: vec![Vec::new(); node_count],
            self_loops: vec![0.0; node_count],
            degrees: vec![0.0; node_count],
            total_weight: 0.0,
        };

        for edge in graph.edges() {
            let source = graph.node(edge.source()).expect("edge endpoints exist");
            let target = graph.node(edge.target()).expect("edge endpoints exist");
            let u = index_of[edge.source()];
            let v = index_of[edge.target()];
            let w = weight.weight(edge, source, target);

            level.add_weight(u, v, w);
        }

        level
    }

    fn add_weight(&mut self, u: usize, v: usize, w: f64) {
        self.total_weight += w;
        if u == v {
            self.self_loops[u] += w;
            self.degrees[u] += 2.0 * w;
        } else {
            self.adjacency[u].push((v, w));
            self.adjacency[v].push((u, w));
            self.degrees[u] += w;
            self.degrees[v] += w;
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.super_nodes.len()
    }

    /// Contracts each community to a single super-node.
    ///
    /// Community identifiers may be arbitrary; they are densified in order
    /// of first appearance over the super-node indices, which keeps the
    /// result deterministic. New super-nodes are labeled
    /// `L{level}_{counter}` and own the union of their members' member
    /// sets.
    pub(crate) fn aggregate(&self, community_of: &[usize], level: usize) -> Self {
        let mut dense: FxHashMap<usize, usize> = FxHashMap::default();
        let mut super_nodes: Vec<SuperNode> = Vec::new();

        for (index, super_node) in self.super_nodes.iter().enumerate() {
            let next = super_nodes.len();
            let slot = *dense.entry(community_of[index]).or_insert_with(|| {
                super_nodes.push(SuperNode {
                    label: format!("L{level}_{next}"),
                    members: Vec::new(),
                });
                next
            });
            super_nodes[slot].members.extend(&super_node.members);
        }

        let contracted = super_nodes.len();
        let mut next_level = Self {
            super_nodes,
            adjacency: vec![Vec::new(); contracted],
            self_loops: vec![0.0; contracted],
            degrees: vec![0.0; contracted],
            total_weight: 0.0,
        };

        // each symmetric pair appears once with v > u; accumulate per
        // contracted pair before inserting so parallel entries collapse
        let mut pair_weights: FxHashMap<(usize, usize), f64> = FxHashMap::default();
        for (u, neighbors) in self.adjacency.iter().enumerate() {
            let cu = dense[&community_of[u]];
            for &(v, w) in neighbors.iter().filter(|&&(v, _)| v > u) {
                let cv = dense[&community_of[v]];
                let key = (cu.min(cv), cu.max(cv));
                *pair_weights.entry(key).or_insert(0.0) += w;
            }
        }
        for (u, &w) in self.self_loops.iter().enumerate() {
            if w > 0.0 {
                *pair_weights.entry((dense[&community_of[u]], dense[&community_of[u]])).or_insert(0.0) += w;
            }
        }

        let mut pairs: Vec<((usize, usize), f64)> = pair_weights.into_iter().collect();
        pairs.sort_unstable_by_key(|&(key, _)| key);
        for ((a, b), w) in pairs {
            next_level.add_weight(a, b, w);
        }

        next_level
    }
}
