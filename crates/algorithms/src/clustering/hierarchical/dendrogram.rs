//! The merge tree produced by agglomerative clustering.

/// One agglomerative merge step.
///
/// `left` and `right` are cluster indices: leaves are `0..n`, the cluster
/// created by merge step `i` has index `n + i`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Merge {
    /// First merged cluster.
    pub left: usize,
    /// Second merged cluster.
    pub right: usize,
    /// Height of the merge; non-decreasing over the sequence.
    pub distance: f64,
    /// Size of the created cluster.
    pub size: usize,
}

/// A dendrogram: the merge sequence over the leaf nodes.
///
/// Supports the two standard queries: a cut at a height and an exact
/// cluster count.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dendrogram {
    leaves: Vec<String>,
    merges: Vec<Merge>,
    sizes: Vec<usize>,
}

impl Dendrogram {
    pub(super) fn new(leaves: Vec<String>, merges: Vec<Merge>, sizes: Vec<usize>) -> Self {
        Self {
            leaves,
            merges,
            sizes,
        }
    }

    /// Number of leaf nodes.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// The merge sequence, in execution order.
    #[must_use]
    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    /// Size of a cluster by index (leaves have size 1).
    #[must_use]
    pub fn cluster_size(&self, cluster: usize) -> Option<usize> {
        self.sizes.get(cluster).copied()
    }

    /// The forest after applying the first `applied` merges.
    fn forest_after(&self, applied: usize) -> Vec<Vec<String>> {
        let leaf_count = self.leaves.len();
        let mut clusters: Vec<Option<Vec<usize>>> =
            (0..leaf_count).map(|leaf| Some(vec![leaf])).collect();

        for merge in &self.merges[..applied] {
            let left = clusters[merge.left]
                .take()
                .expect("merge references a live cluster");
            let right = clusters[merge.right]
                .take()
                .expect("merge references a live cluster");

            let mut combined = left;
            combined.extend(right);
            clusters.push(Some(combined));
        }

        clusters
            .into_iter()
            .flatten()
            .map(|members| {
                members
                    .into_iter()
                    .map(|leaf| self.leaves[leaf].clone())
                    .collect()
            })
            .collect()
    }

    /// The cluster forest obtained by applying every merge with height at
    /// most `height`.
    ///
    /// Heights are non-decreasing, so this is a prefix of the merge
    /// sequence.
    #[must_use]
    pub fn cut_at_height(&self, height: f64) -> Vec<Vec<String>> {
        let applied = self
            .merges
            .iter()
            .take_while(|merge| merge.distance <= height)
            .count();

        self.forest_after(applied)
    }

    /// The forest after the first `n − k` merges: exactly `k` clusters for
    /// `1 <= k <= n`, all singletons for `k >= n`, and an empty forest for
    /// `k == 0`.
    #[must_use]
    pub fn clusters(&self, k: usize) -> Vec<Vec<String>> {
        let leaf_count = self.leaves.len();
        if k == 0 {
            return Vec::new();
        }
        if k >= leaf_count {
            return self.forest_after(0);
        }

        self.forest_after(leaf_count - k)
    }
}
