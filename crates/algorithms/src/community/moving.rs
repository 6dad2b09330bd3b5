//! The local-moving phase shared by Louvain and Leiden.

use rand::{rngs::StdRng, seq::SliceRandom};

use super::{level::LevelGraph, louvain::NeighborSelection, modularity::modularity_delta};
use crate::FxHashMap;

pub(crate) struct MovingOutcome {
    /// Community assignment per super-node, ids within `0..len`.
    pub(crate) community_of: Vec<usize>,
    /// Rounds performed.
    pub(crate) iterations: usize,
}

/// Working state of the local-moving loop.
///
/// The neighbor-community weight map is the hot-path allocation; it lives
/// here so it is reused across nodes, rounds and levels while staying
/// owned by a single run.
pub(crate) struct LocalMoving {
    neighbor_weights: FxHashMap<usize, f64>,
    candidates: Vec<usize>,
}

impl LocalMoving {
    pub(crate) fn new() -> Self {
        Self {
            neighbor_weights: FxHashMap::default(),
            candidates: Vec::new(),
        }
    }

    /// Runs rounds of greedy moves until `idle_rounds_to_stop` consecutive
    /// rounds made no move or `cap` rounds were spent.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn run(
        &mut self,
        level: &LevelGraph,
        resolution: f64,
        threshold: f64,
        cap: usize,
        idle_rounds_to_stop: usize,
        selection: NeighborSelection,
        rng: &mut StdRng,
    ) -> MovingOutcome {
        let len = level.len();
        let m = level.total_weight;
        let mut community_of: Vec<usize> = (0..len).collect();
        let mut sigma_tot: Vec<f64> = level.degrees.clone();
        let mut order: Vec<usize> = (0..len).collect();

        let mut iterations = 0;
        let mut idle_rounds = 0;

        while iterations < cap && idle_rounds < idle_rounds_to_stop {
            iterations += 1;
            order.shuffle(rng);
            let mut moves = 0;

            for &node in &order {
                let current = community_of[node];
                let k = level.degrees[node];

                self.neighbor_weights.clear();
                for &(neighbor, w) in &level.adjacency[node] {
                    *self
                        .neighbor_weights
                        .entry(community_of[neighbor])
                        .or_insert(0.0) += w;
                }
                self.neighbor_weights.entry(current).or_insert(0.0);

                // detach the node; σ_in cancels in the gain and is passed as zero
                sigma_tot[current] -= k;
                let stay = modularity_delta(
                    k,
                    self.neighbor_weights[&current],
                    sigma_tot[current],
                    0.0,
                    m,
                    resolution,
                );

                let chosen = match selection {
                    NeighborSelection::Best => {
                        let mut best = (current, stay);
                        for (&community, &k_in) in &self.neighbor_weights {
                            if community == current {
                                continue;
                            }
                            let gain =
                                modularity_delta(k, k_in, sigma_tot[community], 0.0, m, resolution);
                            if gain > best.1 {
                                best = (community, gain);
                            }
                        }
                        if best.0 != current && best.1 - stay > threshold {
                            best.0
                        } else {
                            current
                        }
                    }
                    NeighborSelection::Random => {
                        self.candidates.clear();
                        self.candidates
                            .extend(self.neighbor_weights.keys().copied());
                        self.candidates.shuffle(rng);

                        let mut accepted = current;
                        for &community in &self.candidates {
                            if community == current {
                                continue;
                            }
                            let gain = modularity_delta(
                                k,
                                self.neighbor_weights[&community],
                                sigma_tot[community],
                                0.0,
                                m,
                                resolution,
                            );
                            if gain > 0.0 {
                                accepted = community;
                                break;
                            }
                        }
                        accepted
                    }
                };

                sigma_tot[chosen] += k;
                if chosen != current {
                    community_of[node] = chosen;
                    moves += 1;
                }
            }

            if moves == 0 {
                idle_rounds += 1;
            } else {
                idle_rounds = 0;
            }
        }

        MovingOutcome {
            community_of,
            iterations,
        }
    }
}
