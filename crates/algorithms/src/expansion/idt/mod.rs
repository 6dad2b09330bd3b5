//! Intelligent delayed termination (IDT) expansion.
//!
//! One frontier grows from every seed; each tick pops the globally
//! cheapest frontier front and expands it. When a node already claimed by
//! another frontier is reached, the two parent chains join into a
//! discovered path; the first path flips prioritization from plain degree
//! to `degree · (1 − estimated MI)`, where the MI estimate of a node is
//! its best Jaccard similarity against any discovered path so far.
//!
//! Expansion does not stop on first contact. Once a frontier pair's
//! visited sets overlap past the configured threshold the loop keeps going
//! for a bounded number of further iterations, then returns the sampled
//! subgraph, the discovered paths and the expansion statistics.

mod error;
mod frontier;
#[cfg(test)]
mod tests;

use error_stack::{Report, Result};

pub use self::error::IdtError;
use self::frontier::Frontier;
use super::expander::GraphExpander;
use crate::{FxHashMap, FxHashSet};

/// Configuration of an expansion run.
///
/// An out-of-range overlap threshold falls back to the default.
#[derive(Debug, Clone)]
pub struct IdtConfig {
    /// Iterations to keep expanding after overlap is first detected.
    /// Default `50`.
    pub delay_iterations: usize,
    /// Jaccard similarity between two frontiers' visited sets that counts
    /// as overlap. Default `0.5`.
    pub overlap_threshold: f64,
}

impl Default for IdtConfig {
    fn default() -> Self {
        Self {
            delay_iterations: 50,
            overlap_threshold: 0.5,
        }
    }
}

impl IdtConfig {
    fn sanitized(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.overlap_threshold) {
            self.overlap_threshold = 0.5;
        }
        self
    }
}

/// A path connecting two seeds, discovered when their frontiers met.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscoveredPath {
    /// Indices of the two frontiers, discovering frontier first.
    pub frontiers: (usize, usize),
    /// Node sequence from one seed to the other; all nodes distinct.
    pub nodes: Vec<String>,
}

/// An edge traversed during expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampledEdge {
    /// Expanded node.
    pub source: String,
    /// Reached neighbor.
    pub target: String,
    /// Relationship type of the traversed edge.
    pub relationship: String,
}

/// Histogram of expanded-node degrees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DegreeHistogram {
    counts: [u64; 7],
}

impl DegreeHistogram {
    /// Bucket labels, matching [`counts`](Self::counts).
    pub const LABELS: [&'static str; 7] = [
        "1-5", "6-10", "11-50", "51-100", "101-500", "501-1000", "1000+",
    ];

    fn record(&mut self, degree: f64) {
        let bucket = if degree <= 5.0 {
            0
        } else if degree <= 10.0 {
            1
        } else if degree <= 50.0 {
            2
        } else if degree <= 100.0 {
            3
        } else if degree <= 500.0 {
            4
        } else if degree <= 1000.0 {
            5
        } else {
            6
        };
        self.counts[bucket] += 1;
    }

    /// Counts per bucket.
    #[must_use]
    pub fn counts(&self) -> &[u64; 7] {
        &self.counts
    }
}

/// Counters of an expansion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpansionStats {
    /// Nodes popped and expanded.
    pub nodes_expanded: usize,
    /// Edges traversed into not-yet-visited neighbors.
    pub edges_traversed: usize,
    /// Loop iterations (one per pop).
    pub iterations: usize,
    /// Degrees of the expanded nodes, bucketed.
    pub degree_histogram: DegreeHistogram,
}

/// The result of an expansion run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdtResult {
    /// Discovered seed-to-seed paths, in discovery order.
    pub paths: Vec<DiscoveredPath>,
    /// Union of all frontiers' visited nodes, sorted.
    pub sampled_nodes: Vec<String>,
    /// Every traversed edge, in traversal order.
    pub sampled_edges: Vec<SampledEdge>,
    /// Visited snapshot per frontier, sorted.
    pub visited: Vec<Vec<String>>,
    /// Expansion counters.
    pub stats: ExpansionStats,
}

/// A multi-frontier expansion over a [`GraphExpander`].
///
/// # Example
///
/// ```
/// use congraph_algorithms::expansion::{IdtConfig, IdtExpansion, PropertyGraphExpander};
/// use congraph_core::{Edge, Node, PropertyGraph};
///
/// // a - c - b
/// let mut graph = PropertyGraph::undirected();
/// for id in ["a", "b", "c"] {
///     graph.insert_node(Node::new(id, "node"));
/// }
/// graph.insert_edge(Edge::new("a", "c", "link"))?;
/// graph.insert_edge(Edge::new("c", "b", "link"))?;
///
/// let expander = PropertyGraphExpander::new(&graph);
/// let expansion = IdtExpansion::new(expander, ["a", "b"], IdtConfig::default())
///     .expect("two seeds");
/// let result = expansion.run();
///
/// assert_eq!(result.paths.len(), 1);
/// assert_eq!(result.sampled_nodes, vec!["a", "b", "c"]);
/// # Ok::<(), error_stack::Report<congraph_core::GraphError>>(())
/// ```
pub struct IdtExpansion<X: GraphExpander> {
    expander: X,
    frontiers: Vec<Frontier>,
    config: IdtConfig,
    /// Which frontier currently claims a node, for O(1) meet detection.
    owner: FxHashMap<String, usize>,
    neighbor_sets: FxHashMap<String, FxHashSet<String>>,
    estimated_mi: FxHashMap<String, f64>,
    signatures: FxHashSet<String>,
    mi_phase_active: bool,
    overlap_detected_at: Option<usize>,
    iterations: usize,
}

impl<X: GraphExpander> IdtExpansion<X> {
    /// Prepares an expansion from the given seeds.
    ///
    /// # Errors
    ///
    /// [`IdtError::InsufficientSeeds`] for fewer than two seeds.
    pub fn new(
        expander: X,
        seeds: impl IntoIterator<Item = impl Into<String>>,
        config: IdtConfig,
    ) -> Result<Self, IdtError> {
        let seeds: Vec<String> = seeds.into_iter().map(Into::into).collect();
        if seeds.len() < 2 {
            return Err(Report::new(IdtError::InsufficientSeeds {
                required: 2,
                actual: seeds.len(),
            }));
        }

        let mut frontiers = Vec::with_capacity(seeds.len());
        let mut owner = FxHashMap::default();
        for (index, seed) in seeds.into_iter().enumerate() {
            let mut frontier = Frontier::new(seed.clone());
            frontier.visited.insert(seed.clone());
            frontier.queue.push(seed.clone(), expander.priority(&seed));
            owner.insert(seed, index);
            frontiers.push(frontier);
        }

        Ok(Self {
            expander,
            frontiers,
            config: config.sanitized(),
            owner,
            neighbor_sets: FxHashMap::default(),
            estimated_mi: FxHashMap::default(),
            signatures: FxHashSet::default(),
            mi_phase_active: false,
            overlap_detected_at: None,
            iterations: 0,
        })
    }

    /// Runs the expansion to termination.
    #[must_use]
    pub fn run(mut self) -> IdtResult {
        let mut stats = ExpansionStats::default();
        let mut paths: Vec<DiscoveredPath> = Vec::new();
        let mut sampled_edges: Vec<SampledEdge> = Vec::new();

        while !self.should_terminate() {
            let mut current = None;
            let mut cheapest = f64::INFINITY;
            for (index, frontier) in self.frontiers.iter().enumerate() {
                let priority = frontier.queue.peek_priority();
                if priority < cheapest {
                    cheapest = priority;
                    current = Some(index);
                }
            }
            // every frontier exhausted
            let Some(current) = current else { break };
            let Some(node) = self.frontiers[current].queue.pop() else {
                break;
            };

            self.iterations += 1;
            stats.nodes_expanded += 1;
            stats.degree_histogram.record(self.expander.degree(&node));

            let neighbors = self.fetch_neighbors(&node);
            let mut discovered: Vec<(usize, Vec<String>)> = Vec::new();

            for (neighbor, relationship) in neighbors {
                if self.frontiers[current].visited.contains(&neighbor) {
                    continue;
                }

                stats.edges_traversed += 1;
                self.expander.add_edge(&node, &neighbor, &relationship);
                sampled_edges.push(SampledEdge {
                    source: node.clone(),
                    target: neighbor.clone(),
                    relationship: relationship.clone(),
                });

                // ownership must be read before this frontier claims the
                // node, or two frontiers advancing into each other in the
                // same tick never register as a meet
                let met = self
                    .owner
                    .get(&neighbor)
                    .copied()
                    .filter(|&other| other != current);
                if let Some(other) = met {
                    if let Some(nodes) = self.join_walks(current, &node, other, &neighbor) {
                        let signature = format!(
                            "{}-{}-{}",
                            current.min(other),
                            current.max(other),
                            nodes.len()
                        );
                        if self.signatures.insert(signature) {
                            discovered.push((other, nodes));
                        }
                    }
                }

                self.frontiers[current].visited.insert(neighbor.clone());
                self.frontiers[current]
                    .parents
                    .insert(neighbor.clone(), (node.clone(), relationship));
                self.owner.insert(neighbor.clone(), current);
                let priority = self.phase_priority(&neighbor);
                self.frontiers[current].queue.push(neighbor, priority);
            }

            for (other, nodes) in discovered {
                if self.mi_phase_active {
                    self.update_mi(&nodes);
                } else {
                    // first path: switch to MI-guided priorities
                    self.mi_phase_active = true;
                    self.update_mi(&nodes);
                    self.rebuild_queues();
                }
                paths.push(DiscoveredPath {
                    frontiers: (current, other),
                    nodes,
                });
            }

            if self.overlap_detected_at.is_none() {
                for (index, other) in self.frontiers.iter().enumerate() {
                    if index != current
                        && jaccard(&self.frontiers[current].visited, &other.visited)
                            >= self.config.overlap_threshold
                    {
                        self.overlap_detected_at = Some(self.iterations);
                        break;
                    }
                }
            }
        }

        let mut union: FxHashSet<String> = FxHashSet::default();
        for frontier in &self.frontiers {
            union.extend(frontier.visited.iter().cloned());
        }
        let mut sampled_nodes: Vec<String> = union.into_iter().collect();
        sampled_nodes.sort_unstable();

        let visited = self
            .frontiers
            .iter()
            .map(|frontier| {
                let mut snapshot: Vec<String> = frontier.visited.iter().cloned().collect();
                snapshot.sort_unstable();
                snapshot
            })
            .collect();

        stats.iterations = self.iterations;

        IdtResult {
            paths,
            sampled_nodes,
            sampled_edges,
            visited,
            stats,
        }
    }

    fn should_terminate(&self) -> bool {
        self.overlap_detected_at
            .map_or(false, |at| self.iterations - at >= self.config.delay_iterations)
    }

    fn phase_priority(&self, id: &str) -> f64 {
        if self.mi_phase_active {
            let mi = self.estimated_mi.get(id).copied().unwrap_or(0.0);
            self.expander.degree(id) * (1.0 - mi)
        } else {
            self.expander.priority(id)
        }
    }

    /// Retrieves neighbors and memoizes the neighbor set for MI updates.
    fn fetch_neighbors(&mut self, id: &str) -> Vec<(String, String)> {
        let neighbors = self.expander.neighbors(id);
        if !self.neighbor_sets.contains_key(id) {
            let set = neighbors
                .iter()
                .map(|(target, _)| target.clone())
                .collect();
            self.neighbor_sets.insert(id.to_owned(), set);
        }
        neighbors
    }

    fn neighbor_set(&mut self, id: &str) -> &FxHashSet<String> {
        if !self.neighbor_sets.contains_key(id) {
            let set = self
                .expander
                .neighbors(id)
                .into_iter()
                .map(|(target, _)| target)
                .collect();
            self.neighbor_sets.insert(id.to_owned(), set);
        }
        &self.neighbor_sets[id]
    }

    /// Joins the walk from the expanded node back to its seed with the
    /// other frontier's walk from the met node to its seed. Discarded when
    /// the two walks share a node.
    fn join_walks(
        &self,
        current: usize,
        from: &str,
        other: usize,
        via: &str,
    ) -> Option<Vec<String>> {
        let mut nodes = self.frontiers[current].walk_to_seed(from);
        nodes.reverse();
        nodes.push(via.to_owned());
        nodes.extend(
            self.frontiers[other]
                .walk_to_seed(via)
                .into_iter()
                .skip(1),
        );

        let distinct_len = nodes.iter().map(String::as_str).collect::<FxHashSet<&str>>().len();
        (distinct_len == nodes.len()).then_some(nodes)
    }

    /// Raises every visited node's MI estimate toward its Jaccard
    /// similarity with the new path.
    fn update_mi(&mut self, path_nodes: &[String]) {
        let path_set: FxHashSet<String> = path_nodes.iter().cloned().collect();

        let mut visited_union: FxHashSet<String> = FxHashSet::default();
        for frontier in &self.frontiers {
            visited_union.extend(frontier.visited.iter().cloned());
        }

        for node in visited_union {
            let similarity = jaccard(self.neighbor_set(&node), &path_set);
            let estimate = self.estimated_mi.entry(node).or_insert(0.0);
            if similarity > *estimate {
                *estimate = similarity;
            }
        }
    }

    /// Re-keys every queued node with the current phase's priority.
    fn rebuild_queues(&mut self) {
        for index in 0..self.frontiers.len() {
            let items = self.frontiers[index].queue.drain();
            for item in items {
                let priority = self.phase_priority(&item);
                self.frontiers[index].queue.push(item, priority);
            }
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn jaccard(a: &FxHashSet<String>, b: &FxHashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }

    let intersection = a.iter().filter(|item| b.contains(*item)).count();
    let union = a.len() + b.len() - intersection;

    intersection as f64 / union as f64
}
