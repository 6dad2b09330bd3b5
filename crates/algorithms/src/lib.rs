//! Graph-analysis algorithms over [`congraph_core`] property graphs.
//!
//! Three subsystems make up this crate:
//!
//! * [`community`]: modularity-optimizing community detection (Louvain and
//!   Leiden) plus the shared modularity, conductance and density metrics.
//! * [`clustering`]: agglomerative hierarchical clustering with a
//!   queryable dendrogram, and spectral partitioning via the normalized
//!   Laplacian.
//! * [`expansion`]: intelligent delayed termination (IDT), a multi-frontier
//!   priority-driven traversal from a set of seed nodes.
//!
//! [`traversal`] carries the plain building blocks (breadth-first,
//! depth-first, Dijkstra) that sit beside the analysis subsystems.
//!
//! All algorithms are single-threaded, synchronous, and never mutate the
//! input graph. Fallible operations return [`error_stack::Result`] with a
//! per-algorithm error enum.

pub mod clustering;
pub mod community;
pub mod expansion;
pub mod traversal;

pub(crate) type FxHashMap<K, V> = hashbrown::HashMap<K, V, fxhash::FxBuildHasher>;
pub(crate) type FxHashSet<T> = hashbrown::HashSet<T, fxhash::FxBuildHasher>;
