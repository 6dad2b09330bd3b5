//! Community detection, partitioning and guided multi-seed expansion for
//! in-memory property graphs.
//!
//! The library splits into a small stack of crates, re-exported here:
//!
//! * [`congraph_core`]: the [`PropertyGraph`] model with typed nodes and
//!   edges, and the [`EdgeWeight`] seam that is the single source of
//!   weight truth.
//! * [`congraph_algorithms`]: [`community`] detection (Louvain, Leiden),
//!   [`clustering`] (agglomerative dendrograms, spectral partitioning),
//!   [`expansion`] (intelligent delayed termination) and plain
//!   [`traversal`] building blocks.
//! * `congraph_generators` (feature `generators`, on by default):
//!   deterministic classic graph generators.
//!
//! # Example
//!
//! ```
//! use congraph::prelude::*;
//!
//! // two triangles joined by one bridge edge
//! let mut graph = PropertyGraph::undirected();
//! for id in ["a", "b", "c", "d", "e", "f"] {
//!     graph.insert_node(Node::new(id, "node"));
//! }
//! for (source, target) in [
//!     ("a", "b"), ("b", "c"), ("c", "a"),
//!     ("d", "e"), ("e", "f"), ("d", "f"),
//!     ("c", "d"),
//! ] {
//!     graph
//!         .insert_edge(Edge::new(source, target, "link"))
//!         .expect("both endpoints exist");
//! }
//!
//! let report = louvain(&graph, &DefaultWeight, LouvainOptions::default())
//!     .expect("graph is not empty");
//! assert_eq!(report.communities.len(), 2);
//! assert!(report.modularity > 0.0);
//! ```

pub use congraph_algorithms::{clustering, community, expansion, traversal};
pub use congraph_core::{DefaultWeight, Edge, EdgeWeight, GraphError, Node, PropertyGraph};

#[cfg(feature = "generators")]
pub use congraph_generators as generators;

/// The most common imports in one place.
pub mod prelude {
    pub use congraph_algorithms::{
        clustering::{hierarchical_clustering, spectral_partition, Linkage, SpectralOptions},
        community::{leiden, louvain, LeidenOptions, LouvainOptions},
        expansion::{GraphExpander, IdtConfig, IdtExpansion, PropertyGraphExpander},
        traversal::{bfs_order, dfs_order, dijkstra},
    };
    pub use congraph_core::{DefaultWeight, Edge, EdgeWeight, Node, PropertyGraph};
}
