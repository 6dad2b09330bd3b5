//! Thin traversal wrappers: breadth-first and depth-first orders plus
//! Dijkstra shortest paths.
//!
//! These sit beside the analysis subsystems as plain building blocks.
//! Neighbor order is the graph's deterministic insertion order, so every
//! traversal is reproducible for a given graph instance.

mod dijkstra;
mod search;

pub use self::{
    dijkstra::{dijkstra, DijkstraError, ShortestPaths},
    search::{bfs_order, dfs_order},
};
