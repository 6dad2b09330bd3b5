//! The [`PropertyGraph`] storage type.

use error_stack::{Report, Result};
use fxhash::FxBuildHasher;
use hashbrown::HashMap;
use indexmap::IndexMap;

use crate::{edge::Edge, error::GraphError, node::Node};

type FxHashMap<K, V> = HashMap<K, V, FxBuildHasher>;

/// An in-memory directed or undirected property graph.
///
/// Nodes are keyed by their unique string identifier; edges reference two
/// existing nodes and are stored in insertion order. Self-loops and
/// parallel edges are permitted. When the graph is undirected, every stored
/// edge contributes to both endpoints regardless of its storage
/// orientation.
///
/// Neighbor and edge query order is deterministic for a given graph
/// instance (insertion order) but unspecified across instances.
///
/// # Example
///
/// ```
/// use congraph_core::{Edge, Node, PropertyGraph};
///
/// let mut graph = PropertyGraph::undirected();
/// graph.insert_node(Node::new("a", "person"));
/// graph.insert_node(Node::new("b", "person"));
/// graph.insert_edge(Edge::new("a", "b", "knows"))?;
///
/// assert_eq!(graph.neighbors("b")?, vec!["a"]);
/// # Ok::<(), error_stack::Report<congraph_core::GraphError>>(())
/// ```
#[derive(Debug, Clone)]
pub struct PropertyGraph<NP = (), EP = ()> {
    nodes: IndexMap<String, Node<NP>>,
    edges: Vec<Edge<EP>>,
    outgoing: FxHashMap<String, Vec<usize>>,
    incoming: FxHashMap<String, Vec<usize>>,
    directed: bool,
}

impl<NP, EP> PropertyGraph<NP, EP> {
    fn with_directedness(directed: bool) -> Self {
        Self {
            nodes: IndexMap::new(),
            edges: Vec::new(),
            outgoing: FxHashMap::default(),
            incoming: FxHashMap::default(),
            directed,
        }
    }

    /// Creates an empty directed graph.
    #[must_use]
    pub fn directed() -> Self {
        Self::with_directedness(true)
    }

    /// Creates an empty undirected graph.
    #[must_use]
    pub fn undirected() -> Self {
        Self::with_directedness(false)
    }

    /// Inserts a node.
    ///
    /// Identifiers are unique: inserting a node with an identifier that is
    /// already present replaces the stored node payload and keeps all
    /// incident edges.
    pub fn insert_node(&mut self, node: Node<NP>) {
        self.nodes.insert(node.id().to_owned(), node);
    }

    /// Inserts an edge.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] when either endpoint does not exist.
    pub fn insert_edge(&mut self, edge: Edge<EP>) -> Result<(), GraphError> {
        for endpoint in [edge.source(), edge.target()] {
            if !self.nodes.contains_key(endpoint) {
                return Err(Report::new(GraphError::NodeNotFound {
                    id: endpoint.to_owned(),
                }));
            }
        }

        let index = self.edges.len();
        self.outgoing
            .entry(edge.source().to_owned())
            .or_default()
            .push(index);
        self.incoming
            .entry(edge.target().to_owned())
            .or_default()
            .push(index);
        self.edges.push(edge);

        Ok(())
    }

    /// Whether edge direction is interpreted by algorithms.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// The number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The number of stored edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether a node with the given identifier exists.
    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Looks up a node by identifier.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node<NP>> {
        self.nodes.get(id)
    }

    /// Iterates over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<NP>> {
        self.nodes.values()
    }

    /// Iterates over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<EP>> {
        self.edges.iter()
    }

    fn edge_indices(&self, map: &FxHashMap<String, Vec<usize>>, id: &str) -> Vec<usize> {
        map.get(id).cloned().unwrap_or_default()
    }

    fn require_node(&self, id: &str) -> Result<(), GraphError> {
        if self.nodes.contains_key(id) {
            Ok(())
        } else {
            Err(Report::new(GraphError::NodeNotFound { id: id.to_owned() }))
        }
    }

    /// The edges leaving the given node.
    ///
    /// For an undirected graph this returns all incident edges, regardless
    /// of storage orientation; a self-loop appears once.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] when the identifier is unknown.
    pub fn outgoing_edges(&self, id: &str) -> Result<Vec<&Edge<EP>>, GraphError> {
        self.require_node(id)?;

        let mut indices = self.edge_indices(&self.outgoing, id);
        if !self.directed {
            // self-loops are already in the outgoing list
            indices.extend(
                self.edge_indices(&self.incoming, id)
                    .into_iter()
                    .filter(|&index| self.edges[index].source() != self.edges[index].target()),
            );
        }

        Ok(indices.into_iter().map(|index| &self.edges[index]).collect())
    }

    /// The edges entering the given node.
    ///
    /// For an undirected graph this is the same set as
    /// [`outgoing_edges`](Self::outgoing_edges).
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] when the identifier is unknown.
    pub fn incoming_edges(&self, id: &str) -> Result<Vec<&Edge<EP>>, GraphError> {
        if !self.directed {
            return self.outgoing_edges(id);
        }
        self.require_node(id)?;

        Ok(self
            .edge_indices(&self.incoming, id)
            .into_iter()
            .map(|index| &self.edges[index])
            .collect())
    }

    /// The neighbor identifiers of the given node.
    ///
    /// Successors for a directed graph; partners over all incident edges
    /// for an undirected one. Parallel edges yield repeated entries.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] when the identifier is unknown.
    pub fn neighbors(&self, id: &str) -> Result<Vec<&str>, GraphError> {
        let edges = self.outgoing_edges(id)?;

        Ok(edges
            .into_iter()
            .map(|edge| {
                if self.directed {
                    edge.target()
                } else {
                    edge.other_endpoint(id)
                }
            })
            .collect())
    }
}
