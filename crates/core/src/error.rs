use core::fmt::{Display, Formatter};

use error_stack::Context;

/// Error type for graph accessor operations.
#[derive(Debug)]
pub enum GraphError {
    /// A lookup referenced a node identifier that is not part of the graph.
    NodeNotFound {
        /// The unknown identifier.
        id: String,
    },
}

impl Display for GraphError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NodeNotFound { id } => write!(f, "node `{id}` does not exist"),
        }
    }
}

impl Context for GraphError {}
