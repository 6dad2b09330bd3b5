use core::fmt::{Display, Formatter};

use error_stack::Context;

/// Errors of agglomerative clustering.
#[derive(Debug)]
pub enum HierarchicalError {
    /// The algorithm was invoked on a graph with zero nodes.
    EmptyGraph,
}

impl Display for HierarchicalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyGraph => f.write_str("graph has no nodes"),
        }
    }
}

impl Context for HierarchicalError {}
