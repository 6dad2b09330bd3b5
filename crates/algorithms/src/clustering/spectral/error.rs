use core::fmt::{Display, Formatter};

use error_stack::Context;

/// Errors of spectral partitioning.
#[derive(Debug)]
pub enum SpectralError {
    /// The algorithm was invoked on a graph with zero nodes.
    EmptyGraph,
    /// The requested partition count is outside `2..=node_count`.
    InvalidPartitionCount {
        /// Requested partitions.
        k: usize,
        /// Nodes available.
        node_count: usize,
    },
}

impl Display for SpectralError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyGraph => f.write_str("graph has no nodes"),
            Self::InvalidPartitionCount { k, node_count } => {
                write!(f, "cannot split {node_count} nodes into {k} partitions")
            }
        }
    }
}

impl Context for SpectralError {}
