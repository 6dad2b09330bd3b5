use core::fmt::{Display, Formatter};

use error_stack::Context;

/// Errors of the community-detection engine.
#[derive(Debug)]
pub enum CommunityError {
    /// The algorithm was invoked on a graph with zero nodes.
    ///
    /// A graph with nodes but no edges is not an error; it yields
    /// singleton communities.
    EmptyGraph,
    /// Reserved. The engine currently always returns a best-effort
    /// partition instead of failing to converge, so this variant is never
    /// constructed.
    ConvergenceFailure {
        /// Iterations spent before giving up.
        iterations: usize,
    },
}

impl Display for CommunityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyGraph => f.write_str("graph has no nodes"),
            Self::ConvergenceFailure { iterations } => {
                write!(f, "failed to converge after {iterations} iterations")
            }
        }
    }
}

impl Context for CommunityError {}
