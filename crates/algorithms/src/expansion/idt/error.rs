use core::fmt::{Display, Formatter};

use error_stack::Context;

/// Errors of IDT expansion construction.
#[derive(Debug)]
pub enum IdtError {
    /// Expansion needs at least two seeds to have frontiers that can meet.
    InsufficientSeeds {
        /// Seeds required.
        required: usize,
        /// Seeds supplied.
        actual: usize,
    },
}

impl Display for IdtError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InsufficientSeeds { required, actual } => {
                write!(f, "expansion needs {required} seeds, got {actual}")
            }
        }
    }
}

impl Context for IdtError {}
