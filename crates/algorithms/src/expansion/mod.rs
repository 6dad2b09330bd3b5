//! Guided multi-seed expansion.
//!
//! [`IdtExpansion`] grows one frontier per seed node, always expanding the
//! globally cheapest frontier next, and keeps going a bounded number of
//! iterations after the frontiers start to overlap (intelligent delayed
//! termination).

pub mod expander;
pub mod idt;
pub mod queue;

pub use self::{
    expander::{GraphExpander, PropertyGraphExpander},
    idt::{
        DegreeHistogram, DiscoveredPath, ExpansionStats, IdtConfig, IdtError, IdtExpansion,
        IdtResult, SampledEdge,
    },
    queue::MinPriorityQueue,
};
