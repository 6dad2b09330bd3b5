//! Hierarchical and spectral graph clustering.

pub mod hierarchical;
pub mod spectral;

pub use self::{
    hierarchical::{
        hierarchical_clustering, Dendrogram, HierarchicalClustering, HierarchicalError,
        HierarchicalMetadata, Linkage, Merge,
    },
    spectral::{spectral_partition, Partition, SpectralError, SpectralOptions},
};
