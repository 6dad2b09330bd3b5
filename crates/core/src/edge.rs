//! Edges of a [`PropertyGraph`](crate::PropertyGraph).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An edge between two nodes, with a discriminator type, an optional
/// non-negative weight and an arbitrary property bag.
///
/// Edges are stored directed; whether the direction is interpreted is
/// decided by the owning graph's directedness flag. An absent weight is
/// read as `1.0` by [`DefaultWeight`](crate::DefaultWeight).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge<P = ()> {
    source: String,
    target: String,
    ty: String,
    weight: Option<f64>,
    properties: P,
}

impl Edge<()> {
    /// Creates an unweighted edge without properties.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        ty: impl Into<String>,
    ) -> Self {
        Self::with_properties(source, target, ty, ())
    }
}

impl<P> Edge<P> {
    /// Creates an unweighted edge carrying a property bag.
    pub fn with_properties(
        source: impl Into<String>,
        target: impl Into<String>,
        ty: impl Into<String>,
        properties: P,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            ty: ty.into(),
            weight: None,
            properties,
        }
    }

    /// Sets the stored weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// The identifier of the source endpoint.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The identifier of the target endpoint.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The discriminator type of this edge.
    #[must_use]
    pub fn ty(&self) -> &str {
        &self.ty
    }

    /// The stored weight, if any.
    #[must_use]
    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    /// The property bag of this edge.
    pub fn properties(&self) -> &P {
        &self.properties
    }

    /// Given one endpoint, returns the other one.
    ///
    /// For a self-loop both endpoints are the same and that identifier is
    /// returned.
    #[must_use]
    pub fn other_endpoint(&self, id: &str) -> &str {
        if self.source == id {
            &self.target
        } else {
            &self.source
        }
    }
}
