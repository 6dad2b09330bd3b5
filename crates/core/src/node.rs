//! Nodes of a [`PropertyGraph`](crate::PropertyGraph).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A node with a unique string identifier, a discriminator type and an
/// arbitrary property bag.
///
/// The property bag type `P` is supplied by the user and defaults to `()`.
/// The algorithm crates constrain nothing about it; they only rely on the
/// identifier and the type string.
///
/// # Example
///
/// ```
/// use congraph_core::Node;
///
/// let plain = Node::new("alice", "person");
/// assert_eq!(plain.id(), "alice");
///
/// let with_bag = Node::with_properties("p1", "paper", vec!["graphs", "rust"]);
/// assert_eq!(with_bag.properties().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node<P = ()> {
    id: String,
    ty: String,
    properties: P,
}

impl Node<()> {
    /// Creates a node without properties.
    pub fn new(id: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::with_properties(id, ty, ())
    }
}

impl<P> Node<P> {
    /// Creates a node carrying a property bag.
    pub fn with_properties(id: impl Into<String>, ty: impl Into<String>, properties: P) -> Self {
        Self {
            id: id.into(),
            ty: ty.into(),
            properties,
        }
    }

    /// The unique identifier of this node.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The discriminator type of this node.
    #[must_use]
    pub fn ty(&self) -> &str {
        &self.ty
    }

    /// The property bag of this node.
    pub fn properties(&self) -> &P {
        &self.properties
    }
}
