// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input hierarchy.

use alloc::string::String;
use alloc::vec::Vec;

/// One node of a weighted hierarchy.
///
/// `name` is the node's category and doubles as the key for color lookup.
/// `size` is the node's own weight; `None` means it only contributes through
/// its descendants. Children keep their input order all the way to the
/// emitted shapes.
///
/// The hierarchy is owned, so it is always finite and acyclic.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartitionDatum {
    /// Category name.
    pub name: String,
    /// Own weight, if any.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub size: Option<f64>,
    /// Ordered children.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<PartitionDatum>,
}

impl PartitionDatum {
    /// Creates a node with no weight and no children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            children: Vec::new(),
        }
    }

    /// Creates a weighted leaf.
    #[must_use]
    pub fn leaf(name: impl Into<String>, size: f64) -> Self {
        Self::new(name).with_size(size)
    }

    /// Creates an unweighted node with the given children.
    #[must_use]
    pub fn branch(name: impl Into<String>, children: impl IntoIterator<Item = Self>) -> Self {
        Self::new(name).with_children(children)
    }

    /// Sets the node's own weight.
    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Appends children, keeping their order.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Returns `true` if the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The node's own weight as used by layout.
    ///
    /// A missing size counts as `0`, and so does `NaN`. Negative and infinite
    /// sizes are passed through unchanged.
    #[must_use]
    pub fn own_weight(&self) -> f64 {
        match self.size {
            Some(size) if !size.is_nan() => size,
            _ => 0.0,
        }
    }

    /// Returns the number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Self> = alloc::vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}
