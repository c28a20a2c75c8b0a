// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Weight-proportional partition of a hierarchy.
//!
//! Layout runs in three passes over a level-order flattening of the tree:
//!
//! 1. Flatten breadth-first, so parents precede children and each node's
//!    children are contiguous.
//! 2. Accumulate effective weights in reverse order (children before parents).
//! 3. Subdivide each node's primary interval among its children in order,
//!    proportionally to their effective weights.
//!
//! No pass recurses, so arbitrarily deep trees do not grow the call stack.

use alloc::vec::Vec;
use core::ops::Range;

use crate::arc::ArcSector;
use crate::shape::{ArcDescriptor, RectDescriptor, Shape, ShapeDescriptor};
use crate::tree::PartitionDatum;

/// Default thickness of the linear band.
pub const DEFAULT_RECT_STROKE: f64 = 6.0;

/// Default factor applied to band starts to get arc inner radii.
pub const DEFAULT_INNER_RADIUS_SCALE: f64 = 1.9;

/// Tunable constants of the two coordinate strategies.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct LayoutParams {
    /// Height of every bar in the linear strategy.
    pub rect_stroke: f64,
    /// Multiplier from a node's radial band start to its arc inner radius.
    ///
    /// Values above `1` thin out every ring and keep the center open.
    pub inner_radius_scale: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            rect_stroke: DEFAULT_RECT_STROKE,
            inner_radius_scale: DEFAULT_INNER_RADIUS_SCALE,
        }
    }
}

/// One laid-out node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionedNode<'a> {
    /// Distance from the root; the root is `0`.
    pub depth: usize,
    /// Index of the parent in the layout output, `None` for the root.
    pub parent: Option<usize>,
    /// Effective weight: own weight plus all descendants'.
    pub value: f64,
    /// Start of the primary-axis interval (x, or angle in radians).
    pub interval_start: f64,
    /// End of the primary-axis interval.
    pub interval_end: f64,
    /// Start of the secondary-axis band (y, or radial band start).
    pub secondary_start: f64,
    /// End of the secondary-axis band.
    pub secondary_end: f64,
    /// The datum this node was laid out from.
    pub source: &'a PartitionDatum,
}

impl PositionedNode<'_> {
    /// The primary-axis interval.
    #[must_use]
    pub fn interval(&self) -> Range<f64> {
        self.interval_start..self.interval_end
    }

    /// Width of the primary-axis interval.
    #[must_use]
    pub fn interval_width(&self) -> f64 {
        self.interval_end - self.interval_start
    }

    /// The node's category name.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.source.name
    }
}

/// Partition layout engine.
///
/// Holds only parameters; every call lays out from scratch.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PartitionLayout {
    params: LayoutParams,
}

impl PartitionLayout {
    /// Creates an engine with the given parameters.
    #[must_use]
    pub fn new(params: LayoutParams) -> Self {
        Self { params }
    }

    /// The engine's parameters.
    #[must_use]
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Lays out `tree` in level order.
    ///
    /// The root spans `[0, width]` for [`Shape::Linear`] and `[0, 2π]` for
    /// [`Shape::Angular`]. Every node gets a sub-range of its parent's range
    /// proportional to its effective weight among its siblings. When all
    /// siblings weigh zero they split the parent's range evenly instead.
    ///
    /// Weights and extents are not validated: NaN own weights count as zero
    /// and anything else, including negative values, flows through the
    /// arithmetic as given.
    ///
    /// The output height is accepted for symmetry with the viewport; neither
    /// strategy reads it.
    #[must_use]
    pub fn layout<'a>(
        &self,
        tree: &'a PartitionDatum,
        shape: Shape,
        width: f64,
        _height: f64,
    ) -> Vec<PositionedNode<'a>> {
        let flat = Flattened::new(tree);
        let values = flat.effective_weights();
        let intervals = flat.intervals(&values, shape.primary_extent(width));

        let radial_step = width / 2.0 / (flat.height as f64 + 1.0);
        let stroke = self.params.rect_stroke;

        flat.entries
            .iter()
            .zip(values)
            .zip(intervals)
            .map(|((entry, value), (interval_start, interval_end))| {
                let (secondary_start, secondary_end) = match shape {
                    // Every level shares the same band.
                    Shape::Linear => (0.0, stroke),
                    Shape::Angular => {
                        let depth = entry.depth as f64;
                        (depth * radial_step, (depth + 1.0) * radial_step)
                    }
                };
                PositionedNode {
                    depth: entry.depth,
                    parent: entry.parent,
                    value,
                    interval_start,
                    interval_end,
                    secondary_start,
                    secondary_end,
                    source: entry.node,
                }
            })
            .collect()
    }

    /// Converts a positioned node into its drawable descriptor.
    #[must_use]
    pub fn describe(
        &self,
        node: &PositionedNode<'_>,
        shape: Shape,
        fill: &str,
    ) -> ShapeDescriptor {
        match shape {
            Shape::Linear => ShapeDescriptor::Rect(RectDescriptor {
                x: node.interval_start,
                y: 0.0,
                width: node.interval_width(),
                height: self.params.rect_stroke,
                fill: fill.into(),
            }),
            Shape::Angular => {
                ShapeDescriptor::Arc(ArcDescriptor::new(self.sector(node), fill.into()))
            }
        }
    }

    /// The annular sector an angular node is drawn as.
    #[must_use]
    pub fn sector(&self, node: &PositionedNode<'_>) -> ArcSector {
        ArcSector {
            start_angle: node.interval_start,
            end_angle: node.interval_end,
            inner_radius: node.secondary_start * self.params.inner_radius_scale,
            outer_radius: node.secondary_end,
        }
    }
}

/// Lays out `tree` with default [`LayoutParams`].
///
/// See [`PartitionLayout::layout`].
#[must_use]
pub fn layout(
    tree: &PartitionDatum,
    shape: Shape,
    width: f64,
    height: f64,
) -> Vec<PositionedNode<'_>> {
    PartitionLayout::default().layout(tree, shape, width, height)
}

#[derive(Copy, Clone, Debug)]
struct FlatEntry<'a> {
    node: &'a PartitionDatum,
    depth: usize,
    parent: Option<usize>,
    first_child: usize,
}

/// Level-order flattening of a tree.
#[derive(Debug)]
struct Flattened<'a> {
    entries: Vec<FlatEntry<'a>>,
    /// Maximum depth.
    height: usize,
}

impl<'a> Flattened<'a> {
    fn new(root: &'a PartitionDatum) -> Self {
        let mut entries = alloc::vec![FlatEntry {
            node: root,
            depth: 0,
            parent: None,
            first_child: 0,
        }];
        let mut height = 0;

        // `entries` doubles as the BFS queue.
        let mut cursor = 0;
        while cursor < entries.len() {
            let FlatEntry { node, depth, .. } = entries[cursor];
            entries[cursor].first_child = entries.len();
            if !node.children.is_empty() {
                height = height.max(depth + 1);
            }
            entries.extend(node.children.iter().map(|child| FlatEntry {
                node: child,
                depth: depth + 1,
                parent: Some(cursor),
                first_child: 0,
            }));
            cursor += 1;
        }

        Self { entries, height }
    }

    fn children(&self, index: usize) -> Range<usize> {
        let entry = &self.entries[index];
        entry.first_child..entry.first_child + entry.node.children.len()
    }

    fn effective_weights(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self.entries.iter().map(|e| e.node.own_weight()).collect();
        for index in (1..self.entries.len()).rev() {
            if let Some(parent) = self.entries[index].parent {
                values[parent] += values[index];
            }
        }
        values
    }

    fn intervals(&self, values: &[f64], extent: f64) -> Vec<(f64, f64)> {
        let mut intervals = alloc::vec![(0.0, 0.0); self.entries.len()];
        intervals[0] = (0.0, extent);

        for index in 0..self.entries.len() {
            let children = self.children(index);
            if children.is_empty() {
                continue;
            }
            let (start, end) = intervals[index];
            let span = end - start;
            let total: f64 = values[children.clone()].iter().sum();

            if total == 0.0 {
                let count = children.len() as f64;
                for (k, child) in children.enumerate() {
                    let k = k as f64;
                    intervals[child] = (
                        start + span * k / count,
                        start + span * (k + 1.0) / count,
                    );
                }
            } else {
                // Cumulative weights keep the last child flush with `end`.
                let mut cumulative = 0.0;
                for child in children {
                    let child_start = start + span * cumulative / total;
                    cumulative += values[child];
                    intervals[child] = (child_start, start + span * cumulative / total);
                }
            }
        }
        intervals
    }
}
