// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batch entry point: lay out and color every tree in a configuration.

use alloc::vec::Vec;

use crate::color::ColorMap;
use crate::diagnostics::DiagnosticSink;
use crate::layout::{LayoutParams, PartitionLayout};
use crate::shape::{Shape, ShapeDescriptor};
use crate::tree::PartitionDatum;
use crate::viewport::Viewport;

/// Everything a batch of layouts needs.
///
/// With the `serde` feature this deserializes from the host message shape:
/// `{"colorMap": {..}, "data": [..], "shape": "rect", "width": 100, "height": 10}`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PartitionConfig {
    /// Category colors. The sentinel entry is injected here by [`run`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub color_map: ColorMap,
    /// Trees to lay out, one result each.
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: Vec<PartitionDatum>,
    /// Coordinate strategy shared by every tree.
    #[cfg_attr(feature = "serde", serde(default))]
    pub shape: Shape,
    /// Output width.
    pub width: f64,
    /// Output height.
    pub height: f64,
    /// Strategy constants.
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: LayoutParams,
}

impl PartitionConfig {
    /// Creates a configuration with no trees and no colors.
    #[must_use]
    pub fn new(shape: Shape, width: f64, height: f64) -> Self {
        Self {
            shape,
            width,
            height,
            ..Self::default()
        }
    }

    /// Replaces the color map.
    #[must_use]
    pub fn with_colors(mut self, color_map: ColorMap) -> Self {
        self.color_map = color_map;
        self
    }

    /// Appends a tree.
    #[must_use]
    pub fn with_tree(mut self, tree: PartitionDatum) -> Self {
        self.data.push(tree);
        self
    }

    /// Replaces the strategy constants.
    #[must_use]
    pub fn with_params(mut self, params: LayoutParams) -> Self {
        self.params = params;
        self
    }
}

/// The drawable output for one tree.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LayoutResult {
    /// Descriptors in level order.
    pub nodes: Vec<ShapeDescriptor>,
    /// Coordinate system the descriptors are expressed in.
    #[cfg_attr(feature = "serde", serde(rename = "viewBox"))]
    pub viewport: Viewport,
    /// Strategy that produced the descriptors.
    #[cfg_attr(feature = "serde", serde(rename = "tag"))]
    pub shape_kind: Shape,
}

/// Lays out every tree in `config`.
///
/// Lookup misses are logged with `tracing` and otherwise dropped; use
/// [`run_with_diagnostics`] to collect them.
pub fn run(config: &mut PartitionConfig) -> Vec<LayoutResult> {
    run_with_diagnostics(config, &mut ())
}

/// Lays out every tree in `config`, reporting lookup misses to `sink`.
///
/// Results correspond one-to-one, in order, with `config.data`. The only
/// change made to `config` is injecting the sentinel color, so repeated runs
/// produce identical results.
///
/// In the angular strategy the root spans the whole circle with no inner
/// geometry, so it is not emitted and not colored.
pub fn run_with_diagnostics(
    config: &mut PartitionConfig,
    sink: &mut impl DiagnosticSink,
) -> Vec<LayoutResult> {
    config.color_map.ensure_empty_color();

    let PartitionConfig {
        color_map,
        data,
        shape,
        width,
        height,
        params,
    } = config;
    let (shape, width, height) = (*shape, *width, *height);
    let engine = PartitionLayout::new(*params);
    let viewport = Viewport::for_shape(shape, width, height, params.rect_stroke);

    let mut results = Vec::with_capacity(data.len());
    for (index, tree) in data.iter().enumerate() {
        let positioned = engine.layout(tree, shape, width, height);
        tracing::debug!(
            tree = index,
            nodes = positioned.len(),
            depth = positioned.last().map_or(0, |n| n.depth),
            %shape,
            "laid out partition"
        );

        let mut nodes = Vec::with_capacity(positioned.len());
        for node in &positioned {
            if shape == Shape::Angular && node.depth == 0 {
                continue;
            }
            let fill = color_map.resolve_with(node.category(), sink);
            nodes.push(engine.describe(node, shape, fill));
        }

        results.push(LayoutResult {
            nodes,
            viewport,
            shape_kind: shape,
        });
    }
    results
}
