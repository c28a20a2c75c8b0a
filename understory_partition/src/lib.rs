// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_partition --heading-base-level=0

//! Understory Partition: headless hierarchical partition layout.
//!
//! This crate turns a weighted tree into flat, colored drawing primitives
//! sized by subtree weight. Two coordinate strategies are supported:
//!
//! - [`Shape::Linear`] emits axis-aligned bars ([`RectDescriptor`]), an icicle strip.
//! - [`Shape::Angular`] emits annular sectors ([`ArcDescriptor`]), a sunburst.
//!
//! It does **not** render anything. Descriptors carry plain numbers, SVG path
//! data and fill strings, plus `kurbo` conversions for renderers that prefer
//! geometry. Callers are expected to:
//! - Build or deserialize a [`PartitionConfig`].
//! - Call [`run`] (or [`run_with_diagnostics`]) once per batch.
//! - Paint each [`LayoutResult`] inside its [`Viewport`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_partition::{ColorMap, PartitionConfig, PartitionDatum, Shape, run};
//!
//! let tree = PartitionDatum::branch(
//!     "root",
//!     [PartitionDatum::leaf("a", 1.0), PartitionDatum::leaf("b", 3.0)],
//! );
//! let mut config = PartitionConfig::new(Shape::Linear, 100.0, 10.0)
//!     .with_colors(ColorMap::new().with("a", "#ff0000").with("b", "#0000ff"))
//!     .with_tree(tree);
//!
//! let results = run(&mut config);
//! let b = results[0].nodes[2].as_rect().unwrap();
//! assert_eq!((b.x, b.width), (25.0, 75.0));
//! assert_eq!(results[0].viewport.to_string(), "0 0 100 6");
//! ```
//!
//! ## Colors and diagnostics
//!
//! Categories with no color fall back to the reserved [`EMPTY_CATEGORY`],
//! which is injected into the caller's map with [`EMPTY_DEFAULT_COLOR`] if
//! missing. Each miss is logged with `tracing::warn!` and reported to an
//! optional [`DiagnosticSink`]; it never stops layout.
//!
//! ```rust
//! use understory_partition::{ColorMap, DiagnosticLog, EMPTY_DEFAULT_COLOR};
//!
//! let mut colors = ColorMap::new().with("a", "#ff0000");
//! let mut log = DiagnosticLog::new();
//! assert_eq!(colors.resolve_with("b", &mut log), EMPTY_DEFAULT_COLOR);
//! assert_eq!(log.len(), 1);
//! assert!(!colors.contains("b"));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo`, `peniko` and `tracing`.
//! - `libm`: `no_std` float support through `kurbo`/`peniko`.
//! - `serde` (default): deserialize [`PartitionConfig`] and serialize
//!   [`LayoutResult`] in the host's JSON shape.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arc;
mod color;
mod diagnostics;
mod layout;
mod partition;
mod shape;
mod tree;
mod util;
mod viewport;

pub use arc::ArcSector;
pub use color::{
    ColorMap, ColorParseError, EMPTY_CATEGORY, EMPTY_DEFAULT_COLOR, empty_categories,
    gradient_offset,
};
pub use diagnostics::{Diagnostic, DiagnosticLog, DiagnosticSink};
pub use layout::{
    DEFAULT_INNER_RADIUS_SCALE, DEFAULT_RECT_STROKE, LayoutParams, PartitionLayout,
    PositionedNode, layout,
};
pub use partition::{LayoutResult, PartitionConfig, run, run_with_diagnostics};
pub use shape::{
    ARC_TRANSFORM, ArcDescriptor, ParseShapeError, RectDescriptor, Shape, ShapeDescriptor,
};
pub use tree::PartitionDatum;
pub use viewport::Viewport;
