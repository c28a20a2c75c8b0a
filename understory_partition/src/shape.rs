// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape selection and the drawable descriptors emitted per node.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use kurbo::{Affine, Rect};
use peniko::Color;

use crate::arc::ArcSector;
use crate::color::{ColorParseError, parse_fill};

/// Which coordinate strategy a layout uses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// Axis-aligned bars along the horizontal axis (an icicle strip).
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "rect", alias = "linear"))]
    Linear,
    /// Annular sectors around the origin (a sunburst).
    #[cfg_attr(feature = "serde", serde(rename = "path", alias = "angular"))]
    Angular,
}

impl Shape {
    /// The tag the host uses for this shape: `rect` or `path`.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Linear => "rect",
            Self::Angular => "path",
        }
    }

    /// Total length of the primary axis for an output of the given width.
    #[must_use]
    pub fn primary_extent(self, width: f64) -> f64 {
        match self {
            Self::Linear => width,
            Self::Angular => core::f64::consts::TAU,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when parsing an unknown [`Shape`] name.
#[derive(Clone, PartialEq, Eq)]
pub struct ParseShapeError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Debug for ParseShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParseShapeError {{ input: {:?} }}", self.input)
    }
}

impl fmt::Display for ParseShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown partition shape {:?}, expected `rect` or `path`",
            self.input
        )
    }
}

impl core::error::Error for ParseShapeError {}

impl FromStr for Shape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rect" | "linear" => Ok(Self::Linear),
            "path" | "angular" => Ok(Self::Angular),
            _ => Err(ParseShapeError { input: s.into() }),
        }
    }
}

/// A filled bar produced by the linear strategy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RectDescriptor {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent; may be zero for weightless nodes.
    pub width: f64,
    /// Band thickness.
    pub height: f64,
    /// Fill color string.
    pub fill: String,
}

impl RectDescriptor {
    /// The bar as a `kurbo` rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// A filled annular sector produced by the angular strategy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArcDescriptor {
    /// SVG path data for the sector.
    #[cfg_attr(feature = "serde", serde(rename = "d"))]
    pub path_data: String,
    /// SVG transform applied to the path.
    pub transform: String,
    /// Fill color string.
    pub fill: String,
    /// The sector geometry the path data was serialized from.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub sector: ArcSector,
}

/// Rotation applied to every arc so that angle `0` points up.
pub const ARC_TRANSFORM: &str = "rotate(-90)";

impl ArcDescriptor {
    /// Builds the descriptor for a sector, serializing its path data.
    #[must_use]
    pub fn new(sector: ArcSector, fill: String) -> Self {
        Self {
            path_data: sector.to_svg_path(),
            transform: ARC_TRANSFORM.into(),
            fill,
            sector,
        }
    }

    /// The transform as an affine map.
    #[must_use]
    pub fn transform_affine(&self) -> Affine {
        Affine::rotate(-core::f64::consts::FRAC_PI_2)
    }
}

/// One drawable primitive, tagged by shape.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ShapeDescriptor {
    /// Produced by [`Shape::Linear`].
    Rect(RectDescriptor),
    /// Produced by [`Shape::Angular`].
    Arc(ArcDescriptor),
}

impl ShapeDescriptor {
    /// Which strategy produced this descriptor.
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Self::Rect(_) => Shape::Linear,
            Self::Arc(_) => Shape::Angular,
        }
    }

    /// The fill color string.
    #[must_use]
    pub fn fill(&self) -> &str {
        match self {
            Self::Rect(rect) => &rect.fill,
            Self::Arc(arc) => &arc.fill,
        }
    }

    /// The fill parsed as a CSS color.
    pub fn fill_color(&self) -> Result<Color, ColorParseError> {
        parse_fill(self.fill())
    }

    /// Returns the rect descriptor, if this is one.
    #[must_use]
    pub fn as_rect(&self) -> Option<&RectDescriptor> {
        match self {
            Self::Rect(rect) => Some(rect),
            Self::Arc(_) => None,
        }
    }

    /// Returns the arc descriptor, if this is one.
    #[must_use]
    pub fn as_arc(&self) -> Option<&ArcDescriptor> {
        match self {
            Self::Arc(arc) => Some(arc),
            Self::Rect(_) => None,
        }
    }
}
