// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Rect, Size};

use crate::shape::Shape;

/// The coordinate system a set of descriptors is drawn in.
///
/// Displays as an SVG `viewBox` value: `"min_x min_y width height"`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Top-left corner.
    pub origin: Point,
    /// Extent.
    pub size: Size,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// The viewport for a layout of the given shape and output size.
    ///
    /// Linear layouts are one band tall, so only `stroke` of height is
    /// needed. Angular layouts are centered on the origin and shift the
    /// view by the radius (`width / 2`) so negative quadrants are visible.
    #[must_use]
    pub fn for_shape(shape: Shape, width: f64, height: f64, stroke: f64) -> Self {
        match shape {
            Shape::Linear => Self::new(Point::ZERO, Size::new(width, stroke)),
            Shape::Angular => {
                let radius = width / 2.0;
                Self::new(Point::new(-radius, -radius), Size::new(width, height))
            }
        }
    }

    /// The viewport as a rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `+ 0.0` turns negative zero into zero.
        write!(
            f,
            "{} {} {} {}",
            self.origin.x + 0.0,
            self.origin.y + 0.0,
            self.size.width + 0.0,
            self.size.height + 0.0
        )
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Viewport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
