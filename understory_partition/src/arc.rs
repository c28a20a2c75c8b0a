// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Annular sector geometry and its SVG path serialization.

use alloc::string::String;
use core::f64::consts::{PI, TAU};
use core::fmt::Write as _;

use kurbo::{Arc, BezPath, Point, Vec2};

use crate::util::{decimals_for, fmt_scalar};

/// Radii and sweeps below this are treated as zero.
const EPSILON: f64 = 1e-12;

/// A ring segment centered on the origin.
///
/// Angles are in radians, measured from the positive x axis in the
/// y-down SVG convention, so increasing angles run clockwise on screen.
/// The radii may be given in either order; the drawn ring always spans the
/// region between them.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ArcSector {
    /// Start angle.
    pub start_angle: f64,
    /// End angle.
    pub end_angle: f64,
    /// Inner radius as laid out.
    pub inner_radius: f64,
    /// Outer radius as laid out.
    pub outer_radius: f64,
}

impl ArcSector {
    /// Returns the `(smaller, larger)` radius pair.
    #[must_use]
    pub fn radii(&self) -> (f64, f64) {
        if self.outer_radius < self.inner_radius {
            (self.outer_radius, self.inner_radius)
        } else {
            (self.inner_radius, self.outer_radius)
        }
    }

    /// Signed angular sweep, `end_angle - start_angle`.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Serializes the sector as SVG path data using elliptical arc commands.
    ///
    /// A sweep of a full turn or more is written as a closed ring made of two
    /// half-circle arcs per radius, since a single SVG arc cannot describe a
    /// full circle. Scalars are rounded relative to the larger radius.
    #[must_use]
    pub fn to_svg_path(&self) -> String {
        let (r0, r1) = self.radii();
        let (a0, a1) = (self.start_angle, self.end_angle);
        let mut d = String::new();

        if r1.is_nan() || r1 <= EPSILON {
            d.push_str("M0 0Z");
            return d;
        }

        let p = decimals_for(r1);
        let da = (a1 - a0).abs();
        let sweep_flag = u8::from(a1 > a0);

        if da >= TAU - EPSILON {
            write_full_circle(&mut d, p, r1, a0, sweep_flag);
            if r0 > EPSILON {
                write_full_circle(&mut d, p, r0, a1, 1 - sweep_flag);
            }
            return d;
        }

        if da <= EPSILON {
            move_to(&mut d, p, point_at(r1, a0));
            line_to(&mut d, p, point_at(r0, a0));
            d.push('Z');
            return d;
        }

        let large_arc = u8::from(da > PI);
        move_to(&mut d, p, point_at(r1, a0));
        arc_to(&mut d, p, r1, large_arc, sweep_flag, point_at(r1, a1));
        if r0 > EPSILON {
            line_to(&mut d, p, point_at(r0, a1));
            arc_to(&mut d, p, r0, large_arc, 1 - sweep_flag, point_at(r0, a0));
        } else {
            line_to(&mut d, p, Point::ZERO);
        }
        d.push('Z');
        d
    }

    /// Builds the sector outline as a Bézier path.
    ///
    /// `tolerance` bounds the distance between the true arcs and their cubic
    /// approximation. A sector with no outer radius yields an empty path.
    #[must_use]
    pub fn to_path(&self, tolerance: f64) -> BezPath {
        let (r0, r1) = self.radii();
        let mut path = BezPath::new();
        if r1.is_nan() || r1 <= EPSILON {
            return path;
        }

        let sweep = self.sweep().clamp(-TAU, TAU);
        let start = self.start_angle;
        let end = start + sweep;

        path.move_to(point_at(r1, start));
        let outer = Arc {
            center: Point::ZERO,
            radii: Vec2::new(r1, r1),
            start_angle: start,
            sweep_angle: sweep,
            x_rotation: 0.0,
        };
        path.extend(outer.append_iter(tolerance));

        if r0 > EPSILON {
            path.line_to(point_at(r0, end));
            let inner = Arc {
                center: Point::ZERO,
                radii: Vec2::new(r0, r0),
                start_angle: end,
                sweep_angle: -sweep,
                x_rotation: 0.0,
            };
            path.extend(inner.append_iter(tolerance));
        } else {
            path.line_to(Point::ZERO);
        }
        path.close_path();
        path
    }
}

fn point_at(radius: f64, angle: f64) -> Point {
    (Vec2::from_angle(angle) * radius).to_point()
}

fn move_to(d: &mut String, decimals: usize, p: Point) {
    let _ = write!(
        d,
        "M{} {}",
        fmt_scalar(p.x, decimals),
        fmt_scalar(p.y, decimals)
    );
}

fn line_to(d: &mut String, decimals: usize, p: Point) {
    let _ = write!(
        d,
        "L{} {}",
        fmt_scalar(p.x, decimals),
        fmt_scalar(p.y, decimals)
    );
}

fn arc_to(
    d: &mut String,
    decimals: usize,
    radius: f64,
    large_arc: u8,
    sweep_flag: u8,
    p: Point,
) {
    let r = fmt_scalar(radius, decimals);
    let _ = write!(
        d,
        "A{r} {r} 0 {large_arc} {sweep_flag} {} {}",
        fmt_scalar(p.x, decimals),
        fmt_scalar(p.y, decimals)
    );
}

fn write_full_circle(d: &mut String, decimals: usize, radius: f64, angle: f64, sweep_flag: u8) {
    let start = point_at(radius, angle);
    let opposite = point_at(radius, angle + PI);
    move_to(d, decimals, start);
    arc_to(d, decimals, radius, 1, sweep_flag, opposite);
    arc_to(d, decimals, radius, 1, sweep_flag, start);
    d.push('Z');
}
