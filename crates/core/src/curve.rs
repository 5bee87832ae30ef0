//! Quadratic Bézier arcs bulging above the globe
//!
//! Connections between two participants are drawn as a single quadratic
//! curve whose midpoint is pushed radially out to a "bulge" radius, so the
//! connector clears the sphere instead of cutting through it.
//!
//! The curve is built to *interpolate* the bulged midpoint: evaluating it at
//! `t = 0.5` returns that midpoint exactly. For end points `p0`, `p2` and a
//! desired midpoint `m`, the Bézier control point is
//!
//! ```text
//! c = 2·m - (p0 + p2) / 2
//! B(t) = (1-t)²·p0 + 2(1-t)t·c + t²·p2
//! ```

use crate::core_types::Vec3;
use serde::{Deserialize, Serialize};

/// Below this length a midpoint has no usable direction.
const DEGENERATE_EPSILON: f64 = 1e-9;

/// Quadratic Bézier curve in globe space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticBezier {
    pub start: Vec3,
    pub control: Vec3,
    pub end: Vec3,
}

impl QuadraticBezier {
    /// Curve from raw Bézier control points.
    #[must_use]
    pub fn new(start: Vec3, control: Vec3, end: Vec3) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    /// Curve that passes through `mid` at `t = 0.5`.
    #[must_use]
    pub fn through(start: Vec3, mid: Vec3, end: Vec3) -> Self {
        let control = mid * 2.0 - (start + end) * 0.5;
        Self::new(start, control, end)
    }

    /// Point on the curve at parameter `t` (nominally in [0, 1]).
    #[must_use]
    pub fn point_at(&self, t: f64) -> Vec3 {
        let u = 1.0 - t;
        self.start * (u * u) + self.control * (2.0 * u * t) + self.end * (t * t)
    }

    /// The curve's own midpoint, `point_at(0.5)`.
    #[must_use]
    pub fn midpoint(&self) -> Vec3 {
        self.point_at(0.5)
    }

    /// `divisions + 1` evenly parameterised vertices from start to end.
    ///
    /// Zero divisions yields just the two end points.
    #[must_use]
    pub fn sample_points(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f64 / divisions as f64))
            .collect()
    }

    /// Polyline length over `divisions` segments.
    #[must_use]
    pub fn approximate_length(&self, divisions: usize) -> f64 {
        line_distances(&self.sample_points(divisions))
            .last()
            .copied()
            .unwrap_or(0.0)
    }
}

/// Cumulative distance from the first vertex to every vertex of a polyline.
///
/// Dashed line materials measure dash/gap lengths along these values.
#[must_use]
pub fn line_distances(points: &[Vec3]) -> Vec<f64> {
    let mut distances = Vec::with_capacity(points.len());
    let mut total = 0.0;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            total += (p - points[i - 1]).norm();
        }
        distances.push(total);
    }
    distances
}

/// Build the arc connecting `p1` and `p2`, lifted to `bulge_radius` at its middle.
///
/// The straight midpoint of the two points is normalised and scaled to
/// `bulge_radius`. When the two points are antipodal the straight midpoint is
/// the origin and has no direction; a direction perpendicular to `p1` is used
/// instead so the arc stays well defined.
#[must_use]
pub fn build_arc(p1: Vec3, p2: Vec3, bulge_radius: f64) -> QuadraticBezier {
    let straight_mid = (p1 + p2) * 0.5;
    let direction = straight_mid
        .try_normalize(DEGENERATE_EPSILON)
        .unwrap_or_else(|| fallback_direction(&p1));

    QuadraticBezier::through(p1, direction * bulge_radius, p2)
}

/// Any unit vector perpendicular to `v`, or +Y if `v` itself is degenerate.
fn fallback_direction(v: &Vec3) -> Vec3 {
    [Vec3::y(), Vec3::x(), Vec3::z()]
        .iter()
        .find_map(|axis| v.cross(axis).try_normalize(DEGENERATE_EPSILON))
        .unwrap_or_else(Vec3::y)
}
