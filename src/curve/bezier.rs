//! Closed cubic Bezier contour built from the weighted loop.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::Point;
use crate::curve::curvature::CurvaturePoint;

/// One cubic Bezier segment of the closed track contour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BezierSegment {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl BezierSegment {
    /// Evaluate the segment at `t` in [0, 1].
    pub fn point_at(&self, t: f32) -> Point {
        let u = 1.0 - t;
        self.start * (u * u * u)
            + self.control1 * (3.0 * u * u * t)
            + self.control2 * (3.0 * u * t * t)
            + self.end * (t * t * t)
    }
}

/// Build the closed Bezier contour over the weighted loop vertices.
///
/// The outgoing control at each vertex points along the corner bisector
/// `normalize(normalize(next - current) - normalize(previous - current))`,
/// offset by half the distance to the next vertex scaled by the vertex
/// curvature and clamped to `max_control_point_length`. The incoming
/// control of a segment mirrors the next vertex's outgoing control
/// through its anchor, which keeps the contour smooth across anchors.
/// Indexing wraps around, closing the contour.
pub fn build_closed_bezier(
    points: &[CurvaturePoint],
    max_control_point_length: f32,
) -> Vec<BezierSegment> {
    let count = points.len();
    if count < 2 {
        return Vec::new();
    }

    let mut directions = Vec::with_capacity(count);
    let mut offsets = Vec::with_capacity(count);
    for i in 0..count {
        let current = points[i].position;
        let previous = points[(i + count - 1) % count].position;
        let next = points[(i + 1) % count].position;

        let direction =
            ((next - current).normalize() - (previous - current).normalize()).normalize();
        let offset =
            (0.5 * current.distance(&next) * points[i].curvature).min(max_control_point_length);
        directions.push(direction);
        offsets.push(offset);
    }

    let mut segments = Vec::with_capacity(count);
    for i in 0..count {
        let j = (i + 1) % count;
        segments.push(BezierSegment {
            start: points[i].position,
            control1: points[i].position + directions[i] * offsets[i],
            control2: points[j].position - directions[j] * offsets[j],
            end: points[j].position,
        });
    }

    debug!("[Bezier] built {} closed contour segments", segments.len());
    segments
}
