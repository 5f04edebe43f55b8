//! Per-vertex curvature assignment for the circuit loop.

use log::debug;
use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::Point;

/// Fixed bias added to every curvature value so no vertex ends up with a
/// fully degenerate (zero-offset) control point.
pub const CURVATURE_BIAS: f32 = 0.02;

/// A loop vertex with its curvature weight in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurvaturePoint {
    pub position: Point,
    pub curvature: f32,
}

/// Assign a curvature weight to every vertex of a closed loop.
///
/// Each vertex samples a uniform base value in `[min_curve, max_curve]`.
/// With `auto_curve` on, the dot product of the unit vectors toward the
/// previous and the next vertex, clamped to [0, 1], is scaled by
/// `auto_curve_weight` and added on top; only sharp corners (turns
/// approaching 180 degrees) have a positive dot and contribute. The
/// result gets the fixed anti-artifact bias and a final clamp to [0, 1].
///
/// A closed input (first point repeated at the end) is collapsed to its
/// distinct vertices; wraparound indexing restores the loop.
pub fn assign_curvature(
    points: &[Point],
    min_curve: f32,
    max_curve: f32,
    auto_curve_weight: f32,
    auto_curve: bool,
    rng: &mut SmallRng,
) -> Vec<CurvaturePoint> {
    let open = match points.split_last() {
        Some((last, rest)) if !rest.is_empty() && rest[0] == *last => rest,
        _ => points,
    };
    let count = open.len();

    let mut assigned = Vec::with_capacity(count);
    for i in 0..count {
        let mut curvature = if min_curve < max_curve {
            rng.random_range(min_curve..=max_curve)
        } else {
            min_curve
        };

        if auto_curve && count >= 3 {
            let current = open[i];
            let to_previous = (open[(i + count - 1) % count] - current).normalize();
            let to_next = (open[(i + 1) % count] - current).normalize();
            let sharpness = to_previous.dot(&to_next).clamp(0.0, 1.0);
            curvature += sharpness * auto_curve_weight;
        }

        assigned.push(CurvaturePoint {
            position: open[i],
            curvature: (curvature + CURVATURE_BIAS).clamp(0.0, 1.0),
        });
    }

    debug!("[Curvature] weighted {} vertices", assigned.len());
    assigned
}
