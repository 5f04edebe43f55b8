//! Curvature weighting and Bezier contour construction.

mod bezier;
mod curvature;

pub use bezier::{build_closed_bezier, BezierSegment};
pub use curvature::{assign_curvature, CurvaturePoint, CURVATURE_BIAS};
