//! The rectangular generation area.
//!
//! [`Bounds`] covers `[0, width] x [0, height]` with the origin fixed at
//! `(0, 0)`. Points are generated inside it, the super-triangle is sized
//! from it, and Voronoi nodes whose circumcenter falls outside it are
//! discarded.

use serde::{Deserialize, Serialize};

use super::point::Point;

/// Axis-aligned generation area anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Extent along x
    pub width: f32,
    /// Extent along y
    pub height: f32,
}

impl Bounds {
    /// Create a new generation area
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check if a point is inside the area (edges inclusive)
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    /// Center of the area
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(3.0, 3.0)
    }
}
