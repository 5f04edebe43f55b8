//! Triangle and edge primitives for the triangulation.

use serde::Serialize;

use crate::core::Point;

/// A triangle with its circumcircle, computed once at construction.
///
/// Vertices are plain values; the triangle owns nothing. A degenerate
/// (collinear) vertex set produces a non-finite circumcenter, which every
/// downstream test treats as "outside" — tolerated, never corrected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
    circumcenter: Point,
    circumradius_squared: f32,
}

impl Triangle {
    /// Create a triangle and compute its circumcircle.
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        let a_sq = a.x * a.x + a.y * a.y;
        let b_sq = b.x * b.x + b.y * b.y;
        let c_sq = c.x * c.x + c.y * c.y;
        let circumcenter = Point::new(
            (a_sq * (b.y - c.y) + b_sq * (c.y - a.y) + c_sq * (a.y - b.y)) / d,
            (a_sq * (c.x - b.x) + b_sq * (a.x - c.x) + c_sq * (b.x - a.x)) / d,
        );
        let circumradius_squared = circumcenter.distance_squared(&a);
        Self {
            a,
            b,
            c,
            circumcenter,
            circumradius_squared,
        }
    }

    /// Center of the circumscribed circle
    #[inline]
    pub fn circumcenter(&self) -> Point {
        self.circumcenter
    }

    /// Squared radius of the circumscribed circle
    #[inline]
    pub fn circumradius_squared(&self) -> f32 {
        self.circumradius_squared
    }

    /// Strict circumcircle containment: points exactly on the circle do
    /// not count as inside.
    #[inline]
    pub fn circumcircle_contains(&self, point: Point) -> bool {
        self.circumcenter.distance_squared(&point) < self.circumradius_squared
    }

    /// Check whether `point` is one of the three vertices
    #[inline]
    pub fn has_vertex(&self, point: Point) -> bool {
        self.a == point || self.b == point || self.c == point
    }

    /// Check whether the two triangles share at least one vertex
    pub fn shares_vertex(&self, other: &Triangle) -> bool {
        self.has_vertex(other.a) || self.has_vertex(other.b) || self.has_vertex(other.c)
    }

    /// Check whether the two triangles share an edge (two vertices)
    pub fn shares_edge(&self, other: &Triangle) -> bool {
        let mut shared = 0;
        for vertex in [other.a, other.b, other.c] {
            if self.has_vertex(vertex) {
                shared += 1;
            }
        }
        shared >= 2
    }

    /// The three edges, in vertex order
    pub fn edges(&self) -> [Edge; 3] {
        [
            Edge::new(self.a, self.b),
            Edge::new(self.b, self.c),
            Edge::new(self.c, self.a),
        ]
    }
}

/// An undirected edge between two points.
///
/// Equality ignores orientation. Used transiently while re-triangulating
/// the cavity around an inserted point.
#[derive(Clone, Copy, Debug)]
pub struct Edge {
    pub a: Point,
    pub b: Point,
}

impl Edge {
    /// Create a new edge
    #[inline]
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}
