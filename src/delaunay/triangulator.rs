//! Incremental Bowyer-Watson triangulation.
//!
//! Every point is inserted into an initially super-triangle-only mesh:
//! triangles whose circumcircle strictly contains the new point are
//! removed, and the boundary of the resulting cavity is re-triangulated
//! against the point. Triangles touching the super-triangle are purged at
//! the end.
//!
//! Duplicate cloud points are tolerated; together with points landing
//! exactly on a circumcircle they can leave degenerate slivers, which the
//! rest of the pipeline treats as unreachable geometry.

use log::debug;
use rand::Rng;

use crate::core::{Bounds, Point};

use super::triangle::{Edge, Triangle};

/// Generate a uniform random point cloud inside the generation area.
///
/// Coordinates are sampled independently; duplicates are possible.
pub fn generate_points(count: usize, bounds: &Bounds, rng: &mut impl Rng) -> Vec<Point> {
    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        points.push(Point::new(
            rng.random_range(0.0..=bounds.width),
            rng.random_range(0.0..=bounds.height),
        ));
    }
    points
}

/// Build the right super-triangle that encloses the generation area.
///
/// `angle_deg` is the base angle at the origin corner, clamped to
/// [0, 90]. The default 45 degrees gives a symmetric enclosure; other
/// values skew the triangle without affecting the final triangulation
/// beyond its boundary shape.
pub fn super_triangle(bounds: &Bounds, angle_deg: f32) -> Triangle {
    let angle = angle_deg.clamp(0.0, 90.0);
    let angle_a = angle.to_radians();
    let angle_b = (90.0 - angle).to_radians();
    Triangle::new(
        Point::new(0.0, bounds.height + bounds.width * angle_a.tan()),
        Point::ZERO,
        Point::new(bounds.width + bounds.height * angle_b.tan(), 0.0),
    )
}

/// Triangulate a point cloud with the Bowyer-Watson algorithm.
///
/// Points are inserted in input order; the process itself is fully
/// deterministic. The returned triangles share no vertex with the
/// super-triangle.
pub fn triangulate(points: &[Point], bounds: &Bounds, super_angle_deg: f32) -> Vec<Triangle> {
    let super_tri = super_triangle(bounds, super_angle_deg);
    let mut triangulation = vec![super_tri];

    for &point in points {
        insert_point(&mut triangulation, point);
    }

    triangulation.retain(|t| !t.shares_vertex(&super_tri));
    debug!(
        "[Delaunay] {} points triangulated into {} triangles",
        points.len(),
        triangulation.len()
    );
    triangulation
}

fn insert_point(triangulation: &mut Vec<Triangle>, point: Point) {
    let mut bad: Vec<usize> = Vec::new();
    for (i, triangle) in triangulation.iter().enumerate() {
        if triangle.circumcircle_contains(point) {
            bad.push(i);
        }
    }

    let mut edges: Vec<Edge> = Vec::with_capacity(bad.len() * 3);
    for &i in &bad {
        edges.extend_from_slice(&triangulation[i].edges());
    }

    // bad is ascending; removing back to front keeps the indices valid.
    for &i in bad.iter().rev() {
        triangulation.swap_remove(i);
    }

    for edge in cavity_boundary(&edges) {
        triangulation.push(Triangle::new(edge.a, edge.b, point));
    }
}

/// Edges that occur exactly once among the removed triangles form the
/// cavity boundary; an edge shared by two removed triangles was interior
/// to the cavity.
fn cavity_boundary(edges: &[Edge]) -> Vec<Edge> {
    let mut boundary = Vec::with_capacity(edges.len());
    for (i, edge) in edges.iter().enumerate() {
        let mut duplicated = false;
        for (j, other) in edges.iter().enumerate() {
            if i != j && edge == other {
                duplicated = true;
                break;
            }
        }
        if !duplicated {
            boundary.push(*edge);
        }
    }
    boundary
}
