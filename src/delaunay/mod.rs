//! Delaunay triangulation of the random point cloud.
//!
//! [`triangulate`] runs the incremental Bowyer-Watson algorithm over a
//! super-triangle sized to the generation area. The resulting triangle
//! list is the input for the Voronoi dual graph.

mod triangle;
mod triangulator;

pub use triangle::{Edge, Triangle};
pub use triangulator::{generate_points, super_triangle, triangulate};
