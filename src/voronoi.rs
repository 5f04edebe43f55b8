//! Voronoi dual graph of the triangulation.
//!
//! One node per triangle, placed at its circumcenter; two nodes are
//! neighbors when their triangles share an edge. Triangles whose
//! circumcenter falls outside the generation area are discarded first, so
//! the graph stays confined to it. Nodes reference each other by index
//! into one flat array; indices are stable for the graph's lifetime.
//!
//! No connectivity guarantee is made. A disconnected (or empty) graph is
//! legal and shows up downstream as circuit-search failure, never as a
//! crash.

use log::debug;
use serde::Serialize;

use crate::core::{Bounds, Point};
use crate::delaunay::Triangle;

/// A graph node at a triangle circumcenter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VoronoiNode {
    /// Circumcenter of the generating triangle
    pub position: Point,
    /// Indices of edge-adjacent nodes (at most 3)
    pub neighbors: Vec<usize>,
}

/// The dual graph the circuit search runs on.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VoronoiGraph {
    nodes: Vec<VoronoiNode>,
    triangle_vertices: Vec<Point>,
}

impl VoronoiGraph {
    /// Build the dual graph of a triangulation.
    pub fn build(triangulation: &[Triangle], bounds: &Bounds) -> Self {
        let kept: Vec<&Triangle> = triangulation
            .iter()
            .filter(|t| bounds.contains(t.circumcenter()))
            .collect();

        let mut nodes: Vec<VoronoiNode> = kept
            .iter()
            .map(|t| VoronoiNode {
                position: t.circumcenter(),
                neighbors: Vec::with_capacity(3),
            })
            .collect();

        for i in 0..kept.len() {
            let mut edge_count = 0;
            for j in 0..kept.len() {
                if i == j {
                    continue;
                }
                if kept[i].shares_edge(kept[j]) {
                    nodes[i].neighbors.push(j);
                    edge_count += 1;
                    // A triangle has three edges, so the scan can stop early.
                    if edge_count == 3 {
                        break;
                    }
                }
            }
        }

        let mut triangle_vertices: Vec<Point> = Vec::new();
        for triangle in &kept {
            for vertex in [triangle.a, triangle.b, triangle.c] {
                if !triangle_vertices.contains(&vertex) {
                    triangle_vertices.push(vertex);
                }
            }
        }

        debug!(
            "[Voronoi] {} of {} triangles kept, {} graph nodes",
            kept.len(),
            triangulation.len(),
            nodes.len()
        );
        Self {
            nodes,
            triangle_vertices,
        }
    }

    /// Build a graph directly from prepared nodes.
    pub fn from_nodes(nodes: Vec<VoronoiNode>, triangle_vertices: Vec<Point>) -> Self {
        Self {
            nodes,
            triangle_vertices,
        }
    }

    /// Number of nodes
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True when the graph has no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node by index
    #[inline]
    pub fn node(&self, index: usize) -> &VoronoiNode {
        &self.nodes[index]
    }

    /// All nodes
    #[inline]
    pub fn nodes(&self) -> &[VoronoiNode] {
        &self.nodes
    }

    /// Node position by index
    #[inline]
    pub fn position(&self, index: usize) -> Point {
        self.nodes[index].position
    }

    /// Vertices of the kept triangles, for diagnostic display
    pub fn triangle_vertices(&self) -> &[Point] {
        &self.triangle_vertices
    }
}
