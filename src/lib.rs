//! # Vega-Track: Procedural Racetrack Generation
//!
//! Generates closed racetrack layouts from a random point cloud: the
//! cloud is Delaunay-triangulated, the triangulation's Voronoi dual graph
//! is built from triangle circumcenters, a randomized backtracking search
//! finds a closed non-self-intersecting circuit over that graph, and the
//! resulting loop is weighted with per-vertex curvature and turned into a
//! closed cubic Bezier contour.
//!
//! ## Features
//!
//! - **Deterministic**: all randomness flows from one seeded PRNG; every
//!   track records the seed it was generated from and can be replayed
//! - **Typed failure**: an uncloseable parameter set yields an explicit
//!   invalid result after a bounded retry budget, never a hang or a panic
//! - **Inspectable pipeline**: the triangulation, the Voronoi graph, the
//!   raw loop and the final contour are all kept on the result for
//!   rendering or debugging
//! - **Manual override**: a hand-placed loop can replace the search and
//!   still run through centering, curvature and contour construction
//!
//! ## Quick Start
//!
//! ```rust
//! use vega_track::{GeneratorConfig, TrackGenerator};
//!
//! let config = GeneratorConfig::default().with_point_count(75);
//! let generator = TrackGenerator::new(config)?;
//!
//! let track = generator.generate_with_seed(1);
//! if track.is_valid() {
//!     println!(
//!         "{} turns over {:.2} units",
//!         track.circuit.info.turn_count, track.circuit.info.length
//!     );
//! }
//! # Ok::<(), vega_track::TrackError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: fundamental geometry ([`Point`], [`Bounds`])
//! - [`config`]: the flat [`GeneratorConfig`] with TOML loading
//! - [`delaunay`]: Bowyer-Watson triangulation of the point cloud
//! - [`voronoi`]: dual graph over triangle circumcenters
//! - [`circuit`]: the randomized circuit search and its result types
//! - [`curve`]: curvature weighting and Bezier contour construction
//! - [`generator`]: the pipeline front door
//!
//! ## Data Flow
//!
//! ```text
//! ┌─────────────┐     ┌───────────────┐     ┌──────────────┐
//! │ Point cloud │     │   Delaunay    │     │   Voronoi    │
//! │  (seeded)   │────►│ triangulation │────►│  dual graph  │
//! └─────────────┘     └───────────────┘     └──────┬───────┘
//!                                                  │
//!                                                  ▼
//! ┌─────────────┐     ┌───────────────┐     ┌──────────────┐
//! │   Bezier    │     │   Curvature   │     │   Circuit    │
//! │   contour   │◄────│   weighting   │◄────│   search     │
//! └─────────────┘     └───────────────┘     └──────────────┘
//! ```
//!
//! Coordinates are y-up with the generation area anchored at the origin;
//! a positive shoelace sum therefore means a clockwise circuit.

pub mod circuit;
pub mod config;
pub mod core;
pub mod curve;
pub mod delaunay;
pub mod error;
pub mod generator;
pub mod voronoi;

// Re-export main types at crate root
pub use circuit::{CircuitFailure, CircuitInformation, CircuitPathfinder, CircuitResult};
pub use config::GeneratorConfig;
pub use core::{Bounds, Point};
pub use curve::{assign_curvature, build_closed_bezier, BezierSegment, CurvaturePoint};
pub use delaunay::{generate_points, super_triangle, triangulate, Triangle};
pub use error::{Result, TrackError};
pub use generator::{GeneratedTrack, TrackGenerator};
pub use voronoi::{VoronoiGraph, VoronoiNode};
