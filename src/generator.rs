//! Track generation pipeline.
//!
//! Runs the stages in order: random point cloud, Delaunay triangulation,
//! Voronoi dual graph, circuit search, loop centering, curvature
//! weighting, Bezier contour. Every product of the run is kept on the
//! returned [`GeneratedTrack`] so callers can render or inspect any
//! intermediate stage.
//!
//! All randomness comes from one `SmallRng` seeded per run; the effective
//! seed is recorded on the result, so any track can be regenerated
//! exactly.

use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::circuit::{CircuitInformation, CircuitPathfinder, CircuitResult};
use crate::config::GeneratorConfig;
use crate::core::Point;
use crate::curve::{assign_curvature, build_closed_bezier, BezierSegment, CurvaturePoint};
use crate::delaunay::{generate_points, triangulate, Triangle};
use crate::error::Result;
use crate::voronoi::VoronoiGraph;

/// Everything one generation run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedTrack {
    /// The seed the run was generated from; feed it back through
    /// [`TrackGenerator::generate_with_seed`] to reproduce the track.
    pub seed: u64,
    /// Triangulation of the point cloud (empty for manual tracks)
    pub triangulation: Vec<Triangle>,
    /// Voronoi dual graph the circuit was searched on (empty for manual)
    pub graph: VoronoiGraph,
    /// Circuit search outcome: closed loop plus stats, or a typed failure
    pub circuit: CircuitResult,
    /// Loop vertices with curvature weights (empty on failure)
    pub weighted_loop: Vec<CurvaturePoint>,
    /// Closed Bezier contour of the track (empty on failure)
    pub contour: Vec<BezierSegment>,
}

impl GeneratedTrack {
    /// True when the run produced a usable track
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.circuit.is_valid()
    }
}

/// The front door of the crate: validates a configuration once and then
/// generates any number of tracks from it.
#[derive(Clone, Debug)]
pub struct TrackGenerator {
    config: GeneratorConfig,
}

impl TrackGenerator {
    /// Create a generator, rejecting invalid configurations.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a track. A configured seed of 0 draws a fresh seed from
    /// the OS entropy source; the drawn value is recorded on the result.
    pub fn generate(&self) -> GeneratedTrack {
        let seed = if self.config.seed == 0 {
            rand::rng().random::<u64>()
        } else {
            self.config.seed
        };
        self.run(seed)
    }

    /// Generate with an explicit seed, ignoring the configured one.
    pub fn generate_with_seed(&self, seed: u64) -> GeneratedTrack {
        self.run(seed)
    }

    fn run(&self, seed: u64) -> GeneratedTrack {
        let config = &self.config;
        let mut rng = SmallRng::seed_from_u64(seed);
        debug!("[Track] generating with seed {}", seed);

        let (triangulation, graph, mut circuit) = match &config.manual_points {
            Some(manual) => (Vec::new(), VoronoiGraph::default(), manual_circuit(manual)),
            None => {
                let points = generate_points(config.point_count, &config.bounds, &mut rng);
                let triangulation =
                    triangulate(&points, &config.bounds, config.super_triangle_angle);
                let graph = VoronoiGraph::build(&triangulation, &config.bounds);
                let circuit = CircuitPathfinder::new(config).find_circuit(&graph, &mut rng);
                (triangulation, graph, circuit)
            }
        };

        if !circuit.is_valid() {
            warn!(
                "[Track] seed {} produced no circuit after {} attempts",
                seed, circuit.attempts
            );
        } else if config.center_path {
            center_loop(&mut circuit.points, config.center_point);
        }

        let weighted_loop = assign_curvature(
            &circuit.points,
            config.min_curve,
            config.max_curve,
            config.auto_curve_weight,
            config.auto_curve,
            &mut rng,
        );
        let contour = build_closed_bezier(&weighted_loop, config.max_control_point_length);

        GeneratedTrack {
            seed,
            triangulation,
            graph,
            circuit,
            weighted_loop,
            contour,
        }
    }
}

/// Wrap a manually supplied loop in a circuit result, computing the same
/// statistics the search would have. No search runs, so `attempts` is 0.
fn manual_circuit(manual: &[Point]) -> CircuitResult {
    let distinct = match manual.split_last() {
        Some((last, rest)) if !rest.is_empty() && rest[0] == *last => rest,
        _ => manual,
    };
    let info = CircuitInformation::from_loop(distinct, 0.0);
    let mut points = Vec::with_capacity(distinct.len() + 1);
    points.extend_from_slice(distinct);
    points.push(distinct[0]);
    CircuitResult {
        points,
        info,
        attempts: 0,
        failure: None,
    }
}

/// Translate the loop so its centroid lands on `center_on`. The centroid
/// runs over the point list as stored, duplicated finish point included.
fn center_loop(points: &mut [Point], center_on: Point) {
    if points.is_empty() {
        return;
    }
    let mut sum = Point::ZERO;
    for point in points.iter() {
        sum = sum + *point;
    }
    let centroid = sum * (1.0 / points.len() as f32);
    let shift = centroid - center_on;
    for point in points.iter_mut() {
        *point = *point - shift;
    }
}
