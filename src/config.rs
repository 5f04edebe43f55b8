//! Generator configuration.
//!
//! All knobs for a generation pass live in one flat [`GeneratorConfig`].
//! Defaults reproduce the reference tuning (3x3 area, 75 points, circuit
//! length 3.5..7.0). Configs can be built in code via the `with_*` setters
//! or loaded from a TOML file.
//!
//! ```toml
//! seed = 7
//! point_count = 75
//! bounds = { width = 3.0, height = 3.0 }
//!
//! min_circuit_length = 3.5
//! max_circuit_length = 7.0
//! max_straight_length = 2.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Bounds, Point};
use crate::error::{Result, TrackError};

/// Configuration for a full track generation pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// PRNG seed. 0 draws a fresh seed from entropy; any other value is
    /// fully deterministic.
    pub seed: u64,
    /// Number of random cloud points to triangulate
    pub point_count: usize,
    /// Generation area; all cloud points fall inside it
    pub bounds: Bounds,
    /// Base angle of the bounding super-triangle in degrees, clamped to
    /// [0, 90] at use. Purely aesthetic.
    pub super_triangle_angle: f32,

    /// Minimum accepted circuit length
    pub min_circuit_length: f32,
    /// Maximum accepted circuit length
    pub max_circuit_length: f32,
    /// Maximum length of any single straight (graph edge or closing edge)
    pub max_straight_length: f32,
    /// Minimum length of the closing straight
    pub min_straight_length: f32,
    /// Nodes closer than this to the current node are never visited
    pub min_node_spacing: f32,
    /// Minimum interior angle (degrees) at both ends of the closing edge
    pub min_turn_angle: f32,
    /// Minimum distance between the start of the closing straight and the
    /// finish line
    pub min_start_grid_gap: f32,
    /// Minimum distance between the finish line and the end of the closing
    /// straight
    pub min_finish_line_gap: f32,
    /// Extra search attempts after the first one fails
    pub max_retries: usize,
    /// Step cap per attempt; keeps hostile parameter sets from spinning
    pub max_search_steps: usize,

    /// Translate the finished loop so its centroid lands on `center_point`
    pub center_path: bool,
    /// Target centroid for `center_path`
    pub center_point: Point,
    /// Hand-authored loop; when set, triangulation, graph and pathfinding
    /// are skipped and these points become the circuit
    pub manual_points: Option<Vec<Point>>,

    /// Add a sharpness-derived term to each vertex curvature
    pub auto_curve: bool,
    /// Lower bound of the random curvature sample
    pub min_curve: f32,
    /// Upper bound of the random curvature sample. Values above 1.0 bias
    /// vertices toward full curvature (the result clamps to [0, 1]).
    pub max_curve: f32,
    /// Weight of the sharpness term when `auto_curve` is on
    pub auto_curve_weight: f32,
    /// Hard cap on Bezier control-point offsets
    pub max_control_point_length: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            point_count: 75,
            bounds: Bounds::new(3.0, 3.0),
            super_triangle_angle: 45.0,
            min_circuit_length: 3.5,
            max_circuit_length: 7.0,
            max_straight_length: 2.0,
            min_straight_length: 0.5,
            min_node_spacing: 0.1,
            min_turn_angle: 45.0,
            min_start_grid_gap: 0.3,
            min_finish_line_gap: 0.1,
            max_retries: 5,
            max_search_steps: 100_000,
            center_path: true,
            center_point: Point::ZERO,
            manual_points: None,
            auto_curve: true,
            min_curve: 0.0,
            max_curve: 2.0,
            auto_curve_weight: 0.25,
            max_control_point_length: 1.0,
        }
    }
}

impl GeneratorConfig {
    /// Set the PRNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the cloud point count
    pub fn with_point_count(mut self, count: usize) -> Self {
        self.point_count = count;
        self
    }

    /// Set the generation area
    pub fn with_bounds(mut self, width: f32, height: f32) -> Self {
        self.bounds = Bounds::new(width, height);
        self
    }

    /// Set the accepted circuit length range
    pub fn with_circuit_length(mut self, min: f32, max: f32) -> Self {
        self.min_circuit_length = min;
        self.max_circuit_length = max;
        self
    }

    /// Set the maximum straight length
    pub fn with_max_straight(mut self, length: f32) -> Self {
        self.max_straight_length = length;
        self
    }

    /// Set the random curvature sample range
    pub fn with_curve_range(mut self, min: f32, max: f32) -> Self {
        self.min_curve = min;
        self.max_curve = max;
        self
    }

    /// Use a hand-authored loop instead of the generated circuit
    pub fn with_manual_points(mut self, points: Vec<Point>) -> Self {
        self.manual_points = Some(points);
        self
    }

    /// Load a configuration from a TOML file.
    ///
    /// Missing fields take their defaults; the result is validated.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse a configuration from a TOML string and validate it.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the pipeline cannot work with.
    ///
    /// `min_circuit_length > max_circuit_length` and `point_count == 0`
    /// pass validation on purpose: both must run and terminate with an
    /// invalid circuit result rather than be rejected up front.
    pub fn validate(&self) -> Result<()> {
        if self.manual_points.is_none() {
            if !self.bounds.width.is_finite() || !self.bounds.height.is_finite() {
                return Err(TrackError::InvalidConfig(
                    "bounds must be finite".to_string(),
                ));
            }
            if self.bounds.width <= 0.0 || self.bounds.height <= 0.0 {
                return Err(TrackError::InvalidConfig(format!(
                    "bounds must be positive, got {} x {}",
                    self.bounds.width, self.bounds.height
                )));
            }
        }
        if let Some(points) = &self.manual_points {
            let unique = match points.split_last() {
                Some((last, rest)) if rest.first() == Some(last) => rest.len(),
                _ => points.len(),
            };
            if unique < 3 {
                return Err(TrackError::InvalidConfig(format!(
                    "manual loop needs at least 3 distinct points, got {unique}"
                )));
            }
        }
        if self.min_circuit_length < 0.0 || self.max_circuit_length < 0.0 {
            return Err(TrackError::InvalidConfig(
                "circuit lengths must be non-negative".to_string(),
            ));
        }
        if self.max_straight_length <= 0.0 {
            return Err(TrackError::InvalidConfig(
                "max_straight_length must be positive".to_string(),
            ));
        }
        if self.min_straight_length < 0.0 || self.min_node_spacing < 0.0 {
            return Err(TrackError::InvalidConfig(
                "straight and spacing limits must be non-negative".to_string(),
            ));
        }
        if self.min_start_grid_gap < 0.0 || self.min_finish_line_gap < 0.0 {
            return Err(TrackError::InvalidConfig(
                "finish-line gaps must be non-negative".to_string(),
            ));
        }
        if !(0.0..=180.0).contains(&self.min_turn_angle) {
            return Err(TrackError::InvalidConfig(format!(
                "min_turn_angle must be in [0, 180] degrees, got {}",
                self.min_turn_angle
            )));
        }
        if self.max_search_steps == 0 {
            return Err(TrackError::InvalidConfig(
                "max_search_steps must be at least 1".to_string(),
            ));
        }
        if self.min_curve > self.max_curve {
            return Err(TrackError::InvalidConfig(format!(
                "min_curve {} exceeds max_curve {}",
                self.min_curve, self.max_curve
            )));
        }
        if self.auto_curve_weight < 0.0 {
            return Err(TrackError::InvalidConfig(
                "auto_curve_weight must be non-negative".to_string(),
            ));
        }
        if self.max_control_point_length <= 0.0 {
            return Err(TrackError::InvalidConfig(
                "max_control_point_length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
