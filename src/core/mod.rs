//! Core geometry types for vega-track.
//!
//! - [`Point`]: 2D position/vector used throughout the pipeline
//! - [`Bounds`]: the rectangular generation area, anchored at the origin

mod bounds;
mod point;

pub use bounds::Bounds;
pub use point::Point;
