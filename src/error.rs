//! Error types for vega-track

use thiserror::Error;

/// vega-track error type
///
/// Only configuration problems surface as errors. A generation pass that
/// fails to find a circuit is a normal outcome and travels inside
/// [`CircuitResult`](crate::circuit::CircuitResult) instead.
#[derive(Error, Debug)]
pub enum TrackError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config file error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TrackError>;
