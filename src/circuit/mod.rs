//! Circuit search: finding a closed racetrack loop on the Voronoi graph.

mod info;
mod pathfinder;

pub use info::{CircuitFailure, CircuitInformation, CircuitResult};
pub use pathfinder::CircuitPathfinder;
