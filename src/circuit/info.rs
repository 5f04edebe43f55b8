//! Circuit statistics and search result types.

use serde::{Deserialize, Serialize};

use crate::core::Point;

/// Statistics describing a found circuit.
///
/// All distances are computed over the closed polygon of visited nodes
/// before the finish line is inserted; the finish point subdivides the
/// closing straight for output purposes only and never shows up in these
/// numbers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircuitInformation {
    /// False when the search exhausted its retry budget. Invalid results
    /// carry an empty point list and zeroed stats that must not be used.
    pub is_valid: bool,
    /// Total circuit length, closing straight included
    pub length: f32,
    /// Length of the closing straight (last visited node back to the first)
    pub closing_straight_length: f32,
    /// Longest single edge of the closed polygon, closing straight included
    pub longest_straight: f32,
    /// Number of distinct vertices (one turn per vertex)
    pub turn_count: usize,
    /// True when the circuit runs clockwise (positive shoelace sum)
    pub clockwise: bool,
    /// The target length sampled for the successful attempt
    pub preferred_length: f32,
}

impl CircuitInformation {
    /// Compute stats for a circuit given its distinct vertices in visit
    /// order; the closing edge from the last vertex back to the first is
    /// implied.
    pub fn from_loop(vertices: &[Point], preferred_length: f32) -> Self {
        let count = vertices.len();
        if count < 2 {
            return Self {
                is_valid: true,
                length: 0.0,
                closing_straight_length: 0.0,
                longest_straight: 0.0,
                turn_count: count,
                clockwise: false,
                preferred_length,
            };
        }

        let mut length = 0.0;
        let mut longest = 0.0f32;
        for i in 0..count {
            let edge = vertices[i].distance(&vertices[(i + 1) % count]);
            length += edge;
            longest = longest.max(edge);
        }

        Self {
            is_valid: true,
            length,
            closing_straight_length: vertices[count - 1].distance(&vertices[0]),
            longest_straight: longest,
            turn_count: count,
            clockwise: shoelace_is_clockwise(vertices),
            preferred_length,
        }
    }

    /// Marker for a failed search. Callers must not read the stats.
    pub fn invalid() -> Self {
        Self {
            is_valid: false,
            length: 0.0,
            closing_straight_length: 0.0,
            longest_straight: 0.0,
            turn_count: 0,
            clockwise: false,
            preferred_length: 0.0,
        }
    }
}

/// Signed shoelace orientation test over a closed polygon; positive sum
/// means clockwise in the y-up coordinate convention.
fn shoelace_is_clockwise(vertices: &[Point]) -> bool {
    let count = vertices.len();
    let mut sum = 0.0;
    for i in 0..count {
        let a = vertices[i];
        let b = vertices[(i + 1) % count];
        sum += (b.x - a.x) * (b.y + a.y);
    }
    sum > 0.0
}

/// Reason the circuit search gave up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CircuitFailure {
    /// The graph has no nodes to start from
    EmptyGraph,
    /// Every attempt exhausted its backtracking options or step budget
    RetriesExhausted,
}

/// Result of a circuit search.
///
/// Failure is a value, not an error: callers skip rendering and stats for
/// the attempt and may simply regenerate with another seed.
#[derive(Clone, Debug, PartialEq)]
pub struct CircuitResult {
    /// Closed loop; the finish-line point is both first and last entry.
    /// Empty when the search failed.
    pub points: Vec<Point>,
    /// Circuit statistics; `is_valid == false` iff `failure` is set
    pub info: CircuitInformation,
    /// Number of search attempts consumed (1 + retries)
    pub attempts: usize,
    /// Reason for failure, if any
    pub failure: Option<CircuitFailure>,
}

impl CircuitResult {
    /// Create a failed result
    pub(crate) fn failed(reason: CircuitFailure, attempts: usize) -> Self {
        Self {
            points: Vec::new(),
            info: CircuitInformation::invalid(),
            attempts,
            failure: Some(reason),
        }
    }

    /// True when a circuit was found
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.failure.is_none()
    }
}
