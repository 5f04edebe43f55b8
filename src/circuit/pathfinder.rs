//! Randomized circuit search over the Voronoi graph.
//!
//! A depth-first walk with backtracking: from a random start node the
//! search advances to a uniformly random legal neighbor, backing out of
//! dead ends, until the hypothetical closed length lands inside the
//! target window and the closing straight passes the geometric checks.
//! A failed attempt is retried from a fresh random start up to a fixed
//! budget; exhausting the budget yields an invalid result, not an error.
//!
//! Visited nodes stay illegal for the rest of an attempt, including after
//! backtracking, so one attempt performs at most O(n) advances. The step
//! cap is a hard stop on top of that for degenerate parameter sets.

use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::Rng;

use crate::circuit::info::{CircuitFailure, CircuitInformation, CircuitResult};
use crate::config::GeneratorConfig;
use crate::core::Point;
use crate::voronoi::VoronoiGraph;

/// Circuit search over a Voronoi graph.
///
/// Holds the length and geometry constraints; graph and RNG are passed
/// per call, so one pathfinder can serve many generations.
#[derive(Clone, Debug)]
pub struct CircuitPathfinder {
    min_length: f32,
    max_length: f32,
    max_straight_length: f32,
    min_straight_length: f32,
    min_node_spacing: f32,
    min_turn_angle: f32,
    min_start_grid_gap: f32,
    min_finish_line_gap: f32,
    max_retries: usize,
    max_search_steps: usize,
}

impl CircuitPathfinder {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            min_length: config.min_circuit_length,
            max_length: config.max_circuit_length,
            max_straight_length: config.max_straight_length,
            min_straight_length: config.min_straight_length,
            min_node_spacing: config.min_node_spacing,
            min_turn_angle: config.min_turn_angle,
            min_start_grid_gap: config.min_start_grid_gap,
            min_finish_line_gap: config.min_finish_line_gap,
            max_retries: config.max_retries,
            max_search_steps: config.max_search_steps,
        }
    }

    /// Search for a closed circuit, running up to `1 + max_retries`
    /// attempts from fresh random start nodes.
    pub fn find_circuit(&self, graph: &VoronoiGraph, rng: &mut SmallRng) -> CircuitResult {
        let budget = self.max_retries + 1;
        if graph.is_empty() {
            debug!("[Circuit] graph has no nodes, nothing to search");
            return CircuitResult::failed(CircuitFailure::EmptyGraph, budget);
        }

        for attempt in 1..=budget {
            if let Some((path, preferred)) = self.search_once(graph, rng) {
                let vertices: Vec<Point> = path.iter().map(|&node| graph.position(node)).collect();
                let info = CircuitInformation::from_loop(&vertices, preferred);
                let points = self.insert_finish_line(&vertices, rng);
                debug!(
                    "[Circuit] closed {}-node circuit, length {:.3} (attempt {}/{})",
                    info.turn_count, info.length, attempt, budget
                );
                return CircuitResult {
                    points,
                    info,
                    attempts: attempt,
                    failure: None,
                };
            }
            trace!("[Circuit] attempt {}/{} exhausted", attempt, budget);
        }

        debug!("[Circuit] no circuit found in {} attempts", budget);
        CircuitResult::failed(CircuitFailure::RetriesExhausted, budget)
    }

    /// One search attempt. Returns the node path of a closable circuit
    /// plus the preferred length it was sampled with, or `None` once the
    /// walk has exhausted its options or the step cap.
    fn search_once(&self, graph: &VoronoiGraph, rng: &mut SmallRng) -> Option<(Vec<usize>, f32)> {
        let start = rng.random_range(0..graph.node_count());
        let preferred = if self.min_length < self.max_length {
            rng.random_range(self.min_length..self.max_length)
        } else {
            self.min_length
        };
        trace!("[Circuit] start node {}, preferred length {:.3}", start, preferred);

        let mut illegal = vec![false; graph.node_count()];
        illegal[start] = true;
        let mut path: Vec<usize> = vec![start];
        let mut length = 0.0f32;
        let mut candidates: Vec<usize> = Vec::new();

        for _ in 0..self.max_search_steps {
            let Some(&current) = path.last() else {
                return None;
            };

            candidates.clear();
            for &neighbor in &graph.node(current).neighbors {
                if illegal[neighbor] {
                    continue;
                }
                let step = graph.position(current).distance(&graph.position(neighbor));
                if step < self.min_node_spacing {
                    // Near-duplicate node; never visit it.
                    illegal[neighbor] = true;
                    continue;
                }
                if step <= self.max_straight_length {
                    candidates.push(neighbor);
                }
            }

            if candidates.is_empty() {
                // Dead end: back out one step. An emptied stack means the
                // attempt has tried every option.
                let dead = path.pop()?;
                match path.last() {
                    Some(&previous) => {
                        length -= graph.position(previous).distance(&graph.position(dead));
                    }
                    None => {
                        trace!("[Circuit] backtracked past the start node");
                        return None;
                    }
                }
            } else {
                let next = candidates[rng.random_range(0..candidates.len())];
                length += graph.position(current).distance(&graph.position(next));
                illegal[next] = true;
                path.push(next);
            }

            // Closing checks run after every advance or backtrack.
            let Some(&tail) = path.last() else {
                return None;
            };
            let closing = graph.position(tail).distance(&graph.position(path[0]));
            let hypothetical = length + closing;
            if hypothetical > preferred
                && hypothetical <= self.max_length
                && self.can_close(graph, &path)
            {
                trace!("[Circuit] closing straight {:.3}, length {:.3}", closing, hypothetical);
                return Some((path, preferred));
            } else if hypothetical > self.max_length {
                // Over budget: unwind until the hypothetical loop drops
                // back under the minimum, then let the walk regrow.
                loop {
                    let Some(&tail) = path.last() else {
                        return None;
                    };
                    let rollback_length =
                        length + graph.position(tail).distance(&graph.position(path[0]));
                    if rollback_length < self.min_length {
                        break;
                    }
                    let dead = path.pop()?;
                    match path.last() {
                        Some(&previous) => {
                            length -= graph.position(previous).distance(&graph.position(dead));
                        }
                        None => return None,
                    }
                }
            }
        }

        trace!("[Circuit] step budget exhausted");
        None
    }

    /// Check whether the walk can close from its current tail: the
    /// closing straight must respect both straight-length bounds, miss
    /// every non-adjacent path edge, and meet the path at a wide enough
    /// angle on both ends.
    fn can_close(&self, graph: &VoronoiGraph, path: &[usize]) -> bool {
        // A closed circuit needs at least three distinct nodes.
        if path.len() < 3 {
            return false;
        }
        let head = graph.position(path[0]);
        let tail = graph.position(path[path.len() - 1]);
        let closing = tail.distance(&head);
        if closing < self.min_straight_length || closing > self.max_straight_length {
            return false;
        }

        // The first and last path edges share an endpoint with the
        // closing straight and are skipped.
        for k in 1..path.len().saturating_sub(2) {
            let a = graph.position(path[k]);
            let b = graph.position(path[k + 1]);
            if segments_intersect(tail, head, a, b) {
                return false;
            }
        }

        let at_head = interior_angle(head, graph.position(path[1]), tail);
        let at_tail = interior_angle(tail, graph.position(path[path.len() - 2]), head);
        at_head > self.min_turn_angle && at_tail > self.min_turn_angle
    }

    /// Subdivide the closing straight with the finish-line point and
    /// rotate the loop so the finish is both first and last output entry.
    ///
    /// `vertices` must be the node positions of a successful attempt.
    fn insert_finish_line(&self, vertices: &[Point], rng: &mut SmallRng) -> Vec<Point> {
        let head = vertices[0];
        let tail = vertices[vertices.len() - 1];
        let closing = tail.distance(&head);

        // Random parameter along tail -> head, keeping the start-grid gap
        // behind the finish and the finish-line gap ahead of it. When the
        // gaps do not fit the straight, fall back to its midpoint.
        let t = if closing > 0.0 {
            let lo = self.min_start_grid_gap / closing;
            let hi = 1.0 - self.min_finish_line_gap / closing;
            if lo < hi {
                rng.random_range(lo..hi)
            } else {
                0.5
            }
        } else {
            0.5
        };
        let finish = tail + (head - tail) * t;

        let mut points = Vec::with_capacity(vertices.len() + 2);
        points.push(finish);
        points.extend_from_slice(vertices);
        points.push(finish);
        points
    }
}

/// Parametric 2D segment intersection. Both parameters must land in
/// [0, 1]; parallel segments produce a non-finite parameter that fails
/// the interval test on its own.
fn segments_intersect(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    let denom = (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y);
    let ua = ((p4.x - p3.x) * (p1.y - p3.y) - (p4.y - p3.y) * (p1.x - p3.x)) / denom;
    let ub = ((p2.x - p1.x) * (p1.y - p3.y) - (p2.y - p1.y) * (p1.x - p3.x)) / denom;
    (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub)
}

/// Angle in degrees at `vertex` between the rays toward `a` and `b`.
fn interior_angle(vertex: Point, a: Point, b: Point) -> f32 {
    let u = (a - vertex).normalize();
    let v = (b - vertex).normalize();
    u.dot(&v).clamp(-1.0, 1.0).acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voronoi::VoronoiNode;
    use approx::assert_relative_eq;
    use rand::SeedableRng;

    /// A ring of nodes where each node links to its two ring neighbors.
    fn ring_graph(count: usize, radius: f32) -> VoronoiGraph {
        let center = Point::new(1.5, 1.5);
        let nodes: Vec<VoronoiNode> = (0..count)
            .map(|i| {
                let angle = std::f32::consts::TAU * i as f32 / count as f32;
                VoronoiNode {
                    position: Point::new(
                        center.x + radius * angle.cos(),
                        center.y + radius * angle.sin(),
                    ),
                    neighbors: vec![(i + count - 1) % count, (i + 1) % count],
                }
            })
            .collect();
        VoronoiGraph::from_nodes(nodes, Vec::new())
    }

    fn graph_from_positions(positions: &[Point]) -> VoronoiGraph {
        let nodes = positions
            .iter()
            .map(|&position| VoronoiNode {
                position,
                neighbors: Vec::new(),
            })
            .collect();
        VoronoiGraph::from_nodes(nodes, Vec::new())
    }

    #[test]
    fn test_finds_circuit_on_ring_graph() {
        let config = GeneratorConfig::default();
        let pathfinder = CircuitPathfinder::new(&config);
        let graph = ring_graph(8, 1.0);

        let mut successes = 0;
        for seed in 1..=20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let result = pathfinder.find_circuit(&graph, &mut rng);
            if !result.is_valid() {
                continue;
            }
            successes += 1;

            let points = &result.points;
            assert!(points.len() >= 5);
            assert_eq!(points.first(), points.last());
            assert!(result.info.is_valid);
            assert!(result.info.length > config.min_circuit_length);
            assert!(result.info.length <= config.max_circuit_length);
            assert!(result.attempts <= config.max_retries + 1);
            for pair in points.windows(2) {
                assert!(pair[0].distance(&pair[1]) <= config.max_straight_length + 1e-4);
            }

            // The finish point must sit on the closing straight.
            let head = points[1];
            let tail = points[points.len() - 2];
            let finish = points[0];
            let straight = head - tail;
            let to_finish = finish - tail;
            assert_relative_eq!(straight.cross(&to_finish), 0.0, epsilon = 1e-4);
            let along = to_finish.length() / straight.length();
            assert!((0.0..=1.0).contains(&along));
        }
        assert!(successes > 0, "no seed produced a circuit on the ring fixture");
    }

    #[test]
    fn test_empty_graph_fails_without_searching() {
        let config = GeneratorConfig::default();
        let pathfinder = CircuitPathfinder::new(&config);
        let mut rng = SmallRng::seed_from_u64(7);

        let result = pathfinder.find_circuit(&VoronoiGraph::default(), &mut rng);
        assert!(!result.is_valid());
        assert_eq!(result.failure, Some(CircuitFailure::EmptyGraph));
        assert_eq!(result.attempts, 6);
        assert!(result.points.is_empty());
    }

    #[test]
    fn test_two_node_graph_exhausts_retries() {
        let config = GeneratorConfig::default();
        let pathfinder = CircuitPathfinder::new(&config);
        let nodes = vec![
            VoronoiNode {
                position: Point::new(1.0, 1.0),
                neighbors: vec![1],
            },
            VoronoiNode {
                position: Point::new(2.0, 1.0),
                neighbors: vec![0],
            },
        ];
        let graph = VoronoiGraph::from_nodes(nodes, Vec::new());
        let mut rng = SmallRng::seed_from_u64(11);

        let result = pathfinder.find_circuit(&graph, &mut rng);
        assert!(!result.is_valid());
        assert_eq!(result.failure, Some(CircuitFailure::RetriesExhausted));
        assert_eq!(result.attempts, 6);
        assert!(!result.info.is_valid);
    }

    #[test]
    fn test_inverted_length_window_terminates_invalid() {
        let config = GeneratorConfig::default().with_circuit_length(5.0, 2.0);
        let pathfinder = CircuitPathfinder::new(&config);
        let graph = ring_graph(8, 1.0);
        let mut rng = SmallRng::seed_from_u64(3);

        let result = pathfinder.find_circuit(&graph, &mut rng);
        assert!(!result.is_valid());
        assert_eq!(result.failure, Some(CircuitFailure::RetriesExhausted));
        assert_eq!(result.attempts, 6);
    }

    #[test]
    fn test_segment_intersection() {
        assert!(segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
            Point::new(2.0, 0.0),
        ));

        // Parallel segments never report an intersection.
        assert!(!segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
        ));

        // Lines cross, but outside both segments.
        assert!(!segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(3.0, -1.0),
            Point::new(3.0, 1.0),
        ));
    }

    #[test]
    fn test_touching_endpoints_count_as_intersection() {
        // This is why the edges adjacent to the closing straight are
        // skipped by the self-intersection scan.
        assert!(segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 1.0),
        ));
    }

    #[test]
    fn test_interior_angle() {
        let vertex = Point::ZERO;
        assert_relative_eq!(
            interior_angle(vertex, Point::new(1.0, 0.0), Point::new(0.0, 1.0)),
            90.0,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            interior_angle(vertex, Point::new(1.0, 0.0), Point::new(-2.0, 0.0)),
            180.0,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            interior_angle(vertex, Point::new(1.0, 0.0), Point::new(3.0, 0.0)),
            0.0,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_can_close_rejects_crossing_closing_straight() {
        let mut config = GeneratorConfig::default();
        config.max_straight_length = 10.0;
        config.min_straight_length = 0.1;
        config.min_turn_angle = 1.0;
        let pathfinder = CircuitPathfinder::new(&config);

        // Closing from (4, 0.5) back to the origin cuts the middle edge.
        let crossing = graph_from_positions(&[
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 1.0),
            Point::new(4.0, 0.5),
        ]);
        assert!(!pathfinder.can_close(&crossing, &[0, 1, 2, 3]));

        // Pulling the tail clear of the path makes the same loop legal.
        let clear = graph_from_positions(&[
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 1.0),
            Point::new(1.5, 1.0),
        ]);
        assert!(pathfinder.can_close(&clear, &[0, 1, 2, 3]));
    }

    #[test]
    fn test_can_close_honors_straight_length_bounds() {
        let config = GeneratorConfig::default();
        let pathfinder = CircuitPathfinder::new(&config);

        // Closing straight of 0.3 sits below the 0.5 minimum.
        let graph = graph_from_positions(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 0.3),
        ]);
        assert!(!pathfinder.can_close(&graph, &[0, 1, 2, 3]));
    }

    #[test]
    fn test_finish_line_lands_on_closing_straight() {
        let config = GeneratorConfig::default();
        let pathfinder = CircuitPathfinder::new(&config);
        let vertices = [
            Point::new(0.0, 0.0),
            Point::new(1.5, 0.0),
            Point::new(1.5, 1.5),
            Point::new(0.0, 1.5),
        ];
        let mut rng = SmallRng::seed_from_u64(5);

        let points = pathfinder.insert_finish_line(&vertices, &mut rng);
        assert_eq!(points.len(), 6);
        assert_eq!(points.first(), points.last());

        // Closing straight runs from (0, 1.5) down to (0, 0); the finish
        // must respect the 0.3 start-grid gap and the 0.1 finish gap.
        let finish = points[0];
        assert_relative_eq!(finish.x, 0.0, epsilon = 1e-6);
        assert!(finish.y <= 1.2 + 1e-6);
        assert!(finish.y >= 0.1 - 1e-6);
    }
}
