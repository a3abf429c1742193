//! Multi-source distance fields used by the territory heuristic.

use std::collections::VecDeque;

use crate::board::position::{BoardDimensions, Position};
use crate::move_generator::ray::{ray, Direction, Occupancy};

pub const UNREACHABLE: u32 = u32::MAX;

/// How a side's queens step between tiles when measuring distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    /// One tile in any of the 8 directions.
    King,
    /// Any distance along a ray until blocked.
    Queen,
}

/// Per-tile distances from the nearest queen of one side, in row-major order.
#[derive(Clone, Debug)]
pub struct DistanceField {
    dimensions: BoardDimensions,
    distances: Vec<u32>,
}

impl DistanceField {
    /// Breadth-first propagation from every queen in `sources` at once. Queens
    /// and burned tiles are obstacles; the sources themselves sit at distance 0.
    pub fn compute<O: Occupancy + ?Sized>(occupancy: &O, sources: &[Position], metric: Metric) -> Self {
        let dimensions = occupancy.dimensions();
        let mut distances = vec![UNREACHABLE; dimensions.area()];
        let mut frontier = VecDeque::with_capacity(dimensions.area());

        for &source in sources {
            distances[dimensions.index(source)] = 0;
            frontier.push_back(source);
        }

        while let Some(current) = frontier.pop_front() {
            let next_distance = distances[dimensions.index(current)] + 1;
            for &direction in Direction::ALL.iter() {
                match metric {
                    Metric::King => {
                        if let Some(next) = direction.step(current, dimensions) {
                            if occupancy.is_free(next) {
                                visit(&mut distances, &mut frontier, dimensions, next, next_distance);
                            }
                        }
                    }
                    Metric::Queen => {
                        for next in ray(occupancy, current, direction) {
                            visit(&mut distances, &mut frontier, dimensions, next, next_distance);
                        }
                    }
                }
            }
        }

        Self {
            dimensions,
            distances,
        }
    }

    pub fn get(&self, position: Position) -> u32 {
        self.distances[self.dimensions.index(position)]
    }

    #[cfg(test)]
    pub fn is_reachable(&self, position: Position) -> bool {
        self.get(position) != UNREACHABLE
    }
}

fn visit(
    distances: &mut [u32],
    frontier: &mut VecDeque<Position>,
    dimensions: BoardDimensions,
    position: Position,
    distance: u32,
) {
    let slot = &mut distances[dimensions.index(position)];
    if distance < *slot {
        *slot = distance;
        frontier.push_back(position);
    }
}
