use std::cmp::Ordering;

use tracing::debug;

use super::pathfinding::path_length;
use crate::game::{Cell, Direction, Grid, Snake, Vector};

/// What the agent wants to do this tick
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// Move to apply to the head; [`Vector::ZERO`] when trapped
    pub vector: Vector,
    /// Chosen direction, `None` when trapped
    pub direction: Option<Direction>,
    /// Estimated steps to the food from the chosen cell, `None` if unreachable or trapped
    pub path_length: Option<usize>,
    /// Human-readable explanation, for display only
    pub rationale: String,
}

impl Decision {
    fn trapped() -> Self {
        Self {
            vector: Vector::ZERO,
            direction: None,
            path_length: None,
            rationale: "Trapped: no safe move left".to_string(),
        }
    }

    pub fn is_trapped(&self) -> bool {
        self.direction.is_none()
    }
}

/// A safe move with its ranking keys
#[derive(Debug, Clone, Copy)]
struct Candidate {
    direction: Direction,
    path_length: Option<usize>,
    straight_line: f64,
}

impl Candidate {
    /// Shorter path first (unreachable last), then closer in a straight
    /// line. Equal candidates keep their enumeration order via stable sort.
    fn rank(&self, other: &Self) -> Ordering {
        let path = |c: &Self| c.path_length.unwrap_or(usize::MAX);
        path(self)
            .cmp(&path(other))
            .then_with(|| self.straight_line.total_cmp(&other.straight_line))
    }
}

/// Euclidean distance between two cells
pub fn straight_line_distance(a: Cell, b: Cell) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    (dx * dx + dy * dy).sqrt()
}

/// Pick the next move for `snake` toward `food`.
///
/// Only moves into safe cells are considered. Among those the one with the
/// shortest path to the food wins; ties go to the smaller straight-line
/// distance, then to the earlier entry of [`Direction::ALL`]. A move whose
/// food path is unreachable is still taken if nothing better is safe.
/// The result depends on nothing but the arguments.
pub fn decide(grid: &Grid, snake: &Snake, food: Cell) -> Decision {
    let head = snake.head();

    let mut candidates: Vec<Candidate> = grid
        .neighbours(head)
        .filter(|&(_, next)| grid.is_safe(next, snake))
        .map(|(direction, next)| Candidate {
            direction,
            path_length: path_length(grid, snake, next, food),
            straight_line: straight_line_distance(next, food),
        })
        .collect();

    candidates.sort_by(Candidate::rank);

    let Some(best) = candidates.first().copied() else {
        debug!(x = head.x, y = head.y, "no safe move");
        return Decision::trapped();
    };

    let rationale = match best.path_length {
        Some(0) => format!("Moving {}: eating the food", best.direction),
        Some(1) => format!("Moving {}: food is 1 step away", best.direction),
        Some(steps) => format!("Moving {}: food is {} steps away", best.direction, steps),
        None => format!(
            "Moving {}: food unreachable, closing distance ({:.0})",
            best.direction, best.straight_line
        ),
    };

    debug!(
        direction = %best.direction,
        path_length = ?best.path_length,
        candidates = candidates.len(),
        "decided"
    );

    Decision {
        vector: best.direction.vector(grid.cell_size),
        direction: Some(best.direction),
        path_length: best.path_length,
        rationale,
    }
}
