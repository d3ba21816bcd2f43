//! Breadth-first distance estimate over the 4-connected grid.

use std::collections::{HashSet, VecDeque};

use crate::game::{Cell, Grid, Snake};

/// Length of the shortest path from `start` to `goal`, or `None` when the
/// goal cannot be reached.
///
/// Body cells block the search, except the tail: by the time a path of one
/// or more steps gets there the tail has moved on. `start` itself is never
/// checked, so it may be any cell (typically the candidate next head).
pub fn path_length(grid: &Grid, snake: &Snake, start: Cell, goal: Cell) -> Option<usize> {
    if start == goal {
        return Some(0);
    }

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back((start, 0usize));

    while let Some((cell, distance)) = queue.pop_front() {
        for (_, next) in grid.neighbours(cell) {
            if !grid.is_traversable(next, snake) || !visited.insert(next) {
                continue;
            }
            if next == goal {
                return Some(distance + 1);
            }
            queue.push_back((next, distance + 1));
        }
    }

    None
}
