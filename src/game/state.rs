use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::action::Vector;

/// A grid-aligned position, in the same units as the cell size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by a vector
    pub fn moved_by(&self, vector: Vector) -> Self {
        Self {
            x: self.x + vector.dx,
            y: self.y + vector.dy,
        }
    }
}

/// The snake's body, head first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0 and tail at the end
    pub body: Vec<Cell>,
}

impl Snake {
    /// Create a snake from segments listed head first.
    ///
    /// Callers are expected to hand over a validated, non-empty body
    /// (see `GameConfig::validate`).
    pub fn new(body: Vec<Cell>) -> Self {
        Self { body }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Check if any segment, head and tail included, sits on `cell`
    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Snake after moving its head by `vector`.
    ///
    /// The tail is kept when `grow` is set, otherwise it is dropped so the
    /// length stays the same.
    pub fn advanced(&self, vector: Vector, grow: bool) -> Snake {
        let mut body = Vec::with_capacity(self.body.len() + 1);
        body.push(self.head().moved_by(vector));
        body.extend_from_slice(&self.body);

        if !grow {
            body.pop();
        }

        Snake { body }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Where the game stands after the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Ticks move the snake
    Playing,
    /// No neighbouring cell of the head is safe
    Trapped,
    /// The body covers the whole grid, no cell left for food
    Won,
}

impl Status {
    /// Whether further ticks can change the state
    pub fn is_final(&self) -> bool {
        !matches!(self, Status::Playing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Playing => "Playing",
            Status::Trapped => "Trapped",
            Status::Won => "Grid full",
        }
    }
}

/// Complete game state.
///
/// A snapshot: the engine never mutates one in place, each tick yields a
/// new value.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    pub score: u32,
    pub steps: u32,
    pub foods_eaten: u32,
    /// Game clock reading when food was last eaten (or the game started)
    pub last_food_at: Duration,
    pub status: Status,
    /// Explanation attached to the most recent decision
    pub last_rationale: String,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Cell) -> Self {
        Self {
            snake,
            food,
            score: 0,
            steps: 0,
            foods_eaten: 0,
            last_food_at: Duration::ZERO,
            status: Status::Playing,
            last_rationale: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake() -> Snake {
        Snake::new(vec![Cell::new(60, 20), Cell::new(40, 20), Cell::new(20, 20)])
    }

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(100, 100);
        assert_eq!(cell.moved_by(Vector::new(20, 0)), Cell::new(120, 100));
        assert_eq!(cell.moved_by(Vector::new(0, -20)), Cell::new(100, 80));
        assert_eq!(cell.moved_by(Vector::ZERO), cell);
    }

    #[test]
    fn test_head_and_tail() {
        let snake = snake();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(60, 20));
        assert_eq!(snake.tail(), Cell::new(20, 20));
    }

    #[test]
    fn test_advance_without_growth_keeps_length() {
        let snake = snake();
        let moved = snake.advanced(Vector::new(20, 0), false);

        assert_eq!(moved.len(), snake.len());
        assert_eq!(moved.head(), Cell::new(80, 20));
        assert_eq!(moved.tail(), Cell::new(40, 20));
        // The original is untouched
        assert_eq!(snake.head(), Cell::new(60, 20));
    }

    #[test]
    fn test_advance_with_growth_keeps_tail() {
        let snake = snake();
        let grown = snake.advanced(Vector::new(0, 20), true);

        assert_eq!(grown.len(), snake.len() + 1);
        assert_eq!(grown.head(), Cell::new(60, 40));
        assert_eq!(grown.tail(), snake.tail());
    }

    #[test]
    fn test_collision_detection() {
        let state = GameState::new(snake(), Cell::new(200, 200));
        assert!(state.snake.contains(Cell::new(60, 20))); // head
        assert!(state.snake.contains(Cell::new(20, 20))); // tail
        assert!(!state.snake.contains(state.food)); // empty
    }

    #[test]
    fn test_status_finality() {
        assert!(!Status::Playing.is_final());
        assert!(Status::Trapped.is_final());
        assert!(Status::Won.is_final());
    }
}
