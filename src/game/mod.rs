//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Ticks are pure transitions from one [`GameState`] snapshot to the next; the
//! [`Driver`] owns the current snapshot and decides whether ticks happen.

pub mod action;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Vector};
pub use config::GameConfig;
pub use driver::{Driver, RunState};
pub use engine::{GameEngine, MIN_FOOD_POINTS, StepResult, TickOutcome, food_points};
pub use error::{ConfigError, PlacementError};
pub use grid::Grid;
pub use state::{Cell, GameState, Snake, Status};
