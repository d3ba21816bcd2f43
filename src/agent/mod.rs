//! Autopilot that steers the snake
//!
//! The agent looks at the four cells around the head, drops the unsafe ones
//! and ranks the rest by breadth-first distance to the food, using the
//! straight-line distance to break ties. It holds no state between ticks.

pub mod pathfinding;
pub mod selector;

pub use pathfinding::path_length;
pub use selector::{Decision, decide, straight_line_distance};
