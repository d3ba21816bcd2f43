//! Auto Snake - a Snake game steered by a pathfinding autopilot
//!
//! This library provides:
//! - Core game logic and the tick driver (game module)
//! - The move-selecting agent (agent module)
//! - TUI rendering and keyboard input (render, input modules)
//! - Interactive and headless execution modes (modes module)

pub mod agent;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
