use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use super::error::ConfigError;
use super::grid::Grid;
use super::state::Cell;

/// Configuration for the game
///
/// Sizes are in the same units as cell coordinates; the defaults describe a
/// 20x20 board of 20-unit cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: i32,
    /// Height of the game grid
    pub grid_height: i32,
    /// Side length of one cell
    pub cell_size: i32,
    /// Timer period between ticks, in milliseconds
    pub tick_interval_ms: u64,
    /// Starting body, head first
    pub initial_body: Vec<Cell>,
    /// Starting food; replaced by a random cell if the body covers it
    pub initial_food: Cell,
    /// Seed for food placement; random when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 400,
            grid_height: 400,
            cell_size: 20,
            tick_interval_ms: 100,
            initial_body: vec![Cell::new(160, 160), Cell::new(140, 160)],
            initial_food: Cell::new(300, 300),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self {
            initial_body: vec![Cell::new(60, 60), Cell::new(40, 60)],
            initial_food: Cell::new(160, 160),
            ..Self::new(200, 200)
        }
    }

    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height, self.cell_size)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Validate configuration parameters
    ///
    /// Checks the grid dimensions and that the initial body is a chain of
    /// distinct, adjacent, on-grid cells.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }

        let grid_ok = |side: i32| side > 0 && side % self.cell_size == 0;
        if !grid_ok(self.grid_width) || !grid_ok(self.grid_height) {
            return Err(ConfigError::InvalidGrid {
                width: self.grid_width,
                height: self.grid_height,
                cell_size: self.cell_size,
            });
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        if self.initial_body.is_empty() {
            return Err(ConfigError::EmptyBody);
        }

        let grid = self.grid();
        let mut seen = HashSet::with_capacity(self.initial_body.len());
        for &cell in &self.initial_body {
            let aligned = cell.x % self.cell_size == 0 && cell.y % self.cell_size == 0;
            if !aligned || !grid.in_bounds(cell) {
                return Err(ConfigError::MisplacedCell(cell));
            }
            if !seen.insert(cell) {
                return Err(ConfigError::DuplicateCell(cell));
            }
        }

        for pair in self.initial_body.windows(2) {
            let distance = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
            if distance != self.cell_size {
                return Err(ConfigError::DetachedBody(pair[0], pair[1]));
            }
        }

        Ok(())
    }
}
