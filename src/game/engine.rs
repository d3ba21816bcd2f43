use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info};

use super::{
    config::GameConfig,
    error::PlacementError,
    grid::Grid,
    state::{Cell, GameState, Snake, Status},
};
use crate::agent::decide;

/// Lowest score awarded for eating food
pub const MIN_FOOD_POINTS: u32 = 10;

/// Numerator of the time bonus: eating within a millisecond of the previous
/// food is worth this many points
const FOOD_BONUS: u64 = 10_000;

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake moved without eating
    Moved,
    /// The snake ate the food and new food was placed
    Grew,
    /// The snake ate the food and filled the grid
    GridFull,
    /// No safe move; body and food are unchanged
    Trapped,
    /// The game had already ended, nothing changed
    Halted,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// State after the tick
    pub state: GameState,
    /// Explanation of the agent's choice
    pub rationale: String,
    /// Points awarded this tick (0 unless the snake grew)
    pub points: u32,
    pub outcome: TickOutcome,
}

impl StepResult {
    /// Whether the snake ate this tick
    pub fn grew(&self) -> bool {
        matches!(self.outcome, TickOutcome::Grew | TickOutcome::GridFull)
    }
}

/// Points for eating food `elapsed` after the previous one.
///
/// Quick meals earn more, never less than [`MIN_FOOD_POINTS`].
pub fn food_points(elapsed: Duration) -> u32 {
    let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    let bonus = FOOD_BONUS / millis.saturating_add(1);
    u32::try_from(bonus).unwrap_or(u32::MAX).max(MIN_FOOD_POINTS)
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration.
    ///
    /// The configuration is assumed to have passed [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            grid: config.grid(),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(self.config.initial_body.clone());
        let preset = self.config.initial_food;
        let aligned = preset.x % self.grid.cell_size == 0 && preset.y % self.grid.cell_size == 0;

        let food = if aligned && self.grid.is_safe(preset, &snake) {
            Ok(preset)
        } else {
            self.place_food(&snake)
        };

        match food {
            Ok(food) => GameState::new(snake, food),
            Err(PlacementError::GridFull) => {
                let head = snake.head();
                let mut state = GameState::new(snake, head);
                state.status = Status::Won;
                state
            }
        }
    }

    /// Advance the game by one tick.
    ///
    /// `now` is the game clock reading for this tick, used to reward quick
    /// meals. The input state is left untouched.
    pub fn step(&mut self, state: &GameState, now: Duration) -> StepResult {
        if state.status.is_final() {
            return StepResult {
                state: state.clone(),
                rationale: state.last_rationale.clone(),
                points: 0,
                outcome: TickOutcome::Halted,
            };
        }

        let decision = decide(&self.grid, &state.snake, state.food);

        if decision.is_trapped() {
            info!(steps = state.steps, score = state.score, "snake is trapped");
            let mut next = state.clone();
            next.status = Status::Trapped;
            next.last_rationale = decision.rationale.clone();

            return StepResult {
                state: next,
                rationale: decision.rationale,
                points: 0,
                outcome: TickOutcome::Trapped,
            };
        }

        let new_head = state.snake.head().moved_by(decision.vector);
        let ate_food = new_head == state.food;
        let snake = state.snake.advanced(decision.vector, ate_food);

        let mut next = GameState {
            snake,
            food: state.food,
            score: state.score,
            steps: state.steps + 1,
            foods_eaten: state.foods_eaten,
            last_food_at: state.last_food_at,
            status: Status::Playing,
            last_rationale: decision.rationale.clone(),
        };

        if !ate_food {
            return StepResult {
                state: next,
                rationale: decision.rationale,
                points: 0,
                outcome: TickOutcome::Moved,
            };
        }

        let points = food_points(now.saturating_sub(state.last_food_at));
        next.score += points;
        next.foods_eaten += 1;
        next.last_food_at = now;

        let outcome = match self.place_food(&next.snake) {
            Ok(food) => {
                debug!(x = food.x, y = food.y, "placed food");
                next.food = food;
                TickOutcome::Grew
            }
            Err(PlacementError::GridFull) => {
                info!(length = next.snake.len(), "grid is full");
                next.status = Status::Won;
                TickOutcome::GridFull
            }
        };

        info!(
            points,
            score = next.score,
            length = next.snake.len(),
            "snake ate food"
        );

        StepResult {
            state: next,
            rationale: decision.rationale,
            points,
            outcome,
        }
    }

    /// Pick a random cell that is safe with respect to `snake`.
    ///
    /// Rejection sampling gets as many attempts as the grid has cells;
    /// if all of them land on the body the free cells are listed and one is
    /// chosen uniformly, so this only fails when no free cell exists.
    pub fn place_food(&mut self, snake: &Snake) -> Result<Cell, PlacementError> {
        let attempts = self.grid.cell_count();

        for _ in 0..attempts {
            let column = self.rng.gen_range(0..self.grid.columns());
            let row = self.rng.gen_range(0..self.grid.rows());
            let cell = self.grid.cell_at(column, row);

            if self.grid.is_safe(cell, snake) {
                return Ok(cell);
            }
        }

        let free: Vec<Cell> = self
            .grid
            .cells()
            .filter(|&cell| self.grid.is_safe(cell, snake))
            .collect();

        free.choose(&mut self.rng)
            .copied()
            .ok_or(PlacementError::GridFull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(config: GameConfig) -> GameEngine {
        GameEngine::new(GameConfig {
            seed: Some(42),
            ..config
        })
    }

    #[test]
    fn test_reset() {
        let mut engine = seeded(GameConfig::default());
        let state = engine.reset();

        assert_eq!(state.status, Status::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.snake.head(), Cell::new(160, 160));
        assert_eq!(state.food, Cell::new(300, 300));
    }

    #[test]
    fn test_reset_moves_food_off_body() {
        let mut engine = seeded(GameConfig {
            initial_food: Cell::new(140, 160),
            ..GameConfig::default()
        });
        let state = engine.reset();

        assert_ne!(state.food, Cell::new(140, 160));
        assert!(engine.grid().is_safe(state.food, &state.snake));
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = seeded(GameConfig::default());
        let state = engine.reset();

        let result = engine.step(&state, Duration::from_millis(100));

        assert_eq!(result.outcome, TickOutcome::Moved);
        assert!(!result.grew());
        assert_eq!(result.points, 0);
        assert_eq!(result.state.steps, 1);
        assert_eq!(result.state.snake.len(), state.snake.len());
        assert_ne!(result.state.snake.head(), state.snake.head());
        assert_eq!(result.state.food, state.food);
        assert_eq!(result.state.last_rationale, result.rationale);
        // The previous snapshot is untouched
        assert_eq!(state.steps, 0);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = seeded(GameConfig::default());
        let mut state = engine.reset();
        state.food = Cell::new(180, 160);

        let result = engine.step(&state, Duration::from_millis(999));

        assert_eq!(result.outcome, TickOutcome::Grew);
        assert!(result.grew());
        assert_eq!(result.state.snake.len(), state.snake.len() + 1);
        assert_eq!(result.state.snake.head(), Cell::new(180, 160));
        assert_eq!(result.state.snake.tail(), state.snake.tail());
        assert_eq!(result.points, 10);
        assert_eq!(result.state.score, 10);
        assert_eq!(result.state.foods_eaten, 1);
        assert_eq!(result.state.last_food_at, Duration::from_millis(999));
        assert!(engine.grid().is_safe(result.state.food, &result.state.snake));
    }

    #[test]
    fn test_quick_meal_scores_bonus() {
        let mut engine = seeded(GameConfig::default());
        let mut state = engine.reset();
        state.food = Cell::new(180, 160);
        state.last_food_at = Duration::from_millis(1_000);

        let result = engine.step(&state, Duration::from_millis(1_099));

        assert_eq!(result.points, 100);
    }

    #[test]
    fn test_food_points() {
        assert_eq!(food_points(Duration::ZERO), 10_000);
        assert_eq!(food_points(Duration::from_millis(99)), 100);
        assert_eq!(food_points(Duration::from_millis(999)), 10);
        assert_eq!(food_points(Duration::from_secs(3600)), MIN_FOOD_POINTS);

        let times = [0u64, 1, 5, 50, 100, 500, 1_000, 5_000, 60_000];
        for pair in times.windows(2) {
            let quick = food_points(Duration::from_millis(pair[0]));
            let slow = food_points(Duration::from_millis(pair[1]));
            assert!(quick >= slow);
            assert!(slow >= MIN_FOOD_POINTS);
        }
    }

    #[test]
    fn test_trapped_tick_leaves_state_unchanged() {
        // One-row board, head at the left end, right neighbour is body
        let config = GameConfig {
            grid_width: 100,
            grid_height: 20,
            initial_body: vec![Cell::new(0, 0), Cell::new(20, 0), Cell::new(40, 0)],
            initial_food: Cell::new(80, 0),
            ..GameConfig::default()
        };
        let mut engine = seeded(config);
        let state = engine.reset();

        let result = engine.step(&state, Duration::from_millis(100));

        assert_eq!(result.outcome, TickOutcome::Trapped);
        assert_eq!(result.points, 0);
        assert_eq!(result.state.snake, state.snake);
        assert_eq!(result.state.food, state.food);
        assert_eq!(result.state.status, Status::Trapped);
        assert!(result.rationale.starts_with("Trapped"));

        let again = engine.step(&result.state, Duration::from_millis(200));
        assert_eq!(again.outcome, TickOutcome::Halted);
        assert_eq!(again.state, result.state);
    }

    #[test]
    fn test_filling_the_grid_wins() {
        // 2x1 board: eating the only free cell fills it
        let config = GameConfig {
            grid_width: 40,
            grid_height: 20,
            initial_body: vec![Cell::new(0, 0)],
            initial_food: Cell::new(20, 0),
            ..GameConfig::default()
        };
        let mut engine = seeded(config);
        let state = engine.reset();

        let result = engine.step(&state, Duration::from_millis(100));

        assert_eq!(result.outcome, TickOutcome::GridFull);
        assert!(result.grew());
        assert_eq!(result.state.status, Status::Won);
        assert_eq!(result.state.snake.len(), 2);
    }

    #[test]
    fn test_place_food_always_safe() {
        let config = GameConfig::small();
        let mut engine = seeded(config);
        let grid = engine.grid();

        // Fill every row but the last with body
        let body: Vec<Cell> = grid.cells().filter(|c| c.y < grid.height - grid.cell_size).collect();
        let snake = Snake::new(body);

        for _ in 0..200 {
            let food = engine.place_food(&snake).unwrap();
            assert!(grid.is_safe(food, &snake));
        }
    }

    #[test]
    fn test_place_food_finds_last_free_cell() {
        let mut engine = seeded(GameConfig::small());
        let grid = engine.grid();
        let last = grid.cell_at(grid.columns() - 1, grid.rows() - 1);

        let snake = Snake::new(grid.cells().filter(|&c| c != last).collect());

        assert_eq!(engine.place_food(&snake), Ok(last));
    }

    #[test]
    fn test_place_food_on_full_grid() {
        let mut engine = seeded(GameConfig::small());
        let snake = Snake::new(engine.grid().cells().collect());

        assert_eq!(engine.place_food(&snake), Err(PlacementError::GridFull));
    }

    #[test]
    fn test_snake_never_moves_into_unsafe_cell() {
        let mut engine = seeded(GameConfig::small());
        let mut state = engine.reset();
        let grid = engine.grid();

        for tick in 1..=2_000u64 {
            let result = engine.step(&state, Duration::from_millis(tick * 100));
            if result.outcome == TickOutcome::Halted {
                break;
            }
            if matches!(result.outcome, TickOutcome::Moved | TickOutcome::Grew) {
                let head = result.state.snake.head();
                assert!(grid.in_bounds(head));
                assert!(!result.state.snake.body[1..].contains(&head));

                let expected = state.snake.len() + usize::from(result.grew());
                assert_eq!(result.state.snake.len(), expected);
            }
            state = result.state;
        }

        assert!(state.foods_eaten > 0);
    }
}
