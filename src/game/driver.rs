use std::time::Duration;
use tracing::info;

use super::{
    config::GameConfig,
    engine::{GameEngine, StepResult, TickOutcome},
    state::GameState,
};

/// Whether the timer should be ticking the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// Owns the current game snapshot and gates ticks on the run state.
///
/// Each tick replaces the snapshot as a whole, so readers only ever see a
/// committed state. The driver goes back to idle by itself once the game
/// can no longer change (trapped or grid full).
pub struct Driver {
    engine: GameEngine,
    state: GameState,
    run_state: RunState,
}

impl Driver {
    /// New driver in the idle state
    pub fn new(config: GameConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            run_state: RunState::Idle,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn start(&mut self) {
        if self.state.status.is_final() {
            return;
        }
        if self.run_state == RunState::Idle {
            info!("driver started");
            self.run_state = RunState::Running;
        }
    }

    pub fn stop(&mut self) {
        if self.run_state == RunState::Running {
            info!(steps = self.state.steps, "driver stopped");
            self.run_state = RunState::Idle;
        }
    }

    pub fn toggle(&mut self) {
        match self.run_state {
            RunState::Idle => self.start(),
            RunState::Running => self.stop(),
        }
    }

    /// Start over from the configured initial state. The run state is kept.
    pub fn restart(&mut self) {
        self.state = self.engine.reset();
        info!("game restarted");
    }

    /// Run one tick at game-clock time `now`.
    ///
    /// Returns `None` without touching the state while idle.
    pub fn tick(&mut self, now: Duration) -> Option<StepResult> {
        if self.run_state == RunState::Idle {
            return None;
        }

        let result = self.engine.step(&self.state, now);
        self.state = result.state.clone();

        if matches!(
            result.outcome,
            TickOutcome::Trapped | TickOutcome::GridFull | TickOutcome::Halted
        ) {
            self.stop();
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Status};

    fn config() -> GameConfig {
        GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_idle_driver_does_not_tick() {
        let mut driver = Driver::new(config());
        let before = driver.state().clone();

        assert_eq!(driver.run_state(), RunState::Idle);
        assert!(driver.tick(Duration::from_millis(100)).is_none());
        assert_eq!(driver.state(), &before);
    }

    #[test]
    fn test_running_driver_ticks() {
        let mut driver = Driver::new(config());
        driver.start();

        let result = driver.tick(Duration::from_millis(100)).unwrap();

        assert_eq!(result.outcome, TickOutcome::Moved);
        assert_eq!(driver.state().steps, 1);
        assert_eq!(driver.state(), &result.state);
    }

    #[test]
    fn test_toggle() {
        let mut driver = Driver::new(config());
        driver.toggle();
        assert!(driver.is_running());
        driver.toggle();
        assert!(!driver.is_running());
    }

    #[test]
    fn test_first_move_reaches_adjacent_food() {
        let mut driver = Driver::new(GameConfig {
            initial_food: Cell::new(180, 160),
            ..config()
        });
        driver.start();

        let result = driver.tick(Duration::from_millis(100)).unwrap();

        assert!(result.grew());
        assert_eq!(driver.state().snake.head(), Cell::new(180, 160));
        assert_eq!(driver.state().snake.len(), 3);
    }

    #[test]
    fn test_trapped_stops_driver() {
        let mut driver = Driver::new(GameConfig {
            grid_width: 60,
            grid_height: 20,
            initial_body: vec![Cell::new(0, 0), Cell::new(20, 0)],
            initial_food: Cell::new(40, 0),
            ..config()
        });
        driver.start();
        let before = driver.state().clone();

        let result = driver.tick(Duration::from_millis(100)).unwrap();

        assert_eq!(result.outcome, TickOutcome::Trapped);
        assert_eq!(driver.state().snake, before.snake);
        assert_eq!(driver.state().food, before.food);
        assert_eq!(driver.state().status, Status::Trapped);
        assert!(!driver.is_running());

        // A finished game cannot be resumed, only restarted
        driver.start();
        assert!(!driver.is_running());
        driver.restart();
        driver.start();
        assert!(driver.is_running());
        assert_eq!(driver.state().status, Status::Playing);
    }
}
