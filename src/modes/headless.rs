//! Headless mode: let the autopilot play without a terminal UI
//!
//! Ticks run back to back on a simulated clock that advances by the
//! configured tick interval, so a seeded run is fully reproducible.

use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

use crate::game::{Driver, GameConfig, Status, TickOutcome};

/// Summary of a headless run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadlessReport {
    /// Ticks executed, including a final trapped tick
    pub ticks: u64,
    pub steps: u32,
    pub length: usize,
    pub score: u32,
    pub foods_eaten: u32,
    pub status: String,
    pub last_rationale: String,
}

impl fmt::Display for HeadlessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "Autopilot run")?;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "Ticks:        {}", self.ticks)?;
        writeln!(f, "Steps:        {}", self.steps)?;
        writeln!(f, "Length:       {}", self.length)?;
        writeln!(f, "Score:        {}", self.score)?;
        writeln!(f, "Food eaten:   {}", self.foods_eaten)?;
        writeln!(f, "Status:       {}", self.status)?;
        write!(f, "Last move:    {}", self.last_rationale)
    }
}

pub struct HeadlessMode {
    driver: Driver,
    max_ticks: u64,
}

impl HeadlessMode {
    pub fn new(config: GameConfig, max_ticks: u64) -> Self {
        Self {
            driver: Driver::new(config),
            max_ticks,
        }
    }

    /// Run until `max_ticks` ticks have passed or the game can no longer
    /// change, whichever comes first.
    pub fn run(&mut self) -> HeadlessReport {
        let tick_interval = self.driver.config().tick_interval();
        let mut ticks = 0u64;

        self.driver.start();
        info!(max_ticks = self.max_ticks, "headless run started");

        while ticks < self.max_ticks {
            let now = tick_interval * u32::try_from(ticks + 1).unwrap_or(u32::MAX);
            let Some(result) = self.driver.tick(now) else {
                break;
            };
            ticks += 1;

            debug!(tick = ticks, outcome = ?result.outcome, rationale = %result.rationale, "tick");

            if matches!(result.outcome, TickOutcome::Trapped | TickOutcome::GridFull) {
                break;
            }
        }

        self.driver.stop();

        let state = self.driver.state();
        let report = HeadlessReport {
            ticks,
            steps: state.steps,
            length: state.snake.len(),
            score: state.score,
            foods_eaten: state.foods_eaten,
            status: state.status.as_str().to_string(),
            last_rationale: state.last_rationale.clone(),
        };

        info!(
            ticks = report.ticks,
            score = report.score,
            length = report.length,
            status = %report.status,
            "headless run finished"
        );

        report
    }

    pub fn status(&self) -> Status {
        self.driver.state().status
    }
}
