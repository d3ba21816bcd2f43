//! Interactive mode: watch the autopilot play in the terminal
//!
//! # Controls
//!
//! - Space/Enter: Start/pause
//! - R: Restart
//! - 1-4: Speed control (1=slow, 2=relaxed, 3=normal, 4=fast)
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    style::Print,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, interval, interval_at};
use tracing::info;

use crate::game::{Driver, GameConfig, StepResult};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Hud, Renderer};

/// Playback speed, relative to the configured tick interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    /// Five times slower
    Slow,
    /// Two and a half times slower
    Relaxed,
    /// The configured interval
    Normal,
    /// Twice as fast
    Fast,
}

impl Speed {
    /// Get the tick interval for this speed
    pub fn tick_interval(&self, base: Duration) -> Duration {
        let interval = match self {
            Self::Slow => base * 5,
            Self::Relaxed => base * 5 / 2,
            Self::Normal => base,
            Self::Fast => base / 2,
        };
        interval.max(Duration::from_millis(1))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Relaxed => "Relaxed",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
        }
    }
}

/// Options that only concern the presentation
#[derive(Debug, Clone)]
pub struct AutopilotOptions {
    /// Display name shown above the board
    pub player_name: String,
    /// Ring the terminal bell whenever the snake eats
    pub bell: bool,
}

impl Default for AutopilotOptions {
    fn default() -> Self {
        Self {
            player_name: "Autopilot".to_string(),
            bell: false,
        }
    }
}

/// Tick timer whose first tick comes one full period from now
fn delayed_interval(period: Duration) -> Interval {
    interval_at(Instant::now() + period, period)
}

pub struct AutopilotMode {
    driver: Driver,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    options: AutopilotOptions,
    speed: Speed,
    should_quit: bool,
}

impl AutopilotMode {
    pub fn new(config: GameConfig, options: AutopilotOptions) -> Self {
        let mut driver = Driver::new(config);
        driver.start();
        let mut metrics = GameMetrics::new();
        metrics.set_running(driver.is_running());

        Self {
            driver,
            metrics,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            options,
            speed: Speed::Normal,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(name = %self.options.player_name, "autopilot started");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = delayed_interval(self.current_tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    let now = self.metrics.game_time();
                    if let Some(result) = self.driver.tick(now) {
                        self.on_step(&result, terminal)?;
                    }
                    self.metrics.set_running(self.driver.is_running());
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let hud = Hud {
                        player_name: &self.options.player_name,
                        run_state: self.driver.run_state(),
                        speed: self.speed,
                    };
                    let grid = self.driver.config().grid();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.driver.state(), &grid, &self.metrics, &hud);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::TogglePause => self.toggle_pause(),
                KeyAction::Restart => self.reset_game(),
                KeyAction::SetSpeed(speed) => self.change_speed(speed, tick_timer),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    /// React to a completed tick: metrics, audio cue and game over
    fn on_step(
        &mut self,
        result: &StepResult,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        if result.grew() {
            self.metrics.on_food_eaten(result.state.score);
            if self.options.bell {
                execute!(terminal.backend_mut(), Print('\u{7}')).context("Failed to ring bell")?;
            }
        }

        if result.state.status.is_final() {
            self.metrics.on_game_over(result.state.score);
        }

        Ok(())
    }

    fn toggle_pause(&mut self) {
        self.driver.toggle();
        self.metrics.set_running(self.driver.is_running());
    }

    fn current_tick_interval(&self) -> Duration {
        self.speed.tick_interval(self.driver.config().tick_interval())
    }

    fn change_speed(&mut self, speed: Speed, tick_timer: &mut Interval) {
        self.speed = speed;
        *tick_timer = delayed_interval(self.current_tick_interval());
    }

    fn reset_game(&mut self) {
        self.driver.restart();
        self.driver.start();
        self.metrics.on_game_start();
        self.metrics.set_running(self.driver.is_running());
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
