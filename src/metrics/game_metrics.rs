use std::time::{Duration, Instant};

/// Game time that only advances while the autopilot is running.
///
/// Readings feed the food bonus, so a paused game must not age.
#[derive(Debug, Clone, Default)]
pub struct GameClock {
    accumulated: Duration,
    resumed_at: Option<Instant>,
}

impl GameClock {
    /// A stopped clock reading zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.resumed_at.is_some()
    }

    /// Start counting from `now`; no-op if already running
    pub fn resume(&mut self, now: Instant) {
        if self.resumed_at.is_none() {
            self.resumed_at = Some(now);
        }
    }

    /// Stop counting at `now`, keeping the time gathered so far
    pub fn pause(&mut self, now: Instant) {
        if let Some(resumed_at) = self.resumed_at.take() {
            self.accumulated += now.saturating_duration_since(resumed_at);
        }
    }

    /// Back to a stopped zero reading
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        let running = self
            .resumed_at
            .map_or(Duration::ZERO, |resumed_at| now.saturating_duration_since(resumed_at));
        self.accumulated + running
    }
}

/// Statistics for one game and for the whole session
pub struct GameMetrics {
    /// Clock of the current game
    pub clock: GameClock,
    /// Clock reading as of the last `update`
    pub elapsed_time: Duration,
    pub high_score: u32,
    /// Games that ended trapped or with a full grid
    pub games_played: u32,
    /// Food eaten across every game of the session
    pub foods_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            clock: GameClock::new(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            foods_eaten: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.clock.elapsed(Instant::now());
    }

    /// Game clock reading right now
    pub fn game_time(&self) -> Duration {
        self.clock.elapsed(Instant::now())
    }

    /// Follow the driver: count time only while it runs
    pub fn set_running(&mut self, running: bool) {
        let now = Instant::now();
        if running {
            self.clock.resume(now);
        } else {
            self.clock.pause(now);
        }
    }

    pub fn on_game_start(&mut self) {
        self.clock.reset();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_food_eaten(&mut self, score: u32) {
        self.foods_eaten += 1;
        self.high_score = self.high_score.max(score);
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
