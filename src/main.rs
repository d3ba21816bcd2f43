use anyhow::{Context, Result};
use auto_snake::game::GameConfig;
use auto_snake::modes::{AutopilotMode, AutopilotOptions, HeadlessMode};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "auto_snake")]
#[command(version, about = "Snake steered by a pathfinding autopilot")]
struct Cli {
    /// How to run the game
    #[arg(long, default_value = "autopilot")]
    mode: Mode,

    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<i32>,

    /// Grid height
    #[arg(long)]
    height: Option<i32>,

    /// Cell size, in the same units as width and height
    #[arg(long)]
    cell_size: Option<i32>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to run in headless mode
    #[arg(long, default_value = "1000")]
    ticks: u64,

    /// Print the headless report as JSON
    #[arg(long)]
    json: bool,

    /// Name shown above the board
    #[arg(long, default_value = "Autopilot")]
    name: String,

    /// Ring the terminal bell when the snake eats
    #[arg(long)]
    bell: bool,

    /// Write logs to this file (autopilot mode logs nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Watch the autopilot play in the terminal
    Autopilot,
    /// Run without a UI and print a summary
    Headless,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path).inspect_err(|err| {
                warn!(path = %path.display(), error = %err, "config file rejected");
            })?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("auto_snake=info"));

    match (&cli.log_file, &cli.mode) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (None, Mode::Headless) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        // The TUI owns the terminal
        (None, Mode::Autopilot) => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.game_config()?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Autopilot => {
            let options = AutopilotOptions {
                player_name: cli.name.clone(),
                bell: cli.bell,
            };
            let mut autopilot = AutopilotMode::new(config, options);
            autopilot.run().await?;
        }
        Mode::Headless => {
            let report = HeadlessMode::new(config, cli.ticks).run();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
            }
        }
    }

    Ok(())
}
