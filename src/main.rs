use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use swipe_snake::game::GameConfig;
use swipe_snake::modes::PlayMode;
use swipe_snake::store::FileStore;

#[derive(Parser)]
#[command(name = "swipe_snake")]
#[command(version, about = "Snake with a swipe tutorial, in the terminal")]
struct Cli {
    /// JSON file with game settings; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width, overrides the config file
    #[arg(long)]
    width: Option<usize>,

    /// Grid height, overrides the config file
    #[arg(long)]
    height: Option<usize>,

    /// Where the high score is kept
    #[arg(long, default_value = "swipe_snake.json")]
    store: PathBuf,

    /// Log file; the terminal itself is taken by the game
    #[arg(long, default_value = "swipe_snake.log")]
    log_file: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    config
        .validate()
        .map_err(|e| anyhow!("Invalid game config: {}", e))?;

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(cli.log_level.into(), Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = load_config(&cli)?;
    log::info!(
        "starting on a {}x{} grid, store {:?}",
        config.grid_width,
        config.grid_height,
        cli.store
    );

    // A corrupt store counts as no record.
    let store = FileStore::open(&cli.store).unwrap_or_else(|e| {
        log::warn!("starting with an empty store: {:#}", e);
        FileStore::empty(&cli.store)
    });
    PlayMode::new(config, Box::new(store)).run().await
}
