use anyhow::{Context, Result};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tick_snake::game::GameConfig;
use tick_snake::modes::HumanMode;
use tick_snake::score::{FileStore, HighScoreStore, MemoryStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tick_snake")]
#[command(version, about = "Timed grid snake for the terminal")]
struct Cli {
    /// JSON file with a game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square board
    #[arg(long)]
    grid_size: Option<i32>,

    /// Starting delay between ticks, in milliseconds
    #[arg(long)]
    delay: Option<u64>,

    /// File the best score is kept in
    #[arg(long, default_value = "snake_scores.json")]
    high_score_file: PathBuf,

    /// Keep the best score in memory only
    #[arg(long)]
    no_save: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(delay) = self.delay {
            config.initial_delay_ms = delay;
        }
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let config = cli.game_config()?;
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(?config, seed = ?cli.seed, "Starting snake");

    if cli.no_save {
        play(config, rng, MemoryStore::new()).await
    } else {
        let store = FileStore::new(&cli.high_score_file, config.high_score_key.clone());
        play(config, rng, store).await
    }
}

async fn play<H: HighScoreStore>(config: GameConfig, rng: StdRng, store: H) -> Result<()> {
    let mut human_mode = HumanMode::new(config, rng, store)?;
    human_mode.run().await
}

/// The terminal belongs to the game screen, so logs only go to a file
fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install tracing subscriber: {err}"))?;
    Ok(())
}
