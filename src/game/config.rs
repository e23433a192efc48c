use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smallest board that still has a centre cell distinct from the walls
pub const MIN_GRID_SIZE: i32 = 2;
pub const MAX_GRID_SIZE: i32 = 100;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board, in cells
    pub grid_size: i32,
    /// Delay between ticks at the start of every run, in milliseconds
    pub initial_delay_ms: u64,
    /// Key under which the best score is persisted
    pub high_score_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_delay_ms: 200,
            high_score_key: "high-score".to_string(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: i32) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size),
            "grid size must be between {} and {}, got {}",
            MIN_GRID_SIZE,
            MAX_GRID_SIZE,
            self.grid_size
        );
        ensure!(self.initial_delay_ms > 0, "initial delay must be positive");
        ensure!(
            !self.high_score_key.is_empty(),
            "high score key must not be empty"
        );
        Ok(())
    }

    /// Cell the snake starts on
    pub fn center(&self) -> (i32, i32) {
        (self.grid_size / 2, self.grid_size / 2)
    }
}
