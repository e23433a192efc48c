use tracing::{debug, warn};

use super::store::HighScoreStore;

/// Best score of all runs, backed by a persistent store
pub struct ScoreBoard<H> {
    store: H,
    high_score: u32,
    games_played: u32,
}

impl<H: HighScoreStore> ScoreBoard<H> {
    /// Read the persisted best score. Anything unreadable counts as 0.
    pub fn load(store: H) -> Self {
        let high_score = match store.load_high_score() {
            Ok(Some(score)) => score,
            Ok(None) => 0,
            Err(err) => {
                warn!(error = %err, "Ignoring unreadable high score");
                0
            }
        };
        debug!(high_score, "Loaded high score");

        Self {
            store,
            high_score,
            games_played: 0,
        }
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn store(&self) -> &H {
        &self.store
    }

    /// Record a finished run. Returns true when it set a new best score.
    pub fn on_game_over(&mut self, final_score: u32) -> bool {
        self.games_played += 1;
        if final_score <= self.high_score {
            return false;
        }

        self.high_score = final_score;
        if let Err(err) = self.store.save_high_score(final_score) {
            warn!(error = %err, score = final_score, "Failed to persist high score");
        }
        true
    }
}
