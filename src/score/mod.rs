//! Best-score tracking and its persistence.

pub mod board;
pub mod store;

pub use board::ScoreBoard;
pub use store::{FileStore, HighScoreStore, MemoryStore, StoreError};
