//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Time, randomness and storage are injected into the engine.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod speed;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{GameEngine, StepResult};
pub use food::generate_food;
pub use speed::next_delay;
pub use state::{CollisionType, GameState, Phase, Position, Snake, Snapshot};
