//! Tick Snake - a timed grid snake game for the terminal
//!
//! This library provides:
//! - Core game logic (game module)
//! - Tick scheduling behind a port (clock module)
//! - Best-score persistence (score module)
//! - Key mapping (input module) and TUI rendering (render module)
//! - The interactive loop tying them together (modes module)

pub mod clock;
pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod score;
