//! Terminal rendition of the Floppy Bird arcade game.
//!
//! The simulation (`game`) runs in a fixed 480x700 logical world and is
//! independent of the terminal: `render` scales it onto a half-block pixel
//! buffer, `audio` synthesizes the sound effects, and `leaderboard` persists
//! the best score and top runs. The binary in `main.rs` owns the frame loop
//! and wires input, audio and storage around the core.

pub mod audio;
pub mod config;
pub mod font;
pub mod game;
pub mod leaderboard;
pub mod pixel;
pub mod render;

pub use config::Difficulty;
pub use game::{Game, GameEvent, Mode};
pub use leaderboard::{ScoreBoard, ScoreStore};
