//! Core module - pure game logic with no I/O dependencies
//!
//! Game rules, state, and timing live here; nothing in this module touches
//! the terminal.

pub mod engine;
pub mod grid;
pub mod piece;
pub mod rng;

// Re-export commonly used types
pub use engine::Engine;
pub use grid::Grid;
pub use piece::{tetromino, Piece, Shape, TETROMINO_COUNT};
pub use rng::SimpleRng;
