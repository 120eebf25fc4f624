//! Falling-block puzzle with a terminal front end.
//!
//! `core` holds the deterministic game logic (grid, piece, engine, RNG).
//! `input` maps terminal key events to game actions, and `term` projects
//! engine state into a framebuffer that a diff-based crossterm backend
//! flushes to the screen.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
