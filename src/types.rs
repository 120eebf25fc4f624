//! Shared types and constants
//! This module contains pure data types with no external dependencies

/// Grid dimensions
pub const GRID_WIDTH: u8 = 10;
pub const GRID_HEIGHT: u8 = 20;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const DROP_INTERVAL_MS: u32 = 1000;

/// Points awarded per cleared line
pub const LINE_SCORE: u32 = 100;

/// Block colors, one per tetromino
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorId {
    Cyan,
    Purple,
    Orange,
    Blue,
    Yellow,
    Green,
    Red,
}

/// Cell on the grid (None = empty, Some = settled block color)
pub type Cell = Option<ColorId>;

/// Game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
}
