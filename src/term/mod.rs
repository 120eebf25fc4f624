//! Terminal rendering layer.
//!
//! Engine state is projected into a plain framebuffer of styled characters
//! (`game_view`), which a crossterm backend flushes with diff-based updates
//! (`renderer`). The projection is pure and unit-testable; only the backend
//! touches the terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{color_rgb, GameView, Viewport};
pub use renderer::TerminalRenderer;
