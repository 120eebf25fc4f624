//! Piece module - tetromino shapes and the falling piece
//!
//! A shape is a small boolean occupancy matrix that physically rotates:
//! rotating produces a new matrix with swapped dimensions. There are no
//! per-orientation offset tables and no wall kicks; a rotation that does not
//! fit at the current anchor is simply discarded.

use arrayvec::ArrayVec;

use crate::core::grid::Grid;
use crate::types::{ColorId, GRID_WIDTH};

/// Widest box a shape can occupy
const MAX_SHAPE_DIM: usize = 4;
/// Capacity bound for per-shape cell buffers
const MAX_SHAPE_CELLS: usize = MAX_SHAPE_DIM * MAX_SHAPE_DIM;

/// Number of distinct tetrominoes
pub const TETROMINO_COUNT: u32 = 7;

/// Pattern table: one occupancy matrix and color per tetromino
const TETROMINOES: [(&[&[u8]], ColorId); TETROMINO_COUNT as usize] = [
    (&[&[1, 1, 1, 1]], ColorId::Cyan),
    (&[&[1, 1, 1], &[0, 1, 0]], ColorId::Purple),
    (&[&[1, 1, 1], &[1, 0, 0]], ColorId::Orange),
    (&[&[1, 1, 1], &[0, 0, 1]], ColorId::Blue),
    (&[&[1, 1], &[1, 1]], ColorId::Yellow),
    (&[&[1, 1, 0], &[0, 1, 1]], ColorId::Green),
    (&[&[0, 1, 1], &[1, 1, 0]], ColorId::Red),
];

/// Look up a tetromino shape and color by table index
pub fn tetromino(index: usize) -> (Shape, ColorId) {
    let (pattern, color) = TETROMINOES[index % TETROMINOES.len()];
    (Shape::from_rows(pattern), color)
}

/// Occupancy matrix of a piece, independent of color and position.
///
/// Rectangular and immutable: `rotated` builds a new shape rather than
/// mutating in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    rows: u8,
    cols: u8,
    /// Flat row-major flags; only the first rows * cols entries are meaningful
    cells: [bool; MAX_SHAPE_CELLS],
}

impl Shape {
    /// Build a shape from a pattern (nonzero = occupied)
    pub fn from_rows(pattern: &[&[u8]]) -> Self {
        let rows = pattern.len() as u8;
        let cols = pattern.first().map_or(0, |row| row.len()) as u8;

        let mut cells = [false; MAX_SHAPE_CELLS];
        for (r, row) in pattern.iter().enumerate() {
            for (c, &flag) in row.iter().enumerate() {
                cells[r * cols as usize + c] = flag != 0;
            }
        }

        Self { rows, cols, cells }
    }

    pub fn width(&self) -> u8 {
        self.cols
    }

    pub fn height(&self) -> u8 {
        self.rows
    }

    /// Occupancy flag at (row, col); false outside the matrix
    pub fn at(&self, row: u8, col: u8) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        self.cells[(row as usize) * (self.cols as usize) + (col as usize)]
    }

    /// 90-degree clockwise rotation as a new shape.
    ///
    /// Dimensions swap and new (r, c) = old (rows - 1 - c, r), equivalent to
    /// transposing and then reversing each row. Four rotations restore the
    /// original.
    pub fn rotated(&self) -> Self {
        let rows = self.cols;
        let cols = self.rows;

        let mut cells = [false; MAX_SHAPE_CELLS];
        for r in 0..rows {
            for c in 0..cols {
                let flag = self.at(self.rows - 1 - c, r);
                cells[(r as usize) * (cols as usize) + (c as usize)] = flag;
            }
        }

        Self { rows, cols, cells }
    }
}

/// The currently falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub shape: Shape,
    pub color: ColorId,
    /// Grid column of the shape's top-left corner
    pub x: i8,
    /// Grid row of the shape's top-left corner
    pub y: i8,
}

impl Piece {
    /// Create a piece horizontally centered at the top of the grid
    pub fn spawn(shape: Shape, color: ColorId) -> Self {
        let x = (GRID_WIDTH / 2) as i8 - (shape.width() / 2) as i8;
        Self {
            shape,
            color,
            x,
            y: 0,
        }
    }

    /// Absolute grid coordinates of the occupied shape cells
    pub fn cells(&self) -> ArrayVec<(i8, i8), MAX_SHAPE_CELLS> {
        let mut out = ArrayVec::new();
        for r in 0..self.shape.height() {
            for c in 0..self.shape.width() {
                if self.shape.at(r, c) {
                    out.push((self.x + c as i8, self.y + r as i8));
                }
            }
        }
        out
    }

    /// Check the piece against walls, floor, and settled cells.
    ///
    /// Cells above the top edge do not collide (see `Grid::is_occupied`).
    pub fn collides(&self, grid: &Grid) -> bool {
        self.cells().iter().any(|&(x, y)| grid.is_occupied(x, y))
    }

    /// Tentatively apply an offset, reverting on collision.
    ///
    /// Commits both coordinates or neither.
    pub fn try_move(&mut self, grid: &Grid, dx: i8, dy: i8) -> bool {
        let moved = Piece {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        };
        if moved.collides(grid) {
            return false;
        }
        *self = moved;
        true
    }

    /// Rotate clockwise in place, discarding the rotation on collision.
    ///
    /// No kick search: a rotation that does not fit at the current anchor
    /// fails silently and the piece keeps its shape.
    pub fn try_rotate(&mut self, grid: &Grid) -> bool {
        let rotated = Piece {
            shape: self.shape.rotated(),
            ..*self
        };
        if rotated.collides(grid) {
            return false;
        }
        *self = rotated;
        true
    }
}
