//! Engine module - owns the complete game state
//!
//! Ties together the grid, the falling piece, the score, and the RNG, and
//! drives gravity from elapsed time. Two states: running and game over; game
//! over is terminal until an explicit `reset`. Adapters read state through
//! the accessors and mutate only via `tick`, `handle_input`, and `reset`.

use crate::core::grid::Grid;
use crate::core::piece::{tetromino, Piece, TETROMINO_COUNT};
use crate::core::rng::SimpleRng;
use crate::types::{GameAction, DROP_INTERVAL_MS, GRID_HEIGHT, LINE_SCORE};

/// The game-state engine, one instance per game session
#[derive(Debug, Clone)]
pub struct Engine {
    grid: Grid,
    piece: Piece,
    score: u32,
    drop_timer_ms: u32,
    game_over: bool,
    rng: SimpleRng,
}

impl Engine {
    /// Create a running engine with an empty grid and the first piece spawned
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let piece = Self::draw(&mut rng);
        Self {
            grid: Grid::new(),
            piece,
            score: 0,
            drop_timer_ms: 0,
            game_over: false,
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Advance time and apply gravity once the drop interval is exceeded.
    ///
    /// The accumulator must strictly exceed the interval before the piece
    /// drops, and it zeroes after the attempt whether the piece moved or
    /// locked. Fall speed is constant and independent of the tick rate.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.game_over {
            return;
        }

        self.drop_timer_ms += elapsed_ms;
        if self.drop_timer_ms > DROP_INTERVAL_MS {
            if !self.piece.try_move(&self.grid, 0, 1) {
                self.lock();
            }
            self.drop_timer_ms = 0;
        }
    }

    /// Apply a player action; returns whether the piece changed.
    ///
    /// Ignored entirely while the game is over.
    pub fn handle_input(&mut self, action: GameAction) -> bool {
        if self.game_over {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.piece.try_move(&self.grid, -1, 0),
            GameAction::MoveRight => self.piece.try_move(&self.grid, 1, 0),
            GameAction::SoftDrop => self.piece.try_move(&self.grid, 0, 1),
            GameAction::Rotate => self.piece.try_rotate(&self.grid),
            GameAction::HardDrop => {
                while self.piece.try_move(&self.grid, 0, 1) {}
                self.lock();
                true
            }
        }
    }

    /// Commit the piece into the grid, clear lines, and spawn the next piece.
    ///
    /// All-or-nothing: a piece with any cell still above the top edge cannot
    /// fully enter the board, which ends the game without writing the grid.
    pub fn lock(&mut self) {
        let cells = self.piece.cells();
        if cells.iter().any(|&(_, y)| y < 0) {
            self.game_over = true;
            return;
        }

        for &(x, y) in &cells {
            self.grid.set(x, y, Some(self.piece.color));
        }

        self.clear_lines();
        self.spawn_piece();
    }

    /// Scan for full rows bottom-to-top and remove them.
    ///
    /// After a removal the same index is checked again, because the row above
    /// has shifted into it. Awards a flat bonus per cleared row and returns
    /// the number cleared.
    pub fn clear_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = GRID_HEIGHT as usize;
        while y > 0 {
            y -= 1;
            if self.grid.is_row_full(y) {
                self.grid.clear_row(y);
                cleared += 1;
                y += 1;
            }
        }

        self.score += cleared * LINE_SCORE;
        cleared
    }

    /// Draw a random piece and spawn it centered at the top.
    ///
    /// A fresh piece that immediately overlaps settled cells means the stack
    /// has reached the spawn area; the game is over.
    pub fn spawn_piece(&mut self) {
        self.piece = Self::draw(&mut self.rng);
        if self.piece.collides(&self.grid) {
            self.game_over = true;
        }
    }

    fn draw(rng: &mut SimpleRng) -> Piece {
        let (shape, color) = tetromino(rng.next_range(TETROMINO_COUNT) as usize);
        Piece::spawn(shape, color)
    }

    /// Start a fresh game: empty grid, zero score, new piece, running.
    ///
    /// The RNG stream continues rather than reseeding, so a whole session
    /// stays reproducible from the construction seed alone.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.drop_timer_ms = 0;
        self.game_over = false;
        self.spawn_piece();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::Shape;
    use crate::types::{ColorId, GRID_WIDTH};

    fn upright_bar_at(x: i8, y: i8) -> Piece {
        Piece {
            shape: Shape::from_rows(&[&[1], &[1], &[1], &[1]]),
            color: ColorId::Cyan,
            x,
            y,
        }
    }

    fn flat_bar() -> Piece {
        let (shape, color) = tetromino(0);
        Piece::spawn(shape, color)
    }

    fn fill_row(engine: &mut Engine, y: i8) {
        for x in 0..GRID_WIDTH as i8 {
            engine.grid.set(x, y, Some(ColorId::Green));
        }
    }

    #[test]
    fn test_new_engine() {
        let engine = Engine::new(12345);

        assert!(!engine.game_over);
        assert_eq!(engine.score, 0);
        assert_eq!(engine.drop_timer_ms, 0);
        assert_eq!(engine.piece.y, 0);
        assert!(engine.grid.cells().iter().all(|cell| cell.is_none()));
    }

    #[test]
    fn test_same_seed_same_piece_sequence() {
        let mut a = Engine::new(42);
        let mut b = Engine::new(42);

        for _ in 0..20 {
            assert_eq!(a.piece, b.piece);
            a.spawn_piece();
            b.spawn_piece();
        }
    }

    #[test]
    fn test_rng_stream_continues_across_reset() {
        let mut a = Engine::new(7);
        a.spawn_piece();
        let second = a.piece;

        let mut b = Engine::new(7);
        b.reset();

        assert_eq!(b.piece, second);
    }

    #[test]
    fn test_tick_threshold_is_strict() {
        let mut engine = Engine::new(1);

        engine.tick(1000);
        assert_eq!(engine.piece.y, 0);

        engine.tick(1);
        assert_eq!(engine.piece.y, 1);
    }

    #[test]
    fn test_tick_accumulates_across_calls() {
        let mut engine = Engine::new(1);

        engine.tick(600);
        engine.tick(300);
        assert_eq!(engine.piece.y, 0);

        engine.tick(101);
        assert_eq!(engine.piece.y, 1);
    }

    #[test]
    fn test_tick_zeroes_accumulator_after_drop() {
        let mut engine = Engine::new(1);

        engine.tick(1500);
        assert_eq!(engine.piece.y, 1);
        assert_eq!(engine.drop_timer_ms, 0);

        // The leftover 500ms above must not carry into the next interval.
        engine.tick(1000);
        assert_eq!(engine.piece.y, 1);
        engine.tick(1);
        assert_eq!(engine.piece.y, 2);
    }

    #[test]
    fn test_soft_drop_leaves_accumulator_alone() {
        let mut engine = Engine::new(1);

        engine.tick(900);
        assert!(engine.handle_input(GameAction::SoftDrop));
        assert_eq!(engine.piece.y, 1);
        assert_eq!(engine.drop_timer_ms, 900);

        engine.tick(100);
        assert_eq!(engine.piece.y, 1);
        engine.tick(1);
        assert_eq!(engine.piece.y, 2);
    }

    #[test]
    fn test_gravity_locks_grounded_piece() {
        let mut engine = Engine::new(1);
        engine.piece = upright_bar_at(0, 16);

        engine.tick(1001);

        // Resting on the floor, so the gravity step locked it in.
        assert_eq!(engine.grid.get(0, 19), Some(Some(ColorId::Cyan)));
        assert_eq!(engine.grid.get(0, 16), Some(Some(ColorId::Cyan)));
        assert_eq!(engine.piece.y, 0);
        assert_eq!(engine.drop_timer_ms, 0);
        assert!(!engine.game_over);
    }

    #[test]
    fn test_hard_drop_writes_bottom_row() {
        let mut engine = Engine::new(1);
        engine.piece = flat_bar();

        assert!(engine.handle_input(GameAction::HardDrop));

        for x in 3..=6 {
            assert_eq!(engine.grid.get(x, 19), Some(Some(ColorId::Cyan)));
        }
        assert_eq!(engine.score, 0);
        assert_eq!(engine.piece.y, 0);
        assert!(!engine.game_over);
    }

    #[test]
    fn test_hard_drop_completes_and_clears_bottom_row() {
        let mut engine = Engine::new(1);
        engine.piece = flat_bar();

        for x in 0..GRID_WIDTH as i8 {
            if !(3..=6).contains(&x) {
                engine.grid.set(x, 19, Some(ColorId::Red));
            }
        }

        assert!(engine.handle_input(GameAction::HardDrop));

        assert_eq!(engine.score, 100);
        assert!(engine.grid.cells().iter().all(|cell| cell.is_none()));
    }

    #[test]
    fn test_clear_lines_counts_and_scores() {
        let mut engine = Engine::new(1);
        fill_row(&mut engine, 19);
        fill_row(&mut engine, 18);
        fill_row(&mut engine, 15);

        assert_eq!(engine.clear_lines(), 3);
        assert_eq!(engine.score, 300);
    }

    #[test]
    fn test_clear_lines_preserves_row_order() {
        let mut engine = Engine::new(1);
        fill_row(&mut engine, 19);
        fill_row(&mut engine, 17);

        // Markers in the non-full rows between and above.
        engine.grid.set(0, 18, Some(ColorId::Orange));
        engine.grid.set(1, 16, Some(ColorId::Blue));
        engine.grid.set(2, 16, Some(ColorId::Purple));

        assert_eq!(engine.clear_lines(), 2);

        // Both full rows removed; markers shifted down, order intact.
        assert_eq!(engine.grid.get(1, 18), Some(Some(ColorId::Blue)));
        assert_eq!(engine.grid.get(2, 18), Some(Some(ColorId::Purple)));
        assert_eq!(engine.grid.get(0, 19), Some(Some(ColorId::Orange)));
    }

    #[test]
    fn test_clear_lines_handles_stacked_full_rows() {
        let mut engine = Engine::new(1);
        for y in 14..20 {
            fill_row(&mut engine, y);
        }

        assert_eq!(engine.clear_lines(), 6);
        assert_eq!(engine.score, 600);
        assert!(engine.grid.cells().iter().all(|cell| cell.is_none()));
    }

    #[test]
    fn test_clear_lines_second_scan_is_noop() {
        let mut engine = Engine::new(1);
        fill_row(&mut engine, 19);
        fill_row(&mut engine, 18);
        engine.grid.set(3, 17, Some(ColorId::Yellow));

        assert_eq!(engine.clear_lines(), 2);
        let after_first = engine.grid.clone();

        assert_eq!(engine.clear_lines(), 0);
        assert_eq!(engine.grid, after_first);
        assert_eq!(engine.score, 200);
    }

    #[test]
    fn test_lock_above_board_ends_game_without_writing() {
        let mut engine = Engine::new(1);
        engine.piece = upright_bar_at(0, -2);
        let piece_before = engine.piece;

        engine.lock();

        assert!(engine.game_over);
        assert!(engine.grid.cells().iter().all(|cell| cell.is_none()));
        // No next piece was spawned.
        assert_eq!(engine.piece, piece_before);
    }

    #[test]
    fn test_lock_partially_above_board_aborts_whole_write() {
        let mut engine = Engine::new(1);
        engine.piece = upright_bar_at(4, -1);

        engine.lock();

        assert!(engine.game_over);
        // The in-board cells stay empty too.
        assert_eq!(engine.grid.get(4, 0), Some(None));
        assert_eq!(engine.grid.get(4, 1), Some(None));
        assert_eq!(engine.grid.get(4, 2), Some(None));
    }

    #[test]
    fn test_spawn_into_settled_cells_ends_game() {
        let mut engine = Engine::new(1);
        for x in 3..=6 {
            engine.grid.set(x, 0, Some(ColorId::Red));
        }

        engine.spawn_piece();

        assert!(engine.game_over);
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let mut engine = Engine::new(1);
        engine.game_over = true;
        let piece_before = engine.piece;

        assert!(!engine.handle_input(GameAction::MoveLeft));
        assert!(!engine.handle_input(GameAction::HardDrop));
        assert_eq!(engine.piece, piece_before);
    }

    #[test]
    fn test_tick_ignored_after_game_over() {
        let mut engine = Engine::new(1);
        engine.game_over = true;

        engine.tick(5000);

        assert_eq!(engine.piece.y, 0);
        assert_eq!(engine.drop_timer_ms, 0);
    }

    #[test]
    fn test_reset_restores_running_state() {
        let mut engine = Engine::new(1);
        engine.piece = upright_bar_at(0, -2);
        engine.score = 400;
        engine.lock();
        assert!(engine.game_over);

        engine.reset();

        assert!(!engine.game_over);
        assert_eq!(engine.score, 0);
        assert_eq!(engine.drop_timer_ms, 0);
        assert_eq!(engine.piece.y, 0);
        assert!(engine.grid.cells().iter().all(|cell| cell.is_none()));
    }

    #[test]
    fn test_movement_actions() {
        let mut engine = Engine::new(1);
        let x0 = engine.piece.x;

        assert!(engine.handle_input(GameAction::MoveRight));
        assert_eq!(engine.piece.x, x0 + 1);

        assert!(engine.handle_input(GameAction::MoveLeft));
        assert_eq!(engine.piece.x, x0);

        assert!(engine.handle_input(GameAction::SoftDrop));
        assert_eq!(engine.piece.y, 1);
    }

    #[test]
    fn test_rotate_action_changes_asymmetric_shape() {
        let mut engine = Engine::new(1);
        engine.piece = flat_bar();
        let before = engine.piece.shape;

        assert!(engine.handle_input(GameAction::Rotate));
        assert_ne!(engine.piece.shape, before);
    }
}
