// SPDX-License-Identifier: Apache-2.0

//! Bounded, dense board of chess pieces.
//!
//! Coordinates grow rightwards in `x` and upwards in `y`, matching the board
//! editor. Reads outside the bounds see an empty square; writes outside the
//! bounds are a programming error and panic.

use crate::board::piece::Piece;
use crate::chesspiler_error::{ChesspilerError, Result};

/// Largest number of squares a [`Board`] will allocate.
pub const MAX_BOARD_SQUARES: usize = 1 << 26;

fn span(min: i64, max: i64) -> usize {
    usize::try_from(max as i128 - min as i128 + 1).unwrap_or(usize::MAX)
}

/// Inclusive rectangle of board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl Bounds {
    pub fn new(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Self {
        assert!(
            min_x <= max_x && min_y <= max_y,
            "bounds must be non-empty: x {}..={} y {}..={}",
            min_x,
            max_x,
            min_y,
            max_y
        );
        Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds covering `[0, width - 1] x [0, height - 1]`.
    pub fn from_size(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board size must be non-zero");
        Bounds::new(0, 0, width as i64 - 1, height as i64 - 1)
    }

    /// Number of columns, saturating at `usize::MAX`.
    pub fn width(&self) -> usize {
        span(self.min_x, self.max_x)
    }

    /// Number of rows, saturating at `usize::MAX`.
    pub fn height(&self) -> usize {
        span(self.min_y, self.max_y)
    }

    /// Number of squares, or `None` if that does not fit in a `usize`.
    pub fn area(&self) -> Option<usize> {
        self.width().checked_mul(self.height())
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "x {}..={} y {}..={}",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    bounds: Bounds,
    // Row-major, row 0 is `min_y`.
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// Empty board over `bounds`, failing with
    /// [`ChesspilerError::BoardTooLarge`] above [`MAX_BOARD_SQUARES`].
    pub fn try_new(bounds: Bounds) -> Result<Self> {
        match bounds.area() {
            Some(area) if area <= MAX_BOARD_SQUARES => Ok(Board {
                bounds,
                squares: vec![None; area],
            }),
            _ => Err(ChesspilerError::BoardTooLarge {
                bounds,
                limit: MAX_BOARD_SQUARES,
            }),
        }
    }

    /// Empty board over `bounds`.
    ///
    /// Panics if the board would exceed [`MAX_BOARD_SQUARES`].
    pub fn new(bounds: Bounds) -> Self {
        match Board::try_new(bounds) {
            Ok(board) => board,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn with_size(width: usize, height: usize) -> Self {
        Board::new(Bounds::from_size(width, height))
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let row = (y - self.bounds.min_y) as usize;
        let col = (x - self.bounds.min_x) as usize;
        Some(row * self.bounds.width() + col)
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Piece> {
        self.offset(x, y).and_then(|i| self.squares[i])
    }

    /// Places `piece` at `(x, y)`, replacing whatever was there.
    ///
    /// Panics if `(x, y)` is outside the board bounds.
    pub fn set(&mut self, x: i64, y: i64, piece: Piece) {
        let i = self.offset(x, y).unwrap_or_else(|| {
            panic!(
                "write of {} at ({}, {}) is outside board {}",
                piece, x, y, self.bounds
            )
        });
        self.squares[i] = Some(piece);
    }

    /// Empties every square.
    pub fn reset(&mut self) {
        self.squares.iter_mut().for_each(|s| *s = None);
    }

    /// Occupied squares as `(x, y, piece)` in row-major order: `y` ascending,
    /// then `x` ascending.
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64, Piece)> + '_ {
        let width = self.bounds.width();
        let min_x = self.bounds.min_x;
        let min_y = self.bounds.min_y;
        self.squares.iter().enumerate().filter_map(move |(i, s)| {
            s.map(|piece| {
                (
                    min_x + (i % width) as i64,
                    min_y + (i / width) as i64,
                    piece,
                )
            })
        })
    }

    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.iter().all(|s| s.is_none())
    }

    /// Renders the squares inside `window` as text rows, top row first.
    ///
    /// Squares outside the board render as empty.
    pub fn render_rows(&self, window: Bounds) -> Vec<String> {
        (window.min_y..=window.max_y)
            .rev()
            .map(|y| {
                (window.min_x..=window.max_x)
                    .map(|x| self.get(x, y).map(|p| p.symbol()).unwrap_or('.'))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::piece::{Color, PieceKind};
    use pretty_assertions::assert_eq;

    const PAWN: Piece = Piece::new(PieceKind::Pawn, Color::White);
    const KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::Black);

    #[test]
    fn set_then_get() {
        let mut board = Board::with_size(4, 3);
        board.set(3, 2, PAWN);
        assert_eq!(board.get(3, 2), Some(PAWN));
        assert_eq!(board.get(2, 2), None);
        assert_eq!(board.get(10, 10), None);
        assert_eq!(board.piece_count(), 1);
    }

    #[test]
    #[should_panic(expected = "outside board")]
    fn write_past_width_panics() {
        let mut board = Board::with_size(4, 3);
        board.set(4, 0, PAWN);
    }

    #[test]
    #[should_panic(expected = "outside board")]
    fn write_below_origin_panics() {
        let mut board = Board::with_size(4, 3);
        board.set(0, -1, PAWN);
    }

    #[test]
    fn iter_is_row_major_from_bottom() {
        let mut board = Board::new(Bounds::new(-2, -1, 2, 1));
        board.set(2, 1, PAWN);
        board.set(-2, 1, KNIGHT);
        board.set(0, -1, PAWN);
        let got: Vec<(i64, i64, Piece)> = board.iter().collect();
        assert_eq!(got, vec![(0, -1, PAWN), (-2, 1, KNIGHT), (2, 1, PAWN)]);
    }

    #[test]
    fn reset_empties_board() {
        let mut board = Board::with_size(2, 2);
        board.set(1, 1, PAWN);
        board.reset();
        assert!(board.is_empty());
        assert_eq!(board, Board::with_size(2, 2));
    }

    #[test]
    fn extreme_bounds_do_not_overflow() {
        let widest = Bounds::new(i64::MIN, 0, i64::MAX, 0);
        assert_eq!(widest.width(), usize::MAX);
        assert_eq!(widest.height(), 1);
        assert_eq!(Bounds::new(0, 0, 1_000_000, 1_000_000).area(), Some(1_000_001 * 1_000_001));
        assert_eq!(Bounds::new(i64::MIN, i64::MIN, i64::MAX, i64::MAX).area(), None);
    }

    #[test]
    fn oversized_board_is_refused() {
        let far = Bounds::new(0, 0, 1_000_000, 1_000_000);
        match Board::try_new(far) {
            Err(ChesspilerError::BoardTooLarge { bounds, limit }) => {
                assert_eq!(bounds, far);
                assert_eq!(limit, MAX_BOARD_SQUARES);
            }
            other => panic!("expected BoardTooLarge, got {:?}", other),
        }
        let widest = Bounds::new(-9_000_000_000_000_000_000, 0, 9_000_000_000_000_000_000, 0);
        assert!(Board::try_new(widest).is_err());
        assert_eq!(Board::try_new(Bounds::new(0, 0, 3, 2)).unwrap().bounds().area(), Some(12));
    }

    #[test]
    fn render_rows_puts_top_row_first() {
        let mut board = Board::with_size(3, 2);
        board.set(0, 0, PAWN);
        board.set(2, 1, KNIGHT);
        let rows = board.render_rows(Bounds::new(0, 0, 3, 1));
        assert_eq!(rows, vec!["..n.".to_string(), "P...".to_string()]);
    }
}
