// SPDX-License-Identifier: Apache-2.0

//! Chess piece symbols and the numeric ids used by the board text format.
//!
//! Ids are assigned as `2 * kind + color`: even ids are white, odd ids are
//! black, and kinds run pawn, rook, knight, bishop, queen, king. Symbols use
//! the usual FEN letters, uppercase for white.

use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

/// Every piece the board format knows about, in id order.
pub const ALL_PIECES: [Piece; 12] = [
    Piece::new(PieceKind::Pawn, Color::White),
    Piece::new(PieceKind::Pawn, Color::Black),
    Piece::new(PieceKind::Rook, Color::White),
    Piece::new(PieceKind::Rook, Color::Black),
    Piece::new(PieceKind::Knight, Color::White),
    Piece::new(PieceKind::Knight, Color::Black),
    Piece::new(PieceKind::Bishop, Color::White),
    Piece::new(PieceKind::Bishop, Color::Black),
    Piece::new(PieceKind::Queen, Color::White),
    Piece::new(PieceKind::Queen, Color::Black),
    Piece::new(PieceKind::King, Color::White),
    Piece::new(PieceKind::King, Color::Black),
];

static PIECE_BY_SYMBOL: Lazy<HashMap<char, Piece>> =
    Lazy::new(|| ALL_PIECES.iter().map(|p| (p.symbol(), *p)).collect());

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    /// Numeric id used in the `v0;` board format.
    pub fn id(&self) -> u8 {
        let kind = match self.kind {
            PieceKind::Pawn => 0,
            PieceKind::Rook => 1,
            PieceKind::Knight => 2,
            PieceKind::Bishop => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        };
        let color = match self.color {
            Color::White => 0,
            Color::Black => 1,
        };
        kind * 2 + color
    }

    /// Returns the piece for a board-format id, or `None` for ids outside the
    /// table (e.g. piece types added by a newer editor).
    pub fn from_id(id: i64) -> Option<Piece> {
        usize::try_from(id)
            .ok()
            .and_then(|i| ALL_PIECES.get(i))
            .copied()
    }

    pub fn symbol(&self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Piece> {
        PIECE_BY_SYMBOL.get(&symbol).copied()
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
