// SPDX-License-Identifier: Apache-2.0

//! Text form of a board as read and written by the infinite chess editor.
//!
//! The format is `v0;` followed by `id,x,y;` for every occupied square.
//! Decoding skips entries that do not parse or whose id is not in the piece
//! table.

use crate::board::grid::{Board, Bounds};
use crate::board::piece::Piece;
use crate::chesspiler_error::{ChesspilerError, Result};

pub const VERSION_TAG: &str = "v0;";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedPiece {
    pub piece: Piece,
    pub x: i64,
    pub y: i64,
}

/// Encodes raw `(symbol, x, y)` triples in the order given. Symbols with no
/// entry in the piece table are dropped.
pub fn encode_symbols<I>(squares: I) -> String
where
    I: IntoIterator<Item = (char, i64, i64)>,
{
    let mut out = String::from(VERSION_TAG);
    for (symbol, x, y) in squares {
        match Piece::from_symbol(symbol) {
            Some(piece) => out.push_str(&format!("{},{},{};", piece.id(), x, y)),
            None => log::trace!("dropping unmapped symbol {:?} at ({}, {})", symbol, x, y),
        }
    }
    out
}

/// Encodes every occupied square of `board`, scanning rows bottom to top and
/// each row left to right.
pub fn encode(board: &Board) -> String {
    encode_symbols(board.iter().map(|(x, y, piece)| (piece.symbol(), x, y)))
}

fn parse_entry(entry: &str) -> Option<PlacedPiece> {
    let fields: Vec<&str> = entry.split(',').collect();
    if fields.len() != 3 {
        return None;
    }
    let id: i64 = fields[0].trim().parse().ok()?;
    let x: i64 = fields[1].trim().parse().ok()?;
    let y: i64 = fields[2].trim().parse().ok()?;
    let piece = Piece::from_id(id)?;
    Some(PlacedPiece { piece, x, y })
}

/// Decodes board text into the pieces it lists, in file order.
///
/// Fails only when the text does not start with [`VERSION_TAG`].
pub fn decode(text: &str) -> Result<Vec<PlacedPiece>> {
    let text = text.trim();
    let Some(body) = text.strip_prefix(VERSION_TAG) else {
        let head: String = text.chars().take(8).collect();
        return Err(ChesspilerError::Format(format!(
            "expected text to start with `{}`, got `{}`",
            VERSION_TAG, head
        )));
    };
    let mut pieces = Vec::new();
    for entry in body.split(';') {
        if entry.is_empty() {
            continue;
        }
        match parse_entry(entry) {
            Some(p) => pieces.push(p),
            None => log::trace!("skipping board entry `{}`", entry),
        }
    }
    log::debug!("decoded {} piece(s)", pieces.len());
    Ok(pieces)
}

/// Smallest rectangle containing every piece, with any side optionally pinned
/// by the caller. Returns `None` when there are no pieces and some side is
/// left unpinned.
pub fn bounding_box(
    pieces: &[PlacedPiece],
    min_x: Option<i64>,
    max_x: Option<i64>,
    min_y: Option<i64>,
    max_y: Option<i64>,
) -> Option<Bounds> {
    let xs = || pieces.iter().map(|p| p.x);
    let ys = || pieces.iter().map(|p| p.y);
    let bx0 = min_x.or_else(|| xs().min())?;
    let bx1 = max_x.or_else(|| xs().max())?;
    let by0 = min_y.or_else(|| ys().min())?;
    let by1 = max_y.or_else(|| ys().max())?;
    if bx0 > bx1 || by0 > by1 {
        return None;
    }
    Some(Bounds::new(bx0, by0, bx1, by1))
}

/// Builds a board over `window` from decoded pieces, dropping pieces that
/// fall outside it. Later pieces overwrite earlier ones on the same square.
///
/// Fails with [`ChesspilerError::BoardTooLarge`] when `window` holds more
/// squares than a board may allocate.
pub fn board_from_pieces(pieces: &[PlacedPiece], window: Bounds) -> Result<Board> {
    let mut board = Board::try_new(window)?;
    for p in pieces {
        if window.contains(p.x, p.y) {
            board.set(p.x, p.y, p.piece);
        }
    }
    Ok(board)
}
