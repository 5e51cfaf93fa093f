// SPDX-License-Identifier: Apache-2.0

pub mod codec;
pub mod grid;
pub mod piece;

pub use grid::{Board, Bounds};
pub use piece::{Color, Piece, PieceKind};
