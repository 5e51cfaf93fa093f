// SPDX-License-Identifier: Apache-2.0

//! Fixed piece arrangements for each supported gate type.
//!
//! Templates are authored top row first, one symbol per square, `.` for an
//! empty square. Input and output anchors are offsets from the gate's world
//! anchor in board orientation (`y` grows upwards).

use crate::board::piece::Piece;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    Nand,
    Not,
}

#[derive(Debug)]
pub struct GateTemplate {
    pub kind: GateKind,
    pub width: usize,
    pub height: usize,
    rows: &'static [&'static str],
    pub input_anchors: &'static [(i64, i64)],
    pub output_anchor: (i64, i64),
}

const NAND_ROWS: &[&str] = &[
    "PBPBPBPBPBPBPBPBPB",
    "PBPBPBPBPBPBPBPBPB",
    "P.PBPBPBPBPBPBPBPB",
    "PBP.PBPBPBPBPBPBPB",
    "PBPBP.PBPBPBPBPBPB",
    "PBP.PPPBPBPBPBPBPB",
    "PBPBPPPBPBPBP.PBPB",
    "PBPBPBP.PBP.PNPBPB",
    "P.PBPBPBP.PPPBPBPB",
    "PBP.PBP.PPPBP.PBP.",
    "P.PPPBPBP.PBPBP.PB",
    "PBPPPBP.PBPBPBPBPB",
    "PBPBP.PBPBPBPBPBPB",
    "PBPBPBPBPBPBPBPBPB",
    "PBPBPBPBPBPBPBPBPB",
];

static NAND: GateTemplate = GateTemplate {
    kind: GateKind::Nand,
    width: 18,
    height: 15,
    rows: NAND_ROWS,
    input_anchors: &[(0, 0), (2, 0)],
    output_anchor: (1, 2),
};

// TODO: give NOT its own arrangement (one extra knight, pawn moved) instead
// of reusing the NAND lattice.
static NOT: GateTemplate = GateTemplate {
    kind: GateKind::Not,
    width: 18,
    height: 15,
    rows: NAND_ROWS,
    input_anchors: &[(0, 0)],
    output_anchor: (1, 1),
};

impl GateKind {
    pub fn template(&self) -> &'static GateTemplate {
        match self {
            GateKind::Nand => &NAND,
            GateKind::Not => &NOT,
        }
    }

    /// Picks the template for a gate with `num_inputs` inputs. Single-input
    /// gates use the NAND lattice with both inputs tied unless
    /// `use_not_template` is set.
    pub fn for_arity(num_inputs: usize, use_not_template: bool) -> Option<GateKind> {
        match num_inputs {
            1 if use_not_template => Some(GateKind::Not),
            1 | 2 => Some(GateKind::Nand),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GateKind::Nand => "NAND",
            GateKind::Not => "NOT",
        }
    }
}

impl GateTemplate {
    /// Non-empty squares as `(column, row, piece)`, with row 0 the top row.
    pub fn pieces(&self) -> impl Iterator<Item = (usize, usize, Piece)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, line)| {
            line.chars()
                .enumerate()
                .filter_map(move |(col, symbol)| Piece::from_symbol(symbol).map(|p| (col, row, p)))
        })
    }
}
