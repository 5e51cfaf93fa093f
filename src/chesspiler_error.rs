// SPDX-License-Identifier: Apache-2.0

use crate::board::Bounds;

/// Errors produced while turning a netlist into a board, or while reading a
/// board back from its text form.
#[derive(Debug)]
pub enum ChesspilerError {
    /// The netlist document is missing the requested module, its ports or
    /// cells table, or one of those is malformed.
    Schema(String),
    /// The cell dependency graph has a cycle; `cycle` lists the cell names
    /// along it in dependency order.
    CyclicNetlist { cycle: Vec<String> },
    /// A gate footprint does not fit on the declared board.
    PlacementOverflow {
        gate: String,
        x: i64,
        y: i64,
        bounds: Bounds,
    },
    /// No gate template exists for a cell with this arity.
    UnsupportedGate {
        gate: String,
        inputs: usize,
        outputs: usize,
    },
    /// A board this large cannot be held in memory.
    BoardTooLarge { bounds: Bounds, limit: usize },
    /// Layout settings that describe no usable board.
    InvalidLayout(String),
    /// Board text does not start with the expected version tag.
    Format(String),
    Io(std::io::Error),
}

impl std::fmt::Display for ChesspilerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChesspilerError::Schema(msg) => write!(f, "netlist schema error: {}", msg),
            ChesspilerError::CyclicNetlist { cycle } => write!(
                f,
                "netlist has a combinational cycle: {}",
                cycle.join(" -> ")
            ),
            ChesspilerError::PlacementOverflow { gate, x, y, bounds } => write!(
                f,
                "gate {} lands at ({}, {}) outside board {}; enlarge the board",
                gate, x, y, bounds
            ),
            ChesspilerError::UnsupportedGate {
                gate,
                inputs,
                outputs,
            } => write!(
                f,
                "gate {} has {} input(s) and {} output(s); no template fits",
                gate, inputs, outputs
            ),
            ChesspilerError::BoardTooLarge { bounds, limit } => write!(
                f,
                "board {} exceeds the limit of {} squares",
                bounds, limit
            ),
            ChesspilerError::InvalidLayout(msg) => write!(f, "invalid layout: {}", msg),
            ChesspilerError::Format(msg) => write!(f, "board format error: {}", msg),
            ChesspilerError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ChesspilerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChesspilerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ChesspilerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, ChesspilerError>;
