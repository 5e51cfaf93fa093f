// SPDX-License-Identifier: Apache-2.0

use crate::board::Bounds;
use crate::chesspiler_error::{ChesspilerError, Result};
use serde::Deserialize;

/// Layout constants for the placement engine.
///
/// Every field is optional when deserializing, e.g. from a TOML file:
///
/// ```toml
/// board_height = 128
/// layer_spacing = 40
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub board_width: usize,
    pub board_height: usize,

    /// Column at which the first (input boundary) layer starts.
    pub origin_x: i64,

    /// Rows left free above the first gate of every layer.
    pub top_margin: i64,

    /// Horizontal distance between consecutive layers.
    pub layer_spacing: i64,

    /// Vertical distance between consecutive gates of one layer. Defaults to
    /// the height of the gate template.
    pub sibling_spacing: Option<i64>,

    /// Place single-input gates with the NOT template instead of the NAND
    /// lattice.
    pub use_not_template: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            board_width: 512,
            board_height: 64,
            origin_x: 0,
            top_margin: 2,
            layer_spacing: 35,
            sibling_spacing: None,
            use_not_template: false,
        }
    }
}

impl LayoutConfig {
    /// Board squares spanned by `board_width` x `board_height`, anchored at
    /// the origin.
    ///
    /// Fails with [`ChesspilerError::InvalidLayout`] when either dimension is
    /// zero or does not fit a board coordinate.
    pub fn board_bounds(&self) -> Result<Bounds> {
        let width = dimension("board_width", self.board_width)?;
        let height = dimension("board_height", self.board_height)?;
        Ok(Bounds::new(0, 0, width - 1, height - 1))
    }
}

fn dimension(name: &str, value: usize) -> Result<i64> {
    if value == 0 {
        return Err(ChesspilerError::InvalidLayout(format!(
            "{} must be at least 1",
            name
        )));
    }
    i64::try_from(value).map_err(|_| {
        ChesspilerError::InvalidLayout(format!("{} {} is out of range", name, value))
    })
}
