// SPDX-License-Identifier: Apache-2.0

//! Places every gate of a layered netlist on a bounded board.
//!
//! Layers become columns: the layer cursor starts at `origin_x` and moves
//! right by `layer_spacing` after each layer, boundary layers included. Inside
//! a layer gates are stacked from the top of the board downwards,
//! `sibling_spacing` rows apart. A gate's anchor is the square just above its
//! top-left corner; template row `r`, column `c` lands at
//! `(anchor.x + c, anchor.y - 1 - r)`.

use crate::board::{Board, Bounds};
use crate::chesspiler_error::{ChesspilerError, Result};
use crate::netlist::layers::{LayeredNetlist, NodeId};
use crate::netlist::model::GateId;
use crate::placement::config::LayoutConfig;
use crate::placement::template::{GateKind, GateTemplate};

/// One gate as placed on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateInstance {
    pub id: GateId,
    pub kind: GateKind,
    pub anchor: (i64, i64),
    pub width: usize,
    pub height: usize,
    /// Index of the layer the gate was placed from.
    pub layer: usize,
    pub inputs: Vec<(i64, i64)>,
    pub output: (i64, i64),
}

impl GateInstance {
    /// Squares covered by the gate template.
    pub fn footprint(&self) -> Bounds {
        let (x, y) = self.anchor;
        Bounds::new(
            x,
            y - self.height as i64,
            x + self.width as i64 - 1,
            y - 1,
        )
    }
}

fn world_square(anchor: (i64, i64), col: usize, row: usize) -> (i64, i64) {
    (anchor.0 + col as i64, anchor.1 - 1 - row as i64)
}

fn offset(anchor: (i64, i64), local: (i64, i64)) -> (i64, i64) {
    (anchor.0 + local.0, anchor.1 + local.1)
}

pub struct PlacementEngine {
    config: LayoutConfig,
    board: Board,
    gates: Vec<GateInstance>,
}

impl PlacementEngine {
    /// Fails when `config` does not describe a usable board.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        let board = Board::try_new(config.board_bounds()?)?;
        Ok(PlacementEngine {
            config,
            board,
            gates: Vec::new(),
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Gates placed by the last successful call to [`PlacementEngine::place`],
    /// in placement order.
    pub fn gates(&self) -> &[GateInstance] {
        &self.gates
    }

    /// Clears the board and places every gate of `layered` on it.
    ///
    /// On error the board and gate list are left empty.
    pub fn place(&mut self, layered: &LayeredNetlist) -> Result<&Board> {
        self.board.reset();
        self.gates.clear();
        if let Err(e) = self.place_layers(layered) {
            self.board.reset();
            self.gates.clear();
            return Err(e);
        }
        log::debug!(
            "placed {} gate(s), {} piece(s)",
            self.gates.len(),
            self.board.piece_count()
        );
        Ok(&self.board)
    }

    fn place_layers(&mut self, layered: &LayeredNetlist) -> Result<()> {
        let bounds = self.board.bounds();
        let mut x = self.config.origin_x;
        for (layer_index, layer) in layered.layers.iter().enumerate() {
            let mut y = bounds.max_y + 1 - self.config.top_margin;
            for node in &layer.nodes {
                // Boundary nodes have no footprint.
                let NodeId::Gate(id) = node.id else {
                    continue;
                };
                let unsupported = || ChesspilerError::UnsupportedGate {
                    gate: id.to_string(),
                    inputs: node.inputs.len(),
                    outputs: node.outputs.len(),
                };
                if node.outputs.is_empty() {
                    return Err(unsupported());
                }
                let kind = GateKind::for_arity(node.inputs.len(), self.config.use_not_template)
                    .ok_or_else(unsupported)?;
                let template = kind.template();
                self.stamp(id, template, (x, y), layer_index)?;
                y -= self
                    .config
                    .sibling_spacing
                    .unwrap_or(template.height as i64);
            }
            x += self.config.layer_spacing;
        }
        Ok(())
    }

    fn stamp(
        &mut self,
        id: GateId,
        template: &GateTemplate,
        anchor: (i64, i64),
        layer: usize,
    ) -> Result<()> {
        let bounds = self.board.bounds();
        for (col, row, _) in template.pieces() {
            let (wx, wy) = world_square(anchor, col, row);
            if !bounds.contains(wx, wy) {
                return Err(ChesspilerError::PlacementOverflow {
                    gate: id.to_string(),
                    x: wx,
                    y: wy,
                    bounds,
                });
            }
        }
        for (col, row, piece) in template.pieces() {
            let (wx, wy) = world_square(anchor, col, row);
            self.board.set(wx, wy, piece);
        }
        log::trace!("placed {} ({}) at {:?}", id, template.kind.as_str(), anchor);
        self.gates.push(GateInstance {
            id,
            kind: template.kind,
            anchor,
            width: template.width,
            height: template.height,
            layer,
            inputs: template
                .input_anchors
                .iter()
                .map(|local| offset(anchor, *local))
                .collect(),
            output: offset(anchor, template.output_anchor),
        });
        Ok(())
    }
}
