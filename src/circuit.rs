// SPDX-License-Identifier: Apache-2.0

//! End-to-end compilation of one netlist module into a chess position.

use crate::board::{codec, Board};
use crate::chesspiler_error::Result;
use crate::netlist::depth::{compute_depths, DepthMap};
use crate::netlist::io::load_netlist_from_path;
use crate::netlist::layers::{build_layers, LayeredNetlist};
use crate::netlist::model::NetlistModel;
use crate::netlist::stats::{summarize, NetlistSummary};
use crate::placement::{GateInstance, LayoutConfig, PlacementEngine};
use std::path::Path;

/// A netlist module together with its depth analysis, layering and board
/// placement.
pub struct ChessCircuit {
    model: NetlistModel,
    depths: DepthMap,
    layered: LayeredNetlist,
    engine: PlacementEngine,
}

impl ChessCircuit {
    pub fn compile(model: NetlistModel, config: LayoutConfig) -> Result<Self> {
        let mut engine = PlacementEngine::new(config)?;
        let depths = compute_depths(&model)?;
        let layered = build_layers(&model, &depths);
        engine.place(&layered)?;
        log::info!(
            "compiled `{}`: {} gate(s) in {} layer(s)",
            model.name,
            layered.num_gates(),
            layered.layers.len()
        );
        Ok(ChessCircuit {
            model,
            depths,
            layered,
            engine,
        })
    }

    pub fn from_json_str(text: &str, module_name: &str, config: LayoutConfig) -> Result<Self> {
        Self::compile(NetlistModel::from_json_str(text, module_name)?, config)
    }

    pub fn from_path(path: &Path, module_name: &str, config: LayoutConfig) -> Result<Self> {
        Self::compile(load_netlist_from_path(path, module_name)?, config)
    }

    pub fn model(&self) -> &NetlistModel {
        &self.model
    }

    pub fn depths(&self) -> &DepthMap {
        &self.depths
    }

    pub fn layered(&self) -> &LayeredNetlist {
        &self.layered
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    pub fn gates(&self) -> &[GateInstance] {
        self.engine.gates()
    }

    pub fn summary(&self) -> NetlistSummary {
        summarize(&self.model, &self.depths)
    }

    /// The board in `v0;` text form.
    pub fn encode(&self) -> String {
        codec::encode(self.board())
    }

    pub fn write_board(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.encode())?;
        log::debug!("wrote board to '{}'", path.display());
        Ok(())
    }
}
