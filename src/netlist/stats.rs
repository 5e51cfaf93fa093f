// SPDX-License-Identifier: Apache-2.0

//! Summary statistics for a loaded netlist.

use crate::netlist::depth::DepthMap;
use crate::netlist::model::{NetlistModel, PortDirection};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetlistSummary {
    pub max_depth: u32,
    pub max_inputs_per_gate: usize,
    pub max_outputs_per_gate: usize,
    pub total_circuit_inputs: usize,
    pub total_circuit_outputs: usize,
    pub total_gates: usize,
    pub gates_by_depth: BTreeMap<u32, usize>,
}

pub fn summarize(model: &NetlistModel, depths: &DepthMap) -> NetlistSummary {
    let mut gates_by_depth: BTreeMap<u32, usize> = BTreeMap::new();
    for (_cell, depth) in depths.iter() {
        *gates_by_depth.entry(depth).or_insert(0) += 1;
    }
    let bits_with = |dir: PortDirection| -> usize {
        model
            .ports()
            .iter()
            .filter(|p| p.direction == dir)
            .map(|p| p.bits.len())
            .sum()
    };
    NetlistSummary {
        max_depth: depths.max_depth().unwrap_or(0),
        max_inputs_per_gate: model.cells().iter().map(|c| c.num_inputs()).max().unwrap_or(0),
        max_outputs_per_gate: model
            .cells()
            .iter()
            .map(|c| c.num_outputs())
            .max()
            .unwrap_or(0),
        total_circuit_inputs: bits_with(PortDirection::Input),
        total_circuit_outputs: bits_with(PortDirection::Output),
        total_gates: model.cells().len(),
        gates_by_depth,
    }
}

impl std::fmt::Display for NetlistSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "max_depth: {}", self.max_depth)?;
        writeln!(f, "max_inputs_per_gate: {}", self.max_inputs_per_gate)?;
        writeln!(f, "max_outputs_per_gate: {}", self.max_outputs_per_gate)?;
        writeln!(f, "total_circuit_inputs: {}", self.total_circuit_inputs)?;
        writeln!(f, "total_circuit_outputs: {}", self.total_circuit_outputs)?;
        writeln!(f, "total_gates: {}", self.total_gates)?;
        write!(f, "gates_by_depth:")?;
        for (depth, count) in &self.gates_by_depth {
            write!(f, " {}={}", depth, count)?;
        }
        Ok(())
    }
}
