// SPDX-License-Identifier: Apache-2.0

//! Groups cells into layers by depth and adds the module boundary as two
//! synthetic layers: every input port bit first, every output port bit last.
//!
//! Node order inside a layer is fixed by declaration order (ports, then port
//! bits, then cells), so building layers twice from the same netlist gives the
//! same result.

use crate::netlist::depth::DepthMap;
use crate::netlist::model::{CellIndex, GateId, NetIndex, NetlistModel, PortDirection};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Gate,
    InputPort,
    OutputPort,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    Gate(GateId),
    InputPort { port: String, bit: usize },
    OutputPort { port: String, bit: usize },
}

impl NodeId {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeId::Gate(_) => NodeKind::Gate,
            NodeId::InputPort { .. } => NodeKind::InputPort,
            NodeId::OutputPort { .. } => NodeKind::OutputPort,
        }
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeId::Gate(id) => write!(f, "{}", id),
            NodeId::InputPort { port, bit } => write!(f, "i:{}[{}]", port, bit),
            NodeId::OutputPort { port, bit } => write!(f, "o:{}[{}]", port, bit),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerNode {
    pub id: NodeId,
    /// Backing cell for gate nodes.
    pub cell: Option<CellIndex>,
    /// One entry per input connection; `None` marks an undriven or constant
    /// input.
    pub inputs: Vec<Option<NodeId>>,
    pub outputs: Vec<NodeId>,
}

impl LayerNode {
    pub fn kind(&self) -> NodeKind {
        self.id.kind()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    /// Depth shared by the gates in this layer; `None` for the boundary
    /// layers.
    pub depth: Option<u32>,
    pub nodes: Vec<LayerNode>,
}

/// Input boundary layer, gate layers by ascending depth, output boundary
/// layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayeredNetlist {
    pub layers: Vec<Layer>,
}

impl LayeredNetlist {
    pub fn input_layer(&self) -> &Layer {
        &self.layers[0]
    }

    pub fn output_layer(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    pub fn gate_layers(&self) -> &[Layer] {
        &self.layers[1..self.layers.len() - 1]
    }

    pub fn num_gates(&self) -> usize {
        self.gate_layers().iter().map(|l| l.nodes.len()).sum()
    }
}

fn input_ref(model: &NetlistModel, net: NetIndex) -> Option<NodeId> {
    if let Some((PortDirection::Input, port, bit)) = model.port_binding(net) {
        return Some(NodeId::InputPort {
            port: port.to_string(),
            bit,
        });
    }
    model
        .driver(net)
        .map(|drv| NodeId::Gate(model.cell(drv).gate_id))
}

fn gate_node(model: &NetlistModel, cell_index: CellIndex) -> LayerNode {
    let cell = model.cell(cell_index);
    let inputs: Vec<Option<NodeId>> = cell
        .input_nets()
        .map(|(_role, net)| input_ref(model, net))
        .collect();
    let mut outputs: Vec<NodeId> = Vec::new();
    for (_role, net) in cell.output_nets() {
        if let Some((PortDirection::Output, port, bit)) = model.port_binding(net) {
            outputs.push(NodeId::OutputPort {
                port: port.to_string(),
                bit,
            });
        }
        for load in model.loads(net) {
            outputs.push(NodeId::Gate(model.cell(*load).gate_id));
        }
    }
    LayerNode {
        id: NodeId::Gate(cell.gate_id),
        cell: Some(cell_index),
        inputs,
        outputs,
    }
}

/// Builds the layered view of `model` using precomputed `depths`.
pub fn build_layers(model: &NetlistModel, depths: &DepthMap) -> LayeredNetlist {
    let mut input_nodes: Vec<LayerNode> = Vec::new();
    let mut output_nodes: Vec<LayerNode> = Vec::new();
    for port in model.ports() {
        for (bit, net) in port.bits.iter().enumerate() {
            match port.direction {
                PortDirection::Input => {
                    let mut loads: Vec<GateId> = model
                        .loads(*net)
                        .iter()
                        .map(|c| model.cell(*c).gate_id)
                        .collect();
                    loads.sort();
                    loads.dedup();
                    input_nodes.push(LayerNode {
                        id: NodeId::InputPort {
                            port: port.name.clone(),
                            bit,
                        },
                        cell: None,
                        inputs: Vec::new(),
                        outputs: loads.into_iter().map(NodeId::Gate).collect(),
                    });
                }
                PortDirection::Output => {
                    let inputs: Vec<Option<NodeId>> = model
                        .driver(*net)
                        .map(|drv| Some(NodeId::Gate(model.cell(drv).gate_id)))
                        .into_iter()
                        .collect();
                    output_nodes.push(LayerNode {
                        id: NodeId::OutputPort {
                            port: port.name.clone(),
                            bit,
                        },
                        cell: None,
                        inputs,
                        outputs: Vec::new(),
                    });
                }
            }
        }
    }

    // BTreeMap keeps depths ascending; cells arrive in declaration order.
    let mut by_depth: BTreeMap<u32, Vec<LayerNode>> = BTreeMap::new();
    for (cell, depth) in depths.iter() {
        by_depth
            .entry(depth)
            .or_default()
            .push(gate_node(model, cell));
    }

    let mut layers: Vec<Layer> = Vec::with_capacity(by_depth.len() + 2);
    layers.push(Layer {
        depth: None,
        nodes: input_nodes,
    });
    for (depth, nodes) in by_depth {
        layers.push(Layer {
            depth: Some(depth),
            nodes,
        });
    }
    layers.push(Layer {
        depth: None,
        nodes: output_nodes,
    });
    log::debug!("built {} layer(s) for `{}`", layers.len(), model.name);
    LayeredNetlist { layers }
}
