// SPDX-License-Identifier: Apache-2.0

//! In-memory model of one module from a Yosys JSON netlist.
//!
//! Invariants established by [`NetlistModel::load`]:
//! - Every cell has a unique [`GateId`], derived from the numeric suffix after
//!   the last `$` in its name.
//! - Every net has at most one driving cell. Nets bound to an input port have
//!   no driving cell.
//! - Cells, pins and ports keep the order they are declared in the document.

use crate::chesspiler_error::{ChesspilerError, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Index into `NetlistModel::cells`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex(pub usize);

/// Index into the model's net table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetIndex(pub usize);

/// Index into `NetlistModel::ports`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortIndex(pub usize);

/// Short stable identifier for a gate, displayed as `g<number>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GateId(pub u64);

impl std::fmt::Display for GateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "g{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NetKey {
    Bit(u64),
    /// Constant driver such as `"0"`, `"1"`, `"x"` or `"z"`.
    Constant(String),
}

impl std::fmt::Display for NetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetKey::Bit(b) => write!(f, "{}", b),
            NetKey::Constant(c) => write!(f, "'{}'", c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortDirection {
    Input,
    Output,
}

impl PortDirection {
    fn parse(s: &str) -> Option<PortDirection> {
        match s {
            "input" => Some(PortDirection::Input),
            "output" => Some(PortDirection::Output),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PortDirection::Input => "input",
            PortDirection::Output => "output",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pin {
    pub role: String,
    pub nets: Vec<NetIndex>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub name: String,
    pub gate_id: GateId,
    pub cell_type: String,
    pub inputs: Vec<Pin>,
    pub outputs: Vec<Pin>,
}

impl Cell {
    /// `(pin role, net)` pairs for every input connection, in pin order.
    pub fn input_nets(&self) -> impl Iterator<Item = (&str, NetIndex)> + '_ {
        self.inputs
            .iter()
            .flat_map(|pin| pin.nets.iter().map(move |n| (pin.role.as_str(), *n)))
    }

    /// `(pin role, net)` pairs for every output connection, in pin order.
    pub fn output_nets(&self) -> impl Iterator<Item = (&str, NetIndex)> + '_ {
        self.outputs
            .iter()
            .flat_map(|pin| pin.nets.iter().map(move |n| (pin.role.as_str(), *n)))
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.iter().map(|p| p.nets.len()).sum()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.iter().map(|p| p.nets.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub name: String,
    pub direction: PortDirection,
    pub bits: Vec<NetIndex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortBit {
    pub port: PortIndex,
    pub bit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Net {
    pub key: NetKey,
    driver: Option<CellIndex>,
    loads: Vec<CellIndex>,
    port: Option<PortBit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
enum RawBit {
    Id(u64),
    Constant(String),
}

#[derive(Debug, Deserialize)]
struct RawPort {
    direction: String,
    bits: Vec<RawBit>,
}

#[derive(Debug, Deserialize)]
struct RawCell {
    #[serde(rename = "type", default)]
    cell_type: String,
    #[serde(default)]
    port_directions: IndexMap<String, String>,
    connections: IndexMap<String, Vec<RawBit>>,
}

const INPUT_ROLES: &[&str] = &["A", "B", "I"];
const OUTPUT_ROLES: &[&str] = &["Y", "Q"];

fn schema<S: Into<String>>(msg: S) -> ChesspilerError {
    ChesspilerError::Schema(msg.into())
}

/// Extracts the stable numeric identifier from a cell name such as
/// `$abc$1234$auto$56`.
pub fn gate_id_from_cell_name(name: &str) -> Option<GateId> {
    name.rsplit('$').next()?.parse::<u64>().ok().map(GateId)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetlistModel {
    pub name: String,
    cells: Vec<Cell>,
    ports: Vec<Port>,
    nets: Vec<Net>,
}

struct NetTable {
    nets: Vec<Net>,
    by_key: HashMap<NetKey, NetIndex>,
}

impl NetTable {
    fn intern(&mut self, bit: &RawBit) -> NetIndex {
        let key = match bit {
            RawBit::Id(b) => NetKey::Bit(*b),
            RawBit::Constant(c) => NetKey::Constant(c.clone()),
        };
        if let Some(idx) = self.by_key.get(&key) {
            return *idx;
        }
        let idx = NetIndex(self.nets.len());
        self.nets.push(Net {
            key: key.clone(),
            driver: None,
            loads: Vec::new(),
            port: None,
        });
        self.by_key.insert(key, idx);
        idx
    }
}

impl NetlistModel {
    /// Parses `text` as JSON and loads `module_name` from it.
    pub fn from_json_str(text: &str, module_name: &str) -> Result<NetlistModel> {
        let doc: Value = serde_json::from_str(text)
            .map_err(|e| schema(format!("netlist is not valid JSON: {}", e)))?;
        NetlistModel::load(&doc, module_name)
    }

    /// Builds the model for `module_name` from a parsed Yosys JSON document.
    pub fn load(doc: &Value, module_name: &str) -> Result<NetlistModel> {
        let modules = doc
            .get("modules")
            .and_then(Value::as_object)
            .ok_or_else(|| schema("document has no `modules` object"))?;
        let module = modules.get(module_name).ok_or_else(|| {
            let available: Vec<&str> = modules.keys().map(|k| k.as_str()).collect();
            schema(format!(
                "module `{}` not found; available modules: [{}]",
                module_name,
                available.join(", ")
            ))
        })?;
        let ports_value = module
            .get("ports")
            .ok_or_else(|| schema(format!("module `{}` has no `ports` table", module_name)))?;
        let cells_value = module
            .get("cells")
            .ok_or_else(|| schema(format!("module `{}` has no `cells` table", module_name)))?;
        let raw_ports = IndexMap::<String, RawPort>::deserialize(ports_value).map_err(|e| {
            schema(format!(
                "malformed `ports` table in module `{}`: {}",
                module_name, e
            ))
        })?;
        let raw_cells = IndexMap::<String, RawCell>::deserialize(cells_value).map_err(|e| {
            schema(format!(
                "malformed `cells` table in module `{}`: {}",
                module_name, e
            ))
        })?;

        let mut table = NetTable {
            nets: Vec::new(),
            by_key: HashMap::new(),
        };

        let mut ports: Vec<Port> = Vec::with_capacity(raw_ports.len());
        for (name, raw) in &raw_ports {
            let direction = PortDirection::parse(&raw.direction).ok_or_else(|| {
                schema(format!(
                    "port `{}` has unsupported direction `{}`",
                    name, raw.direction
                ))
            })?;
            let bits: Vec<NetIndex> = raw.bits.iter().map(|b| table.intern(b)).collect();
            let port_index = PortIndex(ports.len());
            for (bit, net) in bits.iter().enumerate() {
                let entry = &mut table.nets[net.0];
                if matches!(entry.key, NetKey::Constant(_)) {
                    continue;
                }
                // An input binding replaces an output one on a feed-through net.
                let rebind = match entry.port {
                    None => true,
                    Some(pb) => {
                        ports[pb.port.0].direction == PortDirection::Output
                            && direction == PortDirection::Input
                    }
                };
                if rebind {
                    entry.port = Some(PortBit {
                        port: port_index,
                        bit,
                    });
                } else {
                    log::debug!(
                        "net {} is bound to more than one port bit; keeping the first",
                        entry.key
                    );
                }
            }
            ports.push(Port {
                name: name.clone(),
                direction,
                bits,
            });
        }

        let mut cells: Vec<Cell> = Vec::with_capacity(raw_cells.len());
        let mut seen_ids: HashMap<GateId, String> = HashMap::new();
        for (name, raw) in &raw_cells {
            let gate_id = gate_id_from_cell_name(name).ok_or_else(|| {
                schema(format!(
                    "cell `{}` does not end in `$<number>`; cannot derive a gate id",
                    name
                ))
            })?;
            if let Some(other) = seen_ids.insert(gate_id, name.clone()) {
                return Err(schema(format!(
                    "cells `{}` and `{}` share gate id {}",
                    other, name, gate_id
                )));
            }
            let cell_index = CellIndex(cells.len());
            let mut inputs = Vec::new();
            let mut outputs = Vec::new();
            for (role, bits) in &raw.connections {
                let direction = match raw.port_directions.get(role) {
                    Some(d) => PortDirection::parse(d).ok_or_else(|| {
                        schema(format!(
                            "cell `{}` pin `{}` has unsupported direction `{}`",
                            name, role, d
                        ))
                    })?,
                    None if INPUT_ROLES.contains(&role.as_str()) => PortDirection::Input,
                    None if OUTPUT_ROLES.contains(&role.as_str()) => PortDirection::Output,
                    None => {
                        return Err(schema(format!(
                            "cell `{}` pin `{}` has no declared direction",
                            name, role
                        )))
                    }
                };
                let nets: Vec<NetIndex> = bits.iter().map(|b| table.intern(b)).collect();
                for net in &nets {
                    let entry = &mut table.nets[net.0];
                    if matches!(entry.key, NetKey::Constant(_)) {
                        continue;
                    }
                    match direction {
                        PortDirection::Input => {
                            if !entry.loads.contains(&cell_index) {
                                entry.loads.push(cell_index);
                            }
                        }
                        PortDirection::Output => match entry.driver {
                            Some(prev) if prev != cell_index => {
                                return Err(schema(format!(
                                    "net {} is driven by both `{}` and `{}`",
                                    entry.key, cells[prev.0].name, name
                                )));
                            }
                            _ => entry.driver = Some(cell_index),
                        },
                    }
                }
                let pin = Pin {
                    role: role.clone(),
                    nets,
                };
                match direction {
                    PortDirection::Input => inputs.push(pin),
                    PortDirection::Output => outputs.push(pin),
                }
            }
            cells.push(Cell {
                name: name.clone(),
                gate_id,
                cell_type: raw.cell_type.clone(),
                inputs,
                outputs,
            });
        }

        // Input port nets are primary inputs regardless of what drives them.
        for net in table.nets.iter_mut() {
            let Some(binding) = net.port else {
                continue;
            };
            if ports[binding.port.0].direction != PortDirection::Input {
                continue;
            }
            if let Some(drv) = net.driver.take() {
                log::warn!(
                    "input port net {} is also driven by cell `{}`; treating it as a primary input",
                    net.key,
                    cells[drv.0].name
                );
            }
        }

        log::debug!(
            "loaded module `{}`: {} cell(s), {} port(s), {} net(s)",
            module_name,
            cells.len(),
            ports.len(),
            table.nets.len()
        );

        Ok(NetlistModel {
            name: module_name.to_string(),
            cells,
            ports,
            nets: table.nets,
        })
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, idx: CellIndex) -> &Cell {
        &self.cells[idx.0]
    }

    pub fn cell_indices(&self) -> impl Iterator<Item = CellIndex> {
        (0..self.cells.len()).map(CellIndex)
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn port(&self, idx: PortIndex) -> &Port {
        &self.ports[idx.0]
    }

    pub fn num_nets(&self) -> usize {
        self.nets.len()
    }

    pub fn net(&self, idx: NetIndex) -> &Net {
        &self.nets[idx.0]
    }

    /// Cell driving `net`, or `None` for primary inputs and constants.
    pub fn driver(&self, net: NetIndex) -> Option<CellIndex> {
        self.nets[net.0].driver
    }

    /// Cells loading `net`, each listed once, in the order they were declared.
    pub fn loads(&self, net: NetIndex) -> &[CellIndex] {
        &self.nets[net.0].loads
    }

    /// The port bit bound to `net`, if `net` sits on the module boundary.
    pub fn port_bit(&self, net: NetIndex) -> Option<PortBit> {
        self.nets[net.0].port
    }

    /// `(direction, port name, bit index)` for a boundary net.
    pub fn port_binding(&self, net: NetIndex) -> Option<(PortDirection, &str, usize)> {
        self.port_bit(net).map(|pb| {
            let port = &self.ports[pb.port.0];
            (port.direction, port.name.as_str(), pb.bit)
        })
    }

    /// Looks up a cell by its gate id.
    pub fn cell_by_gate_id(&self, id: GateId) -> Option<CellIndex> {
        self.cells
            .iter()
            .position(|c| c.gate_id == id)
            .map(CellIndex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn half_adder_doc() -> Value {
        json!({
            "modules": {
                "fn": {
                    "ports": {
                        "a": {"direction": "input", "bits": [2]},
                        "b": {"direction": "input", "bits": [3]},
                        "out": {"direction": "output", "bits": [5]}
                    },
                    "cells": {
                        "$abc$10$auto$1": {
                            "type": "$_NAND_",
                            "connections": {"A": [2], "B": [3], "Y": [4]}
                        },
                        "$abc$10$auto$2": {
                            "type": "$_NAND_",
                            "connections": {"A": [4], "B": [4], "Y": [5]}
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn loads_cells_ports_and_connectivity() {
        let model = NetlistModel::load(&half_adder_doc(), "fn").unwrap();
        assert_eq!(model.cells().len(), 2);
        assert_eq!(model.ports().len(), 3);

        let first = model.cell(CellIndex(0));
        assert_eq!(first.gate_id, GateId(1));
        assert_eq!(first.cell_type, "$_NAND_");
        let roles: Vec<&str> = first.input_nets().map(|(r, _)| r).collect();
        assert_eq!(roles, vec!["A", "B"]);

        let (_, mid) = first.output_nets().next().unwrap();
        assert_eq!(model.driver(mid), Some(CellIndex(0)));
        // Loaded on both A and B by the second cell, listed once.
        assert_eq!(model.loads(mid), &[CellIndex(1)]);

        let (_, a) = first.input_nets().next().unwrap();
        assert_eq!(model.driver(a), None);
        assert_eq!(model.port_binding(a), Some((PortDirection::Input, "a", 0)));

        let (_, out) = model.cell(CellIndex(1)).output_nets().next().unwrap();
        assert_eq!(
            model.port_binding(out),
            Some((PortDirection::Output, "out", 0))
        );
        assert_eq!(model.cell_by_gate_id(GateId(2)), Some(CellIndex(1)));
    }

    #[test]
    fn missing_module_is_schema_error() {
        let err = NetlistModel::load(&half_adder_doc(), "top").unwrap_err();
        assert!(matches!(err, ChesspilerError::Schema(_)), "{:?}", err);
        assert!(err.to_string().contains("available modules: [fn]"));
    }

    #[test]
    fn missing_tables_are_schema_errors() {
        let no_cells = json!({"modules": {"fn": {"ports": {}}}});
        let no_ports = json!({"modules": {"fn": {"cells": {}}}});
        let no_modules = json!({"creator": "yosys"});
        for doc in [no_cells, no_ports, no_modules] {
            let err = NetlistModel::load(&doc, "fn").unwrap_err();
            assert!(matches!(err, ChesspilerError::Schema(_)), "{:?}", err);
        }
    }

    #[test]
    fn malformed_tables_are_schema_errors() {
        let bad_port = json!({"modules": {"fn": {
            "ports": {"a": {"direction": "input"}},
            "cells": {}
        }}});
        let bad_cell = json!({"modules": {"fn": {
            "ports": {},
            "cells": {"$x$1": {"connections": [1, 2]}}
        }}});
        let inout = json!({"modules": {"fn": {
            "ports": {"a": {"direction": "inout", "bits": [2]}},
            "cells": {}
        }}});
        for doc in [bad_port, bad_cell, inout] {
            let err = NetlistModel::load(&doc, "fn").unwrap_err();
            assert!(matches!(err, ChesspilerError::Schema(_)), "{:?}", err);
        }
    }

    #[test]
    fn cell_name_without_numeric_suffix_is_rejected() {
        let doc = json!({"modules": {"fn": {
            "ports": {},
            "cells": {"my_nand": {"connections": {"A": [2], "B": [3], "Y": [4]}}}
        }}});
        let err = NetlistModel::load(&doc, "fn").unwrap_err();
        assert!(err.to_string().contains("my_nand"), "{}", err);
    }

    #[test]
    fn duplicate_gate_ids_are_rejected() {
        let doc = json!({"modules": {"fn": {
            "ports": {},
            "cells": {
                "$a$7": {"connections": {"A": [2], "Y": [3]}},
                "$b$7": {"connections": {"A": [3], "Y": [4]}}
            }
        }}});
        assert!(NetlistModel::load(&doc, "fn").is_err());
    }

    #[test]
    fn multiple_drivers_are_rejected() {
        let doc = json!({"modules": {"fn": {
            "ports": {},
            "cells": {
                "$a$1": {"connections": {"A": [2], "Y": [4]}},
                "$a$2": {"connections": {"A": [3], "Y": [4]}}
            }
        }}});
        let err = NetlistModel::load(&doc, "fn").unwrap_err();
        assert!(err.to_string().contains("driven by both"), "{}", err);
    }

    #[test]
    fn port_directions_override_role_table() {
        let doc = json!({"modules": {"fn": {
            "ports": {},
            "cells": {
                "$a$1": {
                    "port_directions": {"X": "input", "Z": "output"},
                    "connections": {"X": [2], "Z": [3]}
                }
            }
        }}});
        let model = NetlistModel::load(&doc, "fn").unwrap();
        let cell = model.cell(CellIndex(0));
        assert_eq!(cell.num_inputs(), 1);
        assert_eq!(cell.num_outputs(), 1);
    }

    #[test]
    fn unknown_pin_without_direction_is_rejected() {
        let doc = json!({"modules": {"fn": {
            "ports": {},
            "cells": {"$a$1": {"connections": {"S": [2], "Y": [3]}}}
        }}});
        assert!(NetlistModel::load(&doc, "fn").is_err());
    }

    #[test]
    fn constant_bits_are_undriven() {
        let doc = json!({"modules": {"fn": {
            "ports": {"y": {"direction": "output", "bits": [3]}},
            "cells": {"$a$1": {"connections": {"A": ["1"], "B": [2], "Y": [3]}}}
        }}});
        let model = NetlistModel::load(&doc, "fn").unwrap();
        let (_, one) = model.cell(CellIndex(0)).input_nets().next().unwrap();
        assert_eq!(model.net(one).key, NetKey::Constant("1".to_string()));
        assert_eq!(model.driver(one), None);
        assert!(model.loads(one).is_empty());
    }

    #[test]
    fn driven_input_port_net_is_primary() {
        let doc = json!({"modules": {"fn": {
            "ports": {"a": {"direction": "input", "bits": [2]}},
            "cells": {"$a$1": {"connections": {"A": [3], "Y": [2]}}}
        }}});
        let model = NetlistModel::load(&doc, "fn").unwrap();
        let (_, a) = model.cell(CellIndex(0)).output_nets().next().unwrap();
        assert_eq!(model.driver(a), None);
    }

    #[test]
    fn feed_through_net_keeps_input_binding() {
        let doc = json!({"modules": {"fn": {
            "ports": {
                "y": {"direction": "output", "bits": [2]},
                "a": {"direction": "input", "bits": [2, 3]}
            },
            "cells": {"$a$1": {"connections": {"A": [2], "B": [3], "Y": [4]}}}
        }}});
        let model = NetlistModel::load(&doc, "fn").unwrap();
        let bound: Vec<_> = model
            .cell(CellIndex(0))
            .input_nets()
            .map(|(_, net)| model.port_binding(net))
            .collect();
        assert_eq!(
            bound,
            vec![
                Some((PortDirection::Input, "a", 0)),
                Some((PortDirection::Input, "a", 1)),
            ]
        );
    }

    #[test]
    fn from_json_str_rejects_invalid_json() {
        let err = NetlistModel::from_json_str("{not json", "fn").unwrap_err();
        assert!(matches!(err, ChesspilerError::Schema(_)), "{:?}", err);
    }

    #[test]
    fn gate_id_uses_last_dollar_segment() {
        assert_eq!(gate_id_from_cell_name("$abc$123$auto$456"), Some(GateId(456)));
        assert_eq!(gate_id_from_cell_name("42"), Some(GateId(42)));
        assert_eq!(gate_id_from_cell_name("$abc$x"), None);
        assert_eq!(GateId(7).to_string(), "g7");
    }
}
