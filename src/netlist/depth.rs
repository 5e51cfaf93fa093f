// SPDX-License-Identifier: Apache-2.0

//! Longest-path depth of every cell from the primary inputs.
//!
//! A cell whose inputs are all primary inputs (undriven nets, input ports or
//! constants) has depth 0; any other cell sits one level above its deepest
//! driving cell.
//!
//! The walk is an iterative depth-first search with three marks
//! (unvisited / on stack / done), so large circuits cannot exhaust the call
//! stack and a feedback loop is reported as [`ChesspilerError::CyclicNetlist`]
//! instead of looping forever.

use crate::chesspiler_error::{ChesspilerError, Result};
use crate::netlist::model::{CellIndex, NetlistModel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthMap {
    depths: Vec<u32>,
}

impl DepthMap {
    pub fn depth(&self, cell: CellIndex) -> u32 {
        self.depths[cell.0]
    }

    /// Deepest level in the netlist, or `None` when there are no cells.
    pub fn max_depth(&self) -> Option<u32> {
        self.depths.iter().copied().max()
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// `(cell, depth)` pairs in cell declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, u32)> + '_ {
        self.depths
            .iter()
            .enumerate()
            .map(|(i, d)| (CellIndex(i), *d))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    cell: CellIndex,
    next_pred: usize,
}

/// Distinct driving cells of `cell`'s inputs, in pin order.
fn driving_cells(model: &NetlistModel, cell: CellIndex) -> Vec<CellIndex> {
    let mut out: Vec<CellIndex> = Vec::new();
    for (_role, net) in model.cell(cell).input_nets() {
        if let Some(drv) = model.driver(net) {
            if !out.contains(&drv) {
                out.push(drv);
            }
        }
    }
    out
}

fn cycle_error(model: &NetlistModel, stack: &[Frame], reentered: CellIndex) -> ChesspilerError {
    let start = stack
        .iter()
        .position(|f| f.cell == reentered)
        .unwrap_or(0);
    // The stack runs from loads towards drivers; report driver-first.
    let cycle: Vec<String> = stack[start..]
        .iter()
        .rev()
        .map(|f| model.cell(f.cell).name.clone())
        .collect();
    ChesspilerError::CyclicNetlist { cycle }
}

/// Computes the depth of every cell in `model`.
///
/// Each cell is finalized exactly once, so the work is linear in cells plus
/// connections.
pub fn compute_depths(model: &NetlistModel) -> Result<DepthMap> {
    let num_cells = model.cells().len();
    let preds: Vec<Vec<CellIndex>> = model
        .cell_indices()
        .map(|c| driving_cells(model, c))
        .collect();
    let mut marks = vec![Mark::Unvisited; num_cells];
    let mut depths = vec![0u32; num_cells];
    let mut stack: Vec<Frame> = Vec::new();

    for root in model.cell_indices() {
        if marks[root.0] != Mark::Unvisited {
            continue;
        }
        marks[root.0] = Mark::OnStack;
        stack.push(Frame {
            cell: root,
            next_pred: 0,
        });

        while let Some(top) = stack.last().copied() {
            match preds[top.cell.0].get(top.next_pred).copied() {
                Some(pred) => {
                    let top_index = stack.len() - 1;
                    stack[top_index].next_pred += 1;
                    match marks[pred.0] {
                        Mark::Done => {}
                        Mark::OnStack => return Err(cycle_error(model, &stack, pred)),
                        Mark::Unvisited => {
                            marks[pred.0] = Mark::OnStack;
                            stack.push(Frame {
                                cell: pred,
                                next_pred: 0,
                            });
                        }
                    }
                }
                None => {
                    depths[top.cell.0] = preds[top.cell.0]
                        .iter()
                        .map(|p| depths[p.0] + 1)
                        .max()
                        .unwrap_or(0);
                    marks[top.cell.0] = Mark::Done;
                    stack.pop();
                }
            }
        }
    }

    let map = DepthMap { depths };
    log::debug!(
        "computed depths for {} cell(s); max depth {:?}",
        map.len(),
        map.max_depth()
    );
    Ok(map)
}
