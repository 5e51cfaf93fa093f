// SPDX-License-Identifier: Apache-2.0

//! Compiles gate-level Yosys JSON netlists into chess positions.
//!
//! The pipeline is: [`netlist::model::NetlistModel`] (load) ->
//! [`netlist::depth::compute_depths`] -> [`netlist::layers::build_layers`] ->
//! [`placement::PlacementEngine`] -> [`board::codec::encode`].
//! [`circuit::ChessCircuit`] runs all of it in one call.

pub mod board;
pub mod chesspiler_error;
pub mod circuit;
pub mod netlist;
pub mod placement;

pub use chesspiler_error::{ChesspilerError, Result};
pub use circuit::ChessCircuit;
