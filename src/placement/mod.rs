// SPDX-License-Identifier: Apache-2.0

pub mod config;
pub mod engine;
pub mod template;

pub use config::LayoutConfig;
pub use engine::{GateInstance, PlacementEngine};
pub use template::{GateKind, GateTemplate};
