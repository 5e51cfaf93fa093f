// SPDX-License-Identifier: Apache-2.0

pub mod depth;
pub mod io;
pub mod layers;
pub mod model;
pub mod stats;
