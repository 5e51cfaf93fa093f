// SPDX-License-Identifier: Apache-2.0

use crate::report_cli_error::{report_chesspiler_error_and_exit, report_cli_error_and_exit};
use chesspiler::netlist::depth::compute_depths;
use chesspiler::netlist::io::load_netlist_from_path;
use chesspiler::netlist::layers::{build_layers, Layer, LayerNode, LayeredNetlist};
use chesspiler::netlist::stats::summarize;
use clap::ArgMatches;
use std::io::Write;
use std::path::Path;

fn format_node(node: &LayerNode) -> String {
    let inputs: Vec<String> = node
        .inputs
        .iter()
        .map(|i| match i {
            Some(id) => id.to_string(),
            None => "-".to_string(),
        })
        .collect();
    let outputs: Vec<String> = node.outputs.iter().map(|o| o.to_string()).collect();
    format!(
        "  {}: inputs [{}] outputs [{}]\n",
        node.id,
        inputs.join(", "),
        outputs.join(", ")
    )
}

fn layer_title(index: usize, layer: &Layer, last: usize) -> String {
    match layer.depth {
        Some(depth) => format!("Layer {} (depth {}):\n", index, depth),
        None if index == 0 => format!("Layer {} (inputs):\n", index),
        None if index == last => format!("Layer {} (outputs):\n", index),
        None => format!("Layer {}:\n", index),
    }
}

fn format_layers(layered: &LayeredNetlist) -> String {
    let last = layered.layers.len() - 1;
    let mut out = String::new();
    for (index, layer) in layered.layers.iter().enumerate() {
        out.push_str(&layer_title(index, layer, last));
        for node in &layer.nodes {
            out.push_str(&format_node(node));
        }
    }
    out
}

pub fn handle_layers(matches: &ArgMatches) {
    let netlist_path = matches
        .get_one::<String>("netlist")
        .expect("netlist path is required");
    let module_name = matches
        .get_one::<String>("module")
        .map(|s| s.as_str())
        .unwrap_or("fn");
    let details = || {
        vec![
            ("netlist", netlist_path.clone()),
            ("module", module_name.to_string()),
        ]
    };

    let model = match load_netlist_from_path(Path::new(netlist_path), module_name) {
        Ok(m) => m,
        Err(e) => {
            report_chesspiler_error_and_exit("failed to load netlist", "layers", &e, details())
        }
    };
    let depths = match compute_depths(&model) {
        Ok(d) => d,
        Err(e) => {
            report_chesspiler_error_and_exit("failed to compute depths", "layers", &e, details())
        }
    };
    let layered = build_layers(&model, &depths);

    let mut out = format_layers(&layered);
    out.push_str(&format!("\n{}\n", summarize(&model, &depths)));
    if let Err(e) = std::io::stdout().write_all(out.as_bytes()) {
        report_cli_error_and_exit(
            "failed to write output",
            Some("layers"),
            vec![("error", &e.to_string())],
        );
    }
}
