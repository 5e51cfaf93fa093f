// SPDX-License-Identifier: Apache-2.0

use crate::layout_config::get_layout_config;
use crate::report_cli_error::{report_chesspiler_error_and_exit, report_cli_error_and_exit};
use chesspiler::board::{Board, Bounds};
use chesspiler::placement::GateInstance;
use chesspiler::ChessCircuit;
use clap::ArgMatches;
use std::io::Write;
use std::path::Path;

const SHOWN_BOARD_SIZE: i64 = 20;

fn format_board_window(board: &Board) -> String {
    let b = board.bounds();
    let window = Bounds::new(
        b.min_x,
        b.min_y,
        b.max_x.min(b.min_x + SHOWN_BOARD_SIZE - 1),
        b.max_y.min(b.min_y + SHOWN_BOARD_SIZE - 1),
    );
    let mut out = String::new();
    out.push_str(&format!("Board window {}:\n", window));
    for (y, row) in (window.min_y..=window.max_y)
        .rev()
        .zip(board.render_rows(window))
    {
        out.push_str(&format!("{:>4}: {}\n", y, row));
    }
    out
}

fn format_gate(gate: &GateInstance) -> String {
    let inputs: Vec<String> = gate
        .inputs
        .iter()
        .map(|(x, y)| format!("({}, {})", x, y))
        .collect();
    format!(
        "{} {} layer {} at ({}, {}) inputs [{}] output ({}, {})\n",
        gate.id,
        gate.kind.as_str(),
        gate.layer,
        gate.anchor.0,
        gate.anchor.1,
        inputs.join(", "),
        gate.output.0,
        gate.output.1
    )
}

pub fn handle_compile(matches: &ArgMatches) {
    let netlist_path = matches
        .get_one::<String>("netlist")
        .expect("netlist path is required");
    let module_name = matches
        .get_one::<String>("module")
        .map(|s| s.as_str())
        .unwrap_or("fn");
    let output_path = matches
        .get_one::<String>("output")
        .cloned()
        .unwrap_or_else(|| format!("{}_nand_chess.txt", module_name));
    let show_board = matches.get_flag("show_board");
    let config = get_layout_config(matches, "compile");

    let circuit = match ChessCircuit::from_path(Path::new(netlist_path), module_name, config) {
        Ok(c) => c,
        Err(e) => report_chesspiler_error_and_exit(
            "failed to compile netlist",
            "compile",
            &e,
            vec![
                ("netlist", netlist_path.clone()),
                ("module", module_name.to_string()),
            ],
        ),
    };

    let mut out = String::new();
    out.push_str(&format!("{}\n\n", circuit.summary()));
    out.push_str(&format!("Gates placed: {}\n", circuit.gates().len()));
    for gate in circuit.gates() {
        out.push_str(&format_gate(gate));
    }
    if show_board {
        out.push('\n');
        out.push_str(&format_board_window(circuit.board()));
    }
    if let Err(e) = std::io::stdout().write_all(out.as_bytes()) {
        report_cli_error_and_exit(
            "failed to write output",
            Some("compile"),
            vec![("error", &e.to_string())],
        );
    }

    if let Err(e) = circuit.write_board(Path::new(&output_path)) {
        report_chesspiler_error_and_exit(
            "failed to write board",
            "compile",
            &e,
            vec![("output", output_path.clone())],
        );
    }
    println!(
        "Wrote {} piece(s) to {}",
        circuit.board().piece_count(),
        output_path
    );
}
