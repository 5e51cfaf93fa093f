// SPDX-License-Identifier: Apache-2.0

use pretty_assertions::assert_eq;
use std::process::Command;
use test_case::test_case;

const NAND_NETLIST: &str = r#"{"creator": "Yosys", "modules": {"fn": {
    "ports": {
        "a": {"direction": "input", "bits": [2, 3]},
        "y": {"direction": "output", "bits": [5]}
    },
    "cells": {
        "$abc$10$auto$1": {"type": "$_NAND_", "connections": {"A": [2], "B": [3], "Y": [4]}},
        "$abc$10$auto$2": {"type": "$_NAND_", "connections": {"A": [4], "B": [4], "Y": [5]}}
    }
}}}"#;

const CYCLIC_NETLIST: &str = r#"{"modules": {"fn": {
    "ports": {"y": {"direction": "output", "bits": [5]}},
    "cells": {
        "$n$1": {"connections": {"A": [5], "B": [5], "Y": [4]}},
        "$n$2": {"connections": {"A": [4], "B": [4], "Y": [5]}}
    }
}}}"#;

fn driver() -> Command {
    Command::new(env!("CARGO_BIN_EXE_chesspiler-driver"))
}

#[test]
fn compile_writes_encoded_board() {
    let temp_dir = tempfile::tempdir().unwrap();
    let netlist_path = temp_dir.path().join("fn_nand.json");
    std::fs::write(&netlist_path, NAND_NETLIST).unwrap();
    let output_path = temp_dir.path().join("fn_nand_chess.txt");

    let output = driver()
        .arg("compile")
        .arg("--netlist")
        .arg(&netlist_path)
        .arg("--output")
        .arg(&output_path)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("total_gates: 2"), "stdout: {}", stdout);
    assert!(stdout.contains("g1 NAND layer 1 at (35, 62)"), "stdout: {}", stdout);
    assert!(stdout.contains("g2 NAND layer 2 at (70, 62)"), "stdout: {}", stdout);

    let position = std::fs::read_to_string(&output_path).unwrap();
    assert!(position.starts_with("v0;"));
    // The two NAND footprints hold 2 * (18 * 15 - 18) pieces.
    assert_eq!(position.matches(';').count(), 1 + 2 * 252);
}

#[test]
fn compile_default_output_is_named_after_module() {
    let temp_dir = tempfile::tempdir().unwrap();
    let netlist_path = temp_dir.path().join("fn_nand.json");
    std::fs::write(&netlist_path, NAND_NETLIST).unwrap();

    let output = driver()
        .current_dir(temp_dir.path())
        .arg("compile")
        .arg("--netlist")
        .arg(&netlist_path)
        .arg("--show_board")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(temp_dir.path().join("fn_nand_chess.txt").exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Board window x 0..=19 y 0..=19"), "stdout: {}", stdout);
}

#[test]
fn compile_overflow_reports_error_and_writes_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let netlist_path = temp_dir.path().join("fn_nand.json");
    std::fs::write(&netlist_path, NAND_NETLIST).unwrap();
    let output_path = temp_dir.path().join("out.txt");

    let output = driver()
        .arg("compile")
        .arg("--netlist")
        .arg(&netlist_path)
        .arg("--output")
        .arg(&output_path)
        .arg("--board_width")
        .arg("60")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("outside board"), "stderr: {}", stderr);
    assert!(stderr.contains("gate: g2"), "stderr: {}", stderr);
    assert!(!output_path.exists());
}

#[test]
fn compile_zero_width_board_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let netlist_path = temp_dir.path().join("fn_nand.json");
    std::fs::write(&netlist_path, NAND_NETLIST).unwrap();
    let config_path = temp_dir.path().join("layout.toml");
    std::fs::write(&config_path, "[layout]\nboard_width = 0\n").unwrap();
    let output_path = temp_dir.path().join("out.txt");

    let output = driver()
        .arg("compile")
        .arg("--netlist")
        .arg(&netlist_path)
        .arg("--output")
        .arg(&output_path)
        .arg("--layout_config")
        .arg(&config_path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("board_width must be at least 1"), "stderr: {}", stderr);
    assert!(!stderr.contains("panicked"), "stderr: {}", stderr);
    assert!(!output_path.exists());
}

#[test]
fn compile_uses_layout_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let netlist_path = temp_dir.path().join("fn_nand.json");
    std::fs::write(&netlist_path, NAND_NETLIST).unwrap();
    let config_path = temp_dir.path().join("layout.toml");
    std::fs::write(&config_path, "[layout]\nboard_height = 100\nlayer_spacing = 20\n").unwrap();

    let output = driver()
        .current_dir(temp_dir.path())
        .arg("compile")
        .arg("--netlist")
        .arg(&netlist_path)
        .arg("--layout_config")
        .arg(&config_path)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("g2 NAND layer 2 at (40, 98)"), "stdout: {}", stdout);
}

#[test]
fn cyclic_netlist_is_reported() {
    let temp_dir = tempfile::tempdir().unwrap();
    let netlist_path = temp_dir.path().join("cycle.json");
    std::fs::write(&netlist_path, CYCLIC_NETLIST).unwrap();

    let output = driver()
        .arg("layers")
        .arg("--netlist")
        .arg(&netlist_path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cycle"), "stderr: {}", stderr);
    assert!(stderr.contains("$n$1"), "stderr: {}", stderr);
}

#[test]
fn layers_prints_every_layer() {
    let temp_dir = tempfile::tempdir().unwrap();
    let netlist_path = temp_dir.path().join("fn_nand.json");
    std::fs::write(&netlist_path, NAND_NETLIST).unwrap();

    let output = driver()
        .arg("layers")
        .arg("--netlist")
        .arg(&netlist_path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for expected in [
        "Layer 0 (inputs):",
        "Layer 1 (depth 0):",
        "Layer 2 (depth 1):",
        "Layer 3 (outputs):",
        "g2: inputs [g1, g1] outputs [o:y[0]]",
        "max_depth: 1",
    ] {
        assert!(stdout.contains(expected), "missing {:?} in: {}", expected, stdout);
    }
}

#[test_case(&["--board_string", "v0;0,3,5;2,4,5;"], "PN\n"; "string window from pieces")]
#[test_case(
    &["--board_string", "v0;0,3,5;", "--min_x", "2", "--max_x", "4"],
    ".P.\n";
    "pinned columns"
)]
#[test_case(
    &["--board_string", "v0;0,0,0;1,1,1;", "--min_y", "-1"],
    ".p\nP.\n..\n";
    "negative bound"
)]
fn decode_renders_window(args: &[&str], expected: &str) {
    let output = driver().arg("decode").args(args).output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected);
}

#[test]
fn decode_reads_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("board.txt");
    std::fs::write(&path, "v0;11,0,0;99,5,5;\n").unwrap();
    let output = driver()
        .arg("decode")
        .arg("--input")
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "k\n");
}

#[test]
fn decode_rejects_missing_version_tag() {
    let output = driver()
        .arg("decode")
        .arg("--board_string")
        .arg("0,3,5;")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test_case("v0;0,-9000000000000000000,0;0,9000000000000000000,0;"; "span overflows i64")]
#[test_case("v0;0,0,0;0,1000000,1000000;"; "area too large")]
fn decode_far_apart_pieces_reports_error(position: &str) {
    let output = driver()
        .arg("decode")
        .arg("--board_string")
        .arg(position)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exceeds the limit"), "stderr: {}", stderr);
    assert!(!stderr.contains("panicked"), "stderr: {}", stderr);
}

#[test]
fn decode_far_apart_pieces_with_pinned_window_renders() {
    let output = driver()
        .arg("decode")
        .arg("--board_string")
        .arg("v0;0,0,0;0,1000000,1000000;")
        .arg("--max_x")
        .arg("1")
        .arg("--max_y")
        .arg("0")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "P.\n");
}
