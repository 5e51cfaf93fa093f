// SPDX-License-Identifier: Apache-2.0

use crate::report_cli_error::{report_chesspiler_error_and_exit, report_cli_error_and_exit};
use chesspiler::board::codec::{board_from_pieces, bounding_box, decode};
use clap::ArgMatches;
use std::io::Write;

pub fn handle_decode(matches: &ArgMatches) {
    let text = match (
        matches.get_one::<String>("input"),
        matches.get_one::<String>("board_string"),
    ) {
        (_, Some(s)) => s.clone(),
        (Some(path), None) => match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => report_cli_error_and_exit(
                "failed to read board file",
                Some("decode"),
                vec![("input", path), ("error", &e.to_string())],
            ),
        },
        (None, None) => report_cli_error_and_exit(
            "must provide either --input or --board_string",
            Some("decode"),
            vec![],
        ),
    };

    let pieces = match decode(&text) {
        Ok(p) => p,
        Err(e) => report_chesspiler_error_and_exit("failed to decode board", "decode", &e, vec![]),
    };
    log::info!("decoded {} piece(s)", pieces.len());

    let side = |name: &str| matches.get_one::<i64>(name).copied();
    let window = match bounding_box(
        &pieces,
        side("min_x"),
        side("max_x"),
        side("min_y"),
        side("max_y"),
    ) {
        Some(w) => w,
        None => report_cli_error_and_exit(
            "nothing to render; the board is empty or the window is inverted",
            Some("decode"),
            vec![("pieces", &pieces.len().to_string())],
        ),
    };

    let board = match board_from_pieces(&pieces, window) {
        Ok(b) => b,
        Err(e) => report_chesspiler_error_and_exit(
            "failed to build board window",
            "decode",
            &e,
            vec![("pieces", pieces.len().to_string())],
        ),
    };
    let mut out = String::new();
    for row in board.render_rows(window) {
        out.push_str(&row);
        out.push('\n');
    }
    if let Err(e) = std::io::stdout().write_all(out.as_bytes()) {
        report_cli_error_and_exit(
            "failed to write output",
            Some("decode"),
            vec![("error", &e.to_string())],
        );
    }
}
