// SPDX-License-Identifier: Apache-2.0

use chesspiler::ChesspilerError;
use colored::Colorize;

pub fn report_cli_error_and_exit(
    message: &str,
    subcommand: Option<&str>,
    details: Vec<(&str, &str)>,
) -> ! {
    let subcommand_str = subcommand
        .map(|s| format!("{}: ", s))
        .unwrap_or_default();
    eprintln!(
        "chesspiler-driver: {}{}",
        subcommand_str,
        message.red().bold()
    );
    for (key, value) in details {
        eprintln!("  {}: {}", key, value);
    }
    std::process::exit(1);
}

/// Reports a library error, adding the structured fields of the error kinds
/// that carry them to `details`.
pub fn report_chesspiler_error_and_exit(
    context: &str,
    subcommand: &str,
    error: &ChesspilerError,
    mut details: Vec<(&str, String)>,
) -> ! {
    match error {
        ChesspilerError::CyclicNetlist { cycle } => {
            details.push(("cycle", cycle.join(" -> ")));
        }
        ChesspilerError::PlacementOverflow { gate, x, y, bounds } => {
            details.push(("gate", gate.clone()));
            details.push(("square", format!("({}, {})", x, y)));
            details.push(("board", bounds.to_string()));
            details.push((
                "hint",
                "enlarge the board with --board_width/--board_height or a layout config"
                    .to_string(),
            ));
        }
        ChesspilerError::BoardTooLarge { .. } => {
            details.push((
                "hint",
                "pin a smaller window with --min_x/--max_x/--min_y/--max_y".to_string(),
            ));
        }
        _ => {}
    }
    let message = format!("{}: {}", context, error);
    let borrowed: Vec<(&str, &str)> = details.iter().map(|(k, v)| (*k, v.as_str())).collect();
    report_cli_error_and_exit(&message, Some(subcommand), borrowed)
}
