// SPDX-License-Identifier: Apache-2.0

//! Command line driver for the chesspiler.
//!
//! Commands are given like:
//!
//! ```text
//! chesspiler-driver <command> <command-args-and-options>
//! ```
//!
//! Commands are:
//!
//! - compile: Places a Yosys JSON netlist on a chess board and writes the
//!   position in `v0;id,x,y;` form.
//! - layers: Prints the depth layers of a netlist and its summary statistics.
//! - decode: Renders a `v0;` position as rows of piece symbols.
//!
//! Sample usage:
//!
//! ```shell
//! $ cargo run -- compile --netlist fn_nand.json --output fn_nand_chess.txt
//! $ cargo run -- layers --netlist fn_nand.json.gz --module fn
//! $ cargo run -- decode --board_string 'v0;0,3,5;' --min_x 0 --min_y 0
//! ```

mod compile;
mod decode;
mod layers;
mod layout_config;
mod report_cli_error;

use clap::{Arg, ArgAction};
use report_cli_error::report_cli_error_and_exit;

trait AppExt {
    fn add_netlist_args(self) -> Self;
    fn add_layout_args(self) -> Self;
    fn add_window_arg(self, long: &'static str, help: &'static str) -> Self;
}

impl AppExt for clap::Command {
    fn add_netlist_args(self) -> Self {
        (self as clap::Command)
            .arg(
                Arg::new("netlist")
                    .long("netlist")
                    .value_name("NETLIST_JSON")
                    .help("Yosys JSON netlist (.json or .json.gz)")
                    .required(true)
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("module")
                    .long("module")
                    .value_name("MODULE")
                    .help("Module to compile")
                    .default_value("fn")
                    .action(ArgAction::Set),
            )
    }

    fn add_layout_args(self) -> Self {
        (self as clap::Command)
            .arg(
                Arg::new("layout_config")
                    .long("layout_config")
                    .value_name("LAYOUT_TOML")
                    .help("TOML file with a [layout] table")
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("board_width")
                    .long("board_width")
                    .value_name("SQUARES")
                    .help("Board width; overrides the layout config")
                    .value_parser(clap::value_parser!(usize))
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("board_height")
                    .long("board_height")
                    .value_name("SQUARES")
                    .help("Board height; overrides the layout config")
                    .value_parser(clap::value_parser!(usize))
                    .action(ArgAction::Set),
            )
    }

    fn add_window_arg(self, long: &'static str, help: &'static str) -> Self {
        (self as clap::Command).arg(
            Arg::new(long)
                .long(long)
                .value_name("N")
                .help(help)
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(i64))
                .action(ArgAction::Set),
        )
    }
}

fn main() {
    let _ = env_logger::try_init();

    log::info!(
        "chesspiler-driver starting; version: {}",
        env!("CARGO_PKG_VERSION")
    );

    let matches = clap::Command::new("chesspiler-driver")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compiles gate-level netlists into chess positions")
        .subcommand(clap::Command::new("version").about("Prints the version of the driver"))
        .subcommand(
            clap::Command::new("compile")
                .about("Places a netlist on a board and writes the encoded position")
                .add_netlist_args()
                .add_layout_args()
                .arg(
                    Arg::new("output")
                        .long("output")
                        .value_name("OUTPUT_TXT")
                        .help("Where to write the position (default <module>_nand_chess.txt)")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("show_board")
                        .long("show_board")
                        .help("Print the lower-left corner of the board")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            clap::Command::new("layers")
                .about("Prints the depth layers and summary statistics of a netlist")
                .add_netlist_args(),
        )
        .subcommand(
            clap::Command::new("decode")
                .about("Renders an encoded position as rows of piece symbols")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .value_name("POSITION_TXT")
                        .help("File holding a v0; position")
                        .conflicts_with("board_string")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("board_string")
                        .long("board_string")
                        .value_name("POSITION")
                        .help("Position string, e.g. 'v0;0,3,5;'")
                        .action(ArgAction::Set),
                )
                .add_window_arg("min_x", "Leftmost column to render (inclusive)")
                .add_window_arg("max_x", "Rightmost column to render (inclusive)")
                .add_window_arg("min_y", "Bottom row to render (inclusive)")
                .add_window_arg("max_y", "Top row to render (inclusive)"),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("compile") {
        compile::handle_compile(matches);
    } else if let Some(matches) = matches.subcommand_matches("layers") {
        layers::handle_layers(matches);
    } else if let Some(matches) = matches.subcommand_matches("decode") {
        decode::handle_decode(matches);
    } else if let Some(_matches) = matches.subcommand_matches("version") {
        println!("{}", env!("CARGO_PKG_VERSION"));
    } else {
        report_cli_error_and_exit("No valid subcommand provided.", None, vec![]);
    }
}
