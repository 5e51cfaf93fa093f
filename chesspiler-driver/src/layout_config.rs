// SPDX-License-Identifier: Apache-2.0

//! Layout settings from a TOML file plus command line overrides.
//!
//! The file holds a single `[layout]` table:
//!
//! ```toml
//! [layout]
//! board_width = 1024
//! board_height = 128
//! use_not_template = true
//! ```

use crate::report_cli_error::{report_chesspiler_error_and_exit, report_cli_error_and_exit};
use chesspiler::placement::LayoutConfig;
use clap::ArgMatches;
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ChesspilerToml {
    #[serde(default)]
    layout: LayoutConfig,
}

pub fn parse_layout_config(text: &str) -> Result<LayoutConfig, String> {
    toml::from_str::<ChesspilerToml>(text)
        .map(|t| t.layout)
        .map_err(|e| e.to_string())
}

pub fn load_layout_config(path: &Path) -> Result<LayoutConfig, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    parse_layout_config(&text)
}

/// Layout for a subcommand: the `--layout_config` file if given (defaults
/// otherwise), then `--board_width` / `--board_height` on top.
pub fn get_layout_config(matches: &ArgMatches, subcommand: &str) -> LayoutConfig {
    let mut config = match matches.get_one::<String>("layout_config") {
        Some(path) => {
            if !Path::new(path).exists() {
                report_cli_error_and_exit(
                    "layout config file does not exist",
                    Some(subcommand),
                    vec![("path", path)],
                );
            }
            match load_layout_config(Path::new(path)) {
                Ok(config) => {
                    log::info!("using layout config {}", path);
                    config
                }
                Err(e) => report_cli_error_and_exit(
                    "failed to parse layout config",
                    Some(subcommand),
                    vec![("path", path), ("error", &e)],
                ),
            }
        }
        None => LayoutConfig::default(),
    };
    if let Some(width) = matches.get_one::<usize>("board_width") {
        config.board_width = *width;
    }
    if let Some(height) = matches.get_one::<usize>("board_height") {
        config.board_height = *height;
    }
    if let Err(e) = config.board_bounds() {
        report_chesspiler_error_and_exit("bad layout", subcommand, &e, vec![]);
    }
    config
}
