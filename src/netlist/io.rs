// SPDX-License-Identifier: Apache-2.0

//! Reading Yosys JSON netlists from disk.
//!
//! Plain `.json` files and gzip-compressed `.json.gz` files are both
//! accepted; the compression is picked from the file extension.

use crate::chesspiler_error::{ChesspilerError, Result};
use crate::netlist::model::NetlistModel;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads the whole netlist file at `path` into a string, gunzipping when the
/// extension is `gz`.
pub fn read_netlist_text(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| {
        ChesspilerError::Io(std::io::Error::new(
            e.kind(),
            format!("opening netlist '{}': {}", path.display(), e),
        ))
    })?;
    let is_gz = path.extension().map(|e| e == "gz").unwrap_or(false);
    let mut reader: Box<dyn Read> = if is_gz {
        Box::new(MultiGzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

/// Loads `module_name` from the netlist file at `path`.
pub fn load_netlist_from_path(path: &Path, module_name: &str) -> Result<NetlistModel> {
    let text = read_netlist_text(path)?;
    log::debug!("read {} byte(s) from '{}'", text.len(), path.display());
    NetlistModel::from_json_str(&text, module_name)
}
