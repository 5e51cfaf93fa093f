// SPDX-License-Identifier: Apache-2.0

//! The driver is released in lockstep with the library: its own version and
//! the version it requires of `chesspiler` must both match the library's.

use std::path::Path;

fn read_manifest(path: &Path) -> toml::Value {
    let text = std::fs::read_to_string(path).unwrap();
    toml::from_str(&text).unwrap()
}

#[test]
fn driver_version_matches_library() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let library = read_manifest(&root.join("Cargo.toml"));
    let driver = read_manifest(&root.join("chesspiler-driver").join("Cargo.toml"));

    let library_version = library["package"]["version"].as_str().unwrap();
    assert_eq!(library_version, env!("CARGO_PKG_VERSION"));
    assert_eq!(driver["package"]["version"].as_str(), Some(library_version));
    assert_eq!(
        driver["dependencies"]["chesspiler"]["version"].as_str(),
        Some(library_version)
    );
}
