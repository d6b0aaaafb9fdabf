#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Root of the package; tests that rewrite source paths use it as the
/// working directory so results don't depend on where cargo runs them.
pub fn manifest_dir() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

/// Path of a checked-in fixture, relative to the package root.
pub fn fixture(rel: &str) -> PathBuf {
    Path::new("tests/fixtures").join(rel)
}

/// Absolute path of a checked-in fixture.
pub fn fixture_abs(rel: &str) -> PathBuf {
    manifest_dir().join(fixture(rel))
}

/// Write each `(name, contents)` pair into a fresh temporary directory.
/// The caller must hold onto `TempDir` to keep the files alive.
pub fn write_inputs(inputs: &[(&str, &str)]) -> (TempDir, Vec<PathBuf>) {
    let dir = tempfile::tempdir().unwrap();
    let paths = inputs
        .iter()
        .map(|(name, contents)| {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(&path, contents).unwrap();
            path
        })
        .collect();
    (dir, paths)
}
