//! Command handler functions for the lcov-merger CLI.
//!
//! `cmd_merge` returns the merged report as a `String`, making it easy to
//! test without capturing stdout.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Configuration;
use crate::merge;

/// Build the effective configuration: the optional JSON options file first,
/// then explicit flags on top.
pub fn resolve_config(
    config_file: Option<&Path>,
    prepend_source_files: bool,
    prepend_path_fix: Option<&str>,
) -> Result<Configuration> {
    let mut config = match config_file {
        Some(path) => Configuration::load(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => Configuration::default(),
    };
    if prepend_source_files {
        config = config.with_prepend_source_files(true);
    }
    if let Some(fix) = prepend_path_fix {
        config = config.with_prepend_path_fix(fix);
    }
    Ok(config)
}

pub fn cmd_merge(files: &[PathBuf], config: &Configuration) -> Result<String> {
    merge::merge_coverage_report_files(files, config).context("Failed to merge coverage files")
}

/// Write the merged report to `out_file`, replacing its contents, or to
/// stdout when no file is given.
pub fn write_output(out_file: Option<&Path>, contents: &str) -> Result<()> {
    match out_file {
        Some(path) => std::fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(contents.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")
        }
    }
}
