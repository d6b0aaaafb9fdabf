use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::Configuration;
use crate::error::{MergeError, Result};
use crate::lcov::{self, MergeContext};
use crate::report::FullReport;

/// Read each LCOV file in order and fold it into one report.
///
/// Paths that do not exist when they are read are skipped. Any other I/O
/// error, and any malformed record, aborts the whole merge.
pub fn merge_files<P: AsRef<Path>>(paths: &[P], config: &Configuration) -> Result<FullReport> {
    let cwd = std::env::current_dir()?;
    merge_files_in(paths, config, &cwd)
}

/// Like [`merge_files`], with an explicit directory for rewritten `SF`
/// paths to be relative to.
pub fn merge_files_in<P: AsRef<Path>>(
    paths: &[P],
    config: &Configuration,
    cwd: &Path,
) -> Result<FullReport> {
    let mut report = FullReport::new();
    let mut merged = 0usize;

    for path in paths {
        let path = path.as_ref();
        let Some(content) = read_input(path)? else {
            warn!(path = %path.display(), "skipping missing coverage file");
            continue;
        };

        let source_dir = source_dir_of(path);
        let ctx = MergeContext {
            source_dir: &source_dir,
            config,
            cwd,
        };
        lcov::merge_into(&mut report, &content, &ctx).map_err(|e| e.in_file(path))?;
        merged += 1;
        debug!(path = %path.display(), files = report.len(), "merged coverage file");
    }

    info!(
        inputs = merged,
        skipped = paths.len() - merged,
        files = report.len(),
        "merge complete"
    );
    Ok(report)
}

/// Merge the given files and return the combined report in LCOV format.
pub fn merge_coverage_report_files<P: AsRef<Path>>(
    paths: &[P],
    config: &Configuration,
) -> Result<String> {
    Ok(merge_files(paths, config)?.to_lcov())
}

fn read_input(path: &Path) -> Result<Option<String>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(MergeError::from(e).in_file(path)),
    };
    String::from_utf8(bytes).map(Some).map_err(|e| {
        MergeError::Io(std::io::Error::new(ErrorKind::InvalidData, e)).in_file(path)
    })
}

fn source_dir_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
