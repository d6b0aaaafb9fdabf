/// Line parser for the LCOV `.info` format, merging records straight into a
/// [`FullReport`].
///
/// Reference: https://ltp.sourceforge.net/coverage/lcov/geninfo.1.php
///
/// Records we keep:
///   SF:<path to source file>              (the path may contain ':')
///   DA:<line number>,<execution count>[,<checksum>]
///   BRDA:<line>,<block>,<branch>,<taken>  ("-" means the block never ran)
///   end_of_record
///
/// Everything else (TN, FN, FNDA, FNF, FNH, BRF, BRH, LF, LH, ...) is
/// dropped. Summary lines would be wrong after a merge anyway.
use std::path::Path;

use tracing::debug;

use crate::config::Configuration;
use crate::error::{MergeError, Result};
use crate::model::{BranchRecord, CoverageFile, HitRecord};
use crate::report::FullReport;
use crate::rewrite::rewrite_source_path;

/// Per-input settings for [`merge_into`].
#[derive(Debug, Clone, Copy)]
pub struct MergeContext<'a> {
    /// Directory containing the LCOV file being parsed.
    pub source_dir: &'a Path,
    pub config: &'a Configuration,
    /// Directory rewritten `SF` paths are made relative to.
    pub cwd: &'a Path,
}

impl MergeContext<'_> {
    fn source_file_name(&self, raw: &str) -> String {
        if !self.config.prepend_source_files {
            return raw.to_string();
        }
        let rewritten =
            rewrite_source_path(self.source_dir, &self.config.prepend_path_fix, raw, self.cwd);
        debug!(from = raw, to = %rewritten, "rewrote source file path");
        rewritten
    }
}

/// Parse one LCOV document and merge its records into `report`.
///
/// Fails on the first malformed `DA`/`BRDA` line, or on a `DA`/`BRDA` line
/// outside of an `SF` section. Errors carry the 1-based line number.
pub fn merge_into(report: &mut FullReport, input: &str, ctx: &MergeContext<'_>) -> Result<()> {
    let mut current: Option<&mut CoverageFile> = None;

    for (idx, raw_line) in input.split('\n').enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let line_no = idx + 1;

        if line.is_empty() || line == "end_of_record" {
            current = None;
            continue;
        }

        // Split on the first ':' only; SF paths keep any further colons.
        let (tag, value) = match line.split_once(':') {
            Some(pair) => pair,
            None => continue,
        };

        match tag {
            "SF" => {
                let filename = ctx.source_file_name(value);
                current = Some(report.add_coverage_file(&filename));
            }
            "DA" => {
                let file = active_file(&mut current, "DA", line_no)?;
                let record: HitRecord =
                    value.parse().map_err(|e: MergeError| e.at_line(line_no))?;
                file.merge_hit_record(record).map_err(|e| e.at_line(line_no))?;
            }
            "BRDA" => {
                let file = active_file(&mut current, "BRDA", line_no)?;
                let record: BranchRecord =
                    value.parse().map_err(|e: MergeError| e.at_line(line_no))?;
                file.merge_branch_record(record).map_err(|e| e.at_line(line_no))?;
            }
            _ => {}
        }
    }

    Ok(())
}

fn active_file<'a>(
    current: &'a mut Option<&mut CoverageFile>,
    record: &'static str,
    line_no: usize,
) -> Result<&'a mut CoverageFile> {
    current
        .as_deref_mut()
        .ok_or_else(|| MergeError::MissingActiveFile { record }.at_line(line_no))
}

/// Parse a standalone LCOV document into a fresh report without any path
/// rewriting.
pub fn parse(input: &str) -> Result<FullReport> {
    let config = Configuration::default();
    let ctx = MergeContext {
        source_dir: Path::new("."),
        config: &config,
        cwd: Path::new("."),
    };
    let mut report = FullReport::new();
    merge_into(&mut report, input, &ctx)?;
    Ok(report)
}
