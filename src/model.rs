//! In-memory representation of the LCOV records we merge. Only line (`DA`)
//! and branch (`BRDA`) data survive a merge; every other record type is
//! dropped by the parser before it reaches these types.

use std::fmt;
use std::str::FromStr;

use crate::error::{MergeError, Result};

fn parse_number<T: FromStr>(field: &str, what: &str, raw: &str) -> Result<T> {
    field
        .parse::<T>()
        .map_err(|_| MergeError::Parse(format!("invalid {what} '{field}' in '{raw}'")))
}

/// Execution count of a single source line (`DA:<line>,<hits>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRecord {
    pub line_number: u32,
    pub hits: u64,
}

impl HitRecord {
    pub fn new(line_number: u32, hits: u64) -> Self {
        Self { line_number, hits }
    }

    /// Fails instead of wrapping when the sum does not fit.
    pub fn add_hits(&mut self, hits: u64) -> Result<()> {
        self.hits = self
            .hits
            .checked_add(hits)
            .ok_or(MergeError::Overflow {
                line_number: self.line_number,
                existing: self.hits,
                added: hits,
            })?;
        Ok(())
    }
}

impl FromStr for HitRecord {
    type Err = MergeError;

    /// Parses the value part of a `DA` line, e.g. `12,3`. A trailing
    /// checksum field is accepted and discarded.
    fn from_str(raw: &str) -> Result<Self> {
        let mut fields = raw.splitn(3, ',');
        let line = fields.next().unwrap_or_default();
        let hits = fields
            .next()
            .ok_or_else(|| MergeError::Parse(format!("missing hit count in '{raw}'")))?;
        Ok(Self::new(
            parse_number(line, "line number", raw)?,
            parse_number(hits, "hit count", raw)?,
        ))
    }
}

impl fmt::Display for HitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DA:{},{}", self.line_number, self.hits)
    }
}

/// Taken count of a branch. `NotExecuted` (`-` on the wire) means the block
/// containing the branch never ran, which is different from `Taken(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchHits {
    NotExecuted,
    Taken(u64),
}

impl BranchHits {
    /// Numeric value of the count, treating `NotExecuted` as zero.
    pub fn count(self) -> u64 {
        match self {
            BranchHits::NotExecuted => 0,
            BranchHits::Taken(n) => n,
        }
    }

    /// Combine two counts. `NotExecuted` survives only when both sides are
    /// `NotExecuted`. Returns `None` if the sum overflows.
    #[must_use]
    pub fn merge(self, other: BranchHits) -> Option<BranchHits> {
        match (self, other) {
            (BranchHits::NotExecuted, BranchHits::NotExecuted) => Some(BranchHits::NotExecuted),
            (a, b) => a.count().checked_add(b.count()).map(BranchHits::Taken),
        }
    }
}

impl FromStr for BranchHits {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "-" {
            return Ok(BranchHits::NotExecuted);
        }
        s.parse::<u64>()
            .map(BranchHits::Taken)
            .map_err(|_| MergeError::Parse(format!("invalid branch hit count '{s}'")))
    }
}

impl fmt::Display for BranchHits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchHits::NotExecuted => f.write_str("-"),
            BranchHits::Taken(n) => write!(f, "{n}"),
        }
    }
}

/// A single branch arm (`BRDA:<line>,<block>,<branch>,<taken>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRecord {
    pub line_number: u32,
    pub block_number: u32,
    pub branch_number: u32,
    pub hits: BranchHits,
}

impl BranchRecord {
    pub fn new(line_number: u32, block_number: u32, branch_number: u32, hits: BranchHits) -> Self {
        Self {
            line_number,
            block_number,
            branch_number,
            hits,
        }
    }

    pub fn add_hits(&mut self, hits: BranchHits) -> Result<()> {
        self.hits = self.hits.merge(hits).ok_or(MergeError::Overflow {
            line_number: self.line_number,
            existing: self.hits.count(),
            added: hits.count(),
        })?;
        Ok(())
    }

    fn key(&self) -> (u32, u32, u32) {
        (self.line_number, self.block_number, self.branch_number)
    }
}

impl FromStr for BranchRecord {
    type Err = MergeError;

    fn from_str(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split(',').collect();
        if parts.len() != 4 {
            return Err(MergeError::Parse(format!(
                "expected 4 fields in branch record, found {} in '{raw}'",
                parts.len()
            )));
        }
        Ok(Self::new(
            parse_number(parts[0], "line number", raw)?,
            parse_number(parts[1], "block number", raw)?,
            parse_number(parts[2], "branch number", raw)?,
            parts[3].parse()?,
        ))
    }
}

impl fmt::Display for BranchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "BRDA:{},{},{},{}",
            self.line_number, self.block_number, self.branch_number, self.hits
        )
    }
}

/// Merged coverage data for a single source file. Records keep the order in
/// which they were first seen across all merged inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageFile {
    pub filename: String,
    pub hit_records: Vec<HitRecord>,
    pub branch_records: Vec<BranchRecord>,
}

impl CoverageFile {
    pub fn new(filename: String) -> Self {
        Self {
            filename,
            ..Default::default()
        }
    }

    pub fn find_hit_record(&self, line_number: u32) -> Option<&HitRecord> {
        self.hit_records
            .iter()
            .find(|r| r.line_number == line_number)
    }

    /// Add `hits` to the record for `line_number`, creating it if needed.
    pub fn add_hit(&mut self, line_number: u32, hits: u64) -> Result<()> {
        match self
            .hit_records
            .iter_mut()
            .find(|r| r.line_number == line_number)
        {
            Some(existing) => existing.add_hits(hits)?,
            None => self.hit_records.push(HitRecord::new(line_number, hits)),
        }
        Ok(())
    }

    pub fn find_branch_record(
        &self,
        line_number: u32,
        block_number: u32,
        branch_number: u32,
    ) -> Option<&BranchRecord> {
        let key = (line_number, block_number, branch_number);
        self.branch_records.iter().find(|r| r.key() == key)
    }

    /// Merge `hits` into the branch identified by (line, block, branch),
    /// creating it if needed.
    pub fn add_branch(
        &mut self,
        line_number: u32,
        block_number: u32,
        branch_number: u32,
        hits: BranchHits,
    ) -> Result<()> {
        let key = (line_number, block_number, branch_number);
        match self.branch_records.iter_mut().find(|r| r.key() == key) {
            Some(existing) => existing.add_hits(hits)?,
            None => self.branch_records.push(BranchRecord::new(
                line_number,
                block_number,
                branch_number,
                hits,
            )),
        }
        Ok(())
    }

    pub fn merge_hit_record(&mut self, record: HitRecord) -> Result<()> {
        self.add_hit(record.line_number, record.hits)
    }

    pub fn merge_branch_record(&mut self, record: BranchRecord) -> Result<()> {
        self.add_branch(
            record.line_number,
            record.block_number,
            record.branch_number,
            record.hits,
        )
    }
}

impl fmt::Display for CoverageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SF:{}", self.filename)?;
        for record in &self.hit_records {
            write!(f, "{record}")?;
        }
        for record in &self.branch_records {
            write!(f, "{record}")?;
        }
        writeln!(f, "end_of_record")
    }
}
