//! The merged report: one [`CoverageFile`] per distinct source filename.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::model::CoverageFile;

/// Collection of coverage files keyed by filename.
#[derive(Debug, Clone, Default)]
pub struct FullReport {
    files: Vec<CoverageFile>,
    index: HashMap<String, usize>,
}

impl FullReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_coverage_file(&self, filename: &str) -> Option<&CoverageFile> {
        self.index.get(filename).map(|&i| &self.files[i])
    }

    /// Return the coverage file for `filename`, creating an empty one the
    /// first time the name is seen.
    pub fn add_coverage_file(&mut self, filename: &str) -> &mut CoverageFile {
        let i = match self.index.get(filename) {
            Some(&i) => i,
            None => {
                self.files.push(CoverageFile::new(filename.to_string()));
                self.index.insert(filename.to_string(), self.files.len() - 1);
                self.files.len() - 1
            }
        };
        &mut self.files[i]
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Coverage files in first-seen order.
    pub fn files(&self) -> &[CoverageFile] {
        &self.files
    }

    /// Coverage files in output order (see [`compare_filenames`]).
    pub fn sorted_files(&self) -> Vec<&CoverageFile> {
        let mut files: Vec<&CoverageFile> = self.files.iter().collect();
        files.sort_by(|a, b| compare_filenames(&a.filename, &b.filename));
        files
    }

    /// The whole report in LCOV format.
    pub fn to_lcov(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FullReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in self.sorted_files() {
            write!(f, "{file}")?;
        }
        Ok(())
    }
}

/// ASCII whitespace, punctuation and symbols in the order ICU's root
/// collation sorts them. All of them sort before digits, and digits before
/// letters.
const PUNCTUATION_ORDER: &str = " _-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Primary collation weight of a single (already lowercased) character.
fn primary_weight(c: char) -> u32 {
    if let Some(i) = PUNCTUATION_ORDER.find(c) {
        return i as u32;
    }
    match c {
        '0'..='9' => 0x100 + (c as u32 - '0' as u32),
        'a'..='z' => 0x200 + (c as u32 - 'a' as u32),
        _ => 0x1000 + c as u32,
    }
}

/// Locale-style ordering for filenames, approximating `localeCompare`:
/// punctuation before digits before letters with case ignored, then
/// lowercase before uppercase, then raw bytes so the order is total.
/// Non-ASCII characters sort after ASCII letters by code point.
pub fn compare_filenames(a: &str, b: &str) -> Ordering {
    let weights = |s: &str| {
        s.chars()
            .flat_map(char::to_lowercase)
            .map(primary_weight)
            .collect::<Vec<_>>()
    };
    weights(a)
        .cmp(&weights(b))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}
