use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{record} record found outside of an SF section")]
    MissingActiveFile { record: &'static str },

    #[error("hit count overflow on line {line_number}: {existing} + {added}")]
    Overflow {
        line_number: u32,
        existing: u64,
        added: u64,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<MergeError>,
    },

    #[error("{}: {source}", .path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<MergeError>,
    },
}

impl MergeError {
    /// Attach the 1-based line number the error was raised on.
    pub fn at_line(self, line: usize) -> Self {
        MergeError::AtLine {
            line,
            source: Box::new(self),
        }
    }

    /// Attach the input file the error was raised in.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        MergeError::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, MergeError>;
