pub mod cli;
pub mod config;
pub mod error;
pub mod lcov;
pub mod merge;
pub mod model;
pub mod report;
pub mod rewrite;

pub use config::Configuration;
pub use error::{MergeError, Result};
pub use merge::{merge_coverage_report_files, merge_files};
pub use report::FullReport;
