//! Merge options. Option input comes from JS-style tooling as often as from
//! our own flags, so both `prependSourceFiles` and `prepend-source-files`
//! spellings are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default relative path from an LCOV file's directory to the project root.
pub const DEFAULT_PATH_FIX: &str = "..";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawConfiguration", rename_all = "camelCase")]
pub struct Configuration {
    /// Rewrite `SF` paths to be relative to the working directory the merge
    /// runs in.
    pub prepend_source_files: bool,

    /// Relative path from each LCOV file's directory to the directory its
    /// `SF` paths are relative to. Only used with `prepend_source_files`.
    pub prepend_path_fix: String,
}

/// Option input as it arrives. Argument parsers such as yargs hand over
/// every spelling of a flag at once, so each spelling gets its own slot and
/// values of the wrong type are left for the next spelling to fill.
#[derive(Deserialize)]
struct RawConfiguration {
    #[serde(rename = "prependSourceFiles")]
    camel_source_files: Option<serde_json::Value>,
    #[serde(rename = "prepend-source-files")]
    kebab_source_files: Option<serde_json::Value>,
    #[serde(rename = "prepend_source_files")]
    snake_source_files: Option<serde_json::Value>,
    #[serde(rename = "prependPathFix")]
    camel_path_fix: Option<serde_json::Value>,
    #[serde(rename = "prepend-path-fix")]
    kebab_path_fix: Option<serde_json::Value>,
    #[serde(rename = "prepend_path_fix")]
    snake_path_fix: Option<serde_json::Value>,
}

impl From<RawConfiguration> for Configuration {
    fn from(raw: RawConfiguration) -> Self {
        let defaults = Configuration::default();
        let prepend_source_files = [
            &raw.camel_source_files,
            &raw.kebab_source_files,
            &raw.snake_source_files,
        ]
        .into_iter()
        .find_map(|v| v.as_ref().and_then(serde_json::Value::as_bool))
        .unwrap_or(defaults.prepend_source_files);
        let prepend_path_fix = [
            &raw.camel_path_fix,
            &raw.kebab_path_fix,
            &raw.snake_path_fix,
        ]
        .into_iter()
        .find_map(|v| v.as_ref().and_then(serde_json::Value::as_str))
        .map_or(defaults.prepend_path_fix, str::to_string);

        Self {
            prepend_source_files,
            prepend_path_fix,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            prepend_source_files: false,
            prepend_path_fix: DEFAULT_PATH_FIX.to_string(),
        }
    }
}

impl Configuration {
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Read options from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    #[must_use]
    pub fn with_prepend_source_files(mut self, enabled: bool) -> Self {
        self.prepend_source_files = enabled;
        self
    }

    #[must_use]
    pub fn with_prepend_path_fix(mut self, fix: impl Into<String>) -> Self {
        self.prepend_path_fix = fix.into();
        self
    }
}
