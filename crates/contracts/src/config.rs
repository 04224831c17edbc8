//! DispatcherConfig - Config Loader output
//!
//! Describes where sheet files go and how sheet names are treated.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 配置版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// How sheet names are turned into file names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetNamePolicy {
    /// Use the name as-is, path separators and `..` included
    #[default]
    Verbatim,
    /// Reject names that are not a single plain path component
    Strict,
}

/// Per-sheet dispatcher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// 配置版本
    #[serde(default)]
    pub version: ConfigVersion,

    /// Dispatcher name (logs/metrics)
    #[serde(default = "default_dispatcher_name")]
    pub name: String,

    /// Directory that receives one file per sheet
    pub base_path: PathBuf,

    /// File extension appended to each sheet name, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Sheet name handling
    #[serde(default)]
    pub sheet_names: SheetNamePolicy,
}

fn default_dispatcher_name() -> String {
    "per_sheet".to_string()
}

fn default_extension() -> String {
    "csv".to_string()
}

impl DispatcherConfig {
    /// Config with defaults for everything but the base path
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            version: ConfigVersion::default(),
            name: default_dispatcher_name(),
            base_path: base_path.into(),
            extension: default_extension(),
            sheet_names: SheetNamePolicy::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_sheet_names(mut self, policy: SheetNamePolicy) -> Self {
        self.sheet_names = policy;
        self
    }

    /// File name for a sheet, e.g. `Revenue` -> `Revenue.csv`
    pub fn file_name_for(&self, sheet_name: &str) -> String {
        format!("{}.{}", sheet_name, self.extension)
    }
}
