//! Layered error definitions
//!
//! Categorized by source: config / open / close

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Dispatch Errors =====
    /// Target file could not be created or opened.
    ///
    /// Covers directory creation, permissions, invalid names and disk space
    /// alike; the cause is only distinguishable through `source`.
    #[error("cannot open stream for sheet '{sheet}' at {}: {source}", path.display())]
    CannotOpen {
        sheet: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Sheet name rejected by a strict naming policy
    #[error("invalid sheet name '{sheet}': {reason}")]
    InvalidSheetName { sheet: String, reason: String },

    /// Stream could not be flushed while closing
    #[error("failed to close stream for sheet '{sheet}': {source}")]
    Close {
        sheet: String,
        #[source]
        source: std::io::Error,
    },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create open error
    pub fn cannot_open(
        sheet: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::CannotOpen {
            sheet: sheet.into(),
            path: path.into(),
            source,
        }
    }

    /// Create sheet name error
    pub fn invalid_sheet_name(sheet: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSheetName {
            sheet: sheet.into(),
            reason: reason.into(),
        }
    }

    /// Create close error
    pub fn close(sheet: impl Into<String>, source: std::io::Error) -> Self {
        Self::Close {
            sheet: sheet.into(),
            source,
        }
    }
}
