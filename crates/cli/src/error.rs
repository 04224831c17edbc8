//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Neither a config file nor a base path was given
    #[error("No base path: pass --base-path or --config")]
    MissingBasePath,

    /// Loaded or assembled configuration is unusable
    #[error("Invalid configuration: {0}")]
    Config(#[from] contracts::ContractError),

    /// Input file not found
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn input_not_found(path: impl Into<String>) -> Self {
        Self::InputNotFound { path: path.into() }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
