//! Command implementations.

mod info;
mod validate;
mod write;

pub use info::run_info;
pub use validate::run_validate;
pub use write::run_write;

use config_loader::ConfigLoader;
use contracts::{DispatcherConfig, SheetNamePolicy};
use tracing::debug;

use crate::cli::TargetArgs;
use crate::error::{CliError, Result};

/// Build the dispatcher config from `--config` plus flag overrides.
pub(crate) fn resolve_config(target: &TargetArgs) -> Result<DispatcherConfig> {
    let mut config = match (&target.config, &target.base_path) {
        (Some(path), _) => {
            if !path.exists() {
                return Err(CliError::config_not_found(path.display().to_string()));
            }
            ConfigLoader::load_from_path(path)?
        }
        (None, Some(base_path)) => DispatcherConfig::new(base_path),
        (None, None) => return Err(CliError::MissingBasePath),
    };

    if let Some(base_path) = &target.base_path {
        config.base_path = base_path.clone();
    }
    if let Some(extension) = &target.extension {
        config.extension = extension.clone();
    }
    if target.strict_names {
        config.sheet_names = SheetNamePolicy::Strict;
    }

    ConfigLoader::validate(&config)?;
    debug!(?config, "Resolved dispatcher config");
    Ok(config)
}
