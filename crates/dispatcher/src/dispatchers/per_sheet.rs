//! PerSheetOutputDispatcher - one file per sheet under a base directory

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use contracts::{ContractError, DispatcherConfig, OutputDispatcher, SheetName, SheetStream};
use tracing::{debug, error, instrument};

use crate::metrics::{DispatchMetrics, MetricsSnapshot};

/// Dispatcher that writes each sheet to `<base_path>/<sheet>.<extension>`
#[derive(Debug)]
pub struct PerSheetOutputDispatcher {
    config: DispatcherConfig,
    metrics: DispatchMetrics,
}

impl PerSheetOutputDispatcher {
    /// Create a dispatcher rooted at `base_path` with default options.
    ///
    /// Nothing touches the filesystem until the first open.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self::from_config(DispatcherConfig::new(base_path))
    }

    /// Create from a loaded configuration
    pub fn from_config(config: DispatcherConfig) -> Self {
        Self {
            config,
            metrics: DispatchMetrics::new(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.config.base_path
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Path a sheet's file is written to; the name is joined as-is.
    pub fn path_for_sheet(&self, sheet_name: &str) -> PathBuf {
        self.config
            .base_path
            .join(self.config.file_name_for(sheet_name))
    }

    /// Get snapshot of dispatcher metrics
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn ensure_base_dir(&self) -> std::io::Result<()> {
        // create_dir_all is a no-op when the directory already exists
        fs::create_dir_all(&self.config.base_path)?;
        debug!(base_path = %self.config.base_path.display(), "Base directory ready");
        Ok(())
    }

    fn open_file(&self, sheet: &SheetName) -> Result<SheetStream<File>, ContractError> {
        sheet.check(self.config.sheet_names)?;

        self.ensure_base_dir().map_err(|e| {
            ContractError::cannot_open(sheet.as_str(), &self.config.base_path, e)
        })?;

        let path = self.path_for_sheet(sheet);
        let file =
            File::create(&path).map_err(|e| ContractError::cannot_open(sheet.as_str(), &path, e))?;

        debug!(sheet = %sheet, path = %path.display(), "Sheet file created");
        Ok(SheetStream::new(sheet.clone(), file).with_location(path))
    }
}

impl OutputDispatcher for PerSheetOutputDispatcher {
    type Stream = File;

    fn name(&self) -> &str {
        &self.config.name
    }

    #[instrument(
        name = "per_sheet_open",
        skip(self),
        fields(dispatcher = %self.config.name)
    )]
    fn open_stream_for_sheet(&self, sheet_name: &str) -> Result<SheetStream<File>, ContractError> {
        let sheet = SheetName::from(sheet_name);
        match self.open_file(&sheet) {
            Ok(stream) => {
                self.metrics.record_open(&self.config.name);
                Ok(stream)
            }
            Err(e) => {
                error!(dispatcher = %self.config.name, sheet = %sheet, error = %e, "Open failed");
                self.metrics.record_open_failure(&self.config.name);
                Err(e)
            }
        }
    }

    #[instrument(
        name = "per_sheet_close",
        skip(self, stream),
        fields(dispatcher = %self.config.name, sheet = %stream.sheet_name())
    )]
    fn close_stream_for_sheet(&self, mut stream: SheetStream<File>) -> Result<(), ContractError> {
        let flushed = stream.flush();
        let bytes_written = stream.bytes_written();
        let (sheet, file) = stream.into_parts();
        drop(file);

        match flushed {
            Ok(()) => {
                debug!(sheet = %sheet, bytes_written, "Sheet stream closed");
                self.metrics.record_close(&self.config.name, bytes_written);
                Ok(())
            }
            Err(e) => {
                error!(sheet = %sheet, error = %e, "Close failed");
                self.metrics.record_close_failure(&self.config.name);
                Err(ContractError::close(sheet.as_str(), e))
            }
        }
    }
}
