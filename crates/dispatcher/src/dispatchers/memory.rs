//! MemoryOutputDispatcher - captures sheets in memory instead of on disk

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;

use contracts::{ContractError, OutputDispatcher, SheetName, SheetNamePolicy, SheetStream};
use parking_lot::Mutex;
use tracing::{debug, instrument, warn};

use crate::metrics::{DispatchMetrics, MetricsSnapshot};

type SheetBuffers = Arc<Mutex<HashMap<SheetName, Vec<u8>>>>;

/// Dispatcher that keeps one byte buffer per sheet.
///
/// Mirrors the file semantics of [`super::PerSheetOutputDispatcher`]:
/// opening a sheet resets its buffer, and the buffer outlives the stream.
#[derive(Debug)]
pub struct MemoryOutputDispatcher {
    name: String,
    policy: SheetNamePolicy,
    sheets: SheetBuffers,
    metrics: DispatchMetrics,
}

impl Default for MemoryOutputDispatcher {
    fn default() -> Self {
        Self::new("memory")
    }
}

impl MemoryOutputDispatcher {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            policy: SheetNamePolicy::default(),
            sheets: Arc::new(Mutex::new(HashMap::new())),
            metrics: DispatchMetrics::new(),
        }
    }

    pub fn with_sheet_names(mut self, policy: SheetNamePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bytes currently held for `sheet_name`
    pub fn contents(&self, sheet_name: &str) -> Option<Vec<u8>> {
        self.sheets.lock().get(sheet_name).cloned()
    }

    /// Names of every sheet opened so far, sorted
    pub fn sheet_names(&self) -> Vec<SheetName> {
        let mut names: Vec<_> = self.sheets.lock().keys().cloned().collect();
        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        names
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl OutputDispatcher for MemoryOutputDispatcher {
    type Stream = MemorySheetWriter;

    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "memory_open", skip(self), fields(dispatcher = %self.name))]
    fn open_stream_for_sheet(
        &self,
        sheet_name: &str,
    ) -> Result<SheetStream<MemorySheetWriter>, ContractError> {
        let sheet = SheetName::from(sheet_name);
        if let Err(e) = sheet.check(self.policy) {
            warn!(sheet = %sheet, error = %e, "Sheet name rejected");
            self.metrics.record_open_failure(&self.name);
            return Err(e);
        }

        self.sheets.lock().insert(sheet.clone(), Vec::new());
        self.metrics.record_open(&self.name);

        let writer = MemorySheetWriter {
            sheet: sheet.clone(),
            sheets: Arc::clone(&self.sheets),
        };
        Ok(SheetStream::new(sheet, writer))
    }

    #[instrument(
        name = "memory_close",
        skip(self, stream),
        fields(dispatcher = %self.name, sheet = %stream.sheet_name())
    )]
    fn close_stream_for_sheet(
        &self,
        stream: SheetStream<MemorySheetWriter>,
    ) -> Result<(), ContractError> {
        let bytes_written = stream.bytes_written();
        debug!(bytes_written, "Memory stream closed");
        self.metrics.record_close(&self.name, bytes_written);
        Ok(())
    }
}

/// Writer appending to one sheet's shared buffer
#[derive(Debug)]
pub struct MemorySheetWriter {
    sheet: SheetName,
    sheets: SheetBuffers,
}

impl Write for MemorySheetWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sheets
            .lock()
            .entry(self.sheet.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
