//! OutputDispatcher trait - per-sheet output interface
//!
//! Defines the abstract interface for dispatchers.

use std::fmt::Debug;
use std::io::Write;

use crate::{ContractError, SheetStream};

/// Maps a sheet name to an output stream and releases it again.
///
/// All dispatcher implementations must implement this trait. Calls are
/// synchronous and blocking; a dispatcher keeps no record of the streams it
/// has handed out.
pub trait OutputDispatcher {
    /// Writer type behind each stream
    type Stream: Write + Debug;

    /// Dispatcher name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Open a fresh, empty stream for `sheet_name`.
    ///
    /// Opening a sheet that was opened before discards what it held.
    ///
    /// # Errors
    /// `ContractError::CannotOpen` if the target cannot be created, or
    /// `ContractError::InvalidSheetName` if the dispatcher's naming policy
    /// rejects the name.
    fn open_stream_for_sheet(
        &self,
        sheet_name: &str,
    ) -> Result<SheetStream<Self::Stream>, ContractError>;

    /// Release a stream obtained from [`Self::open_stream_for_sheet`].
    ///
    /// # Errors
    /// `ContractError::Close` if buffered bytes cannot be flushed.
    fn close_stream_for_sheet(
        &self,
        stream: SheetStream<Self::Stream>,
    ) -> Result<(), ContractError>;
}
