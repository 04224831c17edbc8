//! Dispatcher implementations
//!
//! Contains PerSheetOutputDispatcher and MemoryOutputDispatcher.

mod memory;
mod per_sheet;

pub use self::memory::{MemoryOutputDispatcher, MemorySheetWriter};
pub use self::per_sheet::PerSheetOutputDispatcher;
