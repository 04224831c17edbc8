//! # Contracts
//!
//! Interface contracts shared by every sheet-dispatch crate.
//! Implementations and tooling depend on this crate, never the reverse.
//!
//! ## Model
//! - A sheet is a named output stream, materialised by a dispatcher
//! - `OutputDispatcher::open_stream_for_sheet` hands out a `SheetStream`
//! - The stream carries its sheet name back to `close_stream_for_sheet`

mod config;
mod error;
mod output_dispatcher;
mod sheet_name;
mod stream;

pub use config::*;
pub use error::*;
pub use output_dispatcher::OutputDispatcher;
pub use sheet_name::SheetName;
pub use stream::SheetStream;
