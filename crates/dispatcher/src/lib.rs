//! # Dispatcher
//!
//! 按 sheet 分发输出。
//!
//! 负责：
//! - 为每个 sheet name 打开独立的输出流
//! - 确保 base 目录在打开文件之前存在
//! - 关闭流并记录指标

pub mod dispatchers;
pub mod metrics;

pub use contracts::{
    ContractError, DispatcherConfig, OutputDispatcher, SheetName, SheetNamePolicy, SheetStream,
};
pub use crate::dispatchers::{MemoryOutputDispatcher, MemorySheetWriter, PerSheetOutputDispatcher};
pub use crate::metrics::{DispatchMetrics, MetricsSnapshot};
