pub mod calculator;
pub mod coverage;
pub mod engine;
pub mod gaps;
pub mod merge;
pub mod navigation;
pub mod position;
pub mod resolve;

pub use crate::domain::model::{CoverageReport, EntryRecord, TimelineView};
pub use crate::domain::ports::{Clock, ConfigProvider, EntrySource};
pub use crate::utils::error::Result;
