pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, OutputFormat};

pub use crate::config::cli::{EntryFileFormat, FileEntrySource};
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::calculator::{calculate_coverage, CoverageCalculator, CoverageSettings};
pub use crate::core::engine::{CoverageEngine, CoverageRun};
pub use crate::core::navigation::{FormStep, StepBlocked, StepContext, StepNavigator};
pub use crate::domain::model::{
    CoverageReport, Diagnostic, DiagnosticKind, EntryKind, EntryRecord, Gap, GapKind, Interval,
    RequiredWindow, RequirementStatus, TimelineView, YearMonth,
};
pub use crate::domain::ports::{Clock, FixedClock, SystemClock};
pub use crate::utils::error::{Result, TimelineError};
