use crate::core::calculator::CoverageCalculator;
use crate::domain::model::{CoverageReport, TimelineView};
use crate::domain::ports::{Clock, EntrySource};
use crate::utils::error::{Result, TimelineError};
use crate::utils::validation::validate_entries;

/// Result of one load-validate-calculate pass.
#[derive(Debug)]
pub struct CoverageRun {
    pub report: CoverageReport,
    pub timeline: TimelineView,
    /// Per-entry validation failures, reported alongside the coverage
    pub issues: Vec<TimelineError>,
}

pub struct CoverageEngine<S: EntrySource, K: Clock> {
    source: S,
    clock: K,
    calculator: CoverageCalculator,
}

impl<S: EntrySource, K: Clock> CoverageEngine<S, K> {
    pub fn new(source: S, clock: K, calculator: CoverageCalculator) -> Self {
        Self {
            source,
            clock,
            calculator,
        }
    }

    pub fn run(&self) -> Result<CoverageRun> {
        tracing::info!("Loading timeline entries...");
        let entries = self.source.load_entries()?;
        tracing::info!("Loaded {} entries", entries.len());

        let issues = validate_entries(&entries);
        for issue in &issues {
            tracing::warn!("⚠️ {}", issue);
        }

        let today = self.clock.today();
        let (report, timeline) = self.calculator.evaluate(&entries, today);

        Ok(CoverageRun {
            report,
            timeline,
            issues,
        })
    }
}
