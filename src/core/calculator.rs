use crate::core::coverage::coverage_total;
use crate::core::gaps::{detect_gaps, DEFAULT_GAP_VISIBILITY_PERCENT};
use crate::core::merge::merge_intervals;
use crate::core::position::{
    entry_segments, gap_segments, year_markers, DEFAULT_MIN_SEGMENT_WIDTH_PERCENT,
};
use crate::core::resolve::{resolve_entries, Resolution};
use crate::domain::model::{CoverageReport, EntryRecord, RequiredWindow, TimelineView};
use crate::domain::ports::ConfigProvider;
use chrono::{Datelike, NaiveDate};

pub const DEFAULT_REQUIRED_YEARS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageSettings {
    pub required_years: u32,
    pub gap_visibility_percent: f64,
    pub min_segment_width_percent: f64,
}

impl CoverageSettings {
    pub fn new(required_years: u32) -> Self {
        Self {
            required_years,
            ..Default::default()
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            required_years: config.required_years(),
            gap_visibility_percent: config.gap_visibility_percent(),
            min_segment_width_percent: config.min_segment_width_percent(),
        }
    }
}

impl Default for CoverageSettings {
    fn default() -> Self {
        Self {
            required_years: DEFAULT_REQUIRED_YEARS,
            gap_visibility_percent: DEFAULT_GAP_VISIBILITY_PERCENT,
            min_segment_width_percent: DEFAULT_MIN_SEGMENT_WIDTH_PERCENT,
        }
    }
}

/// 時間軸涵蓋計算器
///
/// Stateless: every call recomputes from the entries it is given, so calling
/// it twice with the same input yields the same report.
#[derive(Debug, Clone, Default)]
pub struct CoverageCalculator {
    settings: CoverageSettings,
}

impl CoverageCalculator {
    pub fn new(settings: CoverageSettings) -> Self {
        Self { settings }
    }

    pub fn calculate(&self, entries: &[EntryRecord], now: NaiveDate) -> CoverageReport {
        self.report(&resolve_entries(entries, now), now)
    }

    /// Report plus rendering data, resolving the entries only once.
    pub fn evaluate(
        &self,
        entries: &[EntryRecord],
        now: NaiveDate,
    ) -> (CoverageReport, TimelineView) {
        let resolution = resolve_entries(entries, now);
        let report = self.report(&resolution, now);
        let timeline = self.timeline(entries, &resolution, &report);
        (report, timeline)
    }

    fn report(&self, resolution: &Resolution, now: NaiveDate) -> CoverageReport {
        let window = RequiredWindow::new(self.settings.required_years, now);
        tracing::debug!(
            "Required period: {} to {} ({} usable entries)",
            window.start,
            window.end,
            resolution.entries.len()
        );

        let merged = merge_intervals(&resolution.intervals());
        let total = coverage_total(&merged, &window, resolution.entries.len());
        let gaps = detect_gaps(&merged, &window, self.settings.gap_visibility_percent);

        tracing::info!(
            "Years accounted: {:.1} of {} (requirement met: {})",
            total.total_years,
            window.required_years,
            total.requirement_met
        );

        CoverageReport {
            window,
            total_years: total.total_years,
            measured_years: total.measured_years,
            requirement_met: total.requirement_met,
            entry_count: resolution.entries.len(),
            merged,
            gaps,
            diagnostics: resolution.diagnostics.clone(),
        }
    }

    fn timeline(
        &self,
        entries: &[EntryRecord],
        resolution: &Resolution,
        report: &CoverageReport,
    ) -> TimelineView {
        let window = &report.window;

        TimelineView {
            label: window.label(),
            start_year: window.start.year(),
            end_year: window.end.year(),
            markers: year_markers(window),
            segments: entry_segments(
                &resolution.entries,
                entries,
                window,
                self.settings.min_segment_width_percent,
            ),
            gaps: gap_segments(&report.gaps, window),
        }
    }
}

/// Shorthand for a calculator with default display settings.
pub fn calculate_coverage(
    entries: &[EntryRecord],
    required_years: u32,
    now: NaiveDate,
) -> CoverageReport {
    CoverageCalculator::new(CoverageSettings::new(required_years)).calculate(entries, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{EntryKind, GapKind, Interval, RequirementStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn job(start: &str, end: Option<&str>) -> EntryRecord {
        EntryRecord::new(EntryKind::Job, start, end)
    }

    #[test]
    fn test_empty_entries() {
        let report = calculate_coverage(&[], 7, date(2026, 10, 16));
        assert_eq!(report.total_years, 0.0);
        assert!(!report.requirement_met);
        assert!(report.merged.is_empty());
        assert!(report.gaps.is_empty());
        assert_eq!(report.status(), RequirementStatus::Short { required_years: 7 });
    }

    #[test]
    fn test_ongoing_job_covers_requirement() {
        let now = date(2026, 10, 16);
        let report = calculate_coverage(&[job("2018-10", None)], 7, now);
        assert_eq!(report.total_years, 7.0);
        assert!(report.requirement_met);
        assert!(report.gaps.is_empty());
        assert_eq!(report.status().message(), "Timeframe requirement met.");
    }

    #[test]
    fn test_gap_between_two_jobs() {
        let now = date(2021, 1, 15);
        let entries = vec![job("2020-06", Some("2020-08")), job("2020-01", Some("2020-03"))];
        let report = calculate_coverage(&entries, 1, now);

        assert_eq!(report.total_years, 0.5);
        assert_eq!(
            report.merged,
            vec![
                Interval::new(date(2020, 1, 1), date(2020, 3, 31)),
                Interval::new(date(2020, 6, 1), date(2020, 8, 31)),
            ]
        );
        let interior: Vec<_> = report
            .gaps
            .iter()
            .filter(|g| g.kind == GapKind::Interior)
            .collect();
        assert_eq!(interior.len(), 1);
        assert_eq!(interior[0].start, date(2020, 4, 1));
        assert_eq!(interior[0].end, date(2020, 5, 31));
    }

    #[test]
    fn test_bad_entry_degrades_gracefully() {
        let now = date(2026, 10, 16);
        let entries = vec![job("not a date", Some("2020-01")), job("2019-01", None)];
        let report = calculate_coverage(&entries, 7, now);
        assert_eq!(report.entry_count, 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].index, 0);
        assert!(report.requirement_met);
    }

    #[test]
    fn test_zero_years_requirement() {
        let now = date(2026, 10, 16);
        let met = calculate_coverage(&[job("2001-01", Some("2003-12"))], 0, now);
        assert!(met.requirement_met);
        assert_eq!(met.total_years, 0.0);
        assert_eq!(met.status(), RequirementStatus::Complete);

        let unmet = calculate_coverage(&[], 0, now);
        assert!(!unmet.requirement_met);
        assert_eq!(unmet.status(), RequirementStatus::NeedsEntry);
    }

    #[test]
    fn test_timeline_view() {
        let now = date(2026, 10, 16);
        let entries = vec![
            job("2020-01", Some("2022-12")).with_organization("Acme", "Analyst"),
            job("2024-01", None).with_organization("Globex", "Lead"),
        ];
        let calculator = CoverageCalculator::new(CoverageSettings::new(7));
        let (report, view) = calculator.evaluate(&entries, now);
        assert_eq!(report, calculator.calculate(&entries, now));

        assert_eq!(view.label, "Required 7-year period");
        assert_eq!(view.start_year, 2019);
        assert_eq!(view.end_year, 2026);
        assert_eq!(view.markers.len(), 8);
        assert_eq!(view.segments.len(), 2);
        assert_eq!(view.gaps.len(), report.gaps.len());
        assert_eq!(
            report.gaps.iter().map(|g| g.kind).collect::<Vec<_>>(),
            vec![GapKind::Leading, GapKind::Interior]
        );
    }

    #[test]
    fn test_evaluate_segments_match_report() {
        let now = date(2026, 10, 16);
        let entries = vec![
            job("2018-02", Some("2019-13")),
            job("2019-01", Some("2021-06")).with_organization("Acme", "Analyst"),
            job("2021-09", None).with_organization("Globex", "Lead"),
        ];
        let (report, view) = CoverageCalculator::default().evaluate(&entries, now);

        assert_eq!(report.entry_count, 2);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(view.segments.len(), report.entry_count);
        assert_eq!(
            view.segments.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let now = date(2026, 10, 16);
        let entries = vec![job("2015-03", Some("2019-04")), job("2019-06", None)];
        let calculator = CoverageCalculator::default();
        assert_eq!(
            calculator.calculate(&entries, now),
            calculator.calculate(&entries, now)
        );
    }
}
