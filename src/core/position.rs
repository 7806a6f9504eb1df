use crate::core::coverage::years_between;
use crate::core::resolve::ResolvedEntry;
use crate::domain::model::{
    EntryRecord, Gap, GapSegment, RequiredWindow, TimelineSegment, YearMarker,
};
use chrono::{Datelike, NaiveDate};

/// Segments narrower than this are widened so they stay visible.
pub const DEFAULT_MIN_SEGMENT_WIDTH_PERCENT: f64 = 2.0;

/// Maps a date onto the window as a 0-100 percentage.
///
/// Uses the same year length as the coverage total so drawn segments and the
/// reported figure agree. Dates outside the window clamp to the nearest edge.
pub fn position_percent(date: NaiveDate, window: &RequiredWindow) -> f64 {
    let total_years = years_between(window.start, window.end);
    if total_years <= 0.0 {
        return if date > window.start { 100.0 } else { 0.0 };
    }

    let years_from_start = years_between(window.start, date).clamp(0.0, total_years);
    (years_from_start / total_years * 100.0).clamp(0.0, 100.0)
}

pub fn width_percent(from: NaiveDate, to: NaiveDate, window: &RequiredWindow) -> f64 {
    position_percent(to, window) - position_percent(from, window)
}

/// One marker per calendar year touched by the window, at its Jan 1.
pub fn year_markers(window: &RequiredWindow) -> Vec<YearMarker> {
    (window.start.year()..=window.end.year())
        .filter_map(|year| {
            NaiveDate::from_ymd_opt(year, 1, 1).map(|jan_first| YearMarker {
                year,
                position_percent: position_percent(jan_first, window),
            })
        })
        .collect()
}

/// 每筆紀錄各自的時間軸區段 (裁切至回溯區間，依開始日期排序)
pub fn entry_segments(
    resolved: &[ResolvedEntry],
    records: &[EntryRecord],
    window: &RequiredWindow,
    min_width_percent: f64,
) -> Vec<TimelineSegment> {
    let mut visible: Vec<(&ResolvedEntry, _)> = resolved
        .iter()
        .filter_map(|entry| window.clip(&entry.interval).map(|clipped| (entry, clipped)))
        .collect();
    visible.sort_by_key(|(_, clipped)| clipped.start);

    visible
        .into_iter()
        .map(|(entry, clipped)| {
            let start_percent = position_percent(clipped.start, window);
            let end_percent = position_percent(clipped.end, window);
            let tooltip = records
                .get(entry.index)
                .map(tooltip_text)
                .unwrap_or_else(|| entry.kind.to_string());

            TimelineSegment {
                index: entry.index,
                kind: entry.kind,
                start: clipped.start,
                end: clipped.end,
                start_percent,
                width_percent: (end_percent - start_percent).max(min_width_percent),
                tooltip,
            }
        })
        .collect()
}

pub fn gap_segments(gaps: &[Gap], window: &RequiredWindow) -> Vec<GapSegment> {
    gaps.iter()
        .map(|gap| {
            let start_percent = position_percent(gap.start, window);
            GapSegment {
                gap: *gap,
                start_percent,
                width_percent: position_percent(gap.end, window) - start_percent,
            }
        })
        .collect()
}

fn tooltip_text(record: &EntryRecord) -> String {
    if record.kind.has_organization() {
        format!(
            "{} at {}\n{}",
            record.title.as_deref().unwrap_or_default(),
            record.organization.as_deref().unwrap_or_default(),
            record.date_range_label()
        )
    } else {
        format!("{}\n{}", record.kind, record.date_range_label())
    }
}
