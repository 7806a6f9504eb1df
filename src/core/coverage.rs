use crate::domain::model::{Interval, RequiredWindow};
use chrono::NaiveDate;

/// Leap-year average; kept fixed so displayed totals stay stable.
pub const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageTotal {
    /// Rounded and capped at the requirement
    pub total_years: f64,
    /// Rounded, uncapped
    pub measured_years: f64,
    pub requirement_met: bool,
}

pub fn years_between(start: NaiveDate, end: NaiveDate) -> f64 {
    (end - start).num_days() as f64 / DAYS_PER_YEAR
}

pub fn round_to_tenth(years: f64) -> f64 {
    (years * 10.0).round() / 10.0
}

/// 計算合併區間落在回溯區間內的年數 (未四捨五入)
pub fn covered_years(merged: &[Interval], window: &RequiredWindow) -> f64 {
    merged
        .iter()
        .filter_map(|interval| match window.clip(interval) {
            Some(clipped) => Some(years_between(clipped.start, clipped.end)),
            None => {
                tracing::debug!(
                    "Range {} .. {} is outside the required period",
                    interval.start,
                    interval.end
                );
                None
            }
        })
        .sum()
}

/// `entry_count` only matters when no timeframe is required: then a single
/// usable entry satisfies the requirement and the duration is informational.
pub fn coverage_total(
    merged: &[Interval],
    window: &RequiredWindow,
    entry_count: usize,
) -> CoverageTotal {
    let raw = covered_years(merged, window);
    let measured_years = round_to_tenth(raw);
    let required = f64::from(window.required_years);

    if window.required_years == 0 {
        return CoverageTotal {
            total_years: 0.0,
            measured_years,
            requirement_met: entry_count > 0,
        };
    }

    if measured_years >= required {
        tracing::debug!(
            "Total years accounted: {:.1} (capped from {:.1})",
            required,
            measured_years
        );
        CoverageTotal {
            total_years: required,
            measured_years,
            requirement_met: true,
        }
    } else {
        tracing::debug!(
            "Total years accounted: {:.1} (raw: {:.2})",
            measured_years,
            raw
        );
        CoverageTotal {
            total_years: measured_years,
            measured_years,
            requirement_met: false,
        }
    }
}
