use crate::core::position::width_percent;
use crate::domain::model::{shift_days, Gap, GapKind, Interval, RequiredWindow};

/// Leading and trailing gaps narrower than this share of the window are not shown.
pub const DEFAULT_GAP_VISIBILITY_PERCENT: f64 = 1.0;

/// Interior gaps must span more than this many days.
pub const MIN_GAP_DAYS: i64 = 1;

/// 找出回溯區間內未被涵蓋的區段
///
/// `merged` must come from [`merge_intervals`](crate::core::merge::merge_intervals).
/// Intervals that do not reach into the window are ignored; when none do,
/// there is nothing to draw and no gaps are reported.
pub fn detect_gaps(
    merged: &[Interval],
    window: &RequiredWindow,
    visibility_percent: f64,
) -> Vec<Gap> {
    let visible: Vec<Interval> = merged.iter().filter_map(|i| window.clip(i)).collect();
    let (Some(first), Some(last)) = (visible.first(), visible.last()) else {
        return Vec::new();
    };

    let mut gaps = Vec::new();

    if first.start > window.start
        && is_visible(window.start, first.start, window, visibility_percent)
    {
        gaps.push(Gap {
            kind: GapKind::Leading,
            start: window.start,
            end: shift_days(first.start, -1),
        });
    }

    for pair in visible.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        if (next.start - current.end).num_days() > MIN_GAP_DAYS {
            gaps.push(Gap {
                kind: GapKind::Interior,
                start: shift_days(current.end, 1),
                end: shift_days(next.start, -1),
            });
        }
    }

    if last.end < window.end && is_visible(last.end, window.end, window, visibility_percent) {
        gaps.push(Gap {
            kind: GapKind::Trailing,
            start: shift_days(last.end, 1),
            end: window.end,
        });
    }

    for gap in &gaps {
        tracing::debug!("{:?} gap: {} .. {}", gap.kind, gap.start, gap.end);
    }

    gaps
}

fn is_visible(
    from: chrono::NaiveDate,
    to: chrono::NaiveDate,
    window: &RequiredWindow,
    visibility_percent: f64,
) -> bool {
    (to - from).num_days() > MIN_GAP_DAYS && width_percent(from, to, window) > visibility_percent
}
