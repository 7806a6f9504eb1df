use crate::domain::model::{shift_days, Interval};

/// Intervals starting within this many days after the running end are joined.
pub const ADJACENCY_TOLERANCE_DAYS: i64 = 1;

/// Coalesces overlapping or adjacent intervals into a minimal ordered set.
///
/// The sort is stable, so intervals sharing a start date keep their input
/// order. Running the result through `merge_intervals` again yields the same
/// set.
pub fn merge_intervals(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted = intervals.to_vec();
    sorted.sort_by_key(|interval| interval.start);

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    let mut iter = sorted.into_iter();
    let Some(mut current) = iter.next() else {
        return merged;
    };

    for next in iter {
        if next.start <= shift_days(current.end, ADJACENCY_TOLERANCE_DAYS) {
            if next.end > current.end {
                tracing::debug!(
                    "Extending {} .. {} to {}",
                    current.start,
                    current.end,
                    next.end
                );
                current.end = next.end;
            }
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn span(a: (i32, u32, u32), b: (i32, u32, u32)) -> Interval {
        Interval::new(date(a.0, a.1, a.2), date(b.0, b.1, b.2))
    }

    #[test]
    fn test_adjacent_months_merge() {
        let merged = merge_intervals(&[
            span((2020, 1, 1), (2020, 6, 30)),
            span((2020, 7, 1), (2020, 12, 31)),
        ]);
        assert_eq!(merged, vec![span((2020, 1, 1), (2020, 12, 31))]);
    }

    #[test]
    fn test_overlap_keeps_furthest_end() {
        let merged = merge_intervals(&[
            span((2018, 1, 1), (2022, 12, 31)),
            span((2019, 5, 1), (2020, 2, 29)),
            span((2022, 6, 1), (2023, 3, 31)),
        ]);
        assert_eq!(merged, vec![span((2018, 1, 1), (2023, 3, 31))]);
    }

    #[test]
    fn test_separated_intervals_stay_apart() {
        let first = span((2020, 1, 1), (2020, 3, 31));
        let second = span((2020, 6, 1), (2020, 8, 31));
        let merged = merge_intervals(&[second, first]);
        assert_eq!(merged, vec![first, second]);
    }

    #[test]
    fn test_one_day_gap_is_not_adjacent() {
        let merged = merge_intervals(&[
            span((2020, 1, 1), (2020, 1, 10)),
            span((2020, 1, 12), (2020, 1, 20)),
        ]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_intervals(&[]).is_empty());
    }
}
