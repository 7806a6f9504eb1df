use crate::domain::model::{Diagnostic, DiagnosticKind, EntryKind, EntryRecord, Interval, YearMonth};
use chrono::NaiveDate;

/// An entry whose dates resolved to a concrete interval.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntry {
    pub index: usize,
    pub kind: EntryKind,
    pub interval: Interval,
}

#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub entries: Vec<ResolvedEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    pub fn intervals(&self) -> Vec<Interval> {
        self.entries.iter().map(|e| e.interval).collect()
    }
}

/// 將每筆紀錄轉為實際日期區間；無法解析的紀錄只記錄原因，不中斷計算
pub fn resolve_entries(records: &[EntryRecord], now: NaiveDate) -> Resolution {
    let mut resolution = Resolution::default();

    for (index, record) in records.iter().enumerate() {
        match resolve_entry(index, record, now) {
            Ok(entry) => {
                tracing::debug!(
                    "Entry {} ({}) resolved to {} .. {}",
                    index,
                    record.kind,
                    entry.interval.start,
                    entry.interval.end
                );
                resolution.entries.push(entry);
            }
            Err(diagnostic) => {
                tracing::warn!("Excluding from coverage: {}", diagnostic);
                resolution.diagnostics.push(diagnostic);
            }
        }
    }

    resolution
}

/// start = first day of the start month; end = last day of the end month,
/// or `now` for ongoing entries.
pub fn resolve_entry(
    index: usize,
    record: &EntryRecord,
    now: NaiveDate,
) -> Result<ResolvedEntry, Diagnostic> {
    let fail = |kind: DiagnosticKind| Diagnostic { index, kind };

    let raw_start = non_blank(record.start_month.as_deref())
        .ok_or_else(|| fail(DiagnosticKind::MissingStart))?;
    let start = raw_start
        .parse::<YearMonth>()
        .map_err(|_| {
            fail(DiagnosticKind::UnparseableStart {
                value: raw_start.to_string(),
            })
        })?
        .first_day();

    let end = if record.is_ongoing() {
        now
    } else {
        let raw_end = non_blank(record.end_month.as_deref())
            .ok_or_else(|| fail(DiagnosticKind::MissingEnd))?;
        raw_end
            .parse::<YearMonth>()
            .map_err(|_| {
                fail(DiagnosticKind::UnparseableEnd {
                    value: raw_end.to_string(),
                })
            })?
            .last_day()
    };

    if start > end {
        return Err(fail(DiagnosticKind::StartAfterEnd));
    }

    Ok(ResolvedEntry {
        index,
        kind: record.kind,
        interval: Interval::new(start, end),
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
