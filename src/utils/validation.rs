use crate::domain::model::{EntryKind, EntryRecord, YearMonth};
use crate::utils::error::{Result, TimelineError};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TimelineError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(TimelineError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(
    field_name: &str,
    file: &str,
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension.to_ascii_lowercase().as_str()) => Ok(()),
        Some(extension) => Err(TimelineError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(TimelineError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(TimelineError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

fn require_text(entry: usize, field: &str, value: Option<&str>) -> Result<()> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(TimelineError::MissingFieldError {
            entry,
            field: field.to_string(),
        }),
    }
}

fn parse_month(entry: usize, field: &str, value: &str) -> Result<YearMonth> {
    value
        .parse::<YearMonth>()
        .map_err(|_| TimelineError::InvalidMonthError {
            entry,
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// 驗證單筆紀錄，回傳第一個錯誤
///
/// `index` is the entry's position in the list; errors report it 1-based.
pub fn validate_entry(index: usize, record: &EntryRecord) -> Result<()> {
    let entry = index + 1;

    match record.kind {
        EntryKind::Job => {
            require_text(entry, "company", record.organization.as_deref())?;
            require_text(entry, "position", record.title.as_deref())?;
            require_text(entry, "contact name", record.contact_name.as_deref())?;
            require_text(entry, "contact info", record.contact_info.as_deref())?;
        }
        EntryKind::Education => {
            require_text(entry, "institution", record.organization.as_deref())?;
            require_text(entry, "degree", record.title.as_deref())?;
        }
        EntryKind::Unemployed | EntryKind::Other => {}
    }

    require_text(entry, "start date", record.start_month.as_deref())?;
    if !record.is_ongoing() {
        require_text(entry, "end date", record.end_month.as_deref())?;
    }

    let start = record
        .start_month
        .as_deref()
        .map(|raw| parse_month(entry, "start date", raw))
        .transpose()?;
    let end = match record.end_month.as_deref() {
        Some(raw) if !record.is_ongoing() => Some(parse_month(entry, "end date", raw)?),
        _ => None,
    };

    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(TimelineError::DateOrderError { entry });
        }
    }

    Ok(())
}

/// Every failing entry, in input order.
pub fn validate_entries(records: &[EntryRecord]) -> Vec<TimelineError> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| validate_entry(index, record).err())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_job(start: &str, end: Option<&str>) -> EntryRecord {
        EntryRecord::new(EntryKind::Job, start, end)
            .with_organization("Acme", "Engineer")
            .with_contact("Pat Lee", "pat@example.com")
    }

    #[test]
    fn test_validate_positive_range() {
        assert!(validate_range("requirement.years", 7u32, 0, 100).is_ok());
        assert!(validate_range("requirement.years", 101u32, 0, 100).is_err());
        assert!(validate_range("timeline.gap_visibility_percent", -1.0, 0.0, 100.0).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("input.path", "entries.json", &["json", "csv"]).is_ok());
        assert!(validate_file_extension("input.path", "entries.CSV", &["json", "csv"]).is_ok());
        assert!(validate_file_extension("input.path", "entries.txt", &["json", "csv"]).is_err());
        assert!(validate_file_extension("input.path", "entries", &["json", "csv"]).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("input.path", "./entries.json").is_ok());
        assert!(validate_path("input.path", "").is_err());
    }

    #[test]
    fn test_complete_job_passes() {
        assert!(validate_entry(0, &complete_job("2019-01", Some("2021-06"))).is_ok());
        assert!(validate_entry(0, &complete_job("2019-01", None)).is_ok());
    }

    #[test]
    fn test_job_requires_contact() {
        let record =
            EntryRecord::new(EntryKind::Job, "2019-01", None).with_organization("Acme", "Engineer");
        let err = validate_entry(2, &record).unwrap_err();
        assert_eq!(err.to_string(), "Entry 3: contact name is required");
    }

    #[test]
    fn test_education_fields() {
        let record = EntryRecord::new(EntryKind::Education, "2015-09", Some("2019-06"))
            .with_organization("State University", "");
        let err = validate_entry(0, &record).unwrap_err();
        assert!(matches!(err, TimelineError::MissingFieldError { ref field, .. } if field == "degree"));
    }

    #[test]
    fn test_end_required_unless_ongoing() {
        let mut record = EntryRecord::new(EntryKind::Unemployed, "2020-01", None);
        assert!(validate_entry(0, &record).is_ok());

        record.ongoing = Some(false);
        let err = validate_entry(0, &record).unwrap_err();
        assert_eq!(err.to_string(), "Entry 1: end date is required");
    }

    #[test]
    fn test_null_end_without_flag_needs_no_end_date() {
        let mut record = complete_job("2018-01", None);
        record.ongoing = None;
        assert!(validate_entry(0, &record).is_ok());

        record.end_month = Some("  ".to_string());
        assert!(validate_entry(0, &record).is_ok());
    }

    #[test]
    fn test_same_start_and_end_month() {
        assert!(validate_entry(0, &complete_job("2021-05", Some("2021-05"))).is_ok());
    }

    #[test]
    fn test_start_after_end() {
        let err = validate_entry(1, &complete_job("2022-05", Some("2021-05"))).unwrap_err();
        assert!(matches!(err, TimelineError::DateOrderError { entry: 2 }));
    }

    #[test]
    fn test_bad_month_format() {
        let err = validate_entry(0, &complete_job("May 2020", Some("2021-05"))).unwrap_err();
        assert!(matches!(err, TimelineError::InvalidMonthError { .. }));
    }

    #[test]
    fn test_validate_entries_collects_all_failures() {
        let records = vec![
            complete_job("2019-01", Some("2020-01")),
            complete_job("2022-05", Some("2021-05")),
            EntryRecord::default(),
        ];
        let issues = validate_entries(&records);
        assert_eq!(issues.len(), 2);
        assert!(matches!(issues[0], TimelineError::DateOrderError { entry: 2 }));
        assert!(matches!(issues[1], TimelineError::MissingFieldError { entry: 3, .. }));
    }
}
