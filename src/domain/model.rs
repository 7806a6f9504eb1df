use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// 年月 (對應表單的 `<input type="month">`，格式 YYYY-MM)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last_day = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
        Some(Self {
            year,
            month,
            first_day,
            last_day,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// "Jan 2023"
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid month '{0}' (expected YYYY-MM)")]
pub struct ParseYearMonthError(pub String);

impl FromStr for YearMonth {
    type Err = ParseYearMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ParseYearMonthError(s.to_string());

        let (year_part, month_part) = trimmed.split_once('-').ok_or_else(err)?;
        if year_part.len() != 4 || month_part.is_empty() || month_part.len() > 2 {
            return Err(err());
        }
        let year: i32 = year_part.parse().map_err(|_| err())?;
        let month: u32 = month_part.parse().map_err(|_| err())?;
        YearMonth::new(year, month).ok_or_else(err)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        // out-of-range months are rejected by from_ymd_opt on the first day
        _ => 1,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Job,
    Education,
    Unemployed,
    #[default]
    #[serde(other)]
    Other,
}

impl EntryKind {
    /// Job 與 Education 會顯示職稱與機構
    pub fn has_organization(&self) -> bool {
        matches!(self, EntryKind::Job | EntryKind::Education)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryKind::Job => "Job",
            EntryKind::Education => "Education",
            EntryKind::Unemployed => "Unemployed",
            EntryKind::Other => "Other",
        };
        f.write_str(name)
    }
}

/// 使用者輸入的單筆時間軸紀錄，日期維持原始字串以便個別排除
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    #[serde(default)]
    pub kind: EntryKind,
    #[serde(default)]
    pub start_month: Option<String>,
    #[serde(default)]
    pub end_month: Option<String>,
    #[serde(default)]
    pub ongoing: Option<bool>,
    /// Company for jobs, institution for education
    #[serde(default)]
    pub organization: Option<String>,
    /// Position for jobs, degree for education
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_info: Option<String>,
}

impl EntryRecord {
    pub fn new(kind: EntryKind, start_month: &str, end_month: Option<&str>) -> Self {
        Self {
            kind,
            start_month: Some(start_month.to_string()),
            end_month: end_month.map(str::to_string),
            ongoing: Some(end_month.is_none()),
            ..Default::default()
        }
    }

    pub fn with_organization(mut self, organization: &str, title: &str) -> Self {
        self.organization = Some(organization.to_string());
        self.title = Some(title.to_string());
        self
    }

    pub fn with_contact(mut self, name: &str, info: &str) -> Self {
        self.contact_name = Some(name.to_string());
        self.contact_info = Some(info.to_string());
        self
    }

    /// An explicit flag wins; without one, a blank end month means ongoing.
    pub fn is_ongoing(&self) -> bool {
        self.ongoing.unwrap_or_else(|| {
            self.end_month
                .as_deref()
                .map_or(true, |end| end.trim().is_empty())
        })
    }

    /// "Jan 2020 - Present"，日期無法解析時回傳原始字串
    pub fn date_range_label(&self) -> String {
        let start = month_label(self.start_month.as_deref());
        let end = if self.is_ongoing() {
            "Present".to_string()
        } else {
            month_label(self.end_month.as_deref())
        };
        format!("{} - {}", start, end)
    }
}

fn month_label(raw: Option<&str>) -> String {
    match raw {
        Some(value) => value
            .parse::<YearMonth>()
            .map(|ym| ym.label())
            .unwrap_or_else(|_| value.to_string()),
        None => String::new(),
    }
}

/// Closed date range `[start, end]`, day resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Interval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// 需涵蓋的回溯區間: [Jan 1 of (current year - N), today]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredWindow {
    pub required_years: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl RequiredWindow {
    pub fn new(required_years: u32, now: NaiveDate) -> Self {
        let start = i32::try_from(required_years)
            .ok()
            .and_then(|years| now.year().checked_sub(years))
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
            .unwrap_or(NaiveDate::MIN);
        Self {
            required_years,
            start,
            end: now,
        }
    }

    /// Intersection with the window, `None` when they do not touch.
    pub fn clip(&self, interval: &Interval) -> Option<Interval> {
        let start = interval.start.max(self.start);
        let end = interval.end.min(self.end);
        (start <= end).then(|| Interval::new(start, end))
    }

    pub fn label(&self) -> String {
        if self.required_years == 0 {
            "Employment verification (timeframe not specified)".to_string()
        } else {
            format!("Required {}-year period", self.required_years)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    Leading,
    Interior,
    Trailing,
}

/// Uncovered days inside the required window, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    pub kind: GapKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Gap {
    pub fn label(&self) -> &'static str {
        "Gap"
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// 紀錄被排除於計算之外的原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DiagnosticKind {
    MissingStart,
    MissingEnd,
    UnparseableStart { value: String },
    UnparseableEnd { value: String },
    StartAfterEnd,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Position of the entry in the input list
    pub index: usize,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entry = self.index + 1;
        match &self.kind {
            DiagnosticKind::MissingStart => write!(f, "entry {} has no start date", entry),
            DiagnosticKind::MissingEnd => {
                write!(f, "entry {} has no end date and is not ongoing", entry)
            }
            DiagnosticKind::UnparseableStart { value } => {
                write!(f, "entry {} has an unreadable start date '{}'", entry, value)
            }
            DiagnosticKind::UnparseableEnd { value } => {
                write!(f, "entry {} has an unreadable end date '{}'", entry, value)
            }
            DiagnosticKind::StartAfterEnd => {
                write!(f, "entry {} starts after it ends", entry)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RequirementStatus {
    /// No timeframe required and at least one entry present
    Complete,
    /// No timeframe required but nothing entered yet
    NeedsEntry,
    Met,
    Short { required_years: u32 },
}

impl RequirementStatus {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, RequirementStatus::Complete | RequirementStatus::Met)
    }

    pub fn message(&self) -> String {
        match self {
            RequirementStatus::Complete => "Employment verification complete.".to_string(),
            RequirementStatus::NeedsEntry => "Please add at least one employer.".to_string(),
            RequirementStatus::Met => "Timeframe requirement met.".to_string(),
            RequirementStatus::Short { required_years } => {
                format!("Please account for the full {} years.", required_years)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub window: RequiredWindow,
    /// Covered years rounded to one decimal, never above the requirement
    pub total_years: f64,
    /// Covered years rounded to one decimal before capping
    pub measured_years: f64,
    pub requirement_met: bool,
    pub entry_count: usize,
    pub merged: Vec<Interval>,
    pub gaps: Vec<Gap>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CoverageReport {
    pub fn required_years(&self) -> u32 {
        self.window.required_years
    }

    pub fn status(&self) -> RequirementStatus {
        match (self.required_years(), self.requirement_met) {
            (0, true) => RequirementStatus::Complete,
            (0, false) => RequirementStatus::NeedsEntry,
            (_, true) => RequirementStatus::Met,
            (required_years, false) => RequirementStatus::Short { required_years },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearMarker {
    pub year: i32,
    pub position_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSegment {
    pub index: usize,
    pub kind: EntryKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub start_percent: f64,
    pub width_percent: f64,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapSegment {
    pub gap: Gap,
    pub start_percent: f64,
    pub width_percent: f64,
}

/// 時間軸繪製所需的資料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineView {
    pub label: String,
    pub start_year: i32,
    pub end_year: i32,
    pub markers: Vec<YearMarker>,
    pub segments: Vec<TimelineSegment>,
    pub gaps: Vec<GapSegment>,
}

/// Moves a date by whole days, saturating at the calendar bounds.
pub(crate) fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}
