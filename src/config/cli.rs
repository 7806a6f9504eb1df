use crate::domain::model::EntryRecord;
use crate::domain::ports::EntrySource;
use crate::utils::error::{Result, TimelineError};
use crate::utils::validation::validate_file_extension;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryFileFormat {
    Json,
    Csv,
}

impl EntryFileFormat {
    pub const EXTENSIONS: [&'static str; 2] = ["json", "csv"];

    pub fn from_path(path: &Path) -> Result<Self> {
        let display = path.to_string_lossy();
        validate_file_extension("input.path", &display, &Self::EXTENSIONS)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        extension.parse()
    }
}

impl FromStr for EntryFileFormat {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(EntryFileFormat::Json),
            "csv" => Ok(EntryFileFormat::Csv),
            other => Err(TimelineError::InvalidConfigValueError {
                field: "input.format".to_string(),
                value: other.to_string(),
                reason: format!("Valid formats: {}", Self::EXTENSIONS.join(", ")),
            }),
        }
    }
}

/// 從本機檔案讀取時間軸紀錄 (JSON 陣列或含標題列的 CSV)
#[derive(Debug, Clone)]
pub struct FileEntrySource {
    path: PathBuf,
    format: EntryFileFormat,
}

impl FileEntrySource {
    pub fn new<P: Into<PathBuf>>(path: P, format: EntryFileFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Picks the format from the file extension.
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        let format = EntryFileFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> EntryFileFormat {
        self.format
    }

    fn parse_json(data: &[u8]) -> Result<Vec<EntryRecord>> {
        Ok(serde_json::from_slice(data)?)
    }

    fn parse_csv(data: &[u8]) -> Result<Vec<EntryRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data);

        let mut records = Vec::new();
        for row in reader.deserialize::<EntryRecord>() {
            records.push(row?);
        }
        Ok(records)
    }
}

impl EntrySource for FileEntrySource {
    fn load_entries(&self) -> Result<Vec<EntryRecord>> {
        tracing::debug!("Reading entries from {}", self.path.display());
        let data = fs::read(&self.path)?;

        match self.format {
            EntryFileFormat::Json => Self::parse_json(&data),
            EntryFileFormat::Csv => Self::parse_csv(&data),
        }
    }
}
