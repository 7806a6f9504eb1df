use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Entry {entry}: {field} is required")]
    MissingFieldError { entry: usize, field: String },

    #[error("Entry {entry}: invalid month '{value}' in {field} (expected YYYY-MM)")]
    InvalidMonthError {
        entry: usize,
        field: String,
        value: String,
    },

    #[error("Entry {entry}: start date must not be after end date")]
    DateOrderError { entry: usize },
}

/// 錯誤分類，用於決定 CLI 的處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Input,
    Configuration,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TimelineError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TimelineError::IoError(_) => ErrorCategory::Io,
            TimelineError::SerializationError(_) | TimelineError::CsvError(_) => {
                ErrorCategory::Input
            }
            TimelineError::ConfigValidationError { .. }
            | TimelineError::InvalidConfigValueError { .. }
            | TimelineError::MissingConfigError { .. } => ErrorCategory::Configuration,
            TimelineError::MissingFieldError { .. }
            | TimelineError::InvalidMonthError { .. }
            | TimelineError::DateOrderError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // A single bad entry only drops that entry from the computation.
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            TimelineError::IoError(_) => {
                "Check that the file exists and is readable".to_string()
            }
            TimelineError::SerializationError(_) => {
                "Entries file must be a JSON array of entry objects".to_string()
            }
            TimelineError::CsvError(_) => {
                "CSV entries need a header row: kind,start_month,end_month,ongoing,...".to_string()
            }
            TimelineError::ConfigValidationError { field, .. }
            | TimelineError::InvalidConfigValueError { field, .. }
            | TimelineError::MissingConfigError { field } => {
                format!("Review the '{}' setting in the config file or CLI flags", field)
            }
            TimelineError::MissingFieldError { field, .. } => {
                format!("Fill in the {} field for this entry", field)
            }
            TimelineError::InvalidMonthError { .. } => {
                "Use the YYYY-MM format, e.g. 2021-03".to_string()
            }
            TimelineError::DateOrderError { .. } => {
                "Swap the start and end months or correct the year".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not read input: {}", self),
            ErrorCategory::Input => format!("Could not parse entries: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Validation => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TimelineError>;
