use crate::core::calculator::DEFAULT_REQUIRED_YEARS;
use crate::core::gaps::DEFAULT_GAP_VISIBILITY_PERCENT;
use crate::core::position::DEFAULT_MIN_SEGMENT_WIDTH_PERCENT;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, TimelineError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MAX_REQUIRED_YEARS: u32 = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub requirement: RequirementConfig,
    pub timeline: Option<TimelineConfig>,
    pub input: Option<InputConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequirementConfig {
    pub years: Option<u32>,
    pub degree_required: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub gap_visibility_percent: Option<f64>,
    pub min_segment_width_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TimelineError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TimelineError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ENTRIES_FILE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TimelineError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(years) = self.requirement.years {
            crate::utils::validation::validate_range(
                "requirement.years",
                years,
                0,
                MAX_REQUIRED_YEARS,
            )?;
        }

        if let Some(timeline) = &self.timeline {
            if let Some(percent) = timeline.gap_visibility_percent {
                crate::utils::validation::validate_range(
                    "timeline.gap_visibility_percent",
                    percent,
                    0.0,
                    100.0,
                )?;
            }
            if let Some(percent) = timeline.min_segment_width_percent {
                crate::utils::validation::validate_range(
                    "timeline.min_segment_width_percent",
                    percent,
                    0.0,
                    100.0,
                )?;
            }
        }

        if let Some(input) = &self.input {
            crate::utils::validation::validate_path("input.path", &input.path)?;
            if let Some(format) = &input.format {
                format.parse::<crate::config::cli::EntryFileFormat>()?;
            }
        }

        Ok(())
    }

    pub fn input_path(&self) -> Option<&str> {
        self.input.as_ref().map(|i| i.path.as_str())
    }

    pub fn input_format(&self) -> Option<&str> {
        self.input.as_ref().and_then(|i| i.format.as_deref())
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn required_years(&self) -> u32 {
        self.requirement.years.unwrap_or(DEFAULT_REQUIRED_YEARS)
    }

    fn degree_required(&self) -> bool {
        self.requirement.degree_required.unwrap_or(false)
    }

    fn gap_visibility_percent(&self) -> f64 {
        self.timeline
            .as_ref()
            .and_then(|t| t.gap_visibility_percent)
            .unwrap_or(DEFAULT_GAP_VISIBILITY_PERCENT)
    }

    fn min_segment_width_percent(&self) -> f64 {
        self.timeline
            .as_ref()
            .and_then(|t| t.min_segment_width_percent)
            .unwrap_or(DEFAULT_MIN_SEGMENT_WIDTH_PERCENT)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
