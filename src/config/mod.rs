pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "timeline-coverage")]
#[command(about = "Check how much of a required lookback period an employment timeline covers")]
pub struct CliConfig {
    /// Entries file (.json array or .csv with header row)
    #[arg(short, long)]
    pub entries: Option<String>,

    /// Years the timeline must cover (defaults to the config file, then 7)
    #[arg(short, long)]
    pub years: Option<u32>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Evaluate as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub now: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, help = "Degree verification step is part of the form")]
    pub degree_required: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl crate::utils::validation::Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        if let Some(years) = self.years {
            crate::utils::validation::validate_range(
                "years",
                years,
                0,
                toml_config::MAX_REQUIRED_YEARS,
            )?;
        }
        if let Some(entries) = &self.entries {
            crate::utils::validation::validate_path("entries", entries)?;
        }
        if self.entries.is_none() && self.config.is_none() {
            return Err(crate::utils::error::TimelineError::MissingConfigError {
                field: "entries".to_string(),
            });
        }
        Ok(())
    }
}
