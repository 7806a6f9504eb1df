use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use timeline_coverage::domain::ports::{Clock, ConfigProvider};
use timeline_coverage::utils::error::{ErrorSeverity, TimelineError};
use timeline_coverage::utils::{logger, validation::Validate};
use timeline_coverage::{
    CliConfig, CoverageCalculator, CoverageEngine, CoverageRun, CoverageSettings,
    EntryFileFormat, FileEntrySource, FixedClock, OutputFormat, SystemClock, TomlConfig,
};

/// Exit code when the entries were read fine but do not cover the requirement.
const EXIT_REQUIREMENT_UNMET: i32 = 4;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入 TOML 配置 (可選)
    let mut config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };

    let verbose = cli.verbose || config.verbose_logging();
    if cli.json_logs || config.json_logging() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting timeline-coverage");
    if verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 命令列參數優先於設定檔
    if let Some(years) = cli.years {
        config.requirement.years = Some(years);
    }
    if cli.degree_required {
        config.requirement.degree_required = Some(true);
    }

    if let Err(e) = cli.validate().and_then(|_| config.validate()) {
        fail(&e);
    }

    let source = match entry_source(&cli, &config) {
        Ok(source) => source,
        Err(e) => fail(&e),
    };

    let today = match &cli.now {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("--now expects YYYY-MM-DD, got '{}'", raw))?,
        None => SystemClock.today(),
    };

    let settings = CoverageSettings::from_config(&config);
    tracing::info!(
        "Checking {} against a {}-year requirement as of {}",
        source.path().display(),
        settings.required_years,
        today
    );

    let engine = CoverageEngine::new(source, FixedClock(today), CoverageCalculator::new(settings));
    let run = match engine.run() {
        Ok(run) => run,
        Err(e) => fail(&e),
    };

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&run.report)?),
        OutputFormat::Text => print_summary(&run, config.degree_required()),
    }

    if !run.report.requirement_met {
        std::process::exit(EXIT_REQUIREMENT_UNMET);
    }

    Ok(())
}

fn entry_source(cli: &CliConfig, config: &TomlConfig) -> Result<FileEntrySource, TimelineError> {
    let path = cli
        .entries
        .as_deref()
        .or_else(|| config.input_path())
        .ok_or_else(|| TimelineError::MissingConfigError {
            field: "entries".to_string(),
        })?;

    match config.input_format() {
        Some(format) if cli.entries.is_none() => {
            Ok(FileEntrySource::new(path, format.parse::<EntryFileFormat>()?))
        }
        _ => FileEntrySource::from_path(path),
    }
}

fn print_summary(run: &CoverageRun, degree_required: bool) {
    let report = &run.report;

    println!("{}", run.timeline.label);
    println!("Window: {} to {}", report.window.start, report.window.end);
    println!(
        "Years accounted: {:.1} of {}",
        report.total_years,
        report.required_years()
    );
    println!("{}", report.status().message());

    if !report.merged.is_empty() {
        println!("Covered:");
        for interval in &report.merged {
            println!("  {} .. {}", interval.start, interval.end);
        }
    }
    for gap in &report.gaps {
        println!("  {} ({} days): {} .. {}", gap.label(), gap.days(), gap.start, gap.end);
    }
    for diagnostic in &report.diagnostics {
        println!("⚠️ Not counted: {}", diagnostic);
    }
    for issue in &run.issues {
        println!("⚠️ {}", issue);
    }
    if degree_required {
        println!("Degree verification is required before signing.");
    }
}

fn fail(e: &TimelineError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
