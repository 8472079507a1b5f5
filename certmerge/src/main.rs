use anyhow::{Context, Result};
use certmerge_core::config::DEFAULT_CONFIG_FILE;
use certmerge_core::{CertError, CertificateGenerator, GeneratorConfig, MatchMode};
use clap::Parser;
use std::path::PathBuf;

mod formatter;
mod logger;

#[derive(Parser)]
#[command(name = "certmerge")]
#[command(about = "Generate one certificate per student from a DOCX template and a spreadsheet", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Certificate template (.docx)
    #[arg(short, long, value_name = "DOCX")]
    template: Option<PathBuf>,

    /// Student roster workbook
    #[arg(short, long, value_name = "XLSX")]
    roster: Option<PathBuf>,

    /// Sheet of the roster to read
    #[arg(short, long)]
    sheet: Option<String>,

    /// Column holding the student names
    #[arg(long, value_name = "HEADER")]
    column: Option<String>,

    /// Placeholder text replaced by each name
    #[arg(short, long)]
    placeholder: Option<String>,

    /// Directory for the generated certificates
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Also replace placeholders split across formatting runs
    #[arg(long)]
    across_runs: bool,

    /// Record failing rows and keep going instead of aborting
    #[arg(long)]
    continue_on_error: bool,

    /// Show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Layer command-line overrides on top of the file configuration
    fn apply(self, mut config: GeneratorConfig) -> GeneratorConfig {
        if let Some(template) = self.template {
            config.template = template;
        }
        if let Some(roster) = self.roster {
            config.roster = roster;
        }
        if let Some(sheet) = self.sheet {
            config.sheet = sheet;
        }
        if let Some(column) = self.column {
            config.name_column = column;
        }
        if let Some(placeholder) = self.placeholder {
            config.placeholder = placeholder;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if self.across_runs {
            config.match_mode = MatchMode::AcrossRuns;
        }
        config.continue_on_error |= self.continue_on_error;
        config.dry_run |= self.dry_run;
        config
    }
}

fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    // Failures are reported through the log; the exit status stays 0
    if let Err(e) = run(cli) {
        tracing::error!(critical = true, "Critical error: {:#}", e);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    let config = cli.apply(config);

    let generator = match CertificateGenerator::new(config) {
        Ok(generator) => generator,
        Err(e @ CertError::MissingFile { .. }) => {
            tracing::error!("File not found: {}", e);
            return Ok(());
        }
        Err(e) => {
            tracing::error!("Failed to initialize certificate generation: {}", e);
            return Ok(());
        }
    };

    match generator.generate() {
        Ok(report) => {
            let config = generator.config();
            formatter::print_summary(&config.template, &report, config.dry_run);
        }
        Err(CertError::Schema { column }) => {
            tracing::error!(
                "Column '{}' not found in sheet '{}'",
                column,
                generator.roster().sheet
            );
        }
        Err(e) => {
            tracing::error!("An error occurred: {}", e);
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<GeneratorConfig> {
    if let Some(config_path) = path {
        return GeneratorConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()));
    }

    // Try to load default config from current directory if it exists
    let default_config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default_config_path.exists() {
        GeneratorConfig::from_file(&default_config_path).with_context(|| {
            format!(
                "Failed to load config from {}",
                default_config_path.display()
            )
        })
    } else {
        Ok(GeneratorConfig::default())
    }
}
