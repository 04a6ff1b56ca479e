// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use check_validator::{CheckValidator, ValidationReport, ValidatorConfig};

#[derive(Parser)]
#[command(name = "check-validator")]
#[command(version)]
#[command(about = "Validate check-record CSV files before upload")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file overriding reference date, window, payee limit or field counts
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a file and print every error found
    Validate {
        /// CSV file to check
        file: PathBuf,

        /// Also write the errors (one per line) to this file
        #[arg(long, short)]
        save: Option<PathBuf>,

        /// Output format
        #[arg(long, short = 'o', default_value = "text", value_enum)]
        format: OutputFormat,
    },

    /// Validate a file and browse the errors in the terminal
    #[cfg(feature = "tui")]
    View {
        /// CSV file to check
        file: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let validator = CheckValidator::with_config(load_config(cli.config.as_deref())?);

    match cli.command {
        Commands::Validate { file, save, format } => run_validate(&validator, &file, save, format),
        #[cfg(feature = "tui")]
        Commands::View { file } => run_view(&validator, &file),
    }
}

fn load_config(path: Option<&Path>) -> Result<ValidatorConfig> {
    match path {
        Some(path) => ValidatorConfig::from_file(path),
        None => Ok(ValidatorConfig::default()),
    }
}

fn exit_code(report: &ValidationReport) -> ExitCode {
    if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_validate(
    validator: &CheckValidator,
    file: &Path,
    save: Option<PathBuf>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let report = validator.validate_path(file);

    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => {
            println!("📂 {}", file.display());
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!("{}", report.to_text());
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            if !report.is_fatal() {
                println!("✓ {} checks read", report.record_count());
            }
            if report.is_valid() {
                println!("✅ CSV is valid! {}", report.summary());
            } else {
                println!("❌ {} See details above.", report.summary());
            }
        }
    }

    if let Some(out) = save {
        if report.save_to(&out)? {
            eprintln!("✓ Errors saved to {}", out.display());
        }
    }

    Ok(exit_code(&report))
}

#[cfg(feature = "tui")]
fn run_view(validator: &CheckValidator, file: &Path) -> Result<ExitCode> {
    let report = validator.validate_path(file);

    let mut app = ui::App::new(file.to_path_buf(), report);
    ui::run_ui(&mut app)?;

    Ok(exit_code(&app.report))
}
