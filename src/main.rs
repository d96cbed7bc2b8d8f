//! datascrub - Chainable cleaning pipeline for tabular data

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing_subscriber::{fmt, EnvFilter};

use datascrub::clean::{CleanReport, OutlierMethod};
use datascrub::config::{Config, ExportFormat};
use datascrub::pipeline::{Pipeline, DEFAULT_OUTLIER_THRESHOLD};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliExportFormat {
    Csv,
    Json,
    Parquet,
    Sql,
}

impl From<CliExportFormat> for ExportFormat {
    fn from(f: CliExportFormat) -> Self {
        match f {
            CliExportFormat::Csv => ExportFormat::Csv,
            CliExportFormat::Json => ExportFormat::Json,
            CliExportFormat::Parquet => ExportFormat::Parquet,
            CliExportFormat::Sql => ExportFormat::Sql,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutlierMethod {
    Cap,
    Remove,
}

impl From<CliOutlierMethod> for OutlierMethod {
    fn from(m: CliOutlierMethod) -> Self {
        match m {
            CliOutlierMethod::Cap => OutlierMethod::Cap,
            CliOutlierMethod::Remove => OutlierMethod::Remove,
        }
    }
}

/// Chainable cleaning pipeline for tabular data (CSV, Excel, Parquet, JSON, SQLite)
#[derive(Parser, Debug)]
#[command(name = "datascrub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file, or SQLite database when --query is given
    input: PathBuf,

    /// Where to write the cleaned table
    #[arg(short, long)]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: CliExportFormat,

    /// Read the input as a SQLite database and clean this query's result set
    #[arg(long)]
    query: Option<String>,

    /// For Excel files: which sheet to clean
    #[arg(long)]
    sheet: Option<String>,

    /// IQR multiplier for outlier bounds
    #[arg(long, default_value_t = DEFAULT_OUTLIER_THRESHOLD)]
    threshold: f64,

    /// What to do with outliers
    #[arg(long, value_enum, default_value = "cap")]
    method: CliOutlierMethod,

    /// Skip column-name standardization and cell trimming
    #[arg(long)]
    skip_standardize: bool,

    /// Skip duplicate and empty-row removal
    #[arg(long)]
    skip_garbage: bool,

    /// Skip statistical null imputation
    #[arg(long)]
    skip_impute: bool,

    /// Skip outlier handling
    #[arg(long)]
    skip_outliers: bool,

    /// Skip datetime promotion and categorical compaction
    #[arg(long)]
    skip_optimize: bool,

    /// Print a per-stage summary after cleaning
    #[arg(long)]
    report: bool,
}

fn main() -> ExitCode {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.query {
        Some(query) => Config::from_sql(cli.input.to_string_lossy(), query.as_str()),
        None => Config::from_file(&cli.input),
    };
    if let Some(sheet) = &cli.sheet {
        config = config.with_sheet_name(sheet.as_str());
    }

    let mut pipeline = Pipeline::load(&config)?;
    if !cli.skip_standardize {
        pipeline = pipeline.standardize();
    }
    if !cli.skip_garbage {
        pipeline = pipeline.handle_garbage();
    }
    if !cli.skip_impute {
        pipeline = pipeline.impute_missing();
    }
    if !cli.skip_outliers {
        pipeline = pipeline.handle_outliers(cli.threshold, cli.method.into());
    }
    if !cli.skip_optimize {
        pipeline = pipeline.optimize();
    }

    pipeline.export(&cli.output, cli.format.into())?;

    if cli.report {
        print_report(pipeline.report())?;
    }

    Ok(())
}

fn print_report(report: &CleanReport) -> Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    writeln!(
        stdout,
        "datascrub: {} rows × {} columns in",
        report.initial_rows, report.initial_columns
    )?;
    stdout.reset()?;

    if report.stages.is_empty() {
        writeln!(stdout, "No stages applied.")?;
        return Ok(());
    }

    let summary = tabled::Table::new(&report.stages);
    writeln!(stdout, "{}", summary)?;
    Ok(())
}
