use clap::Parser;
use colored::Colorize;
use std::io::{self, Write};
use std::{num::NonZeroUsize, path::Path, path::PathBuf, process::ExitCode};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};
use wordfreq::{analyze, AnalysisConfig, CliOverrides, EncodingMode, Report, TallyError};

type Result<T> = std::result::Result<T, TallyError>;
type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Count word frequencies across text files
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files to analyze
    files: Vec<PathBuf>,

    /// Number of threads to use
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How to handle invalid UTF-8 sequences (failfast|lossy)
    #[arg(long)]
    encoding: Option<EncodingMode>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.files.is_empty() {
        eprintln!(
            "{} no input files given\n\nUsage: wordfreq-cli <FILE>...",
            "error:".red().bold()
        );
        return Ok(());
    }

    // Installed before the config load so skipped config files get reported
    let env_filter = EnvFilter::try_from_default_env().ok();
    let level_from_env = env_filter.is_some();
    let handle = init_logging(env_filter.unwrap_or_else(|| {
        EnvFilter::new(cli.log_level.as_deref().unwrap_or("warn"))
    }));

    let config = AnalysisConfig::load_from(cli.config.as_deref())?.merge_with_cli(CliOverrides {
        files: cli.files,
        thread_count: cli.threads,
        log_level: cli.log_level,
        encoding_mode: cli.encoding,
    });
    if !level_from_env {
        if let Err(e) = handle.reload(EnvFilter::new(&config.log_level)) {
            warn!("Could not apply log level {}: {}", config.log_level, e);
        }
    }

    let report = analyze(&config)?;
    persist_report(&report, Path::new(wordfreq::REPORT_FILE_NAME));
    print_report(&report, &mut io::stdout().lock());
    Ok(())
}

fn init_logging(filter: EnvFilter) -> FilterHandle {
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
    handle
}

fn persist_report(report: &Report, path: &Path) {
    match report.write_to(path) {
        Ok(()) => info!("Report written to {}", path.display()),
        Err(e) => warn!("{}", e),
    }
}

/// Writes the report to `out`. A reader that went away is not an error.
fn print_report(report: &Report, out: &mut impl Write) {
    match write!(out, "{}", report).and_then(|()| out.flush()) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(e) => warn!("Failed to print report: {}", e),
    }
}
