//! Binary entry point for the decode CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Report undocumented public definitions under the current directory
//! decode coverage
//!
//! # Resolve a reference, optionally from inside another definition
//! decode lookup 'Foo::Bar#baz'
//! decode lookup Bar --relative-to 'Foo#run' lib/
//!
//! # List definitions, or show the parsed documentation of one
//! decode --format json list
//! decode docs 'Foo::Bar#baz'
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use decode::cli::{build_index, load_config, run_coverage, run_docs, run_list, run_lookup};
use decode::error::{CliError, OutputErrorCode};
use decode::output::{emit, emit_response, ErrorResponse, OutputFormat, TextOutput};

// ============================================================================
// CLI Structure
// ============================================================================

/// Documentation coverage and symbol lookup for Ruby code.
#[derive(Parser, Debug)]
#[command(name = "decode", version, about = "Documentation coverage and symbol lookup for Ruby code")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

/// Global arguments shared by all subcommands.
#[derive(Parser, Debug)]
struct GlobalArgs {
    /// Log level for tracing output.
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Configuration file (default: .decode/config.toml under the root).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Report documentation coverage of public definitions.
    ///
    /// Exits with status 4 when coverage is below the threshold.
    Coverage {
        /// Project root or single file.
        #[arg(default_value = ".")]
        root: PathBuf,
        /// Minimum documented percentage (default: from config, else 100).
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Resolve a reference to a definition.
    Lookup {
        /// The reference, e.g. `Foo::Bar#baz` or `ruby Foo.new`.
        reference: String,
        /// Qualified name of the definition to resolve from.
        #[arg(long)]
        relative_to: Option<String>,
        /// Language used to parse the reference.
        #[arg(long)]
        language: Option<String>,
        /// Project root or single file.
        #[arg(default_value = ".")]
        root: PathBuf,
    },
    /// List definitions in lexical order.
    List {
        /// Only list definitions beneath this qualified name.
        #[arg(long)]
        under: Option<String>,
        /// Project root or single file.
        #[arg(default_value = ".")]
        root: PathBuf,
    },
    /// Show the parsed documentation of a definition.
    Docs {
        /// Qualified name, e.g. `Foo::Bar#baz`.
        name: String,
        /// Project root or single file.
        #[arg(default_value = ".")]
        root: PathBuf,
    },
}

impl Command {
    fn root(&self) -> &Path {
        match self {
            Command::Coverage { root, .. }
            | Command::Lookup { root, .. }
            | Command::List { root, .. }
            | Command::Docs { root, .. } => root,
        }
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.global.log_level);

    let format = cli.global.format;
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let error_code = OutputErrorCode::from(&err);
            // A failing coverage report has already been emitted.
            if matches!(err, CliError::InsufficientDocumentation { .. }) {
                tracing::warn!("{}", err);
            } else {
                report_error(&err, format);
            }
            ExitCode::from(error_code.code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// JSON errors go to stdout so consumers parse one document; text errors go
/// to stderr.
fn report_error(err: &CliError, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let _ = emit_response(&ErrorResponse::new(err), &mut io::stdout());
            let _ = io::stdout().flush();
        }
        OutputFormat::Text => {
            let _ = writeln!(io::stderr(), "error: {}", err);
        }
    }
}

/// Execute the CLI command.
fn execute(cli: Cli) -> Result<(), CliError> {
    let Cli { global, command } = cli;
    let root = command.root().to_path_buf();
    let config = load_config(&root, global.config.as_deref())?;
    let index = build_index(&root, &config)?;

    match command {
        Command::Coverage { threshold, .. } => {
            let response = run_coverage(&index, &config, threshold)?;
            write(&response, global.format)?;
            if response.passed() {
                Ok(())
            } else {
                Err(CliError::InsufficientDocumentation {
                    documented: response.documented,
                    total: response.total,
                    percentage: response.percentage,
                    threshold: response.threshold,
                })
            }
        }
        Command::Lookup {
            reference,
            relative_to,
            language,
            ..
        } => write(
            &run_lookup(&index, &reference, relative_to.as_deref(), language.as_deref())?,
            global.format,
        ),
        Command::List { under, .. } => write(&run_list(&index, under.as_deref())?, global.format),
        Command::Docs { name, .. } => write(&run_docs(&index, &name)?, global.format),
    }
}

fn write<T: Serialize + TextOutput>(response: &T, format: OutputFormat) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    emit(response, format, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
