//! `fixture-data`: inspect and validate parameterised test fixtures.
//!
//! `show` prints the records a test method would receive, one JSON line per
//! record. `check` materialises every record in a class's fixture and fails
//! when any of them is invalid.

use std::io::{self, Write};
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use fixture_data::{ConfigOverrides, DataProvider, ProviderConfig};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fixture-data", version, about = "Inspect parameterised test fixtures")]
struct Cli {
    /// Configuration file to read instead of `fixture_data.toml`.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<Utf8PathBuf>,
    #[command(flatten)]
    overrides: ConfigOverrides,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the materialised records of a test method as JSON lines.
    Show {
        /// Test class, naming `<CLASS>.json` in the fixture directory.
        class: String,
        /// Test method whose records are printed.
        method: String,
    },
    /// Validate every record of a test class.
    Check {
        /// Test class, naming `<CLASS>.json` in the fixture directory.
        class: String,
    },
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    init_tracing();
    let cli = Cli::parse();
    let config = ProviderConfig::load_from(cli.config.as_deref(), &cli.overrides)
        .wrap_err("failed to load configuration")?;
    let provider = DataProvider::from_config(&config)?;
    let mut out = io::stdout().lock();
    match cli.command {
        Command::Show { class, method } => show(&provider, &class, &method, &mut out),
        Command::Check { class } => {
            let valid = provider
                .check(&class)
                .wrap_err_with(|| format!("{class} has invalid records"))?;
            writeln!(out, "{class}: {valid} records ok")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn show(provider: &DataProvider, class: &str, method: &str, out: &mut impl Write) -> Result<ExitCode> {
    let mut records = provider.records(class, method)?;
    let mut failed = false;
    while let Some((index, result)) = records.next_indexed() {
        let line = match result {
            Ok(data) => serde_json::to_string(&data)?,
            Err(err) => {
                failed = true;
                json!({ "index": index, "error": err.to_string() }).to_string()
            }
        };
        writeln!(out, "{line}")?;
    }
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}
