//! Shipcheck - post-release verification.
//!
//! Exit status: 0 when every check passed, 1 when any check failed,
//! 2 on a usage or configuration error (no check is run).

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use shipcheck_common::ReleaseVersion;
use shipcheck_report::{render, OutputFormat};
use shipcheck_verifier::{ReleaseConfig, Verifier};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const USAGE_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "shipcheck")]
#[command(
    author,
    version,
    about = "Verify that every release artifact agrees on the released version"
)]
struct Cli {
    /// Version to validate, e.g. 1.2.0
    #[arg(value_name = "VERSION")]
    release: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    format: String,

    /// Configuration file (defaults to shipcheck.yaml in the project root)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Project root that relative paths are resolved against
    #[arg(long)]
    project_root: Option<PathBuf>,
}

fn print_usage() {
    println!("Usage: shipcheck [OPTIONS] <VERSION>");
    println!("Example: shipcheck 1.2.0");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            eprint!("{}", e.render());
            print_usage();
            return ExitCode::from(USAGE_ERROR);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            print_usage();
            ExitCode::from(USAGE_ERROR)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let version = ReleaseVersion::new(cli.release).context("Invalid version argument")?;
    let format: OutputFormat = cli.format.parse()?;

    let config = ReleaseConfig::load(cli.config.as_deref(), cli.project_root.as_deref())
        .context("Failed to load configuration")?;
    debug!("Configuration: {:?}", config);

    let verifier = Verifier::new(&config).context("Failed to set up verifier")?;
    let report = verifier.run(&version).await;

    print!("{}", render(format, &version, &report)?);
    Ok(ExitCode::from(report.exit_code() as u8))
}
