use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{Config, File};
use lpscan_core::scanner::normalize::external_links;
use lpscan_core::{
    render_report, FixtureSource, OutputFormat, ReportSource, RugCheckClient, ScanSettings,
    TokenAddress, TokenScanner,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "lpscan",
    author,
    version,
    about = "Solana token risk scanner backed by RugCheck"
)]
struct Cli {
    /// Config file (TOML, YAML or JSON) with scan settings
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// RugCheck API base URL
    #[arg(long, value_name = "URL", global = true)]
    endpoint: Option<String>,

    /// Request timeout, e.g. `10s` or `1m`
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration, global = true)]
    timeout: Option<Duration>,

    /// Retries on server errors and transport failures
    #[arg(long = "max-retries", value_name = "N", global = true)]
    max_retries: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch and render the risk report for a token
    Scan {
        /// Token contract (mint) address
        address: String,
        /// Emit the report as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
        /// Read the RugCheck payload from a file instead of the API
        #[arg(long, value_name = "FILE")]
        fixture: Option<PathBuf>,
        /// Fail when the report cannot be fetched
        #[arg(long)]
        strict: bool,
        /// Suppress the scan log on stderr
        #[arg(long, short)]
        quiet: bool,
    },
    /// Print explorer links for a token
    Links {
        /// Token contract (mint) address
        address: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;
    match cli.command {
        Commands::Scan {
            address,
            json,
            fixture,
            strict,
            quiet,
        } => {
            let opts = ScanOptions {
                format: if json {
                    OutputFormat::Json
                } else {
                    OutputFormat::Human
                },
                strict: strict || settings.strict,
                quiet,
            };
            match fixture {
                Some(path) => {
                    let source = Arc::new(FixtureSource::new(path));
                    scan(source, &address, &settings, opts).await?
                }
                None => {
                    let source = Arc::new(RugCheckClient::new(&settings)?);
                    scan(source, &address, &settings, opts).await?
                }
            }
        }
        Commands::Links { address } => links(&address)?,
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
struct ScanOptions {
    format: OutputFormat,
    strict: bool,
    quiet: bool,
}

async fn scan<S: ReportSource>(
    source: Arc<S>,
    address: &str,
    settings: &ScanSettings,
    opts: ScanOptions,
) -> Result<()> {
    let scanner =
        TokenScanner::with_thresholds(source, settings.thresholds.clone()).strict(opts.strict);
    let mut step = 0usize;
    let report = scanner
        .scan_with_progress(address, |stage| {
            if !opts.quiet {
                eprintln!("[{step:02}] {}", stage.message());
            }
            step += 1;
        })
        .await?;
    println!("{}", render_report(&report, opts.format)?);
    Ok(())
}

fn links(address: &str) -> Result<()> {
    let address = TokenAddress::parse(address).context("Enter a valid Solana contract address")?;
    for link in external_links(&address) {
        println!("{:<9} {}", link.label, link.url);
    }
    Ok(())
}

/// Environment (or config file plus `LPSCAN_*` overlay), then command-line flags.
fn resolve_settings(cli: &Cli) -> Result<ScanSettings> {
    let mut settings = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => ScanSettings::from_env(),
    };
    if let Some(endpoint) = &cli.endpoint {
        settings.endpoint = Some(endpoint.clone());
    }
    if let Some(timeout) = cli.timeout {
        settings.set_timeout(timeout);
    }
    if let Some(retries) = cli.max_retries {
        settings.max_retries = retries;
    }
    debug!(?settings, "resolved scan settings");
    Ok(settings)
}

fn load_config_file(path: &Path) -> Result<ScanSettings> {
    let settings: ScanSettings = Config::builder()
        .add_source(File::from(path))
        .build()
        .with_context(|| format!("failed to load config from {}", path.display()))?
        .try_deserialize()
        .with_context(|| format!("invalid scan settings in {}", path.display()))?;
    Ok(settings.with_env_overrides())
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tokio=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
