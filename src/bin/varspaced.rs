//! `varspaced` – line-protocol object server daemon.

use std::io::{self, BufReader, BufWriter};
use std::net::TcpListener;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use varspace::context::{Context, ContextConfig};
use varspace::server::LineService;

#[derive(Parser)]
#[command(name = "varspaced")]
#[command(about = "In-memory object server speaking a line-oriented message protocol", long_about = None)]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append the execution log to this file instead of stdout
    #[arg(long)]
    logfile: Option<PathBuf>,

    /// Fractional digits used when rendering floats
    #[arg(long)]
    float_precision: Option<usize>,

    /// Absolute tolerance for float equality
    #[arg(long)]
    float_comparison_tolerance: Option<f64>,

    /// Suppress the stdout execution log when no logfile is configured
    #[arg(long)]
    quiet: bool,

    /// Listen on TCP ADDR instead of stdio
    #[arg(long)]
    listen: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ContextConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ContextConfig::default(),
    };
    if let Some(logfile) = cli.logfile {
        config.logfile = Some(logfile);
    }
    if let Some(precision) = cli.float_precision {
        config.float_precision = precision;
    }
    if let Some(tolerance) = cli.float_comparison_tolerance {
        config.float_comparison_tolerance = tolerance;
    }
    if cli.quiet {
        config.quiet = true;
    }

    let context = Context::new(config).context("failed to initialize dispatcher")?;
    let mut service = LineService::new(context);

    match cli.listen {
        Some(addr) => run_tcp(&mut service, &addr),
        None => run_stdio(&mut service),
    }
}

fn run_stdio(service: &mut LineService) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let reader = stdin.lock();
    let writer = BufWriter::new(stdout.lock());
    service.handle(reader, writer)?;
    Ok(())
}

fn run_tcp(service: &mut LineService, addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).with_context(|| format!("failed to bind {addr}"))?;
    let actual = listener.local_addr()?;
    tracing::info!(%actual, "varspaced listening");

    for incoming in listener.incoming() {
        match incoming {
            Ok(stream) => {
                let peer = stream.peer_addr().ok();
                let reader = BufReader::new(stream.try_clone()?);
                let writer = BufWriter::new(stream);
                if let Err(err) = service.handle(reader, writer) {
                    tracing::warn!(?peer, %err, "connection error");
                }
            }
            Err(err) => {
                tracing::warn!(%err, "failed to accept connection");
            }
        }
    }

    Ok(())
}
