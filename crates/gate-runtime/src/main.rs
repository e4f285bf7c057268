//! # GMN Gate
//!
//! Command-line client for GMN token-gated content.
//!
//! ```bash
//! # Who am I on Polygon, and what do I hold?
//! GMN_PRIVATE_KEY=0x... gmn-gate account
//!
//! # Sign in and read a post
//! GMN_PRIVATE_KEY=0x... gmn-gate post my-first-post
//!
//! # Against a local node with unlocked accounts
//! gmn-gate --network localhost --wallet rpc mint --quantity 2 --wait
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use gate_runtime::{commands, AppConfig, Cli, GateContainer};
use gmn_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::from_env().context("reading GMN_* environment")?;
    cli.apply(&mut config).context("applying command-line flags")?;
    config.validate().context("invalid configuration")?;

    // Initialize logging
    let mut telemetry = TelemetryConfig::from_env().with_verbosity(cli.verbose);
    if cli.json_logs {
        telemetry.json_logs = true;
    }
    init_telemetry(&telemetry).context("initializing telemetry")?;
    debug!(?config, "Configuration loaded");

    let container = GateContainer::build(config)?;

    let mut stdout = std::io::stdout();
    let result = commands::run(&container, &cli.command, &mut stdout).await;
    info!(command = ?cli.command, ok = result.is_ok(), "Command finished");

    if cli.print_metrics {
        let metrics = encode_metrics().context("encoding metrics")?;
        print!("{metrics}");
    }

    result
}
