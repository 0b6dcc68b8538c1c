//! Govdash - Live Governance Dashboard
//!
//! Polls an MCP governance controller and renders its security posture:
//! composite score, findings, resources and MCP server inventory.

use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

mod cli;

use govdash::config::DashboardConfig;

#[derive(Parser, Debug)]
#[command(name = "govdash")]
#[command(version)]
#[command(about = "Live security-posture dashboard for MCP governance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<cli::DashboardCommands>,

    /// Path to the dashboard configuration file
    #[arg(short, long, env = "GOVDASH_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Governance controller URL
    #[arg(long, env = "GOVDASH_CONTROLLER_URL", global = true)]
    controller_url: Option<String>,

    /// Refresh interval in seconds
    #[arg(long, env = "GOVDASH_INTERVAL", global = true)]
    interval: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

impl Cli {
    /// File config with command-line and environment overrides applied
    fn dashboard_config(&self) -> anyhow::Result<DashboardConfig> {
        let mut config = DashboardConfig::load_or_default(self.config.as_deref())?;

        if let Some(url) = &self.controller_url {
            config.controller_url = url.clone();
        }
        if let Some(interval) = self.interval {
            config.refresh_interval_secs = interval;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.dashboard_config()?;
    debug!("Using controller {}", config.controller_url);

    let ctx = cli::CliContext::new(config);

    match &cli.command {
        Some(command) => command.execute(&ctx).await?,
        // Default: live dashboard
        None => cli::DashboardCommands::Watch.execute(&ctx).await?,
    }

    Ok(())
}
