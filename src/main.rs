//! Valform entry point.
//!
//! Parses the CLI, initializes tracing, loads configuration (file, then
//! environment overrides, then flags), and dispatches to the funnel
//! driver.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

use valform::config::FunnelConfig;
use valform::funnel;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            config,
            api_url,
            entry_url,
        } => {
            let mut config = FunnelConfig::load(config.as_deref())?;
            if let Some(api_url) = api_url {
                config.api_url = api_url;
            }
            let entry_url = entry_url
                .map(|raw| Url::parse(&raw).context("invalid --entry-url"))
                .transpose()?;

            info!(api_url = %config.api_url, "starting funnel");
            funnel::run(config, entry_url).await
        }
        Commands::Steps { land_only } => {
            funnel::print_steps(land_only);
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
