//! CLI command definitions using clap.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Valform - property valuation lead funnel
#[derive(Parser, Debug)]
#[command(name = "valform")]
#[command(version)]
#[command(about = "Run the property valuation funnel from the terminal")]
#[command(
    long_about = "Valform drives the branching valuation wizard: collects property and \
                  qualification answers, submits the lead, and runs phone verification."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the funnel interactively
    Run {
        /// Config file (JSON or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Leads API base URL (overrides config)
        #[arg(long)]
        api_url: Option<String>,

        /// Entry URL carrying attribution query parameters
        #[arg(long)]
        entry_url: Option<String>,
    },

    /// Print the step table
    Steps {
        /// Show the land-only route
        #[arg(long, default_value_t = false)]
        land_only: bool,
    },
}
