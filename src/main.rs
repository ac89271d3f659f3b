use anyhow::Result;
use clap::Parser;

use courtside_stats::config::{self, ServeArgs};
use courtside_stats::{logging, server};

/// Serves the stats JSON and the chart pages.
#[derive(Debug, Parser)]
#[command(name = "courtside_stats", version)]
struct Cli {
    #[command(flatten)]
    args: ServeArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    config::load_env_files();
    logging::init();

    let cli = Cli::parse();
    server::serve(&cli.args).await
}
