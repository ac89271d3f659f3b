use anyhow::Result;
use clap::Parser;

use courtside_stats::config::{self, ConvertArgs};
use courtside_stats::{logging, pipeline};

/// Converts the league CSV export into a JSON player list.
#[derive(Debug, Parser)]
#[command(name = "convert", version)]
struct Cli {
    #[command(flatten)]
    args: ConvertArgs,
}

fn main() -> Result<()> {
    config::load_env_files();
    logging::init();

    let cli = Cli::parse();
    let summary = pipeline::run_convert(&cli.args)?;

    println!(
        "Extracted {} players to {}",
        summary.players,
        summary.path.display()
    );
    Ok(())
}
