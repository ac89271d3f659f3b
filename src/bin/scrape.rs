use anyhow::Result;
use clap::Parser;

use courtside_stats::config::{self, ScrapeArgs};
use courtside_stats::{logging, pipeline};

/// Scrapes the player stats page into a JSON document.
#[derive(Debug, Parser)]
#[command(name = "scrape", version)]
struct Cli {
    #[command(flatten)]
    args: ScrapeArgs,
}

fn main() -> Result<()> {
    config::load_env_files();
    logging::init();

    let cli = Cli::parse();
    let summary = pipeline::run_scrape(&cli.args)?;

    println!("Scraped {} players", summary.players);
    if summary.skipped > 0 {
        println!(
            "Skipped {} of {} rows",
            summary.skipped, summary.candidates
        );
    }
    println!("Wrote {}", summary.path.display());
    Ok(())
}
