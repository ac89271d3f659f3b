use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use courtside_stats::charts::{chart_color, render_bar_chart, render_document_charts, render_league_comparison};
use courtside_stats::compare::{LEADERS_TOP_N, league_averages, top_players};
use courtside_stats::config::{self, ChartsArgs};
use courtside_stats::logging;
use courtside_stats::persist::{read_any_players, read_document};
use courtside_stats::stats::StatField;

const LEAGUE_CHART: &str = "league_compare_chart.svg";
const LEADERS_CHART: &str = "wnba_points_top10_chart.svg";

/// Renders bar charts from the scraped stats document.
#[derive(Debug, Parser)]
#[command(name = "charts", version)]
struct Cli {
    #[command(flatten)]
    args: ChartsArgs,
}

fn main() -> Result<()> {
    config::load_env_files();
    logging::init();

    let cli = Cli::parse();
    let args = cli.args;

    let doc = read_document(&args.paths.data)?;
    let mut written = render_document_charts(&doc.players, &args.out_dir)?;

    if args.paths.wnba.exists() {
        let other = read_any_players(&args.paths.wnba)?;
        if let (Some(primary), Some(other)) = (league_averages(&doc.players), league_averages(&other)) {
            let svg = render_league_comparison("Unrivaled", &primary, "WNBA", &other);
            let path = args.out_dir.join(LEAGUE_CHART);
            fs::write(&path, svg).with_context(|| format!("write {}", path.display()))?;
            written.push(path);
        }

        let leaders = top_players(&other, StatField::Points, LEADERS_TOP_N);
        let labels = leaders.iter().map(|r| r.player.as_str()).collect::<Vec<_>>();
        let values = leaders
            .iter()
            .map(|r| r.points.unwrap_or(0.0))
            .collect::<Vec<_>>();
        let svg = render_bar_chart(
            "Top 10 WNBA Scorers",
            StatField::Points.label(),
            &labels,
            &values,
            chart_color(StatField::Points),
        );
        let path = args.out_dir.join(LEADERS_CHART);
        fs::write(&path, svg).with_context(|| format!("write {}", path.display()))?;
        written.push(path);
    } else {
        info!(path = %args.paths.wnba.display(), "no league file; skipping comparison chart");
    }

    let names = written
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    println!("Charts saved as {}", names.join(", "));
    Ok(())
}
