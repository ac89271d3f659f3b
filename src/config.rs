use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

pub const DEFAULT_STATS_URL: &str = "https://www.unrivaled.basketball/stats/player";
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_DATA_PATH: &str = "data.json";
pub const DEFAULT_CSV_PATH: &str = "wnba-player-stats.csv";
pub const DEFAULT_WNBA_PATH: &str = "wnba.json";
pub const DEFAULT_MIN_SURVIVAL: f64 = 0.5;
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// `.env.local` wins over `.env`; real environment variables win over both.
pub fn load_env_files() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

#[derive(Debug, Clone, Args)]
pub struct SurvivalArgs {
    /// Fail when fewer than this fraction of source rows become records
    /// (0 disables the check).
    #[arg(
        long,
        env = "MIN_ROW_SURVIVAL",
        default_value_t = DEFAULT_MIN_SURVIVAL,
        value_parser = parse_ratio
    )]
    pub min_survival: f64,
}

#[derive(Debug, Clone, Args)]
pub struct ScrapeArgs {
    /// Player stats page.
    #[arg(long, env = "STATS_URL", default_value = DEFAULT_STATS_URL)]
    pub url: String,

    /// How long to wait for the page and its stats table.
    #[arg(long, env = "STATS_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    #[arg(short, long, env = "STATS_DATA_PATH", default_value = DEFAULT_DATA_PATH)]
    pub out: PathBuf,

    #[command(flatten)]
    pub survival: SurvivalArgs,
}

impl ScrapeArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    /// League CSV export.
    #[arg(short, long, env = "WNBA_CSV_PATH", default_value = DEFAULT_CSV_PATH)]
    pub input: PathBuf,

    #[arg(short, long, env = "WNBA_JSON_PATH", default_value = DEFAULT_WNBA_PATH)]
    pub out: PathBuf,

    #[command(flatten)]
    pub survival: SurvivalArgs,
}

#[derive(Debug, Clone, Args)]
pub struct DataPaths {
    /// Scraped stats document.
    #[arg(long, env = "STATS_DATA_PATH", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Converted league file.
    #[arg(long, env = "WNBA_JSON_PATH", default_value = DEFAULT_WNBA_PATH)]
    pub wnba: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct ChartsArgs {
    #[command(flatten)]
    pub paths: DataPaths,

    #[arg(long, env = "CHARTS_DIR", default_value = DEFAULT_STATIC_DIR)]
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub paths: DataPaths,

    #[arg(long, env = "STATS_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,

    #[arg(long, env = "STATIC_DIR", default_value = DEFAULT_STATIC_DIR)]
    pub static_dir: PathBuf,
}

fn parse_ratio(raw: &str) -> Result<f64, String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("{raw:?} is not a number: {err}"))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("{value} is outside 0..=1"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::{ConvertArgs, DEFAULT_MIN_SURVIVAL, ScrapeArgs};

    #[derive(Debug, Parser)]
    struct ScrapeCli {
        #[command(flatten)]
        args: ScrapeArgs,
    }

    #[derive(Debug, Parser)]
    struct ConvertCli {
        #[command(flatten)]
        args: ConvertArgs,
    }

    #[test]
    fn scrape_flags_override_defaults() {
        let cli = ScrapeCli::try_parse_from([
            "scrape",
            "--url",
            "http://localhost/stats",
            "--timeout-ms",
            "1500",
            "--out",
            "out/stats.json",
            "--min-survival",
            "0.8",
        ])
        .expect("valid flags");
        assert_eq!(cli.args.url, "http://localhost/stats");
        assert_eq!(cli.args.timeout().as_millis(), 1500);
        assert_eq!(cli.args.out, PathBuf::from("out/stats.json"));
        assert_eq!(cli.args.survival.min_survival, 0.8);
    }

    #[test]
    fn convert_defaults_apply() {
        let cli = ConvertCli::try_parse_from(["convert", "-i", "league.csv"]).expect("valid flags");
        assert_eq!(cli.args.input, PathBuf::from("league.csv"));
        assert_eq!(cli.args.survival.min_survival, DEFAULT_MIN_SURVIVAL);
    }

    #[test]
    fn survival_ratio_must_be_a_fraction() {
        assert!(ConvertCli::try_parse_from(["convert", "--min-survival", "1.5"]).is_err());
        assert!(ConvertCli::try_parse_from(["convert", "--min-survival", "abc"]).is_err());
    }
}
