use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::columns::RawTable;
use crate::config::{ConvertArgs, ScrapeArgs};
use crate::csv_table::read_csv_rows;
use crate::document::{StatsDocument, aggregate};
use crate::extract::{Skip, extract};
use crate::persist::{write_document, write_players};
use crate::stats::PlayerStatRow;
use crate::web_table::fetch_web_rows;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Web,
    Csv,
}

#[derive(Debug, Clone, Default)]
pub struct Collected {
    pub records: Vec<PlayerStatRow>,
    /// Index into `RawTable::rows`, and why it was left out. Rows the
    /// adapter already dropped are not counted in that index.
    pub skipped: Vec<(usize, Skip)>,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub path: PathBuf,
    pub players: usize,
    pub candidates: usize,
    pub skipped: usize,
}

pub fn collect_records(table: &RawTable, source: Source) -> Collected {
    let mut out = Collected::default();
    for (idx, cells) in table.rows.iter().enumerate() {
        match extract(cells, &table.columns) {
            Ok(record) => out.records.push(record),
            Err(reason) => {
                if source == Source::Web {
                    warn!(row = idx, cells = ?cells, "skipping row: {reason}");
                }
                out.skipped.push((idx, reason));
            }
        }
    }
    out
}

/// Guards against column drift upstream, which shows up as most rows
/// failing extraction rather than as an error.
pub fn check_survival(candidates: usize, kept: usize, min_ratio: f64) -> Result<()> {
    if candidates == 0 || min_ratio <= 0.0 {
        return Ok(());
    }
    let ratio = kept as f64 / candidates as f64;
    if ratio < min_ratio {
        bail!(
            "only {kept} of {candidates} rows produced records ({:.0}% < {:.0}%); \
             the source layout may have changed",
            ratio * 100.0,
            min_ratio * 100.0
        );
    }
    Ok(())
}

/// Returns the document and the rows that were skipped on the way.
pub fn document_from_table<F>(
    table: &RawTable,
    min_survival: f64,
    now: F,
) -> Result<(StatsDocument, Vec<(usize, Skip)>)>
where
    F: FnOnce() -> DateTime<Utc>,
{
    let Collected { records, skipped } = collect_records(table, Source::Web);
    check_survival(table.candidates(), records.len(), min_survival)?;
    Ok((aggregate(records, now), skipped))
}

pub fn players_from_table(table: &RawTable, min_survival: f64) -> Result<Collected> {
    let collected = collect_records(table, Source::Csv);
    check_survival(table.candidates(), collected.records.len(), min_survival)?;
    Ok(collected)
}

/// Scrape, extract, and replace the output document. Nothing is written
/// unless every step succeeds.
pub fn run_scrape(args: &ScrapeArgs) -> Result<RunSummary> {
    let table = fetch_web_rows(&args.url, args.timeout())?;
    let (doc, skipped) = document_from_table(&table, args.survival.min_survival, Utc::now)?;
    write_document(&doc, &args.out)?;
    info!(path = %args.out.display(), players = doc.players.len(), "wrote stats document");
    Ok(RunSummary {
        path: args.out.clone(),
        players: doc.players.len(),
        candidates: table.candidates(),
        skipped: skipped.len() + table.dropped,
    })
}

pub fn run_convert(args: &ConvertArgs) -> Result<RunSummary> {
    let table = read_csv_rows(&args.input)?;
    let collected = players_from_table(&table, args.survival.min_survival)?;
    write_players(&collected.records, &args.out)?;
    info!(path = %args.out.display(), players = collected.records.len(), "wrote league players");
    Ok(RunSummary {
        path: args.out.clone(),
        players: collected.records.len(),
        candidates: table.candidates(),
        skipped: collected.skipped.len() + table.dropped,
    })
}
