use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use crate::columns::{ColumnMap, RawTable};

/// Banner lines at the top of the league export that precede the data.
pub const CSV_BANNER_LINES: usize = 2;

pub fn read_csv_rows(path: &Path) -> Result<RawTable> {
    let file = File::open(path).with_context(|| format!("open csv {}", path.display()))?;
    parse_csv_rows(BufReader::new(file)).with_context(|| format!("read csv {}", path.display()))
}

/// Skips the banner lines, then reads every remaining line as a candidate
/// row. Lines the CSV parser rejects are counted as dropped and the read
/// carries on.
pub fn parse_csv_rows<R: BufRead>(mut reader: R) -> Result<RawTable> {
    let mut banner = String::new();
    for _ in 0..CSV_BANNER_LINES {
        banner.clear();
        if reader.read_line(&mut banner).context("read csv banner")? == 0 {
            break;
        }
    }

    let mut csv = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut dropped = 0usize;
    for record in csv.records() {
        match record {
            Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
            Err(err) if err.is_io_error() => {
                return Err(err).context("read csv record");
            }
            Err(_) => dropped += 1,
        }
    }

    Ok(RawTable {
        rows,
        columns: ColumnMap::csv(),
        dropped,
    })
}
