use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use crate::columns::{ColumnMap, RawTable};
use crate::http_client::fetch_page;

/// Loads the stats page and reads its table. A page that cannot be fetched
/// within `timeout`, or that has no table body, fails the whole fetch.
pub fn fetch_web_rows(url: &str, timeout: Duration) -> Result<RawTable> {
    info!(url, timeout_ms = timeout.as_millis() as u64, "loading stats page");
    let html = fetch_page(url, timeout)?;
    let table = parse_stats_table(&html).with_context(|| format!("reading stats table at {url}"))?;
    info!(
        rows = table.rows.len(),
        dropped = table.dropped,
        "stats table loaded"
    );
    Ok(table)
}

pub fn parse_stats_table(html: &str) -> Result<RawTable> {
    let document = Html::parse_document(html);
    let table_sel = selector("table")?;
    let row_sel = selector("tbody tr")?;
    let cell_sel = selector("td")?;
    let head_row_sel = selector("thead tr")?;
    let head_cell_sel = selector("th, td")?;

    let table = document
        .select(&table_sel)
        .find(|table| table.select(&row_sel).next().is_some())
        .ok_or_else(|| anyhow!("stats table body not found"))?;

    let body = table
        .select(&row_sel)
        .map(|row| row.select(&cell_sel).map(cell_text).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    // Grouping rows ("Shooting", "Rebounding") sit above the label row.
    let header = table
        .select(&head_row_sel)
        .last()
        .map(|row| row.select(&head_cell_sel).map(cell_text).collect::<Vec<_>>())
        .unwrap_or_default();
    let body_width = body.iter().map(Vec::len).max().unwrap_or(0);
    let columns = resolve_columns(&header, body_width);
    let min_cells = columns.min_cells();

    let mut rows = Vec::with_capacity(body.len());
    let mut dropped = 0usize;
    for cells in body {
        if cells.len() < min_cells {
            debug!(cells = cells.len(), min_cells, "dropping short row");
            dropped += 1;
            continue;
        }
        rows.push(cells);
    }

    Ok(RawTable {
        rows,
        columns,
        dropped,
    })
}

fn resolve_columns(header: &[String], body_width: usize) -> ColumnMap {
    if header.is_empty() {
        return ColumnMap::web();
    }
    match ColumnMap::web_from_header(header) {
        Some(map) if map.min_cells() > header.len() || map.min_cells() > body_width => {
            warn!(
                ?map,
                header_cells = header.len(),
                body_width,
                "header map is wider than the table; using stored column map"
            );
            ColumnMap::web()
        }
        Some(map) => {
            if map != ColumnMap::web() {
                warn!(?map, "table header disagrees with the stored column map; using header");
            }
            map
        }
        None => {
            warn!(?header, "table header missing expected labels; using stored column map");
            ColumnMap::web()
        }
    }
}

fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|err| anyhow!("invalid selector {css}: {err:?}"))
}

// Matches what a browser reports as the cell's visible text.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
