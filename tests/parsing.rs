use std::fs;
use std::path::PathBuf;

use courtside_stats::columns::ColumnMap;
use courtside_stats::csv_table::read_csv_rows;
use courtside_stats::extract::Skip;
use courtside_stats::pipeline::{Source, collect_records};
use courtside_stats::stats::{PlayerStatRow, StatField};
use courtside_stats::web_table::parse_stats_table;

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("fixture file should be readable")
}

#[test]
fn parses_stats_page_fixture() {
    let raw = read_fixture("stats_page.html");
    let table = parse_stats_table(&raw).expect("fixture should parse");
    assert_eq!(table.columns, ColumnMap::web());
    assert_eq!(table.rows.len(), 4);
    assert_eq!(table.dropped, 1);
    assert_eq!(table.rows[0][1], "Jane Doe");

    let collected = collect_records(&table, Source::Web);
    let names = collected
        .records
        .iter()
        .map(|r| r.player.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Jane Doe", "Ann Lee", "Cara Diaz"]);
    assert_eq!(
        collected.records[0],
        PlayerStatRow::new("Jane Doe")
            .with(StatField::Games, 10.0)
            .with(StatField::Minutes, 200.0)
            .with(StatField::Points, 150.0)
            .with(StatField::Rebounds, 40.0)
            .with(StatField::Assists, 60.0)
            .with(StatField::Steals, 5.0)
            .with(StatField::Blocks, 8.0)
    );
    assert_eq!(collected.records[2].minutes, Some(301.25));
    assert_eq!(collected.records[2].rebounds, Some(61.5));

    assert_eq!(collected.skipped.len(), 1);
    assert_eq!(
        collected.skipped[0],
        (
            2,
            Skip::BadNumber {
                field: StatField::Assists,
                raw: "--".to_string()
            }
        )
    );
}

#[test]
fn header_drives_columns_when_layout_moves() {
    let html = r#"
<table>
  <thead><tr><th>Player</th><th>Team</th><th>GP</th><th>MIN</th><th>PTS</th><th>REB</th><th>AST</th><th>STL</th><th>BLK</th></tr></thead>
  <tbody>
    <tr><td>Jane Doe</td><td>Lunar Owls</td><td>10</td><td>20</td><td>15</td><td>4</td><td>6</td><td>1</td><td>2</td></tr>
  </tbody>
</table>"#;
    let table = parse_stats_table(html).expect("table");
    assert_eq!(table.columns.player(), 0);
    assert_eq!(table.columns.min_cells(), 9);

    let collected = collect_records(&table, Source::Web);
    assert_eq!(collected.records.len(), 1);
    assert_eq!(collected.records[0].points, Some(15.0));
    assert_eq!(collected.records[0].blocks, Some(2.0));
}

#[test]
fn parses_league_csv_fixture() {
    let table = read_csv_rows(&fixture_path("wnba-player-stats.csv")).expect("fixture should parse");
    assert_eq!(table.columns, ColumnMap::csv());
    assert_eq!(table.rows.len(), 7);

    let collected = collect_records(&table, Source::Csv);
    let names = collected
        .records
        .iter()
        .map(|r| r.player.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "A'ja Wilson",
            "Napheesa Collier",
            "Kelsey Plum",
            "Kahleah Copper",
            "Skylar Diggins"
        ]
    );

    let diggins = &collected.records[4];
    assert_eq!(
        *diggins,
        PlayerStatRow::new("Skylar Diggins")
            .with(StatField::Points, 10.0)
            .with(StatField::Rebounds, 5.0)
            .with(StatField::Assists, 3.0)
    );

    let reasons = collected
        .skipped
        .iter()
        .map(|(_, reason)| reason.clone())
        .collect::<Vec<_>>();
    assert_eq!(
        reasons,
        vec![
            Skip::HeaderRow,
            Skip::BadNumber {
                field: StatField::Rebounds,
                raw: String::new()
            }
        ]
    );
}

#[test]
fn missing_csv_is_an_error() {
    assert!(read_csv_rows(&fixture_path("does-not-exist.csv")).is_err());
}
