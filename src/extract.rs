use thiserror::Error;

use crate::columns::{ColumnMap, HEADER_SENTINEL};
use crate::stats::{PlayerStatRow, StatField};

/// Why a row was left out. Row problems never abort a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Skip {
    #[error("row has {found} cells, needs {needed}")]
    TooFewCells { needed: usize, found: usize },
    #[error("player name is empty")]
    EmptyName,
    #[error("repeated header row")]
    HeaderRow,
    #[error("{} is not a number: {raw:?}", .field.key())]
    BadNumber { field: StatField, raw: String },
}

/// Turns one row of cell text into a record using `columns` for positions.
pub fn extract<S: AsRef<str>>(cells: &[S], columns: &ColumnMap) -> Result<PlayerStatRow, Skip> {
    let needed = columns.min_cells();
    if cells.len() < needed {
        return Err(Skip::TooFewCells {
            needed,
            found: cells.len(),
        });
    }

    let player = cells[columns.player()].as_ref().trim();
    if player.is_empty() {
        return Err(Skip::EmptyName);
    }
    if player == HEADER_SENTINEL {
        return Err(Skip::HeaderRow);
    }

    let mut row = PlayerStatRow::new(player);
    for (field, idx) in columns.stats() {
        let raw = cells[*idx].as_ref();
        let value = parse_stat(raw).ok_or_else(|| Skip::BadNumber {
            field: *field,
            raw: raw.to_string(),
        })?;
        row.set(*field, value);
    }
    Ok(row)
}

fn parse_stat(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    // JSON has no encoding for NaN or infinities.
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::{Skip, extract};
    use crate::columns::ColumnMap;
    use crate::stats::{PlayerStatRow, StatField};

    fn web_row(name: &str) -> Vec<String> {
        let mut cells = vec![
            "1".to_string(),
            name.to_string(),
            "10".to_string(),
            "200".to_string(),
            "150".to_string(),
        ];
        cells.resize(16, "0".to_string());
        cells.extend(["40", "60", "5", "8"].iter().map(|c| c.to_string()));
        cells
    }

    #[test]
    fn web_row_maps_every_stat() {
        let row = extract(&web_row("  Jane Doe "), &ColumnMap::web()).expect("valid row");
        let expected = PlayerStatRow::new("Jane Doe")
            .with(StatField::Games, 10.0)
            .with(StatField::Minutes, 200.0)
            .with(StatField::Points, 150.0)
            .with(StatField::Rebounds, 40.0)
            .with(StatField::Assists, 60.0)
            .with(StatField::Steals, 5.0)
            .with(StatField::Blocks, 8.0);
        assert_eq!(row, expected);
    }

    #[test]
    fn short_row_is_skipped() {
        let cells = ["1", "Jane Doe", "10", "200", "150", "40", "60", "5", "8"];
        let err = extract(&cells, &ColumnMap::web()).unwrap_err();
        assert_eq!(
            err,
            Skip::TooFewCells {
                needed: 20,
                found: 9
            }
        );
    }

    #[test]
    fn empty_row_is_skipped() {
        let cells: [&str; 0] = [];
        assert!(matches!(
            extract(&cells, &ColumnMap::csv()),
            Err(Skip::TooFewCells { found: 0, .. })
        ));
    }

    #[test]
    fn blank_and_header_names_are_skipped() {
        let blank = ["", "   ", "", "", "", "", "10.0", "5.0", "3.0"];
        assert_eq!(extract(&blank, &ColumnMap::csv()), Err(Skip::EmptyName));

        let header = ["Rk", "Player", "Team", "", "", "", "PTS", "REB", "AST"];
        assert_eq!(extract(&header, &ColumnMap::csv()), Err(Skip::HeaderRow));
    }

    #[test]
    fn csv_row_parses_minimal_stats() {
        let cells = ["", "A'ja Wilson", "", "", "", "", "10.0", "5.0", "3.0"];
        let row = extract(&cells, &ColumnMap::csv()).expect("valid row");
        assert_eq!(row.points, Some(10.0));
        assert_eq!(row.rebounds, Some(5.0));
        assert_eq!(row.assists, Some(3.0));
        assert_eq!(row.games, None);
    }

    #[test]
    fn empty_number_reports_field_and_value() {
        let cells = ["", "Jane Doe", "", "", "", "", "10.0", "", "3.0"];
        let err = extract(&cells, &ColumnMap::csv()).unwrap_err();
        assert_eq!(
            err,
            Skip::BadNumber {
                field: StatField::Rebounds,
                raw: String::new()
            }
        );
        assert_eq!(err.to_string(), "rebounds is not a number: \"\"");
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let cells = ["", "Jane Doe", "", "", "", "", "NaN", "5.0", "3.0"];
        assert!(matches!(
            extract(&cells, &ColumnMap::csv()),
            Err(Skip::BadNumber {
                field: StatField::Points,
                ..
            })
        ));
    }

    #[test]
    fn formatted_values_parse_back_exactly() {
        let values = [0.0, 0.1, 12.345, 1e-7, 98765.4321, 33.0 / 7.0];
        for value in values {
            let text = value.to_string();
            let cells = ["", "P", "", "", "", "", text.as_str(), text.as_str(), text.as_str()];
            let row = extract(&cells, &ColumnMap::csv()).expect("valid row");
            assert_eq!(row.points, Some(value));
        }
    }
}
