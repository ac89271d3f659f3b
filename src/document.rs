use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::PlayerStatRow;

/// Output of a scrape run. Rebuilt from scratch every time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsDocument {
    pub updated_at: String,
    pub players: Vec<PlayerStatRow>,
}

/// Keeps source order; duplicate player names pass through.
pub fn aggregate<I, F>(rows: I, now: F) -> StatsDocument
where
    I: IntoIterator<Item = PlayerStatRow>,
    F: FnOnce() -> DateTime<Utc>,
{
    StatsDocument {
        updated_at: format_timestamp(now()),
        players: rows.into_iter().collect(),
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::{aggregate, format_timestamp};
    use crate::stats::{PlayerStatRow, StatField};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 14, 18, 30, 5).unwrap()
    }

    #[test]
    fn empty_input_is_a_valid_document() {
        let doc = aggregate(Vec::<PlayerStatRow>::new(), fixed_now);
        assert!(doc.players.is_empty());
        assert_eq!(doc.updated_at, "2025-02-14T18:30:05.000000Z");
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            json,
            r#"{"updated_at":"2025-02-14T18:30:05.000000Z","players":[]}"#
        );
    }

    #[test]
    fn duplicates_and_order_pass_through() {
        let rows = vec![
            PlayerStatRow::new("B").with(StatField::Points, 1.0),
            PlayerStatRow::new("A").with(StatField::Points, 2.0),
            PlayerStatRow::new("B").with(StatField::Points, 3.0),
        ];
        let doc = aggregate(rows.clone(), fixed_now);
        assert_eq!(doc.players, rows);
    }

    #[test]
    fn timestamp_parses_as_rfc3339() {
        let stamp = format_timestamp(Utc::now());
        assert!(DateTime::parse_from_rfc3339(&stamp).is_ok());
        assert!(stamp.ends_with('Z'));
    }
}
