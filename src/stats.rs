use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatField {
    Games,
    Minutes,
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
}

impl StatField {
    /// Canonical order, used for JSON key order and chart output.
    pub const ALL: [StatField; 7] = [
        StatField::Games,
        StatField::Minutes,
        StatField::Points,
        StatField::Rebounds,
        StatField::Assists,
        StatField::Steals,
        StatField::Blocks,
    ];

    pub fn key(self) -> &'static str {
        match self {
            StatField::Games => "games",
            StatField::Minutes => "minutes",
            StatField::Points => "points",
            StatField::Rebounds => "rebounds",
            StatField::Assists => "assists",
            StatField::Steals => "steals",
            StatField::Blocks => "blocks",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatField::Games => "Games",
            StatField::Minutes => "Minutes",
            StatField::Points => "Points",
            StatField::Rebounds => "Rebounds",
            StatField::Assists => "Assists",
            StatField::Steals => "Steals",
            StatField::Blocks => "Blocks",
        }
    }
}

/// One player's line. Stats the source does not carry stay `None` and are
/// left out of the JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerStatRow {
    pub player: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub games: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebounds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assists: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steals: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<f64>,
}

impl PlayerStatRow {
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            ..Self::default()
        }
    }

    pub fn get(&self, field: StatField) -> Option<f64> {
        match field {
            StatField::Games => self.games,
            StatField::Minutes => self.minutes,
            StatField::Points => self.points,
            StatField::Rebounds => self.rebounds,
            StatField::Assists => self.assists,
            StatField::Steals => self.steals,
            StatField::Blocks => self.blocks,
        }
    }

    pub fn set(&mut self, field: StatField, value: f64) {
        let slot = match field {
            StatField::Games => &mut self.games,
            StatField::Minutes => &mut self.minutes,
            StatField::Points => &mut self.points,
            StatField::Rebounds => &mut self.rebounds,
            StatField::Assists => &mut self.assists,
            StatField::Steals => &mut self.steals,
            StatField::Blocks => &mut self.blocks,
        };
        *slot = Some(value);
    }

    pub fn with(mut self, field: StatField, value: f64) -> Self {
        self.set(field, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayerStatRow, StatField};

    #[test]
    fn json_keeps_player_first_and_canonical_order() {
        let row = PlayerStatRow::new("Jane Doe")
            .with(StatField::Assists, 3.0)
            .with(StatField::Points, 10.0)
            .with(StatField::Rebounds, 5.0);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(
            json,
            r#"{"player":"Jane Doe","points":10.0,"rebounds":5.0,"assists":3.0}"#
        );
    }

    #[test]
    fn get_reads_back_set_values() {
        let mut row = PlayerStatRow::new("A");
        for (idx, field) in StatField::ALL.iter().enumerate() {
            row.set(*field, idx as f64);
        }
        for (idx, field) in StatField::ALL.iter().enumerate() {
            assert_eq!(row.get(*field), Some(idx as f64));
        }
    }
}
