use crate::stats::StatField;

/// Cell text that marks a repeated header row in the name column.
pub const HEADER_SENTINEL: &str = "Player";

// Player stats page, current layout:
// 0:RK 1:PLAYER 2:GP 3:MIN 4:PTS 5:FGM 6:FGA 7:FG% ... 16:REB 17:AST 18:STL 19:BLK
const WEB_PLAYER_COL: usize = 1;
const WEB_STAT_COLS: &[(StatField, usize)] = &[
    (StatField::Games, 2),
    (StatField::Minutes, 3),
    (StatField::Points, 4),
    (StatField::Rebounds, 16),
    (StatField::Assists, 17),
    (StatField::Steals, 18),
    (StatField::Blocks, 19),
];

const WEB_PLAYER_LABELS: &[&str] = &["PLAYER", "NAME"];
const WEB_STAT_LABELS: &[(StatField, &[&str])] = &[
    (StatField::Games, &["GP", "G"]),
    (StatField::Minutes, &["MIN", "MPG"]),
    (StatField::Points, &["PTS", "PPG"]),
    (StatField::Rebounds, &["REB", "RPG"]),
    (StatField::Assists, &["AST", "APG"]),
    (StatField::Steals, &["STL", "SPG"]),
    (StatField::Blocks, &["BLK", "BPG"]),
];

// League CSV export: two banner lines, then
// 0:RK 1:Player 2:Team 3:Pos 4:GP 5:MIN 6:PTS 7:REB 8:AST ...
const CSV_PLAYER_COL: usize = 1;
const CSV_STAT_COLS: &[(StatField, usize)] = &[
    (StatField::Points, 6),
    (StatField::Rebounds, 7),
    (StatField::Assists, 8),
];

/// Rows read from one source, plus the positions to read them with.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
    pub columns: ColumnMap,
    /// Rows the adapter discarded before extraction (too few cells, or
    /// rejected by the CSV parser). Counted for the survival check.
    pub dropped: usize,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>, columns: ColumnMap) -> Self {
        Self {
            rows,
            columns,
            dropped: 0,
        }
    }

    /// Every row the source offered, kept or dropped.
    pub fn candidates(&self) -> usize {
        self.rows.len() + self.dropped
    }
}

/// Binds the player name and each carried stat to a cell position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    player: usize,
    stats: Vec<(StatField, usize)>,
}

impl ColumnMap {
    /// Stats are kept in canonical order regardless of the order given.
    pub fn new(player: usize, stats: &[(StatField, usize)]) -> Self {
        let mut stats = stats.to_vec();
        stats.sort_by_key(|(field, _)| *field);
        stats.dedup_by_key(|(field, _)| *field);
        Self { player, stats }
    }

    pub fn web() -> Self {
        Self::new(WEB_PLAYER_COL, WEB_STAT_COLS)
    }

    pub fn csv() -> Self {
        Self::new(CSV_PLAYER_COL, CSV_STAT_COLS)
    }

    /// Builds the web map from the table's header labels. Returns `None`
    /// unless the player column and every stat the constant map carries
    /// can be located.
    pub fn web_from_header(header: &[String]) -> Option<Self> {
        let player = find_label(header, WEB_PLAYER_LABELS)?;
        let mut stats = Vec::with_capacity(WEB_STAT_LABELS.len());
        for (field, labels) in WEB_STAT_LABELS {
            stats.push((*field, find_label(header, labels)?));
        }
        Some(Self::new(player, &stats))
    }

    pub fn player(&self) -> usize {
        self.player
    }

    pub fn stats(&self) -> &[(StatField, usize)] {
        &self.stats
    }

    pub fn fields(&self) -> impl Iterator<Item = StatField> + '_ {
        self.stats.iter().map(|(field, _)| *field)
    }

    pub fn max_index(&self) -> usize {
        self.stats
            .iter()
            .map(|(_, idx)| *idx)
            .fold(self.player, usize::max)
    }

    /// Fewest cells a row needs before every mapped index exists.
    pub fn min_cells(&self) -> usize {
        self.max_index() + 1
    }
}

fn find_label(header: &[String], labels: &[&str]) -> Option<usize> {
    header.iter().position(|cell| {
        let cell = cell.trim();
        labels.iter().any(|label| cell.eq_ignore_ascii_case(label))
    })
}
