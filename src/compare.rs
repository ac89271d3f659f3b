use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::stats::{PlayerStatRow, StatField};

pub const IMPROVEMENT_TOP_N: usize = 10;
pub const LEADERS_TOP_N: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LeagueAverages {
    pub players: usize,
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerComparison {
    pub player: String,
    pub primary: PlayerStatRow,
    pub other: PlayerStatRow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Improvement {
    pub player: String,
    pub primary_points: f64,
    pub other_points: f64,
    pub change_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub primary: Option<LeagueAverages>,
    pub other: Option<LeagueAverages>,
    pub common: Vec<PlayerComparison>,
    pub improvement: Vec<Improvement>,
}

/// Matching key for names spelled differently across sources:
/// lowercase ASCII letters and digits only.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Missing stats count as zero.
pub fn league_averages(rows: &[PlayerStatRow]) -> Option<LeagueAverages> {
    if rows.is_empty() {
        return None;
    }
    let n = rows.len() as f64;
    let mean = |field: StatField| rows.iter().map(|r| r.get(field).unwrap_or(0.0)).sum::<f64>() / n;
    Some(LeagueAverages {
        players: rows.len(),
        points: mean(StatField::Points),
        rebounds: mean(StatField::Rebounds),
        assists: mean(StatField::Assists),
    })
}

/// Players present in both lists, in `primary` order. A name repeated in
/// `primary` is reported once; a name repeated in `other` resolves to its
/// last entry.
pub fn common_players(primary: &[PlayerStatRow], other: &[PlayerStatRow]) -> Vec<PlayerComparison> {
    let by_name = other
        .iter()
        .map(|row| (normalize_name(&row.player), row))
        .collect::<HashMap<_, _>>();

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for row in primary {
        let key = normalize_name(&row.player);
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }
        let Some(matched) = by_name.get(&key) else {
            continue;
        };
        out.push(PlayerComparison {
            player: row.player.clone(),
            primary: row.clone(),
            other: (*matched).clone(),
        });
    }
    out
}

/// Largest relative points gain from `other` to `primary` first.
pub fn improvement(common: &[PlayerComparison], top_n: usize) -> Vec<Improvement> {
    let mut out = common
        .iter()
        .filter_map(|c| {
            let primary_points = c.primary.points?;
            let other_points = c.other.points.filter(|p| *p > 0.0)?;
            Some(Improvement {
                player: c.player.clone(),
                primary_points,
                other_points,
                change_pct: (primary_points - other_points) / other_points * 100.0,
            })
        })
        .collect::<Vec<_>>();
    out.sort_by(|a, b| b.change_pct.total_cmp(&a.change_pct));
    out.truncate(top_n);
    out
}

/// Highest `field` values first. Rows without the stat are left out; ties
/// keep their input order.
pub fn top_players(rows: &[PlayerStatRow], field: StatField, top_n: usize) -> Vec<&PlayerStatRow> {
    let mut ranked = rows
        .iter()
        .filter(|row| row.get(field).is_some())
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| {
        let a = a.get(field).unwrap_or(0.0);
        let b = b.get(field).unwrap_or(0.0);
        b.total_cmp(&a)
    });
    ranked.truncate(top_n);
    ranked
}

pub fn compare(primary: &[PlayerStatRow], other: &[PlayerStatRow]) -> ComparisonReport {
    let common = common_players(primary, other);
    let improvement = improvement(&common, IMPROVEMENT_TOP_N);
    ComparisonReport {
        primary: league_averages(primary),
        other: league_averages(other),
        common,
        improvement,
    }
}
