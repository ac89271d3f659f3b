use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::document::StatsDocument;
use crate::stats::PlayerStatRow;

/// `{ "updated_at": .., "players": [..] }`
pub fn write_document(doc: &StatsDocument, path: &Path) -> Result<()> {
    write_json(path, doc)
}

/// Bare array of records, the layout the league converter has always
/// produced.
pub fn write_players(players: &[PlayerStatRow], path: &Path) -> Result<()> {
    write_json(path, players)
}

pub fn read_document(path: &Path) -> Result<StatsDocument> {
    read_json(path)
}

pub fn read_players(path: &Path) -> Result<Vec<PlayerStatRow>> {
    read_json(path)
}

/// Players from either layout.
pub fn read_any_players(path: &Path) -> Result<Vec<PlayerStatRow>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_any_players(&raw).with_context(|| format!("parse {}", path.display()))
}

/// Accepts the document layout or the bare array.
pub fn parse_any_players(raw: &str) -> Result<Vec<PlayerStatRow>> {
    if let Ok(doc) = serde_json::from_str::<StatsDocument>(raw) {
        return Ok(doc.players);
    }
    serde_json::from_str(raw).context("neither a stats document nor a player list")
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(value).context("serialize json")?;
    let tmp = tmp_path(path);
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("replace {}", path.display()));
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
