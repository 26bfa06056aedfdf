//! Feed file loading
//!
//! Plumbing between on-disk JSON feeds and the engine's data contracts.
//! Predictions and results live in per-event JSON files; templates come
//! from a single TOML file. The result file's filesystem mtime is the
//! last-modified marker the staleness check compares against.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use field_model::{assemble_results, PlayerPrediction, PlayerResult, RawPlayerResult, TemplateStore};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// On-disk prediction feed: ordered list of (player, predicted rank)
#[derive(Debug, Deserialize)]
struct PredictionFeed {
    predictions: Vec<PlayerPrediction>,
}

/// On-disk result feed
#[derive(Debug, Deserialize)]
struct ResultFeed {
    players: Vec<RawPlayerResult>,
}

/// Load a per-event prediction feed
pub fn load_predictions(path: &Path) -> Result<Vec<PlayerPrediction>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading prediction feed {}", path.display()))?;
    let feed: PredictionFeed = serde_json::from_str(&content)
        .with_context(|| format!("parsing prediction feed {}", path.display()))?;
    debug!(path = %path.display(), players = feed.predictions.len(), "loaded predictions");
    Ok(feed.predictions)
}

/// Load a per-event result feed, applying the finish-position fallback,
/// and report the feed's last-modified marker
pub fn load_results(path: &Path) -> Result<(Vec<PlayerResult>, DateTime<Utc>)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading result feed {}", path.display()))?;
    let feed: ResultFeed = serde_json::from_str(&content)
        .with_context(|| format!("parsing result feed {}", path.display()))?;

    let modified: DateTime<Utc> = std::fs::metadata(path)?
        .modified()
        .map(DateTime::from)
        .unwrap_or_else(|_| Utc::now());

    let results = assemble_results(feed.players);
    debug!(path = %path.display(), players = results.len(), "loaded results");
    Ok((results, modified))
}

/// Load templates, or fall back to the builtin set when no file is given
pub fn load_templates(path: Option<&Path>) -> Result<TemplateStore> {
    match path {
        Some(path) => TemplateStore::load_from_file(path)
            .with_context(|| format!("loading templates {}", path.display())),
        None => Ok(TemplateStore::builtin()),
    }
}

/// One event's feed files discovered in a season directory
#[derive(Debug, Clone)]
pub struct EventFiles {
    pub event: String,
    pub predictions: PathBuf,
    pub results: PathBuf,
}

/// Discover `<event>.predictions.json` / `<event>.results.json` pairs.
///
/// Files without a partner are skipped; an unreadable directory is a hard
/// error. Events come back sorted by name so runs are deterministic.
pub fn discover_events(dir: &Path) -> Result<Vec<EventFiles>> {
    let mut events = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("reading event directory {}", dir.display()))?
    {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(event) = name.strip_suffix(".predictions.json") {
            let results = dir.join(format!("{event}.results.json"));
            if results.exists() {
                events.push(EventFiles {
                    event: event.to_string(),
                    predictions: path.clone(),
                    results,
                });
            } else {
                debug!(event, "prediction feed has no matching result feed, skipping");
            }
        }
    }
    events.sort_by(|a, b| a.event.cmp(&b.event));
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn prediction_feed_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("open.predictions.json");
        std::fs::write(
            &path,
            r#"{"predictions": [
                {"player_id": "a", "predicted_rank": 1},
                {"player_id": "b", "predicted_rank": 2}
            ]}"#,
        )
        .unwrap();

        let predictions = load_predictions(&path).unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].player_id, "a");
    }

    #[test]
    fn result_feed_applies_finish_fallback() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("open.results.json");
        std::fs::write(
            &path,
            r#"{"players": [
                {"player_id": "a", "finish_position": 1,
                 "metrics": {"SG: Putting": 1.2}},
                {"player_id": "wd", "finish_position": null}
            ]}"#,
        )
        .unwrap();

        let (results, modified) = load_results(&path).unwrap();
        assert_eq!(results.len(), 2);
        let wd = results.iter().find(|r| r.player_id == "wd").unwrap();
        assert_eq!(wd.finish_position, 2);
        assert!(modified <= Utc::now());
    }

    #[test]
    fn malformed_feed_is_a_hard_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.results.json");
        std::fs::write(&path, "{").unwrap();
        assert!(load_results(&path).is_err());
    }

    #[test]
    fn discovery_pairs_feeds_and_sorts_by_event() {
        let dir = TempDir::new().unwrap();
        for name in [
            "b-open.predictions.json",
            "b-open.results.json",
            "a-open.predictions.json",
            "a-open.results.json",
            "orphan.predictions.json",
        ] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }

        let events = discover_events(dir.path()).unwrap();
        let names: Vec<&str> = events.iter().map(|e| e.event.as_str()).collect();
        assert_eq!(names, vec!["a-open", "b-open"]);
    }
}
