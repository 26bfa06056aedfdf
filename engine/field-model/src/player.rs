//! Player-level inputs for a single event
//!
//! `PlayerPrediction` and `PlayerResult` are the two immutable feeds the
//! engine joins by player id. Every derived artifact references only
//! players present in both; unmatched players are excluded downstream,
//! never zero-filled.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A model's pre-event ranking entry for one player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerPrediction {
    /// Stable player identifier
    pub player_id: String,

    /// Predicted rank, 1 = best
    pub predicted_rank: u32,
}

/// A player's actual outcome for one event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerResult {
    /// Stable player identifier
    pub player_id: String,

    /// Final tournament position, 1 = winner; ties share a position
    pub finish_position: u32,

    /// Observed metric values, keyed by metric name
    pub metrics: HashMap<String, f64>,

    /// The model's pre-event estimates for the same metrics
    pub model_metrics: HashMap<String, f64>,
}

impl PlayerResult {
    /// Observed value for a metric, if present and finite
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied().filter(|v| v.is_finite())
    }

    /// Model-estimated value for a metric, if present and finite
    pub fn model_metric(&self, name: &str) -> Option<f64> {
        self.model_metrics.get(name).copied().filter(|v| v.is_finite())
    }
}

/// A result row as delivered by the feed, before the finish-position
/// fallback has been applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPlayerResult {
    pub player_id: String,

    /// Missing for withdrawn or cut players
    pub finish_position: Option<u32>,

    #[serde(default)]
    pub metrics: HashMap<String, f64>,

    #[serde(default)]
    pub model_metrics: HashMap<String, f64>,
}

/// Assemble feed rows into [`PlayerResult`]s, filling in finish positions
/// for players without one.
///
/// Missing or withdrawn players receive a position one worse than the
/// field's maximum observed position. This is a fallback policy, not a
/// guess about the actual result; it keeps the full field usable for
/// field averages while placing unknowns last.
pub fn assemble_results(raw: Vec<RawPlayerResult>) -> Vec<PlayerResult> {
    let worst_observed = raw
        .iter()
        .filter_map(|r| r.finish_position)
        .max()
        .unwrap_or(0);
    let fallback = worst_observed + 1;

    raw.into_iter()
        .map(|r| PlayerResult {
            player_id: r.player_id,
            finish_position: r.finish_position.unwrap_or(fallback),
            metrics: r.metrics,
            model_metrics: r.model_metrics,
        })
        .collect()
}
