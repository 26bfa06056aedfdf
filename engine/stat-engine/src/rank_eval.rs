//! Rank Correlation Evaluator
//!
//! Compares a model's pre-event ranking to the actual finishing order for
//! one event. Unmatched players are silently dropped: missing results for
//! fringe players (cuts, withdrawals) are expected, not exceptional. An
//! event with zero overlap produces a valid all-zero result rather than an
//! error so season aggregation stays total.

use crate::ranks::{rmse, spearman};
use field_model::{PlayerPrediction, PlayerResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Hit-rate depths reported for every event
pub const HIT_RATE_DEPTHS: [usize; 4] = [5, 10, 20, 50];

/// Minimum matched players for a meaningful rank correlation
pub const MIN_RANK_SAMPLES: usize = 2;

/// Hit rate at one depth: of the N players with the N best predicted
/// ranks, the fraction whose actual finish was within N
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitRate {
    pub depth: usize,
    pub hits: usize,
    pub considered: usize,
    pub rate: f64,
}

/// How well the predicted ranking matched the finishing order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankAccuracy {
    /// Spearman correlation between predicted rank and actual finish
    pub spearman: f64,

    /// RMSE between raw predicted rank and raw finish position
    pub rmse: f64,

    /// Players present in both feeds
    pub sample_size: usize,

    pub hit_rates: Vec<HitRate>,
}

impl RankAccuracy {
    /// The defined result for an event with no matched players
    fn empty() -> Self {
        Self {
            spearman: 0.0,
            rmse: 0.0,
            sample_size: 0,
            hit_rates: HIT_RATE_DEPTHS
                .iter()
                .map(|&depth| HitRate { depth, hits: 0, considered: 0, rate: 0.0 })
                .collect(),
        }
    }

    /// The hit rate at a given depth, 0 if not reported
    pub fn hit_rate(&self, depth: usize) -> f64 {
        self.hit_rates
            .iter()
            .find(|h| h.depth == depth)
            .map(|h| h.rate)
            .unwrap_or(0.0)
    }
}

/// Evaluate one event's predicted ranking against its results.
///
/// Joins the two feeds by player id; partial overlap is normal and raises
/// no error.
pub fn evaluate_rank_accuracy(
    predictions: &[PlayerPrediction],
    results: &[PlayerResult],
) -> RankAccuracy {
    let finishes: HashMap<&str, u32> = results
        .iter()
        .map(|r| (r.player_id.as_str(), r.finish_position))
        .collect();

    // (predicted rank, actual finish) for players present in both feeds
    let mut matched: Vec<(u32, u32)> = predictions
        .iter()
        .filter_map(|p| {
            finishes
                .get(p.player_id.as_str())
                .map(|&finish| (p.predicted_rank, finish))
        })
        .collect();

    if matched.is_empty() {
        debug!("no overlap between prediction and result feeds");
        return RankAccuracy::empty();
    }

    let predicted: Vec<f64> = matched.iter().map(|&(p, _)| p as f64).collect();
    let actual: Vec<f64> = matched.iter().map(|&(_, a)| a as f64).collect();

    let correlation = if matched.len() >= MIN_RANK_SAMPLES {
        spearman(&predicted, &actual)
    } else {
        0.0
    };

    // Hit rates walk the best predicted ranks first
    matched.sort_by_key(|&(predicted_rank, _)| predicted_rank);
    let hit_rates = HIT_RATE_DEPTHS
        .iter()
        .map(|&depth| {
            let considered = matched.len().min(depth);
            let hits = matched[..considered]
                .iter()
                .filter(|&&(_, finish)| finish as usize <= depth)
                .count();
            let rate = if considered == 0 {
                0.0
            } else {
                hits as f64 / considered as f64
            };
            HitRate { depth, hits, considered, rate }
        })
        .collect();

    RankAccuracy {
        spearman: correlation,
        rmse: rmse(&predicted, &actual),
        sample_size: matched.len(),
        hit_rates,
    }
}
