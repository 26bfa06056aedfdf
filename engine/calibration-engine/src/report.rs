//! Calibration Report Builder
//!
//! Records how the model's pre-event ranking treated the players who
//! actually contended: for each actual top-10 finisher, the predicted
//! rank, the miss score, and a coarse bucket. Season aggregation is plain
//! concatenation and count summation, so events with more qualifying
//! finishers naturally carry more weight.

use field_model::{PlayerPrediction, PlayerResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Finish cutoff for the finishers a record tracks
const TOP_FINISHER_CUTOFF: u32 = 10;

/// Coarse quality bucket for one prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PredictionBucket {
    /// Predicted inside the top 20
    InsideTop20,

    /// Predicted 21-50
    InsideTop50,

    /// Predicted worse than 50, or effectively unranked
    Outside,
}

impl PredictionBucket {
    fn for_rank(predicted_rank: u32) -> Self {
        if predicted_rank <= 20 {
            PredictionBucket::InsideTop20
        } else if predicted_rank <= 50 {
            PredictionBucket::InsideTop50
        } else {
            PredictionBucket::Outside
        }
    }
}

/// One actual top-10 finisher and how the model ranked them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopFinisher {
    pub player_id: String,
    pub actual_finish: u32,
    pub predicted_rank: u32,

    /// |predicted - actual|
    pub miss_score: u32,

    pub bucket: PredictionBucket,
}

/// Hit counters behind the aggregate accuracy ratios
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccuracyCounts {
    /// Actual top-5 finishers the model predicted inside the top 20
    pub top5_predicted_top20: usize,
    pub top5_total: usize,

    /// Actual top-10 finishers the model predicted inside the top 30
    pub top10_predicted_top30: usize,
    pub top10_total: usize,
}

impl AccuracyCounts {
    fn add(&mut self, other: &AccuracyCounts) {
        self.top5_predicted_top20 += other.top5_predicted_top20;
        self.top5_total += other.top5_total;
        self.top10_predicted_top30 += other.top10_predicted_top30;
        self.top10_total += other.top10_total;
    }
}

/// Calibration record for one event, mergeable into a season aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationRecord {
    pub tournament: String,
    pub top_finishers: Vec<TopFinisher>,
    pub counts: AccuracyCounts,
}

impl CalibrationRecord {
    /// Build the record for one event.
    ///
    /// Only finishers with a matched prediction are recorded; a contender
    /// the model never ranked is excluded, not zero-filled.
    pub fn build(
        tournament: impl Into<String>,
        predictions: &[PlayerPrediction],
        results: &[PlayerResult],
    ) -> Self {
        let predicted: HashMap<&str, u32> = predictions
            .iter()
            .map(|p| (p.player_id.as_str(), p.predicted_rank))
            .collect();

        let mut top_finishers: Vec<TopFinisher> = results
            .iter()
            .filter(|r| r.finish_position <= TOP_FINISHER_CUTOFF)
            .filter_map(|r| {
                predicted.get(r.player_id.as_str()).map(|&rank| TopFinisher {
                    player_id: r.player_id.clone(),
                    actual_finish: r.finish_position,
                    predicted_rank: rank,
                    miss_score: rank.abs_diff(r.finish_position),
                    bucket: PredictionBucket::for_rank(rank),
                })
            })
            .collect();
        top_finishers.sort_by_key(|f| (f.actual_finish, f.player_id.clone()));

        let mut counts = AccuracyCounts::default();
        for finisher in &top_finishers {
            if finisher.actual_finish <= 5 {
                counts.top5_total += 1;
                if finisher.predicted_rank <= 20 {
                    counts.top5_predicted_top20 += 1;
                }
            }
            counts.top10_total += 1;
            if finisher.predicted_rank <= 30 {
                counts.top10_predicted_top30 += 1;
            }
        }

        Self { tournament: tournament.into(), top_finishers, counts }
    }

    /// Merge another record in: concatenate finishers, sum counts
    pub fn merge(&mut self, other: &CalibrationRecord) {
        self.top_finishers.extend(other.top_finishers.iter().cloned());
        self.counts.add(&other.counts);
    }

    /// Fraction of actual top-5 finishers predicted inside the top 20
    pub fn top5_inside_top20_rate(&self) -> f64 {
        ratio(self.counts.top5_predicted_top20, self.counts.top5_total)
    }

    /// Fraction of actual top-10 finishers predicted inside the top 30
    pub fn top10_inside_top30_rate(&self) -> f64 {
        ratio(self.counts.top10_predicted_top30, self.counts.top10_total)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
