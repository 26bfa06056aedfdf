//! Bias Trend Tracker
//!
//! Aggregates systematic model error per metric across many events,
//! separating "noisy but unbiased" estimates (tolerable) from
//! "consistently wrong in one direction" (actionable). Sample-size gating
//! keeps a handful of events from triggering a false CHRONIC verdict.
//!
//! The tracker is recomputed fully each run; there is no incremental
//! state carried between runs.

use field_model::PlayerResult;
use serde::{Deserialize, Serialize};
use stat_engine::{mean, population_std_dev};
use std::collections::HashMap;
use tracing::debug;

/// Thresholds for bias classification. The defaults are the production
/// values; they are tuning decisions, not derived quantities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiasConfig {
    /// Events-worth of deltas required before STABLE or CHRONIC applies
    pub min_samples: usize,

    /// biasZ at or below this (with enough samples) is STABLE
    pub stable_z: f64,

    /// biasZ at or above this (with enough samples) is CHRONIC
    pub chronic_z: f64,
}

impl Default for BiasConfig {
    fn default() -> Self {
        Self { min_samples: 20, stable_z: 0.2, chronic_z: 0.75 }
    }
}

/// Lifecycle label for a metric's bias trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BiasStatus {
    Stable,
    Watch,
    Chronic,
}

impl std::fmt::Display for BiasStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BiasStatus::Stable => "STABLE",
            BiasStatus::Watch => "WATCH",
            BiasStatus::Chronic => "CHRONIC",
        };
        f.write_str(label)
    }
}

/// Aggregated bias statistics for one metric across a season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiasTrendEntry {
    pub metric: String,
    pub sample_count: usize,

    /// Mean of (model estimate - actual); sign shows the direction
    pub mean_delta: f64,

    pub mean_abs_delta: f64,
    pub std_dev: f64,

    /// |mean| / std dev; 1 for a non-zero constant bias, 0 otherwise
    pub bias_z: f64,

    /// Fraction of deltas where the model over-estimated
    pub over_pct: f64,

    /// Fraction where it under-estimated
    pub under_pct: f64,

    pub status: BiasStatus,
}

/// Collects per-metric (model - actual) deltas across events
#[derive(Debug, Clone, Default)]
pub struct BiasTrendTracker {
    config: BiasConfig,
    deltas: HashMap<String, Vec<f64>>,
}

impl BiasTrendTracker {
    pub fn new(config: BiasConfig) -> Self {
        Self { config, deltas: HashMap::new() }
    }

    /// Record every paired (model, actual) metric value from one event's
    /// results. Players or metrics missing either side are skipped.
    pub fn record_event(&mut self, results: &[PlayerResult]) {
        let mut recorded = 0usize;
        for result in results {
            for (metric, &actual) in &result.metrics {
                if !actual.is_finite() {
                    continue;
                }
                if let Some(estimated) = result.model_metric(metric) {
                    self.deltas
                        .entry(metric.clone())
                        .or_default()
                        .push(estimated - actual);
                    recorded += 1;
                }
            }
        }
        debug!(pairs = recorded, "recorded bias deltas for event");
    }

    /// Record a raw delta directly; used when deltas arrive pre-paired
    pub fn record_delta(&mut self, metric: &str, delta: f64) {
        if delta.is_finite() {
            self.deltas.entry(metric.to_string()).or_default().push(delta);
        }
    }

    /// Summarize every tracked metric, most suspicious first
    pub fn summarize(&self) -> Vec<BiasTrendEntry> {
        let mut entries: Vec<BiasTrendEntry> = self
            .deltas
            .iter()
            .map(|(metric, deltas)| self.entry(metric, deltas))
            .collect();
        entries.sort_by(|a, b| b.bias_z.total_cmp(&a.bias_z));
        entries
    }

    fn entry(&self, metric: &str, deltas: &[f64]) -> BiasTrendEntry {
        let count = deltas.len();
        let mean_delta = mean(deltas);
        let mean_abs_delta = mean(&deltas.iter().map(|d| d.abs()).collect::<Vec<_>>());
        let std_dev = population_std_dev(deltas);

        // A constant non-zero bias still deserves a flag; a constant zero
        // bias does not.
        let bias_z = if std_dev > 0.0 {
            mean_delta.abs() / std_dev
        } else if mean_delta != 0.0 {
            1.0
        } else {
            0.0
        };

        let over = deltas.iter().filter(|&&d| d > 0.0).count();
        let under = deltas.iter().filter(|&&d| d < 0.0).count();

        let status = if count >= self.config.min_samples && bias_z <= self.config.stable_z {
            BiasStatus::Stable
        } else if count >= self.config.min_samples && bias_z >= self.config.chronic_z {
            BiasStatus::Chronic
        } else {
            BiasStatus::Watch
        };

        BiasTrendEntry {
            metric: metric.to_string(),
            sample_count: count,
            mean_delta,
            mean_abs_delta,
            std_dev,
            bias_z,
            over_pct: if count > 0 { over as f64 / count as f64 } else { 0.0 },
            under_pct: if count > 0 { under as f64 / count as f64 } else { 0.0 },
            status,
        }
    }
}
