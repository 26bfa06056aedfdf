//! Metric Correlation Analyzer
//!
//! Scores each metric's individual predictive power for one event. The
//! sign convention makes every correlation readable the same way: metric
//! values are flipped for lower-is-better metrics, and finish positions
//! are negated so a better finish is numerically larger. After both
//! adjustments, a positive correlation always means "more of this metric
//! went with finishing better".

use crate::ranks::spearman;
use field_model::{normalize_percent_scale, MetricCatalog, PlayerResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Minimum pairs for a general metric correlation
pub const MIN_CORRELATION_SAMPLES: usize = 3;

/// Minimum pairs for the correlation-with-top-N-success variant
pub const MIN_TOP_N_SAMPLES: usize = 5;

/// Finish cutoff for the "top 10" slice of a metric analysis
const TOP_FINISH_CUTOFF: u32 = 10;

/// One metric's correlation with finishing position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub metric: String,

    /// Spearman coefficient in [-1, 1]; exactly 0 below the sample gate
    pub correlation: f64,

    pub sample_size: usize,
}

/// Per-metric event analysis: how the top 10 separated from the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricAnalysis {
    pub metric: String,
    pub top10_avg: f64,
    pub field_avg: f64,

    /// top10_avg - field_avg
    pub delta: f64,

    pub correlation: f64,
    pub top10_count: usize,
    pub field_count: usize,
}

/// Correlate one metric's values against finish positions.
///
/// `pairs` holds (finish position, raw metric value). The value is
/// sign-adjusted per the catalog direction and the finish is negated
/// before the Spearman computation. Below [`MIN_CORRELATION_SAMPLES`]
/// pairs the coefficient is defined as 0, and the metric is still
/// reported so every metric stays represented downstream.
pub fn metric_correlation(
    metric: &str,
    pairs: &[(u32, f64)],
    catalog: &MetricCatalog,
) -> CorrelationResult {
    let def = catalog.definition(metric);
    let usable: Vec<(u32, f64)> = pairs
        .iter()
        .filter(|(_, v)| v.is_finite())
        .map(|&(finish, v)| (finish, normalize_percent_scale(v, &def)))
        .collect();

    if usable.len() < MIN_CORRELATION_SAMPLES {
        debug!(metric, samples = usable.len(), "below correlation sample gate");
        return CorrelationResult {
            metric: metric.to_string(),
            correlation: 0.0,
            sample_size: usable.len(),
        };
    }

    let values: Vec<f64> = usable
        .iter()
        .map(|&(_, v)| def.direction.adjust(v))
        .collect();
    let finishes: Vec<f64> = usable.iter().map(|&(f, _)| -(f as f64)).collect();

    CorrelationResult {
        metric: metric.to_string(),
        correlation: spearman(&values, &finishes),
        sample_size: usable.len(),
    }
}

/// Correlate a metric against top-N membership (1.0 inside, 0.0 outside).
///
/// Uses the stricter [`MIN_TOP_N_SAMPLES`] gate since a binary target
/// needs more points before the coefficient means anything.
pub fn correlation_with_top_n(
    metric: &str,
    pairs: &[(u32, f64)],
    top_n: u32,
    catalog: &MetricCatalog,
) -> CorrelationResult {
    let def = catalog.definition(metric);
    let usable: Vec<(u32, f64)> = pairs
        .iter()
        .filter(|(_, v)| v.is_finite())
        .map(|&(finish, v)| (finish, normalize_percent_scale(v, &def)))
        .collect();

    if usable.len() < MIN_TOP_N_SAMPLES {
        return CorrelationResult {
            metric: metric.to_string(),
            correlation: 0.0,
            sample_size: usable.len(),
        };
    }

    let values: Vec<f64> = usable
        .iter()
        .map(|&(_, v)| def.direction.adjust(v))
        .collect();
    let membership: Vec<f64> = usable
        .iter()
        .map(|&(finish, _)| if finish <= top_n { 1.0 } else { 0.0 })
        .collect();

    CorrelationResult {
        metric: metric.to_string(),
        correlation: spearman(&values, &membership),
        sample_size: usable.len(),
    }
}

/// Build the full per-metric analysis set for one event.
///
/// Every metric observed anywhere in the field is analyzed; the averages
/// use raw (percent-normalized, direction-unadjusted) values so deltas
/// stay readable in the metric's own units.
pub fn analyze_metrics(results: &[PlayerResult], catalog: &MetricCatalog) -> Vec<MetricAnalysis> {
    let mut names: BTreeSet<&str> = BTreeSet::new();
    for result in results {
        names.extend(result.metrics.keys().map(|s| s.as_str()));
    }

    names
        .into_iter()
        .map(|metric| {
            let def = catalog.definition(metric);
            let pairs: Vec<(u32, f64)> = results
                .iter()
                .filter_map(|r| {
                    r.metric(metric)
                        .map(|v| (r.finish_position, normalize_percent_scale(v, &def)))
                })
                .collect();

            let field: Vec<f64> = pairs.iter().map(|&(_, v)| v).collect();
            let top10: Vec<f64> = pairs
                .iter()
                .filter(|&&(finish, _)| finish <= TOP_FINISH_CUTOFF)
                .map(|&(_, v)| v)
                .collect();

            let field_avg = crate::ranks::mean(&field);
            let top10_avg = crate::ranks::mean(&top10);
            let correlation = metric_correlation(metric, &pairs, catalog).correlation;

            MetricAnalysis {
                metric: metric.to_string(),
                top10_avg,
                field_avg,
                delta: top10_avg - field_avg,
                correlation,
                top10_count: top10.len(),
                field_count: field.len(),
            }
        })
        .collect()
}
