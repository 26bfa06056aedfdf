//! Z-Score Normalizer
//!
//! Standardizes a metric's values across the field for a single event.
//! A constant field (zero standard deviation) gives no meaningful
//! deviation signal, so those player-metric pairs are omitted entirely
//! rather than emitted as 0 or infinity.

use crate::ranks::{mean, population_std_dev};
use field_model::MetricDirection;
use serde::{Deserialize, Serialize};

/// Threshold below which a standard deviation is treated as zero
const STD_DEV_EPSILON: f64 = 1e-9;

/// One player's standardized score for one metric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZScore {
    pub player_id: String,

    /// (value - field mean) / field std dev
    pub z: f64,

    /// Direction-adjusted z: positive always means better than the field
    /// average, regardless of the metric's raw orientation
    pub adjusted_z: f64,
}

/// Standardize a field of (player, value) pairs for one metric.
///
/// Non-finite values are excluded before the field statistics are
/// computed. Returns an empty vec when the usable field is constant or
/// empty.
pub fn field_zscores(
    field: &[(String, f64)],
    direction: MetricDirection,
) -> Vec<ZScore> {
    let usable: Vec<(&str, f64)> = field
        .iter()
        .filter(|(_, v)| v.is_finite())
        .map(|(id, v)| (id.as_str(), *v))
        .collect();

    let values: Vec<f64> = usable.iter().map(|&(_, v)| v).collect();
    let std_dev = population_std_dev(&values);
    if std_dev < STD_DEV_EPSILON {
        return Vec::new();
    }
    let field_mean = mean(&values);

    usable
        .into_iter()
        .map(|(player_id, value)| {
            let z = (value - field_mean) / std_dev;
            let adjusted_z = match direction {
                MetricDirection::HigherIsBetter => z,
                MetricDirection::LowerIsBetter => -z,
            };
            ZScore { player_id: player_id.to_string(), z, adjusted_z }
        })
        .collect()
}
