//! Weight Recommendation Engine
//!
//! Proposes new per-metric weights from observed correlations, relative to
//! a course-archetype template. A metric that correlates more strongly
//! with winning, within its functional category, earns a larger share of
//! that category's fixed budget. Recommendations are always relative
//! within their own group; one hot metric never raids another group's
//! allocation.
//!
//! Built as an immutable two-pass reduce: group maxima and sums first,
//! then a single mapping pass, so there is no incremental floating-point
//! drift from repeated accumulation.

use field_model::{MetricCatalog, MetricGroup, WeightTemplate};
use serde::{Deserialize, Serialize};
use stat_engine::CorrelationResult;
use std::collections::HashMap;
use tracing::debug;

/// A recommended weight for one metric, with its template reference point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightRecommendation {
    pub metric: String,
    pub group: MetricGroup,

    /// The template's weight for this metric, as a magnitude
    pub template_weight: f64,

    /// Within-group share in [0, 1]; group shares sum to 1 unless the
    /// whole group had zero correlation
    pub recommended_weight: f64,

    pub correlation: f64,

    /// recommended - template
    pub gap: f64,

    /// gap / template; `None` when the template weight is 0, rendered as
    /// "N/A" rather than a division-by-zero artifact
    pub pct_change: Option<f64>,
}

/// Recommend weights for every correlated metric, grouped by the
/// catalog's metric groups and referenced against `template`.
///
/// Per group: `base = |corr| / max |corr|`, renormalized so the group's
/// recommendations sum to 1. A group where every correlation is 0 gets 0
/// for every member; no signal is not presented as equal confidence.
pub fn recommend_weights(
    correlations: &[CorrelationResult],
    catalog: &MetricCatalog,
    template: &WeightTemplate,
) -> Vec<WeightRecommendation> {
    // Pass 1: group membership, maxima and base sums
    let mut groups: HashMap<MetricGroup, Vec<&CorrelationResult>> = HashMap::new();
    for result in correlations {
        let group = catalog.definition(&result.metric).group;
        groups.entry(group).or_default().push(result);
    }

    let mut group_max: HashMap<MetricGroup, f64> = HashMap::new();
    let mut group_base_sum: HashMap<MetricGroup, f64> = HashMap::new();
    for (&group, members) in &groups {
        let max_abs = members
            .iter()
            .map(|r| r.correlation.abs())
            .fold(0.0, f64::max);
        let base_sum = if max_abs > 0.0 {
            members
                .iter()
                .map(|r| r.correlation.abs() / max_abs)
                .sum::<f64>()
        } else {
            0.0
        };
        group_max.insert(group, max_abs);
        group_base_sum.insert(group, base_sum);
    }

    // Pass 2: map each metric to its share of the group budget
    let mut recommendations: Vec<WeightRecommendation> = correlations
        .iter()
        .map(|result| {
            let group = catalog.definition(&result.metric).group;
            let max_abs = group_max[&group];
            let base_sum = group_base_sum[&group];

            let recommended_weight = if max_abs > 0.0 && base_sum > 0.0 {
                (result.correlation.abs() / max_abs) / base_sum
            } else {
                0.0
            };

            let template_weight = template.metric_weight(group, &result.metric);
            let gap = recommended_weight - template_weight;
            let pct_change = if template_weight > 0.0 {
                Some(gap / template_weight)
            } else {
                None
            };

            WeightRecommendation {
                metric: result.metric.clone(),
                group,
                template_weight,
                recommended_weight,
                correlation: result.correlation,
                gap,
                pct_change,
            }
        })
        .collect();

    recommendations.sort_by(|a, b| b.gap.abs().total_cmp(&a.gap.abs()));
    debug!(
        metrics = recommendations.len(),
        groups = groups.len(),
        "built weight recommendations"
    );
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use field_model::TemplateStore;

    fn corr(metric: &str, correlation: f64) -> CorrelationResult {
        CorrelationResult { metric: metric.to_string(), correlation, sample_size: 70 }
    }

    fn template() -> WeightTemplate {
        TemplateStore::builtin().balanced().unwrap().clone()
    }

    fn group_sum(recs: &[WeightRecommendation], group: MetricGroup) -> f64 {
        recs.iter()
            .filter(|r| r.group == group)
            .map(|r| r.recommended_weight)
            .sum()
    }

    #[test]
    fn group_shares_sum_to_one_with_any_signal() {
        let correlations = vec![
            corr("SG: Off the Tee", 0.62),
            corr("Driving Distance", 0.31),
            corr("Driving Accuracy %", -0.15),
            corr("SG: Putting", 0.40),
            corr("Putts per Round", 0.10),
        ];
        let recs = recommend_weights(&correlations, &MetricCatalog::builtin(), &template());

        assert!((group_sum(&recs, MetricGroup::Driving) - 1.0).abs() < 1e-9);
        assert!((group_sum(&recs, MetricGroup::Putting) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn all_zero_group_recommends_zero_for_every_member() {
        let correlations = vec![
            corr("SG: Putting", 0.0),
            corr("Putts per Round", 0.0),
            corr("Three-Putt Avoidance", 0.0),
        ];
        let recs = recommend_weights(&correlations, &MetricCatalog::builtin(), &template());
        for rec in &recs {
            assert_eq!(rec.recommended_weight, 0.0);
        }
        assert_eq!(group_sum(&recs, MetricGroup::Putting), 0.0);
    }

    #[test]
    fn stronger_correlation_earns_the_larger_share() {
        let correlations = vec![
            corr("SG: Approach", 0.60),
            corr("Proximity to Hole", -0.30),
        ];
        let recs = recommend_weights(&correlations, &MetricCatalog::builtin(), &template());

        let approach = recs.iter().find(|r| r.metric == "SG: Approach").unwrap();
        let proximity = recs.iter().find(|r| r.metric == "Proximity to Hole").unwrap();

        // Shares 1.0 and 0.5 before renormalization
        assert!((approach.recommended_weight - 2.0 / 3.0).abs() < 1e-9);
        assert!((proximity.recommended_weight - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn correlation_sign_is_treated_as_magnitude() {
        let correlations = vec![
            corr("SG: Putting", -0.50),
            corr("Putts per Round", 0.50),
        ];
        let recs = recommend_weights(&correlations, &MetricCatalog::builtin(), &template());
        for rec in &recs {
            assert!((rec.recommended_weight - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_template_weight_reports_pct_change_as_not_applicable() {
        // Ball Speed carries no weight in the builtin balanced template
        let correlations = vec![corr("Ball Speed", 0.45), corr("SG: Off the Tee", 0.60)];
        let recs = recommend_weights(&correlations, &MetricCatalog::builtin(), &template());

        let ball_speed = recs.iter().find(|r| r.metric == "Ball Speed").unwrap();
        assert_eq!(ball_speed.template_weight, 0.0);
        assert_eq!(ball_speed.pct_change, None);
        assert!(ball_speed.gap > 0.0);

        let tee = recs.iter().find(|r| r.metric == "SG: Off the Tee").unwrap();
        assert!(tee.pct_change.is_some());
    }

    #[test]
    fn groups_are_renormalized_independently() {
        // A huge driving correlation must not shrink putting's budget
        let correlations = vec![
            corr("SG: Off the Tee", 0.95),
            corr("SG: Putting", 0.05),
        ];
        let recs = recommend_weights(&correlations, &MetricCatalog::builtin(), &template());
        for rec in &recs {
            // Each metric is alone in its group: full share either way
            assert!((rec.recommended_weight - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn recommendations_surface_largest_gaps_first() {
        let correlations = vec![
            corr("SG: Putting", 0.80),
            corr("Putts per Round", 0.08),
            corr("Three-Putt Avoidance", 0.04),
        ];
        let recs = recommend_weights(&correlations, &MetricCatalog::builtin(), &template());
        for pair in recs.windows(2) {
            assert!(pair[0].gap.abs() >= pair[1].gap.abs());
        }
    }
}
