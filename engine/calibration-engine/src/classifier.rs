//! Course-Type Classifier
//!
//! Infers whether a course rewarded power, technical precision, or a
//! balance, from one event's metric analyses. A pure, stateless function:
//! the same analysis set always yields the same label.
//!
//! The winner must beat the runner-up bucket by a configured margin;
//! anything closer is labeled BALANCED, since a marginal signal is not
//! trustworthy evidence of a specialized course.

use field_model::{CourseType, MetricCatalog, MetricGroup, WeightTemplate};
use serde::{Deserialize, Serialize};
use stat_engine::MetricAnalysis;
use tracing::debug;

/// Tuning knobs for the classifier. The defaults are the empirically
/// chosen production values; override them rather than re-deriving.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// How many of the largest-|delta| metrics feed the buckets
    pub top_delta_count: usize,

    /// The winning bucket must reach `margin * runner_up_score`
    pub winner_margin: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { top_delta_count: 15, winner_margin: 1.25 }
    }
}

/// How the label was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationSource {
    /// A bucket cleared the winner margin
    MarginWinner,

    /// No bucket cleared the margin; conservative default
    BalancedDefault,
}

/// The classification for one event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseTypeClassification {
    pub course_type: CourseType,
    pub source: ClassificationSource,

    /// Accumulated weight x |delta| evidence per bucket
    pub power_score: f64,
    pub technical_score: f64,
    pub balanced_score: f64,
}

/// Which bucket a metric group's evidence lands in
fn bucket_for(group: MetricGroup) -> CourseType {
    match group {
        MetricGroup::Driving => CourseType::Power,
        MetricGroup::Approach | MetricGroup::CourseManagement => CourseType::Technical,
        MetricGroup::Putting | MetricGroup::AroundTheGreen | MetricGroup::Scoring => {
            CourseType::Balanced
        }
    }
}

/// Classify one event from its metric analysis set.
///
/// `balanced_template` supplies the neutral per-group weights used to
/// scale each metric's |delta| evidence; it is a weighting reference, not
/// a bias toward the BALANCED label.
pub fn classify_course(
    analyses: &[MetricAnalysis],
    catalog: &MetricCatalog,
    balanced_template: &WeightTemplate,
    config: &ClassifierConfig,
) -> CourseTypeClassification {
    let mut ranked: Vec<&MetricAnalysis> = analyses.iter().collect();
    ranked.sort_by(|a, b| b.delta.abs().total_cmp(&a.delta.abs()));
    ranked.truncate(config.top_delta_count);

    let mut power = 0.0;
    let mut technical = 0.0;
    let mut balanced = 0.0;
    for analysis in &ranked {
        let group = catalog.definition(&analysis.metric).group;
        let evidence = balanced_template.group_weight(group) * analysis.delta.abs();
        match bucket_for(group) {
            CourseType::Power => power += evidence,
            CourseType::Technical => technical += evidence,
            CourseType::Balanced => balanced += evidence,
        }
    }

    let mut scored = [
        (CourseType::Power, power),
        (CourseType::Technical, technical),
        (CourseType::Balanced, balanced),
    ];
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    let (leader, leader_score) = scored[0];
    let (_, runner_up_score) = scored[1];

    let (course_type, source) = if leader_score > 0.0
        && leader_score >= config.winner_margin * runner_up_score
    {
        (leader, ClassificationSource::MarginWinner)
    } else {
        (CourseType::Balanced, ClassificationSource::BalancedDefault)
    };

    debug!(
        %course_type,
        power, technical, balanced,
        "classified course archetype"
    );

    CourseTypeClassification {
        course_type,
        source,
        power_score: power,
        technical_score: technical,
        balanced_score: balanced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use field_model::TemplateStore;

    fn analysis(metric: &str, delta: f64) -> MetricAnalysis {
        MetricAnalysis {
            metric: metric.to_string(),
            top10_avg: delta,
            field_avg: 0.0,
            delta,
            correlation: 0.0,
            top10_count: 10,
            field_count: 70,
        }
    }

    fn balanced() -> field_model::WeightTemplate {
        TemplateStore::builtin().balanced().unwrap().clone()
    }

    #[test]
    fn dominant_driving_deltas_classify_power() {
        let analyses = vec![
            analysis("SG: Off the Tee", 3.0),
            analysis("Driving Distance", 12.0),
            analysis("Driving Accuracy %", 0.9),
            analysis("SG: Putting", 0.1),
        ];
        let c = classify_course(
            &analyses,
            &MetricCatalog::builtin(),
            &balanced(),
            &ClassifierConfig::default(),
        );
        assert_eq!(c.course_type, CourseType::Power);
        assert_eq!(c.source, ClassificationSource::MarginWinner);
        assert!(c.power_score > c.technical_score);
    }

    #[test]
    fn approach_and_management_deltas_classify_technical() {
        let analyses = vec![
            analysis("SG: Approach", 3.5),
            analysis("Proximity to Hole", -8.0),
            analysis("Bogey Avoidance", -2.0),
            analysis("SG: Off the Tee", 0.2),
        ];
        let c = classify_course(
            &analyses,
            &MetricCatalog::builtin(),
            &balanced(),
            &ClassifierConfig::default(),
        );
        assert_eq!(c.course_type, CourseType::Technical);
    }

    #[test]
    fn narrow_margin_defaults_to_balanced() {
        // Power and technical evidence nearly equal: below the 1.25x bar
        let analyses = vec![
            analysis("SG: Off the Tee", 1.0),
            analysis("SG: Approach", 0.9),
        ];
        let c = classify_course(
            &analyses,
            &MetricCatalog::builtin(),
            &balanced(),
            &ClassifierConfig::default(),
        );
        assert_eq!(c.course_type, CourseType::Balanced);
        assert_eq!(c.source, ClassificationSource::BalancedDefault);
    }

    #[test]
    fn margin_exactly_met_takes_the_leader() {
        // Unit group weights keep the bucket arithmetic exact: evidence
        // 1.25 vs 1.0 sits right on the margin and the leader wins.
        let mut groups = std::collections::HashMap::new();
        for group in [field_model::MetricGroup::Driving, field_model::MetricGroup::Approach] {
            groups.insert(
                group,
                field_model::GroupTemplate { weight: 1.0, metrics: Default::default() },
            );
        }
        let template = field_model::WeightTemplate {
            course_type: CourseType::Balanced,
            groups,
        };

        let analyses = vec![
            analysis("Driving Distance", 1.25),
            analysis("SG: Approach", 1.0),
        ];
        let c = classify_course(
            &analyses,
            &MetricCatalog::builtin(),
            &template,
            &ClassifierConfig::default(),
        );
        assert_eq!(c.course_type, CourseType::Power);
        assert_eq!(c.source, ClassificationSource::MarginWinner);
    }

    #[test]
    fn classification_is_idempotent() {
        let analyses = vec![
            analysis("Driving Distance", 9.0),
            analysis("SG: Putting", 1.1),
            analysis("SG: Approach", 0.7),
        ];
        let catalog = MetricCatalog::builtin();
        let template = balanced();
        let config = ClassifierConfig::default();

        let first = classify_course(&analyses, &catalog, &template, &config);
        for _ in 0..5 {
            let again = classify_course(&analyses, &catalog, &template, &config);
            assert_eq!(again.course_type, first.course_type);
            assert_eq!(again.source, first.source);
        }
    }

    #[test]
    fn empty_analysis_set_is_balanced() {
        let c = classify_course(
            &[],
            &MetricCatalog::builtin(),
            &balanced(),
            &ClassifierConfig::default(),
        );
        assert_eq!(c.course_type, CourseType::Balanced);
        assert_eq!(c.source, ClassificationSource::BalancedDefault);
    }

    #[test]
    fn only_the_largest_deltas_count() {
        // One huge putting delta outside the top-1 window must not count
        let config = ClassifierConfig { top_delta_count: 1, winner_margin: 1.25 };
        let analyses = vec![
            analysis("Driving Distance", 10.0),
            analysis("SG: Putting", 5.0),
        ];
        let c = classify_course(
            &analyses,
            &MetricCatalog::builtin(),
            &balanced(),
            &config,
        );
        assert_eq!(c.balanced_score, 0.0);
        assert_eq!(c.course_type, CourseType::Power);
    }
}
