//! Per-event orchestration
//!
//! `CalibrationEngine` wires the statistical components together for one
//! event: metric analyses, rank accuracy, course classification, weight
//! recommendations and the calibration record. It holds only immutable
//! configuration; every call is a pure function of its inputs.

use crate::classifier::{classify_course, ClassifierConfig, CourseTypeClassification};
use crate::error::Result;
use crate::report::CalibrationRecord;
use crate::weights::{recommend_weights, WeightRecommendation};
use field_model::{MetricCatalog, PlayerPrediction, PlayerResult, TemplateStore};
use serde::{Deserialize, Serialize};
use stat_engine::{
    analyze_metrics, evaluate_rank_accuracy, CorrelationResult, MetricAnalysis, RankAccuracy,
};
use tracing::info;

/// Everything the engine derives from one event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAnalysis {
    pub event: String,
    pub analyses: Vec<MetricAnalysis>,
    pub rank_accuracy: RankAccuracy,
    pub classification: CourseTypeClassification,
    pub recommendations: Vec<WeightRecommendation>,
    pub calibration: CalibrationRecord,
}

/// The post-event validation engine for a configured season
#[derive(Debug, Clone)]
pub struct CalibrationEngine {
    catalog: MetricCatalog,
    templates: TemplateStore,
    classifier_config: ClassifierConfig,
}

impl CalibrationEngine {
    pub fn new(
        catalog: MetricCatalog,
        templates: TemplateStore,
        classifier_config: ClassifierConfig,
    ) -> Self {
        Self { catalog, templates, classifier_config }
    }

    pub fn catalog(&self) -> &MetricCatalog {
        &self.catalog
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    /// Analyze one event end to end.
    ///
    /// Fails only on configuration problems (a missing BALANCED template);
    /// partial or empty feeds produce valid, zeroed outputs.
    pub fn analyze_event(
        &self,
        event: impl Into<String>,
        predictions: &[PlayerPrediction],
        results: &[PlayerResult],
    ) -> Result<EventAnalysis> {
        let event = event.into();
        let analyses = analyze_metrics(results, &self.catalog);
        let rank_accuracy = evaluate_rank_accuracy(predictions, results);

        let balanced = self.templates.balanced()?;
        let classification =
            classify_course(&analyses, &self.catalog, balanced, &self.classifier_config);

        // Recommendations reference the template for the classified type
        let template = self.templates.template(classification.course_type)?;
        let correlations: Vec<CorrelationResult> = analyses
            .iter()
            .map(|a| CorrelationResult {
                metric: a.metric.clone(),
                correlation: a.correlation,
                sample_size: a.field_count,
            })
            .collect();
        let recommendations = recommend_weights(&correlations, &self.catalog, template);

        let calibration = CalibrationRecord::build(event.clone(), predictions, results);

        info!(
            event = %event,
            players = results.len(),
            matched = rank_accuracy.sample_size,
            course_type = %classification.course_type,
            spearman = rank_accuracy.spearman,
            "analyzed event"
        );

        Ok(EventAnalysis {
            event,
            analyses,
            rank_accuracy,
            classification,
            recommendations,
            calibration,
        })
    }

    /// Rebuild an [`EventAnalysis`] from previously stored metric
    /// analyses, skipping the per-metric recomputation.
    ///
    /// Used by the skip-if-fresh path: the stored analyses are trusted,
    /// and only derived values (classification, recommendations, rank
    /// accuracy, calibration) are rebuilt from them plus the raw feeds.
    pub fn analyze_event_with_analyses(
        &self,
        event: impl Into<String>,
        analyses: Vec<MetricAnalysis>,
        predictions: &[PlayerPrediction],
        results: &[PlayerResult],
    ) -> Result<EventAnalysis> {
        let event = event.into();
        let rank_accuracy = evaluate_rank_accuracy(predictions, results);

        let balanced = self.templates.balanced()?;
        let classification =
            classify_course(&analyses, &self.catalog, balanced, &self.classifier_config);
        let template = self.templates.template(classification.course_type)?;
        let correlations: Vec<CorrelationResult> = analyses
            .iter()
            .map(|a| CorrelationResult {
                metric: a.metric.clone(),
                correlation: a.correlation,
                sample_size: a.field_count,
            })
            .collect();
        let recommendations = recommend_weights(&correlations, &self.catalog, template);
        let calibration = CalibrationRecord::build(event.clone(), predictions, results);

        Ok(EventAnalysis {
            event,
            analyses,
            rank_accuracy,
            classification,
            recommendations,
            calibration,
        })
    }
}

impl Default for CalibrationEngine {
    fn default() -> Self {
        Self::new(
            MetricCatalog::builtin(),
            TemplateStore::builtin(),
            ClassifierConfig::default(),
        )
    }
}
