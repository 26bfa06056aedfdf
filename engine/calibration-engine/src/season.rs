//! Season aggregation
//!
//! Merges per-event outputs into season-level views: a classification
//! roster, a merged calibration record, bias trends, and correlation
//! summaries grouped by course type. Every merge is associative (sum,
//! concatenation, max), so the order events are added never changes the
//! result.

use crate::bias::{BiasConfig, BiasTrendEntry, BiasTrendTracker};
use crate::engine::EventAnalysis;
use crate::report::CalibrationRecord;
use field_model::{CourseType, PlayerResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// One roster line: which archetype an event was classified as
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventClassification {
    pub event: String,
    pub course_type: CourseType,
}

/// Mean correlation for one metric across a course type's events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationSummary {
    pub course_type: CourseType,
    pub metric: String,
    pub mean_correlation: f64,
    pub events: usize,
}

/// The season-level outputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub roster: Vec<EventClassification>,
    pub calibration: CalibrationRecord,
    pub bias_trends: Vec<BiasTrendEntry>,
    pub correlation_summaries: Vec<CorrelationSummary>,
}

/// Accumulates per-event analyses into a season summary
#[derive(Debug, Clone)]
pub struct SeasonAggregator {
    roster: Vec<EventClassification>,
    calibration: Option<CalibrationRecord>,
    bias: BiasTrendTracker,

    /// (course type, metric) -> per-event correlations
    correlations: HashMap<(CourseType, String), Vec<f64>>,
}

impl SeasonAggregator {
    pub fn new(bias_config: BiasConfig) -> Self {
        Self {
            roster: Vec::new(),
            calibration: None,
            bias: BiasTrendTracker::new(bias_config),
            correlations: HashMap::new(),
        }
    }

    /// Fold one event's analysis and raw results into the season.
    ///
    /// The results are needed alongside the analysis because bias
    /// tracking pairs model estimates against actuals at the player
    /// level, which the per-metric analyses no longer carry.
    pub fn add_event(&mut self, analysis: &EventAnalysis, results: &[PlayerResult]) {
        self.roster.push(EventClassification {
            event: analysis.event.clone(),
            course_type: analysis.classification.course_type,
        });

        match &mut self.calibration {
            Some(merged) => merged.merge(&analysis.calibration),
            None => {
                let mut seed = analysis.calibration.clone();
                seed.tournament = "season".to_string();
                self.calibration = Some(seed);
            }
        }

        self.bias.record_event(results);

        for metric_analysis in &analysis.analyses {
            self.correlations
                .entry((
                    analysis.classification.course_type,
                    metric_analysis.metric.clone(),
                ))
                .or_default()
                .push(metric_analysis.correlation);
        }
    }

    /// Number of events folded in so far
    pub fn event_count(&self) -> usize {
        self.roster.len()
    }

    /// Produce the season summary
    pub fn finish(self) -> SeasonSummary {
        let mut correlation_summaries: Vec<CorrelationSummary> = self
            .correlations
            .into_iter()
            .map(|((course_type, metric), values)| CorrelationSummary {
                course_type,
                metric,
                mean_correlation: stat_engine::mean(&values),
                events: values.len(),
            })
            .collect();
        correlation_summaries.sort_by(|a, b| {
            (a.course_type.to_string(), &a.metric).cmp(&(b.course_type.to_string(), &b.metric))
        });

        let calibration = self.calibration.unwrap_or_else(|| CalibrationRecord {
            tournament: "season".to_string(),
            top_finishers: Vec::new(),
            counts: Default::default(),
        });

        info!(
            events = self.roster.len(),
            summaries = correlation_summaries.len(),
            "season aggregation complete"
        );

        SeasonSummary {
            roster: self.roster,
            calibration,
            bias_trends: self.bias.summarize(),
            correlation_summaries,
        }
    }
}

impl Default for SeasonAggregator {
    fn default() -> Self {
        Self::new(BiasConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CalibrationEngine;
    use field_model::PlayerPrediction;
    use std::collections::HashMap;

    fn prediction(id: &str, rank: u32) -> PlayerPrediction {
        PlayerPrediction { player_id: id.to_string(), predicted_rank: rank }
    }

    fn result(id: &str, finish: u32, actual: f64, estimated: f64) -> PlayerResult {
        let mut metrics = HashMap::new();
        metrics.insert("SG: Putting".to_string(), actual);
        let mut model_metrics = HashMap::new();
        model_metrics.insert("SG: Putting".to_string(), estimated);
        PlayerResult {
            player_id: id.to_string(),
            finish_position: finish,
            metrics,
            model_metrics,
        }
    }

    fn event(engine: &CalibrationEngine, name: &str) -> (EventAnalysis, Vec<PlayerResult>) {
        let predictions = vec![prediction("a", 1), prediction("b", 2), prediction("c", 3)];
        let results = vec![
            result("a", 1, 2.0, 2.3),
            result("b", 2, 1.0, 1.4),
            result("c", 3, 0.0, 0.2),
        ];
        let analysis = engine.analyze_event(name, &predictions, &results).unwrap();
        (analysis, results)
    }

    #[test]
    fn roster_holds_one_line_per_event() {
        let engine = CalibrationEngine::default();
        let mut season = SeasonAggregator::default();
        for name in ["Open A", "Open B", "Open C"] {
            let (analysis, results) = event(&engine, name);
            season.add_event(&analysis, &results);
        }
        assert_eq!(season.event_count(), 3);

        let summary = season.finish();
        assert_eq!(summary.roster.len(), 3);
        assert_eq!(summary.roster[0].event, "Open A");
    }

    #[test]
    fn calibration_merges_across_events() {
        let engine = CalibrationEngine::default();
        let mut season = SeasonAggregator::default();
        for name in ["Open A", "Open B"] {
            let (analysis, results) = event(&engine, name);
            season.add_event(&analysis, &results);
        }
        let summary = season.finish();
        assert_eq!(summary.calibration.tournament, "season");
        assert_eq!(summary.calibration.top_finishers.len(), 6);
        assert_eq!(summary.calibration.counts.top10_total, 6);
    }

    #[test]
    fn bias_trends_accumulate_model_deltas() {
        let engine = CalibrationEngine::default();
        let mut season = SeasonAggregator::default();
        for name in ["A", "B", "C", "D", "E", "F", "G"] {
            let (analysis, results) = event(&engine, name);
            season.add_event(&analysis, &results);
        }
        let summary = season.finish();
        let putting = summary
            .bias_trends
            .iter()
            .find(|e| e.metric == "SG: Putting")
            .unwrap();
        // 3 players x 7 events, model always over-estimating
        assert_eq!(putting.sample_count, 21);
        assert!(putting.mean_delta > 0.0);
        assert_eq!(putting.over_pct, 1.0);
    }

    #[test]
    fn correlation_summaries_group_by_course_type() {
        let engine = CalibrationEngine::default();
        let mut season = SeasonAggregator::default();
        let (analysis, results) = event(&engine, "Open A");
        season.add_event(&analysis, &results);
        let course_type = analysis.classification.course_type;

        let summary = season.finish();
        let line = summary
            .correlation_summaries
            .iter()
            .find(|s| s.metric == "SG: Putting")
            .unwrap();
        assert_eq!(line.course_type, course_type);
        assert_eq!(line.events, 1);
    }

    #[test]
    fn empty_season_summarizes_cleanly() {
        let summary = SeasonAggregator::default().finish();
        assert!(summary.roster.is_empty());
        assert!(summary.bias_trends.is_empty());
        assert!(summary.correlation_summaries.is_empty());
        assert_eq!(summary.calibration.top10_inside_top30_rate(), 0.0);
    }
}
