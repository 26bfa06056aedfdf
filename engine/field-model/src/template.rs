//! Course-archetype weight templates
//!
//! A template assigns each metric group a share of the overall model, and
//! each metric a weight within its group. Templates are the reference
//! point for weight recommendations; the engine never edits them.
//!
//! Source templates may carry signed weights as a legacy annotation for
//! "historically correlated backwards" metrics. The store exposes weights
//! as magnitudes only and tracks inversion in an explicit set.

use crate::error::{ModelError, Result};
use crate::metrics::MetricGroup;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Course archetype: which skill category best predicts success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseType {
    Power,
    Technical,
    Balanced,
}

impl std::fmt::Display for CourseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CourseType::Power => "POWER",
            CourseType::Technical => "TECHNICAL",
            CourseType::Balanced => "BALANCED",
        };
        f.write_str(label)
    }
}

/// One group's slice of a template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupTemplate {
    /// The group's share of the overall template
    pub weight: f64,

    /// Per-metric weights within the group; may be signed in source files
    #[serde(default)]
    pub metrics: HashMap<String, f64>,
}

/// A full template for one course archetype
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightTemplate {
    pub course_type: CourseType,
    pub groups: HashMap<MetricGroup, GroupTemplate>,
}

impl WeightTemplate {
    /// The group's template weight as a magnitude, 0 if the group is absent
    pub fn group_weight(&self, group: MetricGroup) -> f64 {
        self.groups.get(&group).map(|g| g.weight.abs()).unwrap_or(0.0)
    }

    /// A metric's template weight within its group, as a magnitude
    pub fn metric_weight(&self, group: MetricGroup, metric: &str) -> f64 {
        self.groups
            .get(&group)
            .and_then(|g| g.metrics.get(metric))
            .map(|w| w.abs())
            .unwrap_or(0.0)
    }
}

/// On-disk template file shape
#[derive(Debug, Deserialize)]
struct TemplateFile {
    /// Metrics known to correlate backwards historically
    #[serde(default)]
    inverted: Vec<String>,

    #[serde(flatten)]
    templates: HashMap<CourseType, HashMap<MetricGroup, GroupTemplate>>,
}

/// Loaded templates for every course archetype
#[derive(Debug, Clone)]
pub struct TemplateStore {
    templates: HashMap<CourseType, WeightTemplate>,
    inverted: HashSet<String>,
}

impl TemplateStore {
    /// Load templates from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    /// Parse templates from TOML text
    pub fn load_from_str(content: &str) -> Result<Self> {
        let file: TemplateFile = toml::from_str(content)?;
        let templates = file
            .templates
            .into_iter()
            .map(|(course_type, groups)| {
                (course_type, WeightTemplate { course_type, groups })
            })
            .collect();
        Ok(Self {
            templates,
            inverted: file.inverted.into_iter().collect(),
        })
    }

    /// The template for a course archetype; a missing entry is a hard
    /// configuration failure, not a fallback
    pub fn template(&self, course_type: CourseType) -> Result<&WeightTemplate> {
        self.templates
            .get(&course_type)
            .ok_or_else(|| ModelError::unknown_template(course_type.to_string()))
    }

    /// The BALANCED template, used as the neutral weighting reference for
    /// course classification
    pub fn balanced(&self) -> Result<&WeightTemplate> {
        self.template(CourseType::Balanced)
    }

    /// Whether a metric is in the known-inverted set
    pub fn is_inverted(&self, metric: &str) -> bool {
        self.inverted.contains(metric)
    }

    /// Built-in templates with neutral, evenly-spread group weights.
    ///
    /// Useful for tests and as a last-resort default; production runs load
    /// a tuned template file.
    pub fn builtin() -> Self {
        fn group(weight: f64, metrics: &[(&str, f64)]) -> GroupTemplate {
            GroupTemplate {
                weight,
                metrics: metrics
                    .iter()
                    .map(|(name, w)| (name.to_string(), *w))
                    .collect(),
            }
        }

        let make = |course_type: CourseType,
                    driving: f64,
                    approach: f64,
                    management: f64,
                    putting: f64,
                    short: f64,
                    scoring: f64| {
            let groups = HashMap::from([
                (
                    MetricGroup::Driving,
                    group(
                        driving,
                        &[
                            ("SG: Off the Tee", 0.50),
                            ("Driving Distance", 0.30),
                            ("Driving Accuracy %", 0.20),
                        ],
                    ),
                ),
                (
                    MetricGroup::Approach,
                    group(
                        approach,
                        &[
                            ("SG: Approach", 0.45),
                            ("Greens in Regulation %", 0.25),
                            ("Proximity to Hole", 0.30),
                        ],
                    ),
                ),
                (
                    MetricGroup::CourseManagement,
                    group(
                        management,
                        &[("Bogey Avoidance", 0.60), ("Going for the Green %", 0.40)],
                    ),
                ),
                (
                    MetricGroup::Putting,
                    group(
                        putting,
                        &[
                            ("SG: Putting", 0.55),
                            ("Putts per Round", 0.25),
                            ("Three-Putt Avoidance", 0.20),
                        ],
                    ),
                ),
                (
                    MetricGroup::AroundTheGreen,
                    group(
                        short,
                        &[
                            ("SG: Around the Green", 0.50),
                            ("Scrambling %", 0.30),
                            ("Sand Save %", 0.20),
                        ],
                    ),
                ),
                (
                    MetricGroup::Scoring,
                    group(
                        scoring,
                        &[
                            ("SG: Total", 0.40),
                            ("Scoring Average", 0.35),
                            ("Birdies per Round", 0.25),
                        ],
                    ),
                ),
            ]);
            WeightTemplate { course_type, groups }
        };

        let templates = HashMap::from([
            (
                CourseType::Power,
                make(CourseType::Power, 0.30, 0.20, 0.10, 0.15, 0.10, 0.15),
            ),
            (
                CourseType::Technical,
                make(CourseType::Technical, 0.12, 0.30, 0.18, 0.15, 0.10, 0.15),
            ),
            (
                CourseType::Balanced,
                make(CourseType::Balanced, 0.18, 0.22, 0.12, 0.18, 0.12, 0.18),
            ),
        ]);

        Self {
            templates,
            inverted: HashSet::new(),
        }
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_store_resolves_all_archetypes() {
        let store = TemplateStore::builtin();
        for course_type in [CourseType::Power, CourseType::Technical, CourseType::Balanced] {
            let template = store.template(course_type).unwrap();
            assert_eq!(template.course_type, course_type);
            assert!(template.group_weight(MetricGroup::Driving) > 0.0);
        }
    }

    #[test]
    fn missing_template_is_a_hard_error() {
        let store = TemplateStore::load_from_str(
            r#"
            [balanced.driving]
            weight = 1.0
            "#,
        )
        .unwrap();
        assert!(store.template(CourseType::Power).is_err());
        assert!(store.balanced().is_ok());
    }

    #[test]
    fn signed_source_weights_are_read_as_magnitudes() {
        let store = TemplateStore::load_from_str(
            r#"
            inverted = ["Three-Putt Avoidance"]

            [balanced.putting]
            weight = -0.2
            metrics = { "SG: Putting" = 0.6, "Three-Putt Avoidance" = -0.4 }
            "#,
        )
        .unwrap();
        let template = store.balanced().unwrap();
        assert_eq!(template.group_weight(MetricGroup::Putting), 0.2);
        assert_eq!(
            template.metric_weight(MetricGroup::Putting, "Three-Putt Avoidance"),
            0.4
        );
        assert!(store.is_inverted("Three-Putt Avoidance"));
        assert!(!store.is_inverted("SG: Putting"));
    }

    #[test]
    fn absent_group_and_metric_weights_are_zero() {
        let store = TemplateStore::builtin();
        let template = store.balanced().unwrap();
        assert_eq!(template.metric_weight(MetricGroup::Driving, "Ball Speed"), 0.0);
    }
}
