//! Metric definition table
//!
//! Every performance metric the engine understands is enumerated here with
//! its group, direction, and percent-scale flag. Lower-is-better metrics
//! (proximity, scoring average, poor-shot counts) are sign-flipped before
//! any correlation or ranking computation so that "higher adjusted value
//! means better outcome" holds uniformly.
//!
//! Metrics absent from the table fall back to substring heuristics on the
//! name. The fallback is logged; a metric that trips it should be added to
//! the table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Functional category a metric belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricGroup {
    Driving,
    Approach,
    CourseManagement,
    Putting,
    AroundTheGreen,
    Scoring,
}

impl MetricGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricGroup::Driving => "driving",
            MetricGroup::Approach => "approach",
            MetricGroup::CourseManagement => "course-management",
            MetricGroup::Putting => "putting",
            MetricGroup::AroundTheGreen => "around-the-green",
            MetricGroup::Scoring => "scoring",
        }
    }
}

impl std::fmt::Display for MetricGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether bigger numbers mean better play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricDirection {
    HigherIsBetter,
    LowerIsBetter,
}

impl MetricDirection {
    /// Sign-adjust a value so that higher always means better
    pub fn adjust(&self, value: f64) -> f64 {
        match self {
            MetricDirection::HigherIsBetter => value,
            MetricDirection::LowerIsBetter => -value,
        }
    }
}

/// Full definition of one metric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricDefinition {
    pub name: String,
    pub group: MetricGroup,
    pub direction: MetricDirection,

    /// Values arrive on a percentage scale (0-1 fraction or 0-100)
    pub percentage: bool,

    /// Historically correlated backwards; tracked explicitly rather than
    /// as a sign-flipped template weight
    pub invert: bool,
}

impl MetricDefinition {
    fn new(
        name: &str,
        group: MetricGroup,
        direction: MetricDirection,
        percentage: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            group,
            direction,
            percentage,
            invert: false,
        }
    }
}

/// Magnitude above which a percent-scale value is treated as 0-100 rather
/// than a 0-1 fraction
pub const PERCENT_SCALE_THRESHOLD: f64 = 1.5;

/// Parse a raw feed value for a metric, normalizing percent scales.
///
/// A trailing `%` is stripped. For percent-flagged metrics, a magnitude
/// above [`PERCENT_SCALE_THRESHOLD`] is divided by 100 so downstream math
/// always sees a [0,1] scale. Unparseable or non-finite values yield
/// `None`.
pub fn parse_metric_value(raw: &str, def: &MetricDefinition) -> Option<f64> {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    let value: f64 = stripped.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(normalize_percent_scale(value, def))
}

/// Apply the percent-scale heuristic to an already-numeric value
pub fn normalize_percent_scale(value: f64, def: &MetricDefinition) -> f64 {
    if def.percentage && value > PERCENT_SCALE_THRESHOLD {
        value / 100.0
    } else {
        value
    }
}

/// The enumerated metric table, with heuristic fallback for unknown names
#[derive(Debug, Clone)]
pub struct MetricCatalog {
    definitions: HashMap<String, MetricDefinition>,
}

impl Default for MetricCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MetricCatalog {
    /// The built-in table covering every metric the upstream feeds emit
    pub fn builtin() -> Self {
        use MetricDirection::{HigherIsBetter, LowerIsBetter};
        use MetricGroup::*;

        let defs = [
            // Driving
            MetricDefinition::new("SG: Off the Tee", Driving, HigherIsBetter, false),
            MetricDefinition::new("Driving Distance", Driving, HigherIsBetter, false),
            MetricDefinition::new("Driving Accuracy %", Driving, HigherIsBetter, true),
            MetricDefinition::new("Ball Speed", Driving, HigherIsBetter, false),
            // Approach
            MetricDefinition::new("SG: Approach", Approach, HigherIsBetter, false),
            MetricDefinition::new("Greens in Regulation %", Approach, HigherIsBetter, true),
            MetricDefinition::new("Proximity to Hole", Approach, LowerIsBetter, false),
            MetricDefinition::new("Rough Proximity", Approach, LowerIsBetter, false),
            MetricDefinition::new("Fairway Proximity", Approach, LowerIsBetter, false),
            MetricDefinition::new("Approaches 50-125 Yards", Approach, LowerIsBetter, false),
            MetricDefinition::new("Approaches 125-175 Yards", Approach, LowerIsBetter, false),
            MetricDefinition::new("Approaches 175+ Yards", Approach, LowerIsBetter, false),
            // Course management
            MetricDefinition::new("Going for the Green %", CourseManagement, HigherIsBetter, true),
            MetricDefinition::new("Poor Shot Avoidance", CourseManagement, LowerIsBetter, false),
            MetricDefinition::new("Penalties per Round", CourseManagement, LowerIsBetter, false),
            MetricDefinition::new("Bogey Avoidance", CourseManagement, LowerIsBetter, true),
            // Putting
            MetricDefinition::new("SG: Putting", Putting, HigherIsBetter, false),
            MetricDefinition::new("Putts per Round", Putting, LowerIsBetter, false),
            MetricDefinition::new("One-Putt %", Putting, HigherIsBetter, true),
            MetricDefinition::new("Three-Putt Avoidance", Putting, LowerIsBetter, true),
            MetricDefinition::new("Putting from 4-8 Feet %", Putting, HigherIsBetter, true),
            // Around the green
            MetricDefinition::new("SG: Around the Green", AroundTheGreen, HigherIsBetter, false),
            MetricDefinition::new("Scrambling %", AroundTheGreen, HigherIsBetter, true),
            MetricDefinition::new("Sand Save %", AroundTheGreen, HigherIsBetter, true),
            // Scoring
            MetricDefinition::new("SG: Total", Scoring, HigherIsBetter, false),
            MetricDefinition::new("Scoring Average", Scoring, LowerIsBetter, false),
            MetricDefinition::new("Birdies per Round", Scoring, HigherIsBetter, false),
            MetricDefinition::new("Par 5 Scoring", Scoring, LowerIsBetter, false),
            MetricDefinition::new("Round 4 Scoring Average", Scoring, LowerIsBetter, false),
        ];

        let definitions = defs
            .into_iter()
            .map(|d| (d.name.clone(), d))
            .collect();
        Self { definitions }
    }

    /// Look up a metric, falling back to name heuristics for unknown ones.
    ///
    /// The fallback is logged with `warn!` so unknown metrics surface in
    /// operator logs instead of silently taking a guessed direction.
    pub fn definition(&self, name: &str) -> MetricDefinition {
        if let Some(def) = self.definitions.get(name) {
            return def.clone();
        }
        let guessed = Self::heuristic_definition(name);
        warn!(
            metric = name,
            group = %guessed.group,
            direction = ?guessed.direction,
            "metric not in definition table, using substring heuristic"
        );
        guessed
    }

    /// Whether a metric is present in the enumerated table
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// All enumerated metric names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(|s| s.as_str())
    }

    /// Documented substring fallback for metrics missing from the table
    fn heuristic_definition(name: &str) -> MetricDefinition {
        let lower = name.to_lowercase();

        let direction = if lower.contains("proximity")
            || lower.contains("scoring average")
            || lower.contains("putts per")
            || lower.contains("three-putt")
            || lower.contains("poor shot")
            || lower.contains("penalt")
            || lower.contains("bogey")
        {
            MetricDirection::LowerIsBetter
        } else {
            MetricDirection::HigherIsBetter
        };

        let group = if lower.contains("driv") || lower.contains("off the tee") {
            MetricGroup::Driving
        } else if lower.contains("approach") || lower.contains("proximity") {
            MetricGroup::Approach
        } else if lower.contains("putt") {
            MetricGroup::Putting
        } else if lower.contains("around the green")
            || lower.contains("scrambl")
            || lower.contains("sand")
        {
            MetricGroup::AroundTheGreen
        } else if lower.contains("scor") || lower.contains("birdie") {
            MetricGroup::Scoring
        } else {
            MetricGroup::CourseManagement
        };

        MetricDefinition {
            name: name.to_string(),
            group,
            direction,
            percentage: lower.contains('%') || lower.contains("percent"),
            invert: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_covers_strokes_gained_family() {
        let catalog = MetricCatalog::builtin();
        for name in ["SG: Off the Tee", "SG: Approach", "SG: Putting", "SG: Total"] {
            assert!(catalog.contains(name), "missing {name}");
            let def = catalog.definition(name);
            assert_eq!(def.direction, MetricDirection::HigherIsBetter);
        }
    }

    #[test]
    fn lower_is_better_metrics_flip_sign() {
        let catalog = MetricCatalog::builtin();
        let def = catalog.definition("Proximity to Hole");
        assert_eq!(def.direction, MetricDirection::LowerIsBetter);
        assert_eq!(def.direction.adjust(34.5), -34.5);
    }

    #[test]
    fn percent_values_normalize_to_unit_scale() {
        let catalog = MetricCatalog::builtin();
        let def = catalog.definition("Driving Accuracy %");

        // 0-100 input, with and without the percent sign
        assert_eq!(parse_metric_value("64.2%", &def), Some(0.642));
        assert_eq!(parse_metric_value("64.2", &def), Some(0.642));
        // Already a fraction: left alone
        assert_eq!(parse_metric_value("0.642", &def), Some(0.642));
        // The threshold itself is not divided
        assert_eq!(parse_metric_value("1.5", &def), Some(1.5));
    }

    #[test]
    fn non_percent_metrics_keep_raw_scale() {
        let catalog = MetricCatalog::builtin();
        let def = catalog.definition("Driving Distance");
        assert_eq!(parse_metric_value("312.4", &def), Some(312.4));
    }

    #[test]
    fn unparseable_values_yield_none() {
        let catalog = MetricCatalog::builtin();
        let def = catalog.definition("SG: Putting");
        assert_eq!(parse_metric_value("--", &def), None);
        assert_eq!(parse_metric_value("", &def), None);
    }

    #[test]
    fn heuristic_fallback_classifies_unknown_proximity_metric() {
        let catalog = MetricCatalog::builtin();
        let def = catalog.definition("Bunker Proximity");
        assert!(!catalog.contains("Bunker Proximity"));
        assert_eq!(def.direction, MetricDirection::LowerIsBetter);
        assert_eq!(def.group, MetricGroup::Approach);
    }

    #[test]
    fn heuristic_fallback_classifies_unknown_driving_metric() {
        let def = MetricCatalog::heuristic_definition("Driving Carry");
        assert_eq!(def.group, MetricGroup::Driving);
        assert_eq!(def.direction, MetricDirection::HigherIsBetter);
    }
}
