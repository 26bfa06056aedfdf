//! # Field Model
//!
//! Immutable data model shared by the calibration engine crates: player
//! predictions and results, the enumerated metric definition table, and
//! the course-archetype weight templates.
//!
//! Everything in this crate is plain data. Statistics live in
//! `stat-engine`; classification and recommendation live in
//! `calibration-engine`.

pub mod error;
pub mod metrics;
pub mod player;
pub mod template;

pub use error::{ModelError, Result};
pub use metrics::{
    normalize_percent_scale, parse_metric_value, MetricCatalog, MetricDefinition,
    MetricDirection, MetricGroup, PERCENT_SCALE_THRESHOLD,
};
pub use player::{assemble_results, PlayerPrediction, PlayerResult, RawPlayerResult};
pub use template::{CourseType, GroupTemplate, TemplateStore, WeightTemplate};
