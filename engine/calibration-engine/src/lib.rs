//! # Calibration Engine
//!
//! Turns one event's statistics into actionable outputs: a course
//! archetype classification, recommended metric weights relative to a
//! template, a prediction calibration record, and season-level bias and
//! accuracy aggregates.
//!
//! All computation here is deterministic and side-effect-free. Each
//! event's outputs are independently constructed values; season
//! aggregation uses only associative merges, so processing order never
//! affects results.

pub mod bias;
pub mod classifier;
pub mod engine;
pub mod error;
pub mod report;
pub mod season;
pub mod weights;

pub use bias::{BiasConfig, BiasStatus, BiasTrendEntry, BiasTrendTracker};
pub use classifier::{classify_course, ClassificationSource, ClassifierConfig, CourseTypeClassification};
pub use engine::{CalibrationEngine, EventAnalysis};
pub use error::{CalibrationError, Result};
pub use report::{AccuracyCounts, CalibrationRecord, PredictionBucket, TopFinisher};
pub use season::{CorrelationSummary, EventClassification, SeasonAggregator, SeasonSummary};
pub use weights::{recommend_weights, WeightRecommendation};
