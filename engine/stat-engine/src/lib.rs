//! # Stat Engine
//!
//! Leaf statistics for post-event model validation: rank transforms,
//! Spearman correlation, rank-accuracy evaluation, per-metric predictive
//! power, and z-score normalization.
//!
//! Every function here is a pure, deterministic computation over immutable
//! inputs. Degenerate cases (zero variance, tiny samples, zero overlap)
//! resolve to documented fallback values, never NaN or errors, so season
//! aggregation downstream never has to special-case missing results.

pub mod metric_corr;
pub mod rank_eval;
pub mod ranks;
pub mod zscore;

pub use metric_corr::{
    analyze_metrics, correlation_with_top_n, metric_correlation, CorrelationResult,
    MetricAnalysis, MIN_CORRELATION_SAMPLES, MIN_TOP_N_SAMPLES,
};
pub use rank_eval::{evaluate_rank_accuracy, HitRate, RankAccuracy, HIT_RATE_DEPTHS};
pub use ranks::{mean, min_ranks, pearson, population_std_dev, rmse, spearman};
pub use zscore::{field_zscores, ZScore};
