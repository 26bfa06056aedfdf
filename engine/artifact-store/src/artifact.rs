//! The stored artifact and its freshness check

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stat_engine::MetricAnalysis;
use uuid::Uuid;

/// Current analysis schema version. Bumped whenever the shape or meaning
/// of [`MetricAnalysis`] changes; artifacts tagged with any other version
/// are always recomputed.
pub const ANALYSIS_SCHEMA_VERSION: u32 = 3;

/// One event's metric analyses as written to durable storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricAnalysisArtifact {
    /// Unique identifier for this artifact
    pub id: Uuid,

    /// The event the analyses belong to
    pub event_id: String,

    /// Schema version the analyses were computed under
    pub schema_version: u32,

    /// Timestamp when the artifact was written
    pub written_at: DateTime<Utc>,

    pub analyses: Vec<MetricAnalysis>,
}

impl MetricAnalysisArtifact {
    /// Stamp a fresh artifact with the current schema version
    pub fn new(event_id: impl Into<String>, analyses: Vec<MetricAnalysis>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id: event_id.into(),
            schema_version: ANALYSIS_SCHEMA_VERSION,
            written_at: Utc::now(),
            analyses,
        }
    }
}

/// Decide whether a stored artifact needs recomputation.
///
/// Stale when the artifact is empty, carries a non-current schema
/// version, or is older than the result feed's last-modified marker.
/// Pure; the caller owns the skip/recompute decision and any logging.
pub fn is_stale(artifact: &MetricAnalysisArtifact, source_modified: DateTime<Utc>) -> bool {
    artifact.analyses.is_empty()
        || artifact.schema_version != ANALYSIS_SCHEMA_VERSION
        || artifact.written_at < source_modified
}
