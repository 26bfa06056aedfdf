//! # Artifact Store
//!
//! Durable storage for per-event metric analyses, used to skip
//! recomputation when outputs are already populated and fresh. The store
//! lives outside the statistical core so the core stays a pure function
//! of its inputs; freshness itself is a pure function over artifact
//! metadata.

pub mod artifact;
pub mod error;
pub mod store;

pub use artifact::{is_stale, MetricAnalysisArtifact, ANALYSIS_SCHEMA_VERSION};
pub use error::{Result, StoreError};
pub use store::{ArtifactStore, LocalArtifactStore};
