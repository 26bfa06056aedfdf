//! Artifact storage backends
//!
//! `ArtifactStore` is the seam between the engine and durability; the
//! local backend keeps one pretty-printed JSON file per event under a
//! data directory.

use crate::artifact::MetricAnalysisArtifact;
use crate::error::{Result, StoreError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Get/put interface over stored artifacts
pub trait ArtifactStore {
    /// Fetch the stored artifact for an event, if any
    fn get(&self, event_id: &str) -> Result<Option<MetricAnalysisArtifact>>;

    /// Write (or replace) the artifact for an event
    fn put(&self, artifact: &MetricAnalysisArtifact) -> Result<()>;
}

/// File-per-event JSON store rooted at a data directory
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    data_dir: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    /// Create the data directory if it does not exist yet
    pub fn initialize(&self) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir)?;
            info!(dir = %self.data_dir.display(), "created artifact store directory");
        }
        if !self.data_dir.is_dir() {
            return Err(StoreError::config(format!(
                "artifact store path is not a directory: {}",
                self.data_dir.display()
            )));
        }
        Ok(())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn artifact_path(&self, event_id: &str) -> PathBuf {
        // Event ids come from file names and feed fields; keep only
        // filesystem-safe characters
        let safe: String = event_id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.data_dir.join(format!("{safe}.analysis.json"))
    }
}

impl ArtifactStore for LocalArtifactStore {
    fn get(&self, event_id: &str) -> Result<Option<MetricAnalysisArtifact>> {
        let path = self.artifact_path(event_id);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let artifact: MetricAnalysisArtifact = serde_json::from_str(&content)
            .map_err(|e| StoreError::corruption(format!("{}: {e}", path.display())))?;
        debug!(event = event_id, path = %path.display(), "loaded artifact");
        Ok(Some(artifact))
    }

    fn put(&self, artifact: &MetricAnalysisArtifact) -> Result<()> {
        self.initialize()?;
        let path = self.artifact_path(&artifact.event_id);
        let content = serde_json::to_string_pretty(artifact)?;
        fs::write(&path, content)?;
        debug!(
            event = %artifact.event_id,
            analyses = artifact.analyses.len(),
            path = %path.display(),
            "wrote artifact"
        );
        Ok(())
    }
}
