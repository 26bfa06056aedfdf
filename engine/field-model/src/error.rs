//! Error types for the data model layer
//!
//! Only configuration-class failures live here (unresolvable template,
//! malformed feed data). Missing players and absent metric values are not
//! errors anywhere in the engine; they are recovered locally by exclusion.

use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while loading or resolving model data
#[derive(Error, Debug)]
pub enum ModelError {
    /// I/O errors (template file reads)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Template file parse errors
    #[error("Template parse error: {0}")]
    TemplateParse(#[from] toml::de::Error),

    /// A course type with no template entry
    #[error("Unresolvable template: {0}")]
    UnknownTemplate(String),

    /// Feed data that cannot be interpreted at all
    #[error("Malformed feed: {0}")]
    MalformedFeed(String),
}

impl ModelError {
    /// Create a new unresolvable-template error
    pub fn unknown_template(msg: impl Into<String>) -> Self {
        Self::UnknownTemplate(msg.into())
    }

    /// Create a new malformed-feed error
    pub fn malformed_feed(msg: impl Into<String>) -> Self {
        Self::MalformedFeed(msg.into())
    }
}
