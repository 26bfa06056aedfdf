//! Error types for the calibration layer
//!
//! Only configuration failures surface as errors; every missing-data and
//! degenerate-statistics condition resolves to a documented fallback value
//! inside the components themselves.

use thiserror::Error;

/// Result type alias for calibration operations
pub type Result<T> = std::result::Result<T, CalibrationError>;

/// Errors that can occur while calibrating
#[derive(Error, Debug)]
pub enum CalibrationError {
    /// Template resolution failures from the model layer
    #[error("Model error: {0}")]
    Model(#[from] field_model::ModelError),

    /// Invalid engine configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CalibrationError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
