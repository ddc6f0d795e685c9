//! Unified error hierarchy for VitalTrend
//!
//! The analysis core has exactly one hard failure (a custom window requested
//! without any date context); everything else degrades to empty or sentinel
//! outputs. The remaining variants cover the CLI surface: reading input
//! files, decoding payloads, writing exports.

use std::path::PathBuf;
use thiserror::Error;

use crate::export::ExportError;
use crate::ingest::IngestError;
use crate::window::WindowError;

/// Top-level error type for all VitalTrend operations
#[derive(Debug, Error)]
pub enum VitalError {
    /// Window resolution errors
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// Payload decoding errors
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input file missing and --empty-ok not set
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for VitalTrend operations
pub type Result<T> = std::result::Result<T, VitalError>;

impl VitalError {
    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            VitalError::Window(WindowError::MissingCustomRange) => {
                "A custom range needs a date. Pick one with --from (and optionally --to)."
                    .to_string()
            }
            VitalError::Ingest(IngestError::UnexpectedShape { found }) => {
                format!(
                    "Could not find a record array in the input (found {}). \
                     Expected a JSON array or an object with a \"data\" field.",
                    found
                )
            }
            VitalError::InputNotFound { path } => {
                format!(
                    "Could not find input file: {}. Pass --empty-ok to treat a \
                     missing file as an empty collection.",
                    path.display()
                )
            }
            _ => self.to_string(),
        }
    }
}
