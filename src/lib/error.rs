use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while turning a spreadsheet into an export document.
///
/// Rows dropped for missing cells are not errors; they are reported through
/// [`crate::domain::normalize::DroppedRow`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input file is absent, unreadable or not a spreadsheet.
    #[error("failed to load '{path}': {reason}")]
    Load { path: PathBuf, reason: String },

    /// The grid does not have the layout the selection expects.
    #[error("unexpected layout in '{grid}': {reason}")]
    Schema { grid: String, reason: String },

    /// A required cell could not be converted to its field type.
    #[error("row {row}: field '{field}' has invalid value '{value}' (expected {expected})")]
    Parse {
        row: usize,
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}
