use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Record source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Required column '{column}' not found in worksheet header")]
    MissingColumn { column: String },

    #[error("Row {row} has {actual} cells but the header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid month label '{0}': expected '<Month> <Year>'")]
    LabelParse(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
