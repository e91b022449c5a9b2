//! Error handling for the career matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareerMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    /// Text extraction produced nothing usable. Shown to the user as-is.
    #[error("Empty file or no text could be extracted: {0}")]
    EmptyInput(String),

    /// The job catalog is missing or malformed. Fatal at startup.
    #[error("Job catalog could not be loaded: {0}")]
    CatalogLoad(String),

    #[error("Match computation failed: {0}")]
    MatchComputation(String),

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Model error: {0}")]
    ModelError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Advice generation error: {0}")]
    Advice(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, CareerMatcherError>;

/// model2vec-rs reports load failures through anyhow
impl From<anyhow::Error> for CareerMatcherError {
    fn from(err: anyhow::Error) -> Self {
        CareerMatcherError::ModelError(err.to_string())
    }
}

impl CareerMatcherError {
    /// Whether the error should stop the process instead of failing one request.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CareerMatcherError::CatalogLoad(_) | CareerMatcherError::Configuration(_)
        )
    }
}
