//! Error handling for the resume ranker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeRankerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[cfg(feature = "ocr")]
    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("Model loading error: {0}")]
    ModelLoading(String),

    #[error("Model error: {0}")]
    ModelError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ResumeRankerError>;

/// Convert TOML errors to configuration errors
impl From<toml::de::Error> for ResumeRankerError {
    fn from(err: toml::de::Error) -> Self {
        ResumeRankerError::Configuration(format!("Failed to parse config: {}", err))
    }
}
