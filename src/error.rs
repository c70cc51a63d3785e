//! Error types for export operations.

use thiserror::Error;

/// Errors that can occur while resolving, converting, or saving an export.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export format is not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Element not found in document: {0}")]
    ElementNotFound(String),

    #[error("Malformed data-URL: {0}")]
    MalformedDataUrl(String),

    #[error("Conversion failed: {0}")]
    Conversion(String),
}

pub type Result<T> = std::result::Result<T, Error>;
