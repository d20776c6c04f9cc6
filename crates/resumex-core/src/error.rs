use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
    /// The input buffer is not a PDF we can decode. Fatal for the whole pipeline.
    #[error("failed to decode PDF: {0}")]
    PdfDecode(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("unknown extraction backend '{0}'. Available: content-stream, pdftotext")]
    UnknownBackend(String),

    #[error("failed to load parser config from {}: {}", .path.display(), .reason)]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid parser config: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
