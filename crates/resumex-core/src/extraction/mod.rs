pub mod content_stream;
pub mod pdftotext;

use crate::error::ResumeError;
use serde::{Deserialize, Serialize};

/// A positioned run of text on a page.
///
/// Coordinates are page-relative points with the origin at the top-left
/// corner: `y` is the text baseline and grows downward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub font_name: String,
    pub font_size: f32,
    pub page_number: usize,
}

impl TextFragment {
    pub fn x_end(&self) -> f32 {
        self.x + self.width
    }

    pub fn y_center(&self) -> f32 {
        self.y - self.height / 2.0
    }
}

/// Bold is read off the font name, e.g. `Helvetica-Bold` or `Inter-SemiBold`.
pub fn is_bold_font(font_name: &str) -> bool {
    let lower = font_name.to_lowercase();
    lower.contains("bold") || lower.contains("black") || lower.contains("heavy")
}

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageContent {
    pub page_number: usize,
    pub width: f32,
    pub height: f32,
    pub fragments: Vec<TextFragment>,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract positioned text from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ResumeError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Backend selected by name, as accepted on the command line.
pub fn extractor_for_backend(name: &str) -> Result<Box<dyn PdfExtractor>, ResumeError> {
    match name {
        "content-stream" => Ok(Box::new(content_stream::ContentStreamExtractor::new())),
        "pdftotext" => Ok(Box::new(pdftotext::PdftotextExtractor::new())),
        other => Err(ResumeError::UnknownBackend(other.to_string())),
    }
}
