use crate::error::ResumeError;
use crate::extraction::{PageContent, PdfExtractor, TextFragment};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -bbox` for word-level boxes. Poppler does not report
/// font names there, so fragments carry an empty `font_name` and the box
/// height stands in for the font size.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ResumeError> {
        let mut tmpfile = tempfile::NamedTempFile::new()?;
        tmpfile.write_all(pdf_bytes)?;
        let tmp_path = tmpfile.path().to_path_buf();

        let output = Command::new("pdftotext")
            .arg("-bbox")
            .arg(&tmp_path)
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ResumeError::PdftotextNotFound
                } else {
                    ResumeError::Io(e)
                }
            })?;

        // pdftotext exits non-zero when it cannot open the document.
        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ResumeError::PdfDecode(format!(
                "pdftotext exited with code {code}: {}",
                stderr.trim()
            )));
        }

        let xml = String::from_utf8_lossy(&output.stdout);
        parse_bbox_xml(&xml)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

fn parse_bbox_xml(xml: &str) -> Result<Vec<PageContent>, ResumeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    reader.config_mut().check_end_names = false;

    let mut pages: Vec<PageContent> = Vec::new();
    let mut current_word: Option<WordBox> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ResumeError::PdfDecode(format!("malformed pdftotext output: {e}")))?;

        match event {
            Event::Start(tag) | Event::Empty(tag) if tag.name().as_ref() == b"page" => {
                pages.push(PageContent {
                    page_number: pages.len() + 1,
                    width: parse_attr_f32(&tag, b"width").unwrap_or(0.0),
                    height: parse_attr_f32(&tag, b"height").unwrap_or(0.0),
                    fragments: Vec::new(),
                });
            }
            Event::Start(tag) if tag.name().as_ref() == b"word" => {
                current_word = parse_word_box(&tag);
            }
            Event::Text(text) => {
                if let Some(word) = current_word.as_mut() {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| ResumeError::PdfDecode(e.to_string()))?;
                    word.text.push_str(&unescaped);
                }
            }
            Event::End(tag) if tag.name().as_ref() == b"word" => {
                if let (Some(word), Some(page)) = (current_word.take(), pages.last_mut()) {
                    let text = word.text.trim();
                    if !text.is_empty() {
                        let height = word.y_max - word.y_min;
                        page.fragments.push(TextFragment {
                            text: text.to_string(),
                            x: word.x_min,
                            y: word.y_max,
                            width: word.x_max - word.x_min,
                            height,
                            font_name: String::new(),
                            font_size: height,
                            page_number: page.page_number,
                        });
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

#[derive(Debug, Default)]
struct WordBox {
    x_min: f32,
    y_min: f32,
    x_max: f32,
    y_max: f32,
    text: String,
}

fn parse_word_box(tag: &BytesStart) -> Option<WordBox> {
    Some(WordBox {
        x_min: parse_attr_f32(tag, b"xMin")?,
        y_min: parse_attr_f32(tag, b"yMin")?,
        x_max: parse_attr_f32(tag, b"xMax")?,
        y_max: parse_attr_f32(tag, b"yMax")?,
        text: String::new(),
    })
}

fn parse_attr_f32(tag: &BytesStart, name: &[u8]) -> Option<f32> {
    tag.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == name)
        .and_then(|attr| attr.unescape_value().ok()?.parse().ok())
}
