//! In-process text extraction by interpreting page content streams with lopdf.
//!
//! Only the operators that position and show text are interpreted. Glyph
//! advances come from the font's `/Widths` (simple fonts) or `/W` (CID fonts)
//! so fragment widths are close enough for the line grouping heuristics.

use crate::error::ResumeError;
use crate::extraction::{PageContent, PdfExtractor, TextFragment};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::BTreeMap;

/// US Letter, used when a page has no readable MediaBox.
const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// Advance used for glyphs without a width entry, in thousandths of an em.
const FALLBACK_GLYPH_WIDTH: f32 = 500.0;

/// TJ adjustments at or below this (thousandths of an em) read as a word space.
const TJ_SPACE_THRESHOLD: f32 = -200.0;

const MAX_PARENT_DEPTH: usize = 32;
const MAX_CID_RANGE: u32 = 0xFFFF;

/// PDF extraction backend that decodes the document with lopdf.
pub struct ContentStreamExtractor;

impl ContentStreamExtractor {
    pub fn new() -> Self {
        ContentStreamExtractor
    }
}

impl Default for ContentStreamExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for ContentStreamExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ResumeError> {
        let doc =
            Document::load_mem(pdf_bytes).map_err(|e| ResumeError::PdfDecode(e.to_string()))?;

        let mut pages = Vec::new();
        for (page_number, page_id) in doc.get_pages() {
            let page_number = page_number as usize;
            let (width, height) = page_size(&doc, page_id);

            // A broken content stream inside a readable document only costs that page.
            let fragments = match read_page_fragments(&doc, page_id, page_number, height) {
                Ok(fragments) => fragments,
                Err(e) => {
                    log::warn!("page {page_number}: could not read content stream: {e}");
                    Vec::new()
                }
            };

            log::debug!("page {page_number}: {} text fragments", fragments.len());
            pages.push(PageContent {
                page_number,
                width,
                height,
                fragments,
            });
        }

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "content-stream"
    }
}

fn read_page_fragments(
    doc: &Document,
    page_id: ObjectId,
    page_number: usize,
    page_height: f32,
) -> Result<Vec<TextFragment>, lopdf::Error> {
    let font_dicts = doc.get_page_fonts(page_id).unwrap_or_default();
    let fonts: BTreeMap<Vec<u8>, FontInfo> = font_dicts
        .iter()
        .map(|(name, dict)| (name.clone(), FontInfo::from_dict(doc, name, dict)))
        .collect();

    let content_data = doc.get_page_content(page_id)?;
    let content = Content::decode(&content_data)?;

    let mut interpreter = Interpreter {
        doc,
        font_dicts: &font_dicts,
        fonts: &fonts,
        page_number,
        page_height,
        ctm: Matrix::IDENTITY,
        tm: Matrix::IDENTITY,
        lm: Matrix::IDENTITY,
        state: TextState::default(),
        saved: Vec::new(),
        fragments: Vec::new(),
    };
    for op in &content.operations {
        interpreter.apply(op);
    }

    Ok(interpreter.fragments)
}

/// Page width and height from the MediaBox, following `/Parent` inheritance.
fn page_size(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let mut current = match doc.get_dictionary(page_id) {
        Ok(dict) => dict,
        Err(_) => return DEFAULT_PAGE_SIZE,
    };

    for _ in 0..MAX_PARENT_DEPTH {
        if let Ok(media_box) = current.get(b"MediaBox") {
            if let Ok(values) = resolve(doc, media_box).as_array() {
                let nums: Vec<f32> = values
                    .iter()
                    .filter_map(|v| number(resolve(doc, v)))
                    .collect();
                if let [x0, y0, x1, y1] = nums[..] {
                    return ((x1 - x0).abs(), (y1 - y0).abs());
                }
            }
        }

        let parent = current.get(b"Parent").and_then(Object::as_reference);
        match parent.and_then(|id| doc.get_dictionary(id)) {
            Ok(dict) => current = dict,
            Err(_) => break,
        }
    }

    DEFAULT_PAGE_SIZE
}

/// Affine matrix `[a b c d e f]` in PDF's row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translate(tx: f32, ty: f32) -> Matrix {
        Matrix {
            e: tx,
            f: ty,
            ..Matrix::IDENTITY
        }
    }

    fn from_operands(operands: &[Object]) -> Option<Matrix> {
        let nums: Vec<f32> = operands.iter().filter_map(number).collect();
        match nums[..] {
            [a, b, c, d, e, f] => Some(Matrix { a, b, c, d, e, f }),
            _ => None,
        }
    }

    /// `self × other`: apply `self` first, then `other`.
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

#[derive(Debug, Clone)]
struct TextState {
    font: Option<Vec<u8>>,
    font_size: f32,
    char_spacing: f32,
    word_spacing: f32,
    horizontal_scaling: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font: None,
            font_size: 12.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scaling: 1.0,
            leading: 0.0,
        }
    }
}

/// Width and naming data for one font resource.
#[derive(Debug, Clone, Default)]
struct FontInfo {
    base_name: String,
    two_byte: bool,
    first_char: u32,
    widths: Vec<f32>,
    cid_widths: BTreeMap<u32, f32>,
    default_width: Option<f32>,
}

impl FontInfo {
    fn from_dict(doc: &Document, resource_name: &[u8], dict: &Dictionary) -> FontInfo {
        let base_name = dict
            .get(b"BaseFont")
            .and_then(Object::as_name)
            .map(|name| strip_subset_prefix(&String::from_utf8_lossy(name)).to_string())
            .unwrap_or_else(|_| String::from_utf8_lossy(resource_name).into_owned());

        let is_type0 = dict
            .get(b"Subtype")
            .and_then(Object::as_name)
            .map(|subtype| subtype == b"Type0")
            .unwrap_or(false);

        if is_type0 {
            let descendant = dict
                .get(b"DescendantFonts")
                .ok()
                .and_then(|obj| resolve(doc, obj).as_array().ok())
                .and_then(|fonts| fonts.first())
                .and_then(|obj| resolve(doc, obj).as_dict().ok());

            let (cid_widths, default_width) = match descendant {
                Some(cid_font) => {
                    let widths = cid_font
                        .get(b"W")
                        .ok()
                        .and_then(|obj| resolve(doc, obj).as_array().ok())
                        .map(|w| parse_cid_widths(doc, w))
                        .unwrap_or_default();
                    let default_width = cid_font
                        .get(b"DW")
                        .ok()
                        .and_then(|obj| number(resolve(doc, obj)))
                        .unwrap_or(1000.0);
                    (widths, Some(default_width))
                }
                None => (BTreeMap::new(), None),
            };

            return FontInfo {
                base_name,
                two_byte: true,
                cid_widths,
                default_width,
                ..FontInfo::default()
            };
        }

        let first_char = dict
            .get(b"FirstChar")
            .ok()
            .and_then(|obj| number(resolve(doc, obj)))
            .unwrap_or(0.0) as u32;
        let widths = dict
            .get(b"Widths")
            .ok()
            .and_then(|obj| resolve(doc, obj).as_array().ok())
            .map(|w| w.iter().map(|v| number(resolve(doc, v)).unwrap_or(0.0)).collect())
            .unwrap_or_default();

        FontInfo {
            base_name,
            first_char,
            widths,
            ..FontInfo::default()
        }
    }

    fn codes(&self, bytes: &[u8]) -> Vec<u32> {
        if self.two_byte {
            bytes
                .chunks(2)
                .map(|pair| pair.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32))
                .collect()
        } else {
            bytes.iter().map(|&b| b as u32).collect()
        }
    }

    fn glyph_width(&self, code: u32) -> f32 {
        if self.two_byte {
            return self
                .cid_widths
                .get(&code)
                .copied()
                .or(self.default_width)
                .unwrap_or(FALLBACK_GLYPH_WIDTH);
        }
        code.checked_sub(self.first_char)
            .and_then(|idx| self.widths.get(idx as usize))
            .copied()
            .filter(|w| *w > 0.0)
            .unwrap_or(FALLBACK_GLYPH_WIDTH)
    }
}

/// Parse a CIDFont `/W` array: `c [w1 w2 ...]` or `c_first c_last w` entries.
fn parse_cid_widths(doc: &Document, w: &[Object]) -> BTreeMap<u32, f32> {
    let mut widths = BTreeMap::new();
    let mut i = 0;

    while i < w.len() {
        let Some(first) = number(resolve(doc, &w[i])) else {
            break;
        };
        let first = first as u32;

        match w.get(i + 1).map(|obj| resolve(doc, obj)) {
            Some(Object::Array(list)) => {
                for (offset, value) in list.iter().enumerate() {
                    if let Some(width) = number(resolve(doc, value)) {
                        widths.insert(first + offset as u32, width);
                    }
                }
                i += 2;
            }
            Some(obj) => {
                let last = number(obj).map(|v| v as u32);
                let width = w.get(i + 2).and_then(|v| number(resolve(doc, v)));
                if let (Some(last), Some(width)) = (last, width) {
                    if last >= first && last - first <= MAX_CID_RANGE {
                        for code in first..=last {
                            widths.insert(code, width);
                        }
                    }
                }
                i += 3;
            }
            None => break,
        }
    }

    widths
}

/// "ABCDEF+Helvetica-Bold" -> "Helvetica-Bold"
fn strip_subset_prefix(name: &str) -> &str {
    match name.split_once('+') {
        Some((tag, rest)) if tag.len() == 6 && tag.chars().all(|c| c.is_ascii_uppercase()) => {
            rest
        }
        _ => name,
    }
}

struct Interpreter<'a> {
    doc: &'a Document,
    font_dicts: &'a BTreeMap<Vec<u8>, &'a Dictionary>,
    fonts: &'a BTreeMap<Vec<u8>, FontInfo>,
    page_number: usize,
    page_height: f32,
    ctm: Matrix,
    tm: Matrix,
    lm: Matrix,
    state: TextState,
    saved: Vec<(Matrix, TextState)>,
    fragments: Vec<TextFragment>,
}

impl Interpreter<'_> {
    fn apply(&mut self, op: &Operation) {
        let operands = &op.operands;
        match op.operator.as_str() {
            "q" => self.saved.push((self.ctm, self.state.clone())),
            "Q" => {
                if let Some((ctm, state)) = self.saved.pop() {
                    self.ctm = ctm;
                    self.state = state;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    self.ctm = m.multiply(&self.ctm);
                }
            }
            "BT" => {
                self.tm = Matrix::IDENTITY;
                self.lm = Matrix::IDENTITY;
            }
            "Tf" => {
                if let Some(name) = operands.first().and_then(|o| o.as_name().ok()) {
                    self.state.font = Some(name.to_vec());
                }
                if let Some(size) = operands.get(1).and_then(number) {
                    self.state.font_size = size;
                }
            }
            "Tc" => self.state.char_spacing = operands.first().and_then(number).unwrap_or(0.0),
            "Tw" => self.state.word_spacing = operands.first().and_then(number).unwrap_or(0.0),
            "Tz" => {
                self.state.horizontal_scaling =
                    operands.first().and_then(number).unwrap_or(100.0) / 100.0
            }
            "TL" => self.state.leading = operands.first().and_then(number).unwrap_or(0.0),
            "Td" | "TD" => {
                let tx = operands.first().and_then(number).unwrap_or(0.0);
                let ty = operands.get(1).and_then(number).unwrap_or(0.0);
                if op.operator == "TD" {
                    self.state.leading = -ty;
                }
                self.move_line(tx, ty);
            }
            "Tm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    self.tm = m;
                    self.lm = m;
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(obj) = operands.first() {
                    self.show(std::slice::from_ref(obj));
                }
            }
            "TJ" => {
                if let Some(Ok(items)) = operands.first().map(Object::as_array) {
                    self.show(items);
                }
            }
            "'" => {
                self.next_line();
                if let Some(obj) = operands.first() {
                    self.show(std::slice::from_ref(obj));
                }
            }
            "\"" => {
                if let [aw, ac, text] = &operands[..] {
                    self.state.word_spacing = number(aw).unwrap_or(0.0);
                    self.state.char_spacing = number(ac).unwrap_or(0.0);
                    self.next_line();
                    self.show(std::slice::from_ref(text));
                }
            }
            _ => {}
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.lm = Matrix::translate(tx, ty).multiply(&self.lm);
        self.tm = self.lm;
    }

    fn next_line(&mut self) {
        let leading = if self.state.leading != 0.0 {
            self.state.leading
        } else {
            self.state.font_size * 1.2
        };
        self.move_line(0.0, -leading);
    }

    fn current_font(&self) -> Option<&FontInfo> {
        self.state.font.as_ref().and_then(|name| self.fonts.get(name))
    }

    /// Show a Tj string or the elements of a TJ array as one fragment.
    fn show(&mut self, items: &[Object]) {
        let start = self.tm.multiply(&self.ctm);
        let mut text = String::new();

        for item in items {
            match item {
                Object::String(bytes, _) => {
                    text.push_str(&self.decode(bytes));
                    let advance = self.advance(bytes);
                    self.tm = Matrix::translate(advance, 0.0).multiply(&self.tm);
                }
                other => {
                    if let Some(adjust) = number(other) {
                        let tx = -adjust / 1000.0
                            * self.state.font_size
                            * self.state.horizontal_scaling;
                        self.tm = Matrix::translate(tx, 0.0).multiply(&self.tm);
                        if adjust <= TJ_SPACE_THRESHOLD && !text.is_empty() && !text.ends_with(' ')
                        {
                            text.push(' ');
                        }
                    }
                }
            }
        }

        let end = self.tm.multiply(&self.ctm);
        self.emit(text, start, end);
    }

    fn emit(&mut self, text: String, start: Matrix, end: Matrix) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let font_size = self.state.font_size.abs() * start.vertical_scale();
        let font_name = self
            .current_font()
            .map(|f| f.base_name.clone())
            .unwrap_or_default();

        self.fragments.push(TextFragment {
            text: text.to_string(),
            x: start.e,
            y: self.page_height - start.f,
            width: (end.e - start.e).abs(),
            height: font_size,
            font_name,
            font_size,
            page_number: self.page_number,
        });
    }

    /// Horizontal displacement in text space for a shown string.
    fn advance(&self, bytes: &[u8]) -> f32 {
        let fallback = FontInfo::default();
        let font = self.current_font().unwrap_or(&fallback);
        let state = &self.state;

        font.codes(bytes)
            .into_iter()
            .map(|code| {
                let mut tx = font.glyph_width(code) / 1000.0 * state.font_size + state.char_spacing;
                if code == 32 && !font.two_byte {
                    tx += state.word_spacing;
                }
                tx * state.horizontal_scaling
            })
            .sum()
    }

    fn decode(&self, bytes: &[u8]) -> String {
        let font_dict = self
            .state
            .font
            .as_ref()
            .and_then(|name| self.font_dicts.get(name));

        if let Some(font_dict) = font_dict {
            if let Ok(encoding) = font_dict.get_font_encoding(self.doc) {
                if let Ok(text) = Document::decode_text(&encoding, bytes) {
                    return text;
                }
            }
        }

        // UTF-16BE with BOM, then Latin-1
        if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
            let utf16: Vec<u16> = bytes[2..]
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            return String::from_utf16_lossy(&utf16);
        }

        bytes.iter().map(|&b| b as char).collect()
    }
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
