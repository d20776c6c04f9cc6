use crate::config::schema::BulletConfig;
use crate::parsing::lines::Line;

/// A line whose text starts with a bullet glyph or a bullet-like prefix.
pub fn is_bullet_line(line: &Line, config: &BulletConfig) -> bool {
    is_bullet_text(&line.text(), config)
}

pub fn is_bullet_text(text: &str, config: &BulletConfig) -> bool {
    let text = text.trim_start();
    starts_with_glyph(text, &config.glyphs).is_some() || strip_line_prefix(text, config).is_some()
}

/// Index of the first line that starts a description block.
///
/// The first bullet line wins. Without bullets, the first single-run line of
/// at least `paragraph_min_words` digit-free words is taken as a wrapped
/// paragraph.
pub fn descriptions_line_idx(lines: &[Line], config: &BulletConfig) -> Option<usize> {
    lines
        .iter()
        .position(|line| is_bullet_line(line, config))
        .or_else(|| {
            lines.iter().position(|line| {
                line.runs.len() == 1 && is_paragraph_text(&line.runs[0].text, config)
            })
        })
}

fn is_paragraph_text(text: &str, config: &BulletConfig) -> bool {
    let words = text
        .split_whitespace()
        .filter(|w| !w.chars().any(|c| c.is_ascii_digit()))
        .count();
    words >= config.paragraph_min_words
}

/// Turn description lines into one string per bullet point.
///
/// Without any bullet marker each line is one description. Otherwise every
/// glyph (or line prefix) opens a new point, lines without a marker continue
/// the current point, and text before the first marker is dropped.
pub fn bullet_points_from_lines(lines: &[Line], config: &BulletConfig) -> Vec<String> {
    let texts: Vec<String> = lines.iter().map(Line::text).collect();
    bullet_points_from_texts(&texts, config)
}

pub fn bullet_points_from_texts(texts: &[String], config: &BulletConfig) -> Vec<String> {
    let has_markers = texts.iter().any(|t| {
        strip_line_prefix(t.trim_start(), config).is_some()
            || split_on_glyphs(t, &config.glyphs).len() > 1
    });
    if !has_markers {
        return texts
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
    }

    let mut points = Vec::new();
    let mut current: Option<String> = None;
    for text in texts {
        let mut rest = text.trim();
        if let Some(stripped) = strip_line_prefix(rest, config) {
            flush(&mut points, current.take());
            current = Some(String::new());
            rest = stripped;
        }
        for (i, piece) in split_on_glyphs(rest, &config.glyphs).into_iter().enumerate() {
            if i > 0 {
                flush(&mut points, current.take());
                current = Some(String::new());
            }
            if let Some(point) = current.as_mut() {
                append_words(point, piece);
            }
        }
    }
    flush(&mut points, current);
    points
}

fn flush(points: &mut Vec<String>, point: Option<String>) {
    if let Some(point) = point {
        if !point.is_empty() {
            points.push(point);
        }
    }
}

fn append_words(point: &mut String, piece: &str) {
    let piece = piece.trim();
    if piece.is_empty() {
        return;
    }
    if !point.is_empty() {
        point.push(' ');
    }
    point.push_str(piece);
}

fn starts_with_glyph<'a>(text: &str, glyphs: &'a [String]) -> Option<&'a str> {
    glyphs
        .iter()
        .find(|g| text.starts_with(g.as_str()))
        .map(String::as_str)
}

fn strip_line_prefix<'a>(text: &'a str, config: &BulletConfig) -> Option<&'a str> {
    config
        .line_prefixes
        .iter()
        .find_map(|p| text.strip_prefix(p.as_str()))
}

/// Split at every bullet glyph; the first piece is the text before any glyph.
fn split_on_glyphs<'a>(text: &'a str, glyphs: &[String]) -> Vec<&'a str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < text.len() {
        match starts_with_glyph(&text[i..], glyphs) {
            Some(glyph) => {
                pieces.push(&text[start..i]);
                i += glyph.len();
                start = i;
            }
            None => i += text[i..].chars().next().map_or(1, char::len_utf8),
        }
    }
    pieces.push(&text[start..]);
    pieces
}
