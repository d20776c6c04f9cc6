//! Shared entry handling for experience and education sections: splitting a
//! section into entries and reading an entry's header lines.

use crate::config::schema::ParserConfig;
use crate::parsing::bullets::{descriptions_line_idx, is_bullet_line};
use crate::parsing::lines::{Line, TextRun};
use crate::parsing::split_by_whitespace_gaps;
use crate::parsing::stats::{mode, DocumentStats};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";

fn single_date() -> String {
    format!(r"(?:{MONTH}\s+\d{{4}}|\d{{1,2}}/\d{{4}}|\d{{4}}-\d{{2}}-\d{{2}}|\d{{4}}|present|current(?:ly)?|now)")
}

fn date_range() -> String {
    let single = single_date();
    format!(r"{single}(?:\s*(?:[-\u{{2013}}\u{{2014}}]|\bto\b)\s*{single})?")
}

/// A date expression at the end of a header segment.
static RE_TRAILING_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(?:^|[\s,(])({})\)?$", date_range())).expect("valid date regex")
});

/// A segment that is nothing but a date expression.
static RE_DATE_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^\(?(?:{})\)?$", date_range())).expect("valid date regex")
});

/// Separators between the parts of a header ("Acme Corp — Engineer").
static RE_PART_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+[\u{2014}\u{2013}|]\s+|\s+-\s+").expect("valid separator regex")
});

/// "Engineer at Acme", "Engineer @ Acme": title first, company second.
static RE_AT_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(?:at|@)\s+").expect("valid at regex"));

static RE_GPA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bGPA\b:?\s*(\d\.\d{1,2})(?:\s*/\s*\d(?:\.\d{1,2})?)?|\b(\d\.\d{1,2})\s*/\s*4(?:\.0{1,2})?\b")
        .expect("valid gpa regex")
});

/// Header of one experience or education entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryHeader {
    /// Text parts in reading order, company or school usually first.
    pub parts: Vec<String>,
    /// Date range exactly as printed, or empty.
    pub date: String,
    pub gpa: String,
}

/// Split a section's lines into entries.
///
/// A new entry starts at an unusually large vertical gap, or at an entry
/// heading once the current entry already has description lines. When that
/// leaves the whole section as one entry, every subsection heading (bold
/// after plain text, or a larger font) starts a new entry instead.
pub fn divide_into_entries<'a>(
    lines: &'a [Line],
    stats: &DocumentStats,
    config: &ParserConfig,
) -> Vec<&'a [Line]> {
    if lines.is_empty() {
        return Vec::new();
    }

    let typical_gap = typical_line_gap(lines);
    let entries = split_where(lines, |current, prev, line| {
        let gap_break = typical_gap.is_some_and(|gap| {
            prev.page_number == line.page_number
                && line.y - prev.y > config.entries.line_gap_ratio * gap
        });
        gap_break
            || (is_entry_heading(line, prev, stats, config)
                && descriptions_line_idx(current, &config.bullets).is_some())
    });
    if entries.len() > 1 {
        return entries;
    }
    split_where(lines, |_, prev, line| {
        !is_bullet_line(line, &config.bullets) && starts_subsection(line, prev, stats, config)
    })
}

/// Cut `lines` before every line where `is_break(current entry, previous line, line)`.
fn split_where<'a, F>(lines: &'a [Line], mut is_break: F) -> Vec<&'a [Line]>
where
    F: FnMut(&[Line], &Line, &Line) -> bool,
{
    let mut entries = Vec::new();
    let mut start = 0;
    for i in 1..lines.len() {
        if is_break(&lines[start..i], &lines[i - 1], &lines[i]) {
            entries.push(&lines[start..i]);
            start = i;
        }
    }
    entries.push(&lines[start..]);
    entries
}

/// Most common positive gap between consecutive lines on the same page.
fn typical_line_gap(lines: &[Line]) -> Option<f32> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for pair in lines.windows(2) {
        let gap = pair[1].y - pair[0].y;
        if pair[0].page_number == pair[1].page_number && gap > 0.0 {
            *counts.entry((gap * 10.0).round() as i32).or_default() += 1;
        }
    }
    mode(&counts).map(|bucket| bucket as f32 / 10.0)
}

fn is_entry_heading(line: &Line, prev: &Line, stats: &DocumentStats, config: &ParserConfig) -> bool {
    if is_bullet_line(line, &config.bullets) {
        return false;
    }
    starts_subsection(line, prev, stats, config) || has_date_column(line, stats, config)
}

/// Bold after plain text, or a larger font than the line before.
fn starts_subsection(line: &Line, prev: &Line, stats: &DocumentStats, config: &ParserConfig) -> bool {
    let is_large = |l: &Line| {
        stats.body_font_size > 0.0
            && l.font_size() >= config.entries.font_size_ratio * stats.body_font_size
    };
    (line.is_bold() && !prev.is_bold()) || (is_large(line) && !is_large(prev))
}

fn has_date_column(line: &Line, stats: &DocumentStats, config: &ParserConfig) -> bool {
    let columns = split_columns(line, stats, config);
    columns.len() >= 2 && columns.last().is_some_and(|c| RE_DATE_ONLY.is_match(c))
}

/// Text columns of a line: split once at the widest gap between runs (when
/// wide enough) and then inside each side at runs of two or more spaces.
pub fn split_columns(line: &Line, stats: &DocumentStats, config: &ParserConfig) -> Vec<String> {
    let min_gap = config.entries.column_gap_ratio * stats.typical_char_width;
    let join = |runs: &[TextRun]| {
        runs.iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    };
    let sides = match line.largest_gap() {
        Some((idx, gap)) if gap >= min_gap => vec![join(&line.runs[..idx]), join(&line.runs[idx..])],
        _ => vec![line.text()],
    };
    sides
        .iter()
        .flat_map(|side| split_by_whitespace_gaps(side))
        .map(str::to_string)
        .collect()
}

/// Split a trailing date expression off a segment: `(rest, date)`.
pub fn split_trailing_date(segment: &str) -> (&str, Option<&str>) {
    let segment = segment.trim();
    match RE_TRAILING_DATE.captures(segment) {
        Some(caps) => match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(date)) => {
                let rest = segment[..whole.start()].trim_end_matches([' ', ',', '(', '|']);
                (rest.trim(), Some(date.as_str()))
            }
            _ => (segment, None),
        },
        None => (segment, None),
    }
}

/// Read header lines into parts, a raw date and an optional GPA.
pub fn parse_entry_header(
    lines: &[Line],
    stats: &DocumentStats,
    config: &ParserConfig,
) -> EntryHeader {
    let mut header = EntryHeader::default();
    for line in lines {
        for mut column in split_columns(line, stats, config) {
            if header.gpa.is_empty() {
                if let Some((gpa, rest)) = take_gpa(&column) {
                    header.gpa = gpa;
                    column = rest;
                }
            }

            let (rest, date) = split_trailing_date(&column);
            if let Some(date) = date {
                if header.date.is_empty() {
                    header.date = date.to_string();
                }
            }
            header.parts.extend(split_parts(rest));
        }
    }
    header
}

/// Split a segment on part separators. "Title at Company" is reordered to
/// company first so every header reads organisation, then role.
fn split_parts(segment: &str) -> Vec<String> {
    let mut parts = Vec::new();
    for piece in RE_PART_SEPARATOR.split(segment) {
        let at_split: Vec<&str> = RE_AT_SEPARATOR.splitn(piece, 2).collect();
        let ordered: Vec<&str> = match at_split.as_slice() {
            [title, company] if !title.trim().is_empty() && !company.trim().is_empty() => {
                vec![*company, *title]
            }
            _ => vec![piece],
        };
        for part in ordered {
            let part = part.trim_matches(|c: char| c.is_whitespace() || c == ',' || c == '|');
            if !part.is_empty() {
                parts.push(part.to_string());
            }
        }
    }
    parts
}

/// Find a GPA and return it with the segment minus the match.
fn take_gpa(segment: &str) -> Option<(String, String)> {
    let caps = RE_GPA.captures(segment)?;
    let whole = caps.get(0)?;
    let value = caps.get(1).or_else(|| caps.get(2))?.as_str().to_string();
    let rest = format!("{}{}", &segment[..whole.start()], &segment[whole.end()..]);
    let rest = rest
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '|' | '(' | ')'))
        .replace("()", "");
    Some((value, rest.trim().to_string()))
}

/// Whether any word of `text` is one of `keywords` (case-insensitive).
pub fn has_keyword_word(text: &str, keywords: &[String]) -> bool {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric() && c != '-')
                .to_lowercase()
        })
        .any(|w| keywords.iter().any(|k| k.to_lowercase() == w))
}

/// Whether `text` contains any of `keywords` (case-insensitive substring).
pub fn has_keyword(text: &str, keywords: &[String]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(&k.to_lowercase()))
}
