use crate::config::schema::{ParserConfig, SectionKeywords};
use crate::model::SectionName;
use crate::parsing::bullets::is_bullet_line;
use crate::parsing::lines::Line;
use crate::parsing::stats::DocumentStats;
use serde::{Deserialize, Serialize};

/// Lines assigned to one canonical section, headings kept apart from the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: SectionName,
    /// Heading texts as printed, in document order.
    pub titles: Vec<String>,
    pub headings: Vec<Line>,
    pub lines: Vec<Line>,
}

impl Section {
    fn new(name: SectionName) -> Self {
        Section {
            name,
            titles: Vec::new(),
            headings: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.headings.len() + self.lines.len()
    }
}

/// Sections in document order of first occurrence, at most one per name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionMap {
    sections: Vec<Section>,
}

impl SectionMap {
    pub fn get(&self, name: SectionName) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Body lines of a section; empty when the section never appeared.
    pub fn lines(&self, name: SectionName) -> &[Line] {
        self.get(name).map(|s| s.lines.as_slice()).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn names(&self) -> Vec<SectionName> {
        self.sections.iter().map(|s| s.name).collect()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn entry(&mut self, name: SectionName) -> &mut Section {
        let idx = match self.sections.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx]
    }
}

/// Where a single line ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAssignment {
    pub section: SectionName,
    pub heading: bool,
}

/// Assign every line to a section, in input order.
pub fn assign_sections(
    lines: &[Line],
    stats: &DocumentStats,
    config: &ParserConfig,
) -> Vec<LineAssignment> {
    let mut current = SectionName::Profile;
    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let heading = is_section_heading(line, idx, stats, config);
            if heading {
                current = canonical_section(&line.text(), &config.sections);
            }
            LineAssignment {
                section: current,
                heading,
            }
        })
        .collect()
}

/// Partition lines into sections. Lines before the first heading go to `profile`.
pub fn group_into_sections(
    lines: &[Line],
    stats: &DocumentStats,
    config: &ParserConfig,
) -> SectionMap {
    let mut map = SectionMap::default();
    for (line, assignment) in lines.iter().zip(assign_sections(lines, stats, config)) {
        let section = map.entry(assignment.section);
        if assignment.heading {
            section.titles.push(line.text().trim().to_string());
            section.headings.push(line.clone());
        } else {
            section.lines.push(line.clone());
        }
    }
    log::debug!("sections found: {:?}", map.names());
    map
}

/// Whether `line`, at position `idx` in the document, opens a new section.
pub fn is_section_heading(
    line: &Line,
    idx: usize,
    stats: &DocumentStats,
    config: &ParserConfig,
) -> bool {
    if idx < config.headings.skip_leading_lines || line.runs.len() != 1 {
        return false;
    }
    if is_bullet_line(line, &config.bullets) {
        return false;
    }

    let text = line.text();
    let text = text.trim();
    let words = text.split_whitespace().filter(|w| *w != "&").count();
    if words == 0 || words > config.headings.max_words {
        return false;
    }

    let has_letter = text.chars().any(char::is_alphabetic);
    let all_caps = has_letter && !text.chars().any(char::is_lowercase);
    if line.is_bold() && all_caps {
        return true;
    }

    let title_like = text
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '&')
        && text.chars().next().is_some_and(char::is_uppercase);
    if !title_like {
        return false;
    }

    let large = stats.body_font_size > 0.0
        && line.font_size() >= config.headings.font_size_ratio * stats.body_font_size;
    large || keyword_section(text, &config.sections).is_some()
}

/// Canonical section for a heading text; `others` when no keyword matches.
pub fn canonical_section(text: &str, table: &[SectionKeywords]) -> SectionName {
    keyword_section(text, table).unwrap_or(SectionName::Others)
}

/// First section in table order with a keyword starting a word of `text`.
fn keyword_section(text: &str, table: &[SectionKeywords]) -> Option<SectionName> {
    let lower = text.to_lowercase();
    table
        .iter()
        .find(|entry| {
            entry
                .keywords
                .iter()
                .any(|k| starts_word(&lower, &k.to_lowercase()))
        })
        .map(|entry| entry.section)
}

/// Whether `keyword` occurs in `text` at the start of a word, so stems like
/// "skill" match "Skills" but "work" does not match "Frameworks".
fn starts_word(text: &str, keyword: &str) -> bool {
    !keyword.is_empty()
        && text.match_indices(keyword).any(|(i, _)| {
            text[..i]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric())
        })
}
