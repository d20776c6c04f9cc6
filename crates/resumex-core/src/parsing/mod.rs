pub mod bullets;
pub mod lines;
pub mod sections;
pub mod stats;

use crate::config::schema::ParserConfig;
use crate::extraction::PageContent;
use lines::{group_into_lines, Line};
use sections::{assign_sections, group_into_sections, LineAssignment, SectionMap};
use stats::DocumentStats;

/// Output of the layout stages: statistics, lines, and their sections.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutAnalysis {
    pub stats: DocumentStats,
    pub lines: Vec<Line>,
    pub sections: SectionMap,
}

impl LayoutAnalysis {
    /// Per-line section assignment, aligned with `lines`.
    pub fn assignments(&self, config: &ParserConfig) -> Vec<LineAssignment> {
        assign_sections(&self.lines, &self.stats, config)
    }
}

/// Run statistics, line grouping and section grouping over extracted pages.
pub fn analyze_pages(pages: &[PageContent], config: &ParserConfig) -> LayoutAnalysis {
    let stats = DocumentStats::from_pages(pages);
    log::debug!(
        "document stats: body size {}, font '{}', char width {:.2}",
        stats.body_font_size,
        stats.common_font_name,
        stats.typical_char_width
    );
    let lines = group_into_lines(pages, &stats, config);
    let sections = group_into_sections(&lines, &stats, config);
    LayoutAnalysis {
        stats,
        lines,
        sections,
    }
}

/// Split a line by gaps of 2+ whitespace characters.
pub(crate) fn split_by_whitespace_gaps(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = None;
    let mut space_count = 0;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            space_count += 1;
            if space_count == 2 {
                if let Some(s) = start {
                    segments.push(line[s..i].trim_end());
                    start = None;
                }
            }
        } else {
            if start.is_none() {
                start = Some(i);
            }
            space_count = 0;
        }
    }

    if let Some(s) = start {
        segments.push(line[s..].trim_end());
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::TextFragment;
    use crate::model::SectionName;

    #[test]
    fn test_split_by_whitespace_gaps() {
        let segments = split_by_whitespace_gaps("Acme Corp — Senior Engineer    Jan 2020 - Present");
        assert_eq!(segments, vec!["Acme Corp — Senior Engineer", "Jan 2020 - Present"]);
    }

    #[test]
    fn test_split_single_spaces_untouched() {
        assert_eq!(split_by_whitespace_gaps("  Beta LLC "), vec!["Beta LLC"]);
        assert!(split_by_whitespace_gaps("   ").is_empty());
    }

    #[test]
    fn test_analyze_empty_pages() {
        let pages = vec![PageContent {
            page_number: 1,
            width: 612.0,
            height: 792.0,
            fragments: Vec::new(),
        }];
        let analysis = analyze_pages(&pages, &ParserConfig::default());
        assert!(analysis.lines.is_empty());
        assert!(analysis.sections.is_empty());
    }

    #[test]
    fn test_analyze_assigns_every_line() {
        let frag = |text: &str, y: f32, font: &str| TextFragment {
            text: text.into(),
            x: 50.0,
            y,
            width: text.chars().count() as f32 * 5.0,
            height: 10.0,
            font_name: font.into(),
            font_size: 10.0,
            page_number: 1,
        };
        let pages = vec![PageContent {
            page_number: 1,
            width: 612.0,
            height: 792.0,
            fragments: vec![
                frag("Jane Doe", 50.0, "Helvetica-Bold"),
                frag("jane@example.com", 64.0, "Helvetica"),
                frag("SKILLS", 90.0, "Helvetica-Bold"),
                frag("Rust, Go, SQL", 104.0, "Helvetica"),
            ],
        }];
        let config = ParserConfig::default();
        let analysis = analyze_pages(&pages, &config);
        let assignments = analysis.assignments(&config);
        assert_eq!(assignments.len(), analysis.lines.len());
        assert_eq!(assignments[2].section, SectionName::Skills);
        assert!(assignments[2].heading);
        assert_eq!(analysis.sections.lines(SectionName::Skills).len(), 1);
    }
}
