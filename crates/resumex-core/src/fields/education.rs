use crate::config::schema::ParserConfig;
use crate::fields::entries::{divide_into_entries, has_keyword, parse_entry_header};
use crate::model::ResumeEducation;
use crate::parsing::bullets::{bullet_points_from_lines, descriptions_line_idx};
use crate::parsing::lines::Line;
use crate::parsing::stats::DocumentStats;

/// Extract one education record per entry of the education section.
pub fn extract_educations(
    lines: &[Line],
    stats: &DocumentStats,
    config: &ParserConfig,
) -> Vec<ResumeEducation> {
    divide_into_entries(lines, stats, config)
        .into_iter()
        .map(|entry| extract_entry(entry, stats, config))
        .filter(|edu| *edu != ResumeEducation::default())
        .collect()
}

fn extract_entry(entry: &[Line], stats: &DocumentStats, config: &ParserConfig) -> ResumeEducation {
    // Without descriptions every line is header.
    let header_len = descriptions_line_idx(entry, &config.bullets).unwrap_or(entry.len());
    let (header_lines, description_lines) = entry.split_at(header_len);
    let header = parse_entry_header(header_lines, stats, config);

    let school_idx = header
        .parts
        .iter()
        .position(|p| has_keyword(p, &config.entries.school_keywords))
        .or_else(|| (!header.parts.is_empty()).then_some(0));
    let degree_idx = header
        .parts
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != school_idx)
        .find(|(_, p)| has_keyword(p, &config.entries.degree_keywords))
        .or_else(|| {
            header
                .parts
                .iter()
                .enumerate()
                .find(|(i, _)| Some(*i) != school_idx)
        })
        .map(|(i, _)| i);

    let pick = |idx: Option<usize>| {
        idx.and_then(|i| header.parts.get(i))
            .cloned()
            .unwrap_or_default()
    };

    ResumeEducation {
        school: pick(school_idx),
        degree: pick(degree_idx),
        date: header.date.clone(),
        gpa: header.gpa.clone(),
        descriptions: bullet_points_from_lines(description_lines, &config.bullets),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::lines::TextRun;

    fn line(y: f32, runs: &[(&str, f32)]) -> Line {
        Line {
            page_number: 1,
            y,
            fragments: Vec::new(),
            runs: runs
                .iter()
                .map(|(text, x)| TextRun {
                    text: text.to_string(),
                    x: *x,
                    width: text.chars().count() as f32 * 5.0,
                    font_name: "Helvetica".into(),
                    font_size: 10.0,
                    fragment_count: 1,
                })
                .collect(),
        }
    }

    fn stats() -> DocumentStats {
        DocumentStats {
            body_font_size: 10.0,
            common_font_name: "Helvetica".into(),
            typical_char_width: 5.0,
            fragment_count: 0,
        }
    }

    #[test]
    fn test_school_degree_date_and_gpa() {
        let lines = vec![
            line(260.0, &[("State University", 50.0), ("Aug 2013 — May 2017", 430.0)]),
            line(274.0, &[("Bachelor of Science in Computer Science, GPA: 3.8", 50.0)]),
        ];
        let educations = extract_educations(&lines, &stats(), &ParserConfig::default());
        assert_eq!(educations.len(), 1);
        let edu = &educations[0];
        assert_eq!(edu.school, "State University");
        assert_eq!(edu.degree, "Bachelor of Science in Computer Science");
        assert_eq!(edu.date, "Aug 2013 — May 2017");
        assert_eq!(edu.gpa, "3.8");
        assert!(edu.descriptions.is_empty());
    }

    #[test]
    fn test_degree_before_school() {
        let lines = vec![line(
            100.0,
            &[("M.S. Statistics | Institute of Data", 50.0), ("2019", 480.0)],
        )];
        let educations = extract_educations(&lines, &stats(), &ParserConfig::default());
        assert_eq!(educations[0].school, "Institute of Data");
        assert_eq!(educations[0].degree, "M.S. Statistics");
        assert_eq!(educations[0].date, "2019");
    }

    #[test]
    fn test_descriptions_after_bullets() {
        let lines = vec![
            line(100.0, &[("Springfield College", 50.0)]),
            line(114.0, &[("Diploma in Nuclear Safety", 50.0)]),
            line(128.0, &[("• Dean's list", 50.0)]),
        ];
        let educations = extract_educations(&lines, &stats(), &ParserConfig::default());
        assert_eq!(educations[0].school, "Springfield College");
        assert_eq!(educations[0].degree, "Diploma in Nuclear Safety");
        assert_eq!(educations[0].descriptions, vec!["Dean's list"]);
    }

    #[test]
    fn test_unknown_parts_fall_back_to_order() {
        let lines = vec![line(100.0, &[("Le Wagon — Web Development", 50.0)])];
        let educations = extract_educations(&lines, &stats(), &ParserConfig::default());
        assert_eq!(educations[0].school, "Le Wagon");
        assert_eq!(educations[0].degree, "Web Development");
    }
}
