use crate::config::schema::BulletConfig;
use crate::model::{FeaturedSkills, ResumeSkills};
use crate::parsing::bullets::{bullet_points_from_lines, descriptions_line_idx};
use crate::parsing::lines::Line;

/// Split the skills section into featured skills and description bullets.
///
/// Lines above the first description line are short skill tokens; each run
/// fills one featured slot. When no description line is found everything is
/// a description and the featured slots stay empty.
pub fn extract_skills(lines: &[Line], config: &BulletConfig) -> ResumeSkills {
    let idx = descriptions_line_idx(lines, config).unwrap_or(0);
    let (featured_lines, description_lines) = lines.split_at(idx);

    let candidates = featured_lines
        .iter()
        .flat_map(|line| line.runs.iter())
        .map(|run| run.text.trim())
        .filter(|text| !text.is_empty());

    ResumeSkills {
        featured_skills: FeaturedSkills::from_candidates(candidates),
        descriptions: bullet_points_from_lines(description_lines, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FeaturedSkill, FEATURED_SKILL_SLOTS};
    use crate::parsing::lines::TextRun;

    fn line(runs: &[&str]) -> Line {
        Line {
            page_number: 1,
            y: 0.0,
            fragments: Vec::new(),
            runs: runs
                .iter()
                .enumerate()
                .map(|(i, text)| TextRun {
                    text: text.to_string(),
                    x: 50.0 + i as f32 * 100.0,
                    width: 30.0,
                    font_name: "Helvetica".into(),
                    font_size: 10.0,
                    fragment_count: 1,
                })
                .collect(),
        }
    }

    #[test]
    fn test_featured_then_bullets() {
        let lines = vec![
            line(&["Rust", "Go", " ", "SQL"]),
            line(&["• Languages: Rust, Go, SQL"]),
            line(&["• Tools: git, Docker"]),
        ];
        let skills = extract_skills(&lines, &BulletConfig::default());
        let featured: Vec<&str> = skills
            .featured_skills
            .filled()
            .map(|s| s.skill.as_str())
            .collect();
        assert_eq!(featured, vec!["Rust", "Go", "SQL"]);
        assert_eq!(skills.featured_skills.slots().len(), FEATURED_SKILL_SLOTS);
        assert_eq!(skills.featured_skills.slots()[3], FeaturedSkill::default());
        assert_eq!(
            skills.descriptions,
            vec!["Languages: Rust, Go, SQL", "Tools: git, Docker"]
        );
    }

    #[test]
    fn test_featured_capped_at_six() {
        let lines = vec![
            line(&["A", "B", "C", "D"]),
            line(&["E", "F", "G", "H"]),
            line(&["• more"]),
        ];
        let skills = extract_skills(&lines, &BulletConfig::default());
        assert_eq!(skills.featured_skills.filled().count(), 6);
        assert_eq!(skills.featured_skills.slots()[5].skill, "F");
    }

    #[test]
    fn test_no_boundary_all_descriptions() {
        let lines = vec![line(&["Languages: Rust, Go"]), line(&["Cloud: AWS"])];
        let skills = extract_skills(&lines, &BulletConfig::default());
        assert!(skills.featured_skills.is_empty());
        assert_eq!(skills.descriptions, vec!["Languages: Rust, Go", "Cloud: AWS"]);
    }

    #[test]
    fn test_empty_section_defaults() {
        let skills = extract_skills(&[], &BulletConfig::default());
        assert_eq!(skills, ResumeSkills::default());
    }
}
