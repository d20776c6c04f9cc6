use crate::config::schema::ParserConfig;
use crate::fields::entries::{divide_into_entries, has_keyword_word, parse_entry_header};
use crate::model::ResumeWorkExperience;
use crate::parsing::bullets::{bullet_points_from_lines, descriptions_line_idx};
use crate::parsing::lines::Line;
use crate::parsing::stats::DocumentStats;

/// Extract one work experience per entry of the experience section.
pub fn extract_work_experiences(
    lines: &[Line],
    stats: &DocumentStats,
    config: &ParserConfig,
) -> Vec<ResumeWorkExperience> {
    divide_into_entries(lines, stats, config)
        .into_iter()
        .map(|entry| extract_entry(entry, stats, config))
        .filter(|exp| *exp != ResumeWorkExperience::default())
        .collect()
}

fn extract_entry(entry: &[Line], stats: &DocumentStats, config: &ParserConfig) -> ResumeWorkExperience {
    let header_len = descriptions_line_idx(entry, &config.bullets)
        .unwrap_or(config.entries.default_experience_header_lines)
        .min(entry.len());
    let (header_lines, description_lines) = entry.split_at(header_len);

    let header = parse_entry_header(header_lines, stats, config);
    let mut parts = header.parts.into_iter();
    let mut company = parts.next().unwrap_or_default();
    let mut job_title = parts.next().unwrap_or_default();

    let titles = &config.entries.job_title_keywords;
    if has_keyword_word(&company, titles) && !has_keyword_word(&job_title, titles) {
        std::mem::swap(&mut company, &mut job_title);
    }

    ResumeWorkExperience {
        company,
        job_title,
        date: header.date,
        descriptions: bullet_points_from_lines(description_lines, &config.bullets),
    }
}
