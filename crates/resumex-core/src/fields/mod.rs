pub mod education;
pub mod entries;
pub mod experience;
pub mod profile;
pub mod skills;

use crate::config::schema::ParserConfig;
use crate::model::{Resume, SectionName};
use crate::parsing::sections::SectionMap;
use crate::parsing::stats::DocumentStats;

/// Run every field extractor over its section. Missing sections yield empty
/// records; nothing here fails.
pub fn extract_fields(sections: &SectionMap, stats: &DocumentStats, config: &ParserConfig) -> Resume {
    let resume = Resume {
        profile: profile::extract_profile(sections.lines(SectionName::Profile)),
        work_experiences: experience::extract_work_experiences(
            sections.lines(SectionName::Experience),
            stats,
            config,
        ),
        educations: education::extract_educations(
            sections.lines(SectionName::Education),
            stats,
            config,
        ),
        skills: skills::extract_skills(sections.lines(SectionName::Skills), &config.bullets),
    };
    log::debug!(
        "extracted {} work experiences, {} educations, {} skill descriptions",
        resume.work_experiences.len(),
        resume.educations.len(),
        resume.skills.descriptions.len()
    );
    resume
}
