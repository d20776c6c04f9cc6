use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of featured skill slots shown by the profile editor.
pub const FEATURED_SKILL_SLOTS: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedSkill {
    pub skill: String,
    pub rating: u8,
}

/// Exactly [`FEATURED_SKILL_SLOTS`] slots; unfilled slots keep the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeaturedSkills([FeaturedSkill; FEATURED_SKILL_SLOTS]);

impl FeaturedSkills {
    /// Fill slots in order from `skills`; anything beyond the last slot is ignored.
    pub fn from_candidates<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut featured = Self::default();
        for (slot, skill) in featured.0.iter_mut().zip(skills) {
            slot.skill = skill.into();
        }
        featured
    }

    pub fn slots(&self) -> &[FeaturedSkill; FEATURED_SKILL_SLOTS] {
        &self.0
    }

    pub fn filled(&self) -> impl Iterator<Item = &FeaturedSkill> {
        self.0.iter().filter(|s| !s.skill.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.filled().next().is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub url: String,
    pub location: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeWorkExperience {
    pub company: String,
    pub job_title: String,
    /// Raw date range as printed, e.g. "Jan 2020 - Present".
    pub date: String,
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeEducation {
    pub school: String,
    pub degree: String,
    pub date: String,
    pub gpa: String,
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeSkills {
    pub featured_skills: FeaturedSkills,
    pub descriptions: Vec<String>,
}

/// Everything the field extractors found, before date normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    pub profile: ResumeProfile,
    pub work_experiences: Vec<ResumeWorkExperience>,
    pub educations: Vec<ResumeEducation>,
    pub skills: ResumeSkills,
}

/// Canonical section keys. Declaration order is the keyword priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionName {
    Profile,
    Experience,
    Education,
    Skills,
    Others,
}

impl SectionName {
    pub const ALL: [SectionName; 5] = [
        SectionName::Profile,
        SectionName::Experience,
        SectionName::Education,
        SectionName::Skills,
        SectionName::Others,
    ];
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionName::Profile => write!(f, "profile"),
            SectionName::Experience => write!(f, "experience"),
            SectionName::Education => write!(f, "education"),
            SectionName::Skills => write!(f, "skills"),
            SectionName::Others => write!(f, "others"),
        }
    }
}

// ---------------------------------------------------------------------------
// Output contract handed to profile storage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedExperience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedEducation {
    pub institution: String,
    pub degree: String,
    /// Not separable from the degree line; always empty.
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCertification {
    pub name: String,
    pub issuing_organization: String,
    pub issue_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
}

/// Final record. Dates are `YYYY-MM-DD`, `"Present"`, or `""` for unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub experiences: Vec<ParsedExperience>,
    pub education: Vec<ParsedEducation>,
    /// Always empty: certifications are not extracted.
    pub certifications: Vec<ParsedCertification>,
    pub skills: Vec<String>,
}
