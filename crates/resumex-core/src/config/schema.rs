use crate::model::SectionName;
use serde::{Deserialize, Serialize};

/// Tunable thresholds and keyword tables for the layout heuristics.
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub line_grouping: LineGroupingConfig,
    pub headings: HeadingConfig,
    /// Section keyword table in priority order: when a heading matches
    /// keywords of several sections, the earliest entry wins.
    pub sections: Vec<SectionKeywords>,
    pub entries: EntryConfig,
    pub bullets: BulletConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineGroupingConfig {
    /// Fragments share a line when their vertical centers differ by at most
    /// this fraction of the smaller font size.
    pub vertical_tolerance_ratio: f32,
    /// Gaps below this fraction of the typical character width join
    /// fragments without a space.
    pub word_gap_ratio: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingConfig {
    /// Leading lines (usually name and contact) never treated as headings.
    pub skip_leading_lines: usize,
    pub max_words: usize,
    /// Font size relative to the body size that marks a heading by itself.
    pub font_size_ratio: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionKeywords {
    pub section: SectionName,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryConfig {
    /// A vertical gap this many times the section's common line gap starts a new entry.
    pub line_gap_ratio: f32,
    /// Font size relative to the body size that marks an entry heading.
    pub font_size_ratio: f32,
    /// Minimum horizontal gap, in typical character widths, between header columns.
    pub column_gap_ratio: f32,
    /// Header lines assumed for a work entry when no descriptions are detected.
    pub default_experience_header_lines: usize,
    pub job_title_keywords: Vec<String>,
    pub school_keywords: Vec<String>,
    pub degree_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub glyphs: Vec<String>,
    /// Line prefixes read as bullets only at the start of a line.
    pub line_prefixes: Vec<String>,
    /// A single-run line with at least this many digit-free words reads as a
    /// wrapped description paragraph.
    pub paragraph_min_words: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            line_grouping: LineGroupingConfig::default(),
            headings: HeadingConfig::default(),
            sections: default_sections(),
            entries: EntryConfig::default(),
            bullets: BulletConfig::default(),
        }
    }
}

impl Default for LineGroupingConfig {
    fn default() -> Self {
        Self {
            vertical_tolerance_ratio: 0.5,
            word_gap_ratio: 0.3,
        }
    }
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            skip_leading_lines: 2,
            max_words: 3,
            font_size_ratio: 1.3,
        }
    }
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            line_gap_ratio: 1.4,
            font_size_ratio: 1.1,
            column_gap_ratio: 2.0,
            default_experience_header_lines: 2,
            job_title_keywords: strings(&[
                "accountant", "administrator", "advisor", "agent", "analyst", "apprentice",
                "architect", "assistant", "associate", "auditor", "ceo", "clerk", "co-founder",
                "consultant", "coordinator", "cto", "designer", "developer", "director",
                "editor", "engineer", "founder", "freelancer", "head", "intern", "lead",
                "manager", "nurse", "officer", "operator", "president", "producer",
                "recruiter", "representative", "researcher", "scientist", "specialist",
                "supervisor", "teacher", "technician", "trainee", "tutor", "vp", "volunteer",
            ]),
            school_keywords: strings(&[
                "university", "college", "institute", "school", "academy", "polytechnic",
            ]),
            degree_keywords: strings(&[
                "associate", "bachelor", "master", "phd", "ph.d", "doctor", "b.s", "b.a",
                "m.s", "m.a", "bsc", "msc", "b.sc", "m.sc", "mba", "b.eng", "m.eng",
                "diploma", "degree", "certificate",
            ]),
        }
    }
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            glyphs: strings(&[
                "⋅", "∙", "🞄", "•", "⦁", "⚫︎", "●", "⬤", "⚬", "○", "▪", "■", "◦", "‣", "➢",
                "►",
            ]),
            line_prefixes: strings(&["- ", "* ", "– "]),
            paragraph_min_words: 8,
        }
    }
}

fn default_sections() -> Vec<SectionKeywords> {
    vec![
        SectionKeywords {
            section: SectionName::Profile,
            keywords: strings(&["profile", "summary", "objective", "about", "contact"]),
        },
        SectionKeywords {
            section: SectionName::Experience,
            keywords: strings(&["experience", "employment", "work history", "job", "career"]),
        },
        SectionKeywords {
            section: SectionName::Education,
            keywords: strings(&["education", "academic", "qualification", "course", "coursework"]),
        },
        SectionKeywords {
            section: SectionName::Skills,
            keywords: strings(&["skill", "technolog", "competenc", "expertise"]),
        },
        SectionKeywords {
            section: SectionName::Others,
            keywords: strings(&[
                "project", "award", "honor", "certification", "extracurricular", "interest",
                "language", "volunteer", "publication", "reference", "activities",
            ]),
        },
    ]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
