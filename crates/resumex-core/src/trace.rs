use crate::config::schema::ParserConfig;
use crate::model::SectionName;
use crate::parsing::bullets::is_bullet_line;
use crate::parsing::stats::DocumentStats;
use crate::parsing::LayoutAnalysis;
use serde::{Deserialize, Serialize};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceLineRole {
    SectionHeading,
    Bullet,
    Body,
}

/// One grouped line and the section it was assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceLine {
    pub line_id: String,
    pub page_number: usize,
    pub line_index: usize,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub bold: bool,
    pub run_count: usize,
    pub fragment_count: usize,
    pub section: SectionName,
    pub role: TraceLineRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceSection {
    pub section: SectionName,
    pub titles: Vec<String>,
    pub heading_count: usize,
    pub line_count: usize,
}

/// Step-by-step view of the layout stages, for debugging the heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutTrace {
    pub trace_schema_version: String,
    pub stats: DocumentStats,
    pub lines: Vec<TraceLine>,
    pub sections: Vec<TraceSection>,
}

pub fn build_layout_trace(analysis: &LayoutAnalysis, config: &ParserConfig) -> LayoutTrace {
    let assignments = analysis.assignments(config);
    let mut page_line_index = 0;
    let mut current_page = None;

    let lines = analysis
        .lines
        .iter()
        .zip(assignments)
        .enumerate()
        .map(|(idx, (line, assignment))| {
            if current_page != Some(line.page_number) {
                current_page = Some(line.page_number);
                page_line_index = 0;
            }
            let line_index = page_line_index;
            page_line_index += 1;

            let role = if assignment.heading {
                TraceLineRole::SectionHeading
            } else if is_bullet_line(line, &config.bullets) {
                TraceLineRole::Bullet
            } else {
                TraceLineRole::Body
            };

            TraceLine {
                line_id: format!("ln_{}", idx),
                page_number: line.page_number,
                line_index,
                text: line.text(),
                x: line.x_min(),
                y: line.y,
                font_size: line.font_size(),
                bold: line.is_bold(),
                run_count: line.runs.len(),
                fragment_count: line.fragments.len(),
                section: assignment.section,
                role,
            }
        })
        .collect();

    let sections = analysis
        .sections
        .iter()
        .map(|s| TraceSection {
            section: s.name,
            titles: s.titles.clone(),
            heading_count: s.headings.len(),
            line_count: s.lines.len(),
        })
        .collect();

    LayoutTrace {
        trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
        stats: analysis.stats.clone(),
        lines,
        sections,
    }
}
