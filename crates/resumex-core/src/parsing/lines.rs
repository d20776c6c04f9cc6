use crate::config::schema::ParserConfig;
use crate::extraction::{is_bold_font, PageContent, TextFragment};
use crate::parsing::stats::DocumentStats;
use serde::{Deserialize, Serialize};

/// Adjacent fragments of a line merged into one piece of text.
///
/// PDF producers often split a word over several show operations; runs undo
/// that, so a run is roughly a word or phrase and a gap between runs is a
/// real layout gap (e.g. between a company name and a date column).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub width: f32,
    pub font_name: String,
    pub font_size: f32,
    pub fragment_count: usize,
}

impl TextRun {
    fn start(fragment: &TextFragment) -> Self {
        TextRun {
            text: fragment.text.clone(),
            x: fragment.x,
            width: fragment.width,
            font_name: fragment.font_name.clone(),
            font_size: fragment.font_size,
            fragment_count: 1,
        }
    }

    pub fn x_end(&self) -> f32 {
        self.x + self.width
    }

    pub fn is_bold(&self) -> bool {
        is_bold_font(&self.font_name)
    }
}

/// Fragments on the same visual row, left to right. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub page_number: usize,
    /// Mean baseline of the fragments.
    pub y: f32,
    pub fragments: Vec<TextFragment>,
    pub runs: Vec<TextRun>,
}

impl Line {
    pub fn text(&self) -> String {
        self.runs
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn x_min(&self) -> f32 {
        self.runs.first().map(|r| r.x).unwrap_or_default()
    }

    /// Font size carrying the most characters in this line.
    pub fn font_size(&self) -> f32 {
        self.runs
            .iter()
            .max_by_key(|r| r.text.chars().count())
            .map(|r| r.font_size)
            .unwrap_or_default()
    }

    pub fn is_bold(&self) -> bool {
        !self.runs.is_empty() && self.runs.iter().all(TextRun::is_bold)
    }

    /// Widest horizontal gap between consecutive runs, as
    /// `(index of the run right of the gap, gap width)`.
    pub fn largest_gap(&self) -> Option<(usize, f32)> {
        self.runs
            .windows(2)
            .enumerate()
            .map(|(i, pair)| (i + 1, pair[1].x - pair[0].x_end()))
            .fold(None, |best, (idx, gap)| match best {
                Some((_, best_gap)) if best_gap >= gap => best,
                _ => Some((idx, gap)),
            })
    }
}

/// Group every page's fragments into lines, pages in order, lines top to bottom.
pub fn group_into_lines(
    pages: &[PageContent],
    stats: &DocumentStats,
    config: &ParserConfig,
) -> Vec<Line> {
    let lines: Vec<Line> = pages
        .iter()
        .flat_map(|page| group_page(page, stats, config))
        .collect();
    log::debug!(
        "grouped {} fragments into {} lines",
        stats.fragment_count,
        lines.len()
    );
    lines
}

fn group_page(page: &PageContent, stats: &DocumentStats, config: &ParserConfig) -> Vec<Line> {
    let mut sorted: Vec<&TextFragment> = page
        .fragments
        .iter()
        .filter(|f| !f.text.trim().is_empty())
        .collect();
    sorted.sort_by(|a, b| {
        a.y_center()
            .total_cmp(&b.y_center())
            .then(a.x.total_cmp(&b.x))
    });

    let tolerance_ratio = config.line_grouping.vertical_tolerance_ratio;
    let mut rows: Vec<Vec<&TextFragment>> = Vec::new();
    let mut anchor: Option<&TextFragment> = None;

    for fragment in sorted {
        let same_row = anchor.is_some_and(|a| {
            let tolerance = tolerance_ratio * a.font_size.min(fragment.font_size);
            (fragment.y_center() - a.y_center()).abs() <= tolerance
        });
        match rows.last_mut() {
            Some(row) if same_row => row.push(fragment),
            _ => {
                rows.push(vec![fragment]);
                anchor = Some(fragment);
            }
        }
    }

    rows.into_iter()
        .map(|mut row| {
            row.sort_by(|a, b| a.x.total_cmp(&b.x));
            let y = row.iter().map(|f| f.y).sum::<f32>() / row.len() as f32;
            let runs = build_runs(&row, stats, config);
            Line {
                page_number: page.page_number,
                y,
                fragments: row.into_iter().cloned().collect(),
                runs,
            }
        })
        .collect()
}

/// Merge fragments closer than a typical character width into runs.
fn build_runs(row: &[&TextFragment], stats: &DocumentStats, config: &ParserConfig) -> Vec<TextRun> {
    let merge_gap = stats.typical_char_width;
    let space_gap = stats.typical_char_width * config.line_grouping.word_gap_ratio;
    let glyphs = &config.bullets.glyphs;

    let mut runs: Vec<TextRun> = Vec::new();
    for fragment in row {
        if let Some(run) = runs.last_mut() {
            let gap = fragment.x - run.x_end();
            if gap <= merge_gap {
                let needs_space = !run.text.ends_with(' ')
                    && !fragment.text.starts_with(' ')
                    && (gap >= space_gap || should_add_space(&run.text, &fragment.text, glyphs));
                if needs_space {
                    run.text.push(' ');
                }
                run.text.push_str(&fragment.text);
                run.width = (fragment.x_end() - run.x).max(run.width);
                run.fragment_count += 1;
                continue;
            }
        }
        runs.push(TextRun::start(fragment));
    }
    runs
}

/// Spaces that producers drop around punctuation and bullets when merging.
fn should_add_space(left: &str, right: &str, glyphs: &[String]) -> bool {
    let (Some(left_end), Some(right_start)) = (left.chars().last(), right.chars().next()) else {
        return false;
    };
    let is_glyph = |c: char| glyphs.iter().any(|g| g.starts_with(c));

    let after_punctuation = matches!(left_end, ':' | ',' | '|' | '.') || is_glyph(left_end);
    let before_separator = right_start == '|' || is_glyph(right_start);
    (after_punctuation && right_start != ' ') || (left_end != ' ' && before_separator)
}
