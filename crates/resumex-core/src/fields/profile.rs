use crate::model::ResumeProfile;
use crate::parsing::lines::{Line, TextRun};
use regex::Regex;
use std::sync::LazyLock;

static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email regex"));
static RE_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+\d{1,3}[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}").expect("valid phone regex")
});
static RE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https?://\S+|\b(?:www\.)?[a-z0-9-]+\.[a-z]{2,}/\S+").expect("valid url regex")
});
static RE_LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-zA-Z\s]+, [A-Z]{2}\b").expect("valid location regex"));

/// Words a line needs before it can count towards the summary.
const SUMMARY_MIN_WORDS: usize = 6;

/// Pull contact details, name and summary out of the profile section.
pub fn extract_profile(lines: &[Line]) -> ResumeProfile {
    let runs: Vec<&TextRun> = lines.iter().flat_map(|l| l.runs.iter()).collect();
    let email = first_match(&runs, &RE_EMAIL);
    let phone = first_match(&runs, &RE_PHONE);
    let url = runs
        .iter()
        .filter(|r| !RE_EMAIL.is_match(&r.text))
        .find_map(|r| RE_URL.find(&r.text))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    let location = first_match(&runs, &RE_LOCATION);

    ResumeProfile {
        name: extract_name(&runs),
        email,
        phone,
        url,
        location,
        summary: extract_summary(lines),
    }
}

fn first_match(runs: &[&TextRun], re: &Regex) -> String {
    runs.iter()
        .find_map(|r| re.find(&r.text))
        .map(|m| m.as_str().trim_end_matches([',', ';', '|']).to_string())
        .unwrap_or_default()
}

/// The largest run made only of letters, spaces, periods, hyphens and
/// apostrophes. The first one wins a tie.
fn extract_name(runs: &[&TextRun]) -> String {
    let mut best: Option<&TextRun> = None;
    for run in runs.iter().copied().filter(|r| is_name_like(&r.text)) {
        if best.map_or(true, |b| run.font_size > b.font_size) {
            best = Some(run);
        }
    }
    best.map(|r| r.text.trim().to_string()).unwrap_or_default()
}

fn is_name_like(text: &str) -> bool {
    let text = text.trim();
    text.chars().any(char::is_alphabetic)
        && text
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, ' ' | '.' | '-' | '\''))
}

fn extract_summary(lines: &[Line]) -> String {
    lines
        .iter()
        .map(Line::text)
        .filter(|text| {
            text.split_whitespace().count() >= SUMMARY_MIN_WORDS
                && !RE_EMAIL.is_match(text)
                && !RE_PHONE.is_match(text)
                && !RE_URL.is_match(text)
        })
        .map(|text| text.trim().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
