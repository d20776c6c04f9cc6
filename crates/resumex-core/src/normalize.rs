use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Sentinel for ongoing positions.
pub const PRESENT: &str = "Present";

/// Start and end of a date range, each `YYYY-MM-DD`, [`PRESENT`] or `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

/// Range separators, tried in this order. A plain hyphen is tried last
/// among the dashes, so "2024-03-01" splits into "2024" and "03".
const DASH_SEPARATORS: [&str; 3] = ["\u{2014}", "\u{2013}", "-"];

static RE_TO_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i) to ").expect("valid separator regex"));
static RE_PRESENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)present|current|now").expect("valid present regex"));
static RE_ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso regex"));
static RE_MONTH_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+)\.?\s+(\d{4})$").expect("valid month regex"));
static RE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("valid year regex"));
static RE_MONTH_SLASH_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{4})$").expect("valid mm/yyyy regex"));

/// Split a printed range like "Aug 2024 — July 2028" and normalize both ends.
///
/// Without a separator the whole string is the start date. When a separator
/// occurs more than once only the first two pieces are used.
pub fn parse_date_range(raw: &str) -> DateRange {
    let raw = raw.trim();
    if raw.is_empty() {
        return DateRange::default();
    }

    let parts = split_range(raw);
    DateRange {
        start_date: parts.first().map(|p| normalize_date(p)).unwrap_or_default(),
        end_date: parts.get(1).map(|p| normalize_date(p)).unwrap_or_default(),
    }
}

fn split_range(raw: &str) -> Vec<&str> {
    if let Some(sep) = DASH_SEPARATORS.iter().find(|sep| raw.contains(**sep)) {
        return raw.split(sep).map(str::trim).collect();
    }
    if RE_TO_SEPARATOR.is_match(raw) {
        return RE_TO_SEPARATOR.split(raw).map(str::trim).collect();
    }
    vec![raw]
}

/// Normalize one date to `YYYY-MM-DD`, [`PRESENT`], or `""` when unrecognized.
pub fn normalize_date(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }

    if RE_PRESENT.is_match(s) {
        return PRESENT.to_string();
    }

    if RE_ISO_DATE.is_match(s) {
        return s.to_string();
    }

    if let Some(caps) = RE_MONTH_YEAR.captures(s) {
        if let Some(month) = month_number(&caps[1]) {
            return format!("{}-{:02}-01", &caps[2], month);
        }
    }

    if RE_YEAR.is_match(s) {
        return format!("{s}-01-01");
    }

    if let Some(caps) = RE_MONTH_SLASH_YEAR.captures(s) {
        if let Ok(month @ 1..=12) = caps[1].parse::<u32>() {
            return format!("{}-{:02}-01", &caps[2], month);
        }
    }

    log::warn!("could not normalize date: {s:?}");
    String::new()
}

/// Month number for a full or abbreviated English month name.
fn month_number(name: &str) -> Option<u32> {
    let month = match name.to_lowercase().as_str() {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: &str, end: &str) -> DateRange {
        DateRange {
            start_date: start.into(),
            end_date: end.into(),
        }
    }

    #[test]
    fn test_normalize_date_forms() {
        assert_eq!(normalize_date("2024-03-01"), "2024-03-01");
        assert_eq!(normalize_date("Aug 2024"), "2024-08-01");
        assert_eq!(normalize_date("august 2024"), "2024-08-01");
        assert_eq!(normalize_date("Sept. 2021"), "2021-09-01");
        assert_eq!(normalize_date("2024"), "2024-01-01");
        assert_eq!(normalize_date("3/2019"), "2019-03-01");
        assert_eq!(normalize_date("12/2019"), "2019-12-01");
    }

    #[test]
    fn test_normalize_present_words() {
        assert_eq!(normalize_date("Present"), PRESENT);
        assert_eq!(normalize_date("current"), PRESENT);
        assert_eq!(normalize_date("NOW"), PRESENT);
        assert_eq!(normalize_date("Till now"), PRESENT);
        assert_eq!(normalize_date("Currently"), PRESENT);
        assert_eq!(normalize_date("present."), PRESENT);
    }

    #[test]
    fn test_open_ended_range_with_currently() {
        assert_eq!(parse_date_range("Jan 2020 - Currently"), range("2020-01-01", PRESENT));
    }

    #[test]
    fn test_normalize_unrecognized_is_empty() {
        assert_eq!(normalize_date("gibberish"), "");
        assert_eq!(normalize_date("Smarch 2020"), "");
        assert_eq!(normalize_date("13/2020"), "");
        assert_eq!(normalize_date("   "), "");
    }

    #[test]
    fn test_parse_date_range_examples() {
        assert_eq!(
            parse_date_range("Aug 2024 \u{2014} July 2028"),
            range("2024-08-01", "2028-07-01")
        );
        assert_eq!(parse_date_range("2020-2024"), range("2020-01-01", "2024-01-01"));
        assert_eq!(parse_date_range("Jan 2023 - Present"), range("2023-01-01", PRESENT));
        assert_eq!(parse_date_range("Jan 2023 \u{2013} Mar 2024"), range("2023-01-01", "2024-03-01"));
    }

    #[test]
    fn test_parse_date_range_to_separator() {
        assert_eq!(parse_date_range("May 2019 to June 2020"), range("2019-05-01", "2020-06-01"));
        assert_eq!(parse_date_range("2019 TO now"), range("2019-01-01", PRESENT));
    }

    #[test]
    fn test_parse_date_range_single_and_empty() {
        assert_eq!(parse_date_range("May 2019"), range("2019-05-01", ""));
        assert_eq!(parse_date_range(""), DateRange::default());
    }

    #[test]
    fn test_hyphen_splits_iso_date() {
        // An ISO date is itself hyphenated, so as a range it splits on the
        // first hyphen: "2024" is the start and "03" is unrecognized.
        assert_eq!(parse_date_range("2024-03-01"), range("2024-01-01", ""));
        // Hyphenated month pairs split the same way.
        assert_eq!(parse_date_range("Mar-Apr 2021"), range("", "2021-04-01"));
    }

    #[test]
    fn test_date_range_json_is_camel_case() {
        let json = serde_json::to_value(range("2020-01-01", PRESENT)).unwrap();
        assert_eq!(json["startDate"], "2020-01-01");
        assert_eq!(json["endDate"], "Present");
    }
}
