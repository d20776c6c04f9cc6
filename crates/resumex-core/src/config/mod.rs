pub mod schema;

use crate::error::ResumeError;
use schema::ParserConfig;
use std::collections::BTreeSet;
use std::path::Path;

/// Load a parser config from a JSON file.
pub fn load_config(path: &Path) -> Result<ParserConfig, ResumeError> {
    let content = std::fs::read_to_string(path).map_err(|e| ResumeError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a parser config from a JSON string.
pub fn parse_config(json: &str, source: &Path) -> Result<ParserConfig, ResumeError> {
    let config: ParserConfig = serde_json::from_str(json).map_err(|e| ResumeError::ConfigLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a parser config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<ParserConfig, ResumeError> {
    let config: ParserConfig = serde_json::from_str(json).map_err(ResumeError::Json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that thresholds are usable and the section table is well-formed.
pub fn validate_config(config: &ParserConfig) -> Result<(), ResumeError> {
    let ratios = [
        (
            "line_grouping.vertical_tolerance_ratio",
            config.line_grouping.vertical_tolerance_ratio,
        ),
        ("line_grouping.word_gap_ratio", config.line_grouping.word_gap_ratio),
        ("headings.font_size_ratio", config.headings.font_size_ratio),
        ("entries.line_gap_ratio", config.entries.line_gap_ratio),
        ("entries.font_size_ratio", config.entries.font_size_ratio),
        ("entries.column_gap_ratio", config.entries.column_gap_ratio),
    ];
    for (name, value) in ratios {
        if !value.is_finite() || value <= 0.0 {
            return Err(ResumeError::ConfigInvalid(format!(
                "{name} must be a positive number, got {value}"
            )));
        }
    }

    if config.headings.max_words == 0 {
        return Err(ResumeError::ConfigInvalid(
            "headings.max_words must be at least 1".into(),
        ));
    }

    if config.sections.is_empty() {
        return Err(ResumeError::ConfigInvalid("sections must not be empty".into()));
    }

    let mut seen = BTreeSet::new();
    for entry in &config.sections {
        if !seen.insert(entry.section) {
            return Err(ResumeError::ConfigInvalid(format!(
                "section '{}' is listed more than once",
                entry.section
            )));
        }
        if entry.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ResumeError::ConfigInvalid(format!(
                "section '{}' has an empty keyword",
                entry.section
            )));
        }
    }

    if config.bullets.glyphs.iter().any(|g| g.is_empty()) {
        return Err(ResumeError::ConfigInvalid(
            "bullet glyphs must not be empty strings".into(),
        ));
    }

    Ok(())
}
