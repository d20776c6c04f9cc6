use resumex_core::config::schema::ParserConfig;
use resumex_core::error::ResumeError;
use std::path::Path;

use crate::output;

pub fn show() -> Result<(), ResumeError> {
    println!("{}", output::json::to_json(&ParserConfig::default())?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), ResumeError> {
    let config = resumex_core::config::load_config(file)?;

    println!("Config '{}' is valid.", file.display());
    println!(
        "  Sections (priority order): {}",
        config
            .sections
            .iter()
            .map(|s| s.section.to_string())
            .collect::<Vec<_>>()
            .join(" > ")
    );
    println!("  Bullet glyphs: {}", config.bullets.glyphs.join(" "));

    // Check for potential issues (warnings, not errors)
    let mut warnings = Vec::new();
    let mut seen: Vec<(String, String)> = Vec::new();
    for entry in &config.sections {
        if entry.keywords.is_empty() {
            warnings.push(format!("section '{}' has no keywords", entry.section));
        }
        for keyword in &entry.keywords {
            let keyword = keyword.to_lowercase();
            if let Some((_, owner)) = seen.iter().find(|(k, _)| *k == keyword) {
                warnings.push(format!(
                    "keyword '{}' of '{}' is shadowed by '{}'",
                    keyword, entry.section, owner
                ));
            } else {
                seen.push((keyword, entry.section.to_string()));
            }
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
