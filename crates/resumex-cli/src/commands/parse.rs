use resumex_core::error::ResumeError;
use resumex_core::extraction::extractor_for_backend;
use std::path::PathBuf;

use crate::output;

pub fn run(
    pdf_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    backend: &str,
    config_file: Option<PathBuf>,
    raw: bool,
) -> Result<(), ResumeError> {
    let config = super::load_parser_config(config_file)?;
    let extractor = extractor_for_backend(backend)?;
    let pdf_bytes = std::fs::read(&pdf_file)?;
    log::debug!(
        "parsing {} ({} bytes) with the {} backend",
        pdf_file.display(),
        pdf_bytes.len(),
        extractor.backend_name()
    );

    let resume = resumex_core::extract_resume(&pdf_bytes, extractor.as_ref(), &config)?;
    let parsed = resumex_core::to_parsed_resume(&resume);

    let (json, table) = if raw {
        (output::json::to_json(&resume)?, output::table::format_resume(&resume))
    } else {
        (output::json::to_json(&parsed)?, output::table::format_parsed(&parsed))
    };

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            std::fs::write(&path, &json)?;
            eprintln!(
                "Parsed {} experience(s), {} education(s), {} skill(s), written to {}",
                parsed.experiences.len(),
                parsed.education.len(),
                parsed.skills.len(),
                path.display()
            );
            let undated = parsed
                .experiences
                .iter()
                .filter(|e| e.start_date.is_empty())
                .count();
            if undated > 0 {
                eprintln!("  {undated} experience(s) without a recognizable start date");
            }
        }
        None => match output_format {
            "json" => println!("{json}"),
            _ => println!("{table}"),
        },
    }

    Ok(())
}
