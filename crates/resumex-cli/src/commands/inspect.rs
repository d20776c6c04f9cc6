use resumex_core::error::ResumeError;
use resumex_core::extraction::extractor_for_backend;
use resumex_core::trace::build_layout_trace;
use std::path::PathBuf;

use crate::output;

pub fn run(
    pdf_file: PathBuf,
    output_format: &str,
    backend: &str,
    config_file: Option<PathBuf>,
) -> Result<(), ResumeError> {
    let config = super::load_parser_config(config_file)?;
    let extractor = extractor_for_backend(backend)?;
    let pdf_bytes = std::fs::read(&pdf_file)?;

    let pages = extractor.extract_pages(&pdf_bytes)?;
    let analysis = resumex_core::analyze_pages(&pages, &config);
    let trace = build_layout_trace(&analysis, &config);

    match output_format {
        "json" => println!("{}", output::json::to_json(&trace)?),
        _ => println!("{}", output::table::format_trace(&trace)),
    }
    Ok(())
}
