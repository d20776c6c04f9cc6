pub mod config;
pub mod error;
pub mod extraction;
pub mod fields;
pub mod model;
pub mod normalize;
pub mod parsing;
pub mod trace;

use config::schema::ParserConfig;
use error::ResumeError;
use extraction::{PageContent, PdfExtractor};
use model::{ParsedEducation, ParsedExperience, ParsedResume, Resume};
use normalize::parse_date_range;

pub use parsing::{analyze_pages, LayoutAnalysis};

/// Main API entry point: turn PDF bytes into the final résumé record.
///
/// Only a PDF that cannot be decoded is an error. Any decodable document,
/// even one without text, produces a (possibly empty) result.
pub fn parse_resume_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    config: &ParserConfig,
) -> Result<ParsedResume, ResumeError> {
    let resume = extract_resume(pdf_bytes, extractor, config)?;
    Ok(to_parsed_resume(&resume))
}

/// Extract the intermediate résumé, with dates as printed.
pub fn extract_resume(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    config: &ParserConfig,
) -> Result<Resume, ResumeError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    log::debug!(
        "{} extracted {} pages",
        extractor.backend_name(),
        pages.len()
    );
    Ok(extract_resume_from_pages(&pages, config))
}

/// Layout analysis and field extraction over already extracted pages.
pub fn extract_resume_from_pages(pages: &[PageContent], config: &ParserConfig) -> Resume {
    let analysis = analyze_pages(pages, config);
    fields::extract_fields(&analysis.sections, &analysis.stats, config)
}

/// Normalize dates and flatten descriptions into the output contract.
pub fn to_parsed_resume(resume: &Resume) -> ParsedResume {
    let experiences = resume
        .work_experiences
        .iter()
        .map(|exp| {
            let range = parse_date_range(&exp.date);
            ParsedExperience {
                company: exp.company.clone(),
                position: exp.job_title.clone(),
                start_date: range.start_date,
                end_date: range.end_date,
                description: exp.descriptions.join("\n"),
            }
        })
        .collect();

    let education = resume
        .educations
        .iter()
        .map(|edu| {
            let range = parse_date_range(&edu.date);
            ParsedEducation {
                institution: edu.school.clone(),
                degree: edu.degree.clone(),
                field_of_study: String::new(),
                start_date: range.start_date,
                end_date: range.end_date,
            }
        })
        .collect();

    ParsedResume {
        experiences,
        education,
        certifications: Vec::new(),
        skills: resume.skills.descriptions.clone(),
    }
}
