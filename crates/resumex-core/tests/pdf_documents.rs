//! End-to-end tests over real PDF bytes, generated in-test with lopdf and
//! read back through the content-stream extractor.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use resumex_core::config::schema::ParserConfig;
use resumex_core::error::ResumeError;
use resumex_core::extraction::content_stream::ContentStreamExtractor;
use resumex_core::extraction::PdfExtractor;
use resumex_core::model::{FeaturedSkills, ParsedResume};
use resumex_core::{extract_resume, parse_resume_pdf};

const PAGE_HEIGHT: i64 = 792;

/// One shown string: font resource, size, x, distance from the page top, text.
struct Text<'a>(&'a str, i64, i64, i64, &'a str);

/// Build a one-page PDF with Helvetica (F1) and Helvetica-Bold (F2).
fn build_pdf(texts: &[Text]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut operations = Vec::new();
    for Text(font, size, x, top, text) in texts {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec![Object::Name(font.as_bytes().to_vec()), (*size).into()]));
        operations.push(Operation::new("Td", vec![(*x).into(), (PAGE_HEIGHT - top).into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
        operations.push(Operation::new("ET", vec![]));
    }
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), PAGE_HEIGHT.into()],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn resume_pdf() -> Vec<u8> {
    build_pdf(&[
        Text("F2", 20, 50, 50, "Jane Doe"),
        Text("F1", 10, 50, 75, "jane@example.com"),
        Text("F2", 12, 50, 110, "EXPERIENCE"),
        Text("F1", 10, 50, 130, "Acme Corp | Senior Engineer"),
        Text("F1", 10, 450, 130, "Jan 2020 - Present"),
        Text("F1", 10, 50, 144, "- Built the billing platform"),
        Text("F1", 10, 50, 158, "- Led a team of 5"),
        Text("F1", 10, 50, 180, "Beta LLC | Engineer"),
        Text("F1", 10, 470, 180, "2017-2019"),
        Text("F1", 10, 50, 194, "- Wrote the first public API"),
        Text("F1", 10, 50, 208, "- Cut build times in half"),
        Text("F2", 12, 50, 240, "EDUCATION"),
        Text("F1", 10, 50, 260, "State University"),
        Text("F1", 10, 430, 260, "Aug 2013 - May 2017"),
        Text("F1", 10, 50, 274, "Bachelor of Science in Computer Science"),
        Text("F2", 12, 50, 300, "SKILLS"),
        Text("F1", 10, 50, 320, "Rust"),
        Text("F1", 10, 150, 320, "Go"),
        Text("F1", 10, 250, 320, "SQL"),
        Text("F1", 10, 50, 334, "- Languages: Rust, Go, SQL"),
    ])
}

// ---------------------------------------------------------------------------
// Fragments carry text, position, font and size from the content stream
// ---------------------------------------------------------------------------
#[test]
fn extracts_positioned_fragments() {
    let pdf = build_pdf(&[Text("F1", 12, 50, 92, "Hello World")]);
    let pages = ContentStreamExtractor::new().extract_pages(&pdf).unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].page_number, 1);
    assert_eq!(pages[0].height, 792.0);

    let fragment = &pages[0].fragments[0];
    assert_eq!(fragment.text, "Hello World");
    assert_eq!(fragment.font_name, "Helvetica");
    assert_eq!(fragment.font_size, 12.0);
    assert!((fragment.x - 50.0).abs() < 0.01);
    // y grows downward from the top of the page.
    assert!((fragment.y - 92.0).abs() < 0.01);
    // No /Widths: every glyph falls back to half an em.
    assert!((fragment.width - 66.0).abs() < 0.01);
}

// ---------------------------------------------------------------------------
// A valid PDF without text is an empty record
// ---------------------------------------------------------------------------
#[test]
fn blank_pdf_yields_empty_record() {
    let pdf = build_pdf(&[]);
    let extractor = ContentStreamExtractor::new();
    let config = ParserConfig::default();

    let parsed = parse_resume_pdf(&pdf, &extractor, &config).unwrap();
    assert_eq!(parsed, ParsedResume::default());

    let resume = extract_resume(&pdf, &extractor, &config).unwrap();
    assert_eq!(resume.skills.featured_skills, FeaturedSkills::default());
}

// ---------------------------------------------------------------------------
// Bytes that are not a PDF fail with a decode error
// ---------------------------------------------------------------------------
#[test]
fn garbage_bytes_are_rejected() {
    let err = parse_resume_pdf(
        b"this is not a pdf",
        &ContentStreamExtractor::new(),
        &ParserConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ResumeError::PdfDecode(_)));
}

// ---------------------------------------------------------------------------
// Full pipeline over a generated résumé
// ---------------------------------------------------------------------------
#[test]
fn generated_resume_end_to_end() {
    let pdf = resume_pdf();
    let parsed = parse_resume_pdf(&pdf, &ContentStreamExtractor::new(), &ParserConfig::default())
        .unwrap();

    assert_eq!(parsed.experiences.len(), 2);
    assert_eq!(parsed.experiences[0].company, "Acme Corp");
    assert_eq!(parsed.experiences[0].position, "Senior Engineer");
    assert_eq!(parsed.experiences[0].start_date, "2020-01-01");
    assert_eq!(parsed.experiences[0].end_date, "Present");
    assert_eq!(
        parsed.experiences[0].description,
        "Built the billing platform\nLed a team of 5"
    );
    assert_eq!(parsed.experiences[1].company, "Beta LLC");
    assert_eq!(parsed.experiences[1].start_date, "2017-01-01");
    assert_eq!(parsed.experiences[1].end_date, "2019-01-01");

    assert_eq!(parsed.education.len(), 1);
    assert_eq!(parsed.education[0].institution, "State University");
    assert_eq!(parsed.education[0].start_date, "2013-08-01");
    assert_eq!(parsed.education[0].end_date, "2017-05-01");

    assert_eq!(parsed.skills, vec!["Languages: Rust, Go, SQL"]);
}

// ---------------------------------------------------------------------------
// Same bytes, same output
// ---------------------------------------------------------------------------
#[test]
fn generated_resume_is_deterministic() {
    let pdf = resume_pdf();
    let extractor = ContentStreamExtractor::new();
    let config = ParserConfig::default();
    let first = serde_json::to_vec(&parse_resume_pdf(&pdf, &extractor, &config).unwrap()).unwrap();
    let second = serde_json::to_vec(&parse_resume_pdf(&pdf, &extractor, &config).unwrap()).unwrap();
    assert_eq!(first, second);
}
