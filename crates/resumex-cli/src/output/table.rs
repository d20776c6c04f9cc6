use resumex_core::model::{ParsedResume, Resume};
use resumex_core::trace::{LayoutTrace, TraceLineRole};
use std::fmt::Write;

pub fn format_parsed(parsed: &ParsedResume) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Experience ({}) ===\n", parsed.experiences.len());
    for exp in &parsed.experiences {
        let _ = writeln!(
            out,
            "  {}  ({} - {})",
            join_nonempty(&[exp.position.as_str(), exp.company.as_str()], " @ "),
            or_dash(&exp.start_date),
            or_dash(&exp.end_date)
        );
        for line in exp.description.lines() {
            let _ = writeln!(out, "    - {line}");
        }
    }

    let _ = writeln!(out, "\n=== Education ({}) ===\n", parsed.education.len());
    for edu in &parsed.education {
        let _ = writeln!(
            out,
            "  {}  ({} - {})",
            join_nonempty(&[edu.degree.as_str(), edu.institution.as_str()], ", "),
            or_dash(&edu.start_date),
            or_dash(&edu.end_date)
        );
    }

    if !parsed.certifications.is_empty() {
        let _ = writeln!(out, "\n=== Certifications ({}) ===\n", parsed.certifications.len());
        for cert in &parsed.certifications {
            let _ = writeln!(out, "  {} ({})", cert.name, cert.issuing_organization);
        }
    }

    let _ = writeln!(out, "\n=== Skills ({}) ===\n", parsed.skills.len());
    for skill in &parsed.skills {
        let _ = writeln!(out, "  - {skill}");
    }

    out.trim_end().to_string()
}

/// The intermediate record, dates as printed on the page.
pub fn format_resume(resume: &Resume) -> String {
    let mut out = String::new();
    let profile = &resume.profile;

    let _ = writeln!(out, "=== Profile ===\n");
    for (label, value) in [
        ("Name", &profile.name),
        ("Email", &profile.email),
        ("Phone", &profile.phone),
        ("URL", &profile.url),
        ("Location", &profile.location),
        ("Summary", &profile.summary),
    ] {
        if !value.is_empty() {
            let _ = writeln!(out, "  {label:<9} {value}");
        }
    }

    let _ = writeln!(out, "\n=== Work Experience ({}) ===\n", resume.work_experiences.len());
    for exp in &resume.work_experiences {
        let _ = writeln!(
            out,
            "  {} | {} | {}",
            or_dash(&exp.company),
            or_dash(&exp.job_title),
            or_dash(&exp.date)
        );
        for d in &exp.descriptions {
            let _ = writeln!(out, "    - {d}");
        }
    }

    let _ = writeln!(out, "\n=== Education ({}) ===\n", resume.educations.len());
    for edu in &resume.educations {
        let gpa = if edu.gpa.is_empty() {
            String::new()
        } else {
            format!(" | GPA {}", edu.gpa)
        };
        let _ = writeln!(
            out,
            "  {} | {} | {}{}",
            or_dash(&edu.school),
            or_dash(&edu.degree),
            or_dash(&edu.date),
            gpa
        );
        for d in &edu.descriptions {
            let _ = writeln!(out, "    - {d}");
        }
    }

    let _ = writeln!(out, "\n=== Skills ===\n");
    let featured: Vec<&str> = resume
        .skills
        .featured_skills
        .filled()
        .map(|s| s.skill.as_str())
        .collect();
    if !featured.is_empty() {
        let _ = writeln!(out, "  Featured: {}", featured.join(", "));
    }
    for d in &resume.skills.descriptions {
        let _ = writeln!(out, "    - {d}");
    }

    out.trim_end().to_string()
}

pub fn format_trace(trace: &LayoutTrace) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Body font: {} @ {:.1}pt, char width {:.2}pt, {} fragment(s)\n",
        or_dash(&trace.stats.common_font_name),
        trace.stats.body_font_size,
        trace.stats.typical_char_width,
        trace.stats.fragment_count
    );

    let _ = writeln!(out, "=== Sections ===\n");
    let max_name = trace
        .sections
        .iter()
        .map(|s| s.section.to_string().len())
        .max()
        .unwrap_or(10);
    for s in &trace.sections {
        let _ = writeln!(
            out,
            "  {:<width$}  {:>3} line(s)  {}",
            s.section.to_string(),
            s.line_count,
            s.titles.join(" / "),
            width = max_name
        );
    }

    let _ = writeln!(out, "\n=== Lines ===\n");
    for line in &trace.lines {
        let marker = match line.role {
            TraceLineRole::SectionHeading => '#',
            TraceLineRole::Bullet => '*',
            TraceLineRole::Body => ' ',
        };
        let bold = if line.bold { "B" } else { " " };
        let _ = writeln!(
            out,
            "  p{} {:>3}  {:>6.1} {:>5.1}{}  {:<12} {} {}",
            line.page_number,
            line.line_index,
            line.y,
            line.font_size,
            bold,
            line.section.to_string(),
            marker,
            line.text
        );
    }

    out.trim_end().to_string()
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn join_nonempty(parts: &[&str], sep: &str) -> String {
    let parts: Vec<&str> = parts.iter().copied().filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(sep)
    }
}
