use resumex_core::error::ResumeError;
use resumex_core::normalize::{parse_date_range, DateRange};
use serde::Serialize;

use crate::output;

#[derive(Serialize)]
struct NormalizedRange<'a> {
    input: &'a str,
    #[serde(flatten)]
    range: DateRange,
}

pub fn run(ranges: &[String], output_format: &str) -> Result<(), ResumeError> {
    let normalized: Vec<NormalizedRange> = ranges
        .iter()
        .map(|input| NormalizedRange {
            input,
            range: parse_date_range(input),
        })
        .collect();

    match output_format {
        "json" => println!("{}", output::json::to_json(&normalized)?),
        _ => {
            let width = ranges.iter().map(|r| r.chars().count()).max().unwrap_or(10);
            for n in &normalized {
                println!(
                    "  {:<width$}  start: {:<10}  end: {}",
                    n.input,
                    display_date(&n.range.start_date),
                    display_date(&n.range.end_date),
                    width = width
                );
            }
        }
    }
    Ok(())
}

fn display_date(date: &str) -> &str {
    if date.is_empty() {
        "-"
    } else {
        date
    }
}
