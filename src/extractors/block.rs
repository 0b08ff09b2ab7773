// src/extractors/block.rs
//
// Parses the free-text block layout the generation oracle is asked to
// produce. A well-formed block is exactly three lines:
//
//   {company} {speaker} on {description}:
//   "{quote}"
//   #{hashtag}
//
// Blocks are separated by a blank line. A malformed block is counted
// and logged, never fatal; the guarantee is
// records.len() + parse_failures == non-empty block count.

use crate::extractors::models::{derive_hashtag, QuoteRecord};
use crate::extractors::Extraction;
use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| {
    // A blank line, tolerant of stray whitespace and \r\n endings
    Regex::new(r"\r?\n\s*\r?\n").expect("Failed to compile BLOCK_BOUNDARY_RE")
});

const HEADER_SEPARATOR: &str = " on ";

/// Parses the oracle's response into quote records.
///
/// Pure: no I/O, no panics on malformed input. The oracle is asked for
/// ten blocks but nothing here assumes any particular count.
pub fn parse_blocks(raw_text: &str, company: &str) -> Extraction {
    let mut records = Vec::new();
    let mut parse_failures = 0;

    for block in BLOCK_BOUNDARY_RE.split(raw_text) {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }

        match parse_block(block, company) {
            Ok(record) => records.push(record),
            Err(reason) => {
                parse_failures += 1;
                tracing::warn!("Failed to parse quote block: {}", reason);
            }
        }
    }

    Extraction {
        records,
        parse_failures,
    }
}

fn parse_block(block: &str, company: &str) -> Result<QuoteRecord, String> {
    let lines: Vec<&str> = block.lines().collect();
    if lines.len() != 3 {
        return Err(format!(
            "expected 3 lines (header, quote, hashtag), found {}",
            lines.len()
        ));
    }

    let header = lines[0].trim();
    let quote_line = lines[1].trim();
    let hashtag_line = lines[2].trim();

    // The header opens with the company name we prompted with; strip it
    // if present, otherwise parse the full line.
    let remainder = header
        .strip_prefix(company)
        .map(str::trim_start)
        .unwrap_or(header);

    let (speaker_segment, description_segment) = remainder
        .split_once(HEADER_SEPARATOR)
        .ok_or_else(|| format!("header missing '{}' separator: {:?}", HEADER_SEPARATOR, header))?;

    let description = description_segment.trim();
    let description = description.strip_suffix(':').unwrap_or(description).trim();

    let (speaker_role, speaker_name) = split_speaker(speaker_segment.trim());

    let quote = quote_line.strip_prefix('"').unwrap_or(quote_line);
    let quote = quote.strip_suffix('"').unwrap_or(quote);
    let quote_text = quote.trim();
    if quote_text.is_empty() {
        return Err(format!("empty quote text in block starting {:?}", header));
    }

    Ok(QuoteRecord {
        company: company.to_string(),
        speaker_role,
        speaker_name,
        description: description.to_string(),
        quote_text: quote_text.to_string(),
        hashtag: sanitize_hashtag(hashtag_line, company),
        fiscal_year: None,
        period: None,
    })
}

/// Splits `"CEO [Jane Doe]"` into role and name. Without brackets the
/// whole segment is the role and the name stays empty.
fn split_speaker(speaker: &str) -> (String, String) {
    match (speaker.find('['), speaker.find(']')) {
        (Some(open), Some(close)) if open < close => (
            speaker[..open].trim().to_string(),
            speaker[open + 1..close].trim().to_string(),
        ),
        _ => (speaker.to_string(), String::new()),
    }
}

/// The hashtag line verbatim when it satisfies the record invariants,
/// otherwise the hashtag derived from the company name.
fn sanitize_hashtag(line: &str, company: &str) -> String {
    if line.starts_with('#') && !line.chars().any(char::is_whitespace) && line.len() > 1 {
        line.to_string()
    } else {
        derive_hashtag(company)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPANY: &str = "Acme Corp";

    fn well_formed() -> String {
        [
            "Acme Corp CEO [Jane Doe] on Expansion Plans:",
            "\"We are entering three new markets next fiscal year.\"",
            "#AcmeCorp",
        ]
        .join("\n")
    }

    #[test]
    fn parses_well_formed_block() {
        let out = parse_blocks(&well_formed(), COMPANY);
        assert_eq!(out.parse_failures, 0);
        assert_eq!(out.records.len(), 1);

        let record = &out.records[0];
        assert_eq!(record.company, "Acme Corp");
        assert_eq!(record.speaker_role, "CEO");
        assert_eq!(record.speaker_name, "Jane Doe");
        assert_eq!(record.description, "Expansion Plans");
        assert_eq!(
            record.quote_text,
            "We are entering three new markets next fiscal year."
        );
        assert!(!record.quote_text.starts_with('"'));
        assert_eq!(record.hashtag, "#AcmeCorp");
    }

    #[test]
    fn speaker_without_brackets_has_empty_name() {
        let text = "Acme Corp CFO on Margin Outlook:\n\"Margins held steady.\"\n#AcmeCorp";
        let out = parse_blocks(text, COMPANY);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].speaker_role, "CFO");
        assert_eq!(out.records[0].speaker_name, "");
    }

    #[test]
    fn header_without_separator_is_counted_not_fatal() {
        let text = format!(
            "Acme Corp CEO about Expansion:\n\"bad header\"\n#AcmeCorp\n\n{}",
            well_formed()
        );
        let out = parse_blocks(&text, COMPANY);
        assert_eq!(out.parse_failures, 1);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].description, "Expansion Plans");
    }

    #[test]
    fn wrong_line_count_is_a_parse_failure() {
        let text = "Acme Corp CEO on Plans:\n\"quote\"\n#AcmeCorp\nextra line";
        let out = parse_blocks(text, COMPANY);
        assert_eq!(out.parse_failures, 1);
        assert!(out.records.is_empty());
    }

    #[test]
    fn records_plus_failures_equals_block_count() {
        let text = format!(
            "{}\n\nonly one line\n\n{}\n\nAcme Corp CEO missing separator:\nx\n#AcmeCorp",
            well_formed(),
            well_formed()
        );
        let out = parse_blocks(&text, COMPANY);
        assert_eq!(out.records.len() + out.parse_failures, 4);
        assert_eq!(out.records.len(), 2);
    }

    #[test]
    fn malformed_hashtag_line_falls_back_to_derived() {
        let text = "Acme Corp CEO on Plans:\n\"A quote.\"\nnot a hashtag line";
        let out = parse_blocks(text, COMPANY);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].hashtag, "#AcmeCorp");
    }

    #[test]
    fn empty_quote_is_a_parse_failure() {
        let text = "Acme Corp CEO on Plans:\n\"\"\n#AcmeCorp";
        let out = parse_blocks(text, COMPANY);
        assert_eq!(out.parse_failures, 1);
        assert!(out.records.is_empty());
    }

    #[test]
    fn handles_crlf_and_extra_blank_lines() {
        let text = "Acme Corp CEO on Plans:\r\n\"A quote.\"\r\n#AcmeCorp\r\n\r\n\r\nAcme Corp CFO on Guidance:\r\n\"Another.\"\r\n#AcmeCorp";
        let out = parse_blocks(text, COMPANY);
        assert_eq!(out.parse_failures, 0);
        assert_eq!(out.records.len(), 2);
    }
}
