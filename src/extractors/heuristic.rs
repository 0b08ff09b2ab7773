// src/extractors/heuristic.rs
//
// Keyword-driven fallback extraction: no oracle involved, just
// sentence segmentation and a fixed vocabulary of financial terms.

use once_cell::sync::Lazy;
use regex::Regex;

/// Terms that mark a sentence as worth keeping.
const KEYWORDS: [&str; 12] = [
    "revenue",
    "profit",
    "growth",
    "margin",
    "guidance",
    "forecast",
    "outlook",
    "increase",
    "decrease",
    "decline",
    "strategy",
    "performance",
];

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RE"));

// Parenthetical asides, e.g. "(see slide 4)", including leading space
static PARENTHETICAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^)]*\)").expect("Failed to compile PARENTHETICAL_RE"));

// Anything outside letters, digits, whitespace and basic punctuation;
// PDF extraction tends to leave bullet glyphs and percent signs behind
static DISALLOWED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.,!?-]").expect("Failed to compile DISALLOWED_RE"));

/// Extracts keyword-bearing sentences from raw transcript text.
///
/// Line-broken text is segmented per line; otherwise the text is split
/// on periods with the period re-appended. Matches are cleaned and
/// returned in source order, duplicates allowed, possibly empty.
pub fn extract(text: &str) -> Vec<String> {
    let candidates: Vec<String> = if text.contains('\n') {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        text.split('.')
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .map(|fragment| format!("{}.", fragment))
            .collect()
    };

    candidates
        .into_iter()
        .filter(|candidate| {
            let lower = candidate.to_lowercase();
            KEYWORDS.iter().any(|keyword| lower.contains(keyword))
        })
        .filter_map(|candidate| {
            let cleaned = clean_sentence(&candidate);
            (!cleaned.is_empty()).then_some(cleaned)
        })
        .collect()
}

fn clean_sentence(raw: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(raw.trim(), " ");
    let no_parens = PARENTHETICAL_RE.replace_all(&collapsed, "");
    let stripped = DISALLOWED_RE.replace_all(&no_parens, "");
    stripped.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_keyword_sentences() {
        let out = extract("Revenue grew 10%.\nWeather was nice.");
        assert_eq!(out, vec!["Revenue grew 10."]);
    }

    #[test]
    fn splits_on_periods_without_line_breaks() {
        let out = extract("Our margin improved. The weather was nice. Guidance is unchanged.");
        assert_eq!(
            out,
            vec!["Our margin improved.", "Guidance is unchanged."]
        );
    }

    #[test]
    fn removes_parentheticals_and_collapses_whitespace() {
        let out = extract("Profit   rose (non-GAAP)  sharply this quarter.\nirrelevant line");
        assert_eq!(out, vec!["Profit rose sharply this quarter."]);
    }

    #[test]
    fn strips_disallowed_characters() {
        let out = extract("Growth of 15% this quarter!\nno match here");
        assert_eq!(out, vec!["Growth of 15 this quarter!"]);
    }

    #[test]
    fn empty_when_nothing_matches() {
        assert!(extract("The weather was nice.\nWe had lunch.").is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let out = extract("OUTLOOK remains strong.\nnothing else");
        assert_eq!(out, vec!["OUTLOOK remains strong."]);
    }
}
