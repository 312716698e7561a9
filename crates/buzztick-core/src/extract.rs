//! Ticker candidate extraction.
//!
//! A candidate is a word-bounded run of 1-5 uppercase ASCII letters,
//! optionally behind a `$` cashtag, that is not on the exclusion list.
//! Matching is case-sensitive: mixed-case words never produce a candidate,
//! and runs longer than five letters are skipped entirely rather than
//! truncated.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::Symbol;

static CANDIDATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?\b[A-Z]{1,5}\b").expect("candidate pattern compiles"));

/// Common all-caps noise words that look like tickers but are not.
/// Baked into the matcher, not configurable at runtime.
const EXCLUDED_TOKENS: [&str; 55] = [
    "AI", "IMO", "ETF", "O", "WSB", "FED", "USA", "A", "U.S.", "NFL", "SF", "DCA", "EPS", "VOO",
    "SEA", "CNN", "IPO", "EFT", "VGT", "CPI", "DTC", "API", "CEO", "X", "III", "USPS", "GPU",
    "PM", "NYC", "DCF", "RUS", "GOLD", "AH", "ROTH", "YOLO", "DUE", "TV", "SPY", "QQQ", "DOW",
    "GRAB", "EV", "EU", "VXUS", "S", "U", "M", "HYSA", "E", "R", "CNBC", "USD", "MSCI", "THE",
    "DD",
];

static EXCLUDED: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| EXCLUDED_TOKENS.into_iter().collect());

/// Extract the distinct ticker candidates from free text, in first-encounter
/// order. A leading `$` is stripped from the returned symbol.
pub fn extract_candidates(text: &str) -> Vec<Symbol> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for found in CANDIDATE_PATTERN.find_iter(text) {
        let token = found.as_str().trim_start_matches('$');
        if EXCLUDED.contains(token) {
            continue;
        }
        let Ok(symbol) = Symbol::parse(token) else {
            continue;
        };
        if seen.insert(symbol.clone()) {
            candidates.push(symbol);
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(text: &str) -> Vec<String> {
        extract_candidates(text)
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn finds_uppercase_runs() {
        assert_eq!(extracted("GME to the moon"), vec!["GME"]);
    }

    #[test]
    fn strips_cashtag_prefix() {
        assert_eq!(extracted("Buying $GME calls"), vec!["GME"]);
    }

    #[test]
    fn skips_excluded_tokens() {
        assert!(extracted("AI ETF CEO YOLO DD").is_empty());
    }

    #[test]
    fn skips_mixed_case_words() {
        assert!(extracted("Tesla earnings beat").is_empty());
    }

    #[test]
    fn skips_runs_longer_than_five_letters() {
        assert!(extracted("STONKS ALLCAPS").is_empty());
    }

    #[test]
    fn collapses_duplicates_keeping_first_encounter_order() {
        assert_eq!(extracted("TSLA beats, GME squeezes, TSLA again"), vec!["TSLA", "GME"]);
    }

    #[test]
    fn empty_text_yields_no_candidates() {
        assert!(extracted("").is_empty());
    }
}
