//! Per-ticker sentiment reduction.
//!
//! One accumulated text buffer reduces to a single label: split on line
//! breaks, classify each non-empty chunk independently, drop Neutral labels,
//! then take the mode of the remainder. Ties resolve to the label whose
//! first occurrence came earliest; an empty or all-Neutral chunk set falls
//! back to Neutral.

use log::debug;

use crate::data_source::{ClassifyOptions, SentimentModel, SourceError};
use crate::{MentionRecord, SentimentLabel, TickerSentiment};

/// Character bound applied before a chunk is sent to the model; roughly four
/// characters per token for a 512-token sequence.
const MAX_CHUNK_CHARS: usize = 2_048;

/// Classify the accumulated text of each ranked record, in ranking order.
pub async fn classify_mentions(
    model: &dyn SentimentModel,
    records: Vec<MentionRecord>,
    options: ClassifyOptions,
) -> Result<Vec<TickerSentiment>, SourceError> {
    let mut report = Vec::with_capacity(records.len());
    for record in records {
        let sentiment = classify_text(model, &record.text, options).await?;
        debug!("{}: aggregate sentiment {sentiment}", record.ticker);
        report.push(TickerSentiment {
            ticker: record.ticker,
            name: record.name,
            occurrences: record.occurrences,
            sentiment,
        });
    }
    Ok(report)
}

/// Reduce one accumulated text buffer to a single label.
pub async fn classify_text(
    model: &dyn SentimentModel,
    text: &str,
    options: ClassifyOptions,
) -> Result<SentimentLabel, SourceError> {
    let mut labels = Vec::new();
    for chunk in text.lines() {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }
        let classification = model
            .classify(truncate_chars(chunk, MAX_CHUNK_CHARS), options)
            .await?;
        labels.push(classification.label);
    }
    Ok(majority_label(&labels))
}

/// Mode of the non-Neutral labels; ties resolve to the label whose first
/// occurrence came earliest. Neutral when nothing remains.
pub fn majority_label(labels: &[SentimentLabel]) -> SentimentLabel {
    let mut tallies: Vec<(SentimentLabel, usize)> = Vec::new();
    for label in labels {
        if *label == SentimentLabel::Neutral {
            continue;
        }
        match tallies.iter_mut().find(|(candidate, _)| candidate == label) {
            Some((_, count)) => *count += 1,
            None => tallies.push((*label, 1)),
        }
    }

    let mut winner: Option<(SentimentLabel, usize)> = None;
    for (label, count) in tallies {
        match winner {
            Some((_, best)) if count <= best => {}
            _ => winner = Some((label, count)),
        }
    }

    winner.map(|(label, _)| label).unwrap_or(SentimentLabel::Neutral)
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SentimentLabel::{Negative, Neutral, Positive};

    #[test]
    fn majority_wins_over_last_label() {
        assert_eq!(majority_label(&[Positive, Positive, Negative]), Positive);
    }

    #[test]
    fn neutral_labels_are_excluded_from_the_vote() {
        assert_eq!(majority_label(&[Neutral, Neutral, Negative]), Negative);
    }

    #[test]
    fn all_neutral_falls_back_to_neutral() {
        assert_eq!(majority_label(&[Neutral, Neutral, Neutral]), Neutral);
    }

    #[test]
    fn empty_input_falls_back_to_neutral() {
        assert_eq!(majority_label(&[]), Neutral);
    }

    #[test]
    fn ties_resolve_to_the_first_encountered_label() {
        assert_eq!(
            majority_label(&[Negative, Positive, Positive, Negative]),
            Negative
        );
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "äöü".repeat(1_000);
        let truncated = truncate_chars(&text, MAX_CHUNK_CHARS);
        assert_eq!(truncated.chars().count(), MAX_CHUNK_CHARS);
    }

    #[test]
    fn short_text_is_left_untouched() {
        assert_eq!(truncate_chars("GME to the moon", MAX_CHUNK_CHARS), "GME to the moon");
    }
}
