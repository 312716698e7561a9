use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Symbol, ValidationError};

/// Forum post scanned for ticker mentions. Read-only, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl Submission {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Full scanned text: title and body concatenated without a separator.
    pub fn full_text(&self) -> String {
        let mut text = String::with_capacity(self.title.len() + self.body.len());
        text.push_str(&self.title);
        text.push_str(&self.body);
        text
    }
}

/// Ticker confirmed by the lookup provider, carrying its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedTicker {
    pub symbol: Symbol,
    pub name: String,
}

/// Sentiment classes emitted by the classification model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Parse a model-emitted label, case-insensitively.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            _ => Err(ValidationError::UnknownSentimentLabel {
                value: value.to_owned(),
            }),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

impl Display for SentimentLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-chunk model output. The confidence score is carried through but
/// unused by the aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: SentimentLabel,
    pub score: f64,
}

/// Per-ticker accumulation produced by the mention scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionRecord {
    pub ticker: Symbol,
    pub name: String,
    pub occurrences: usize,
    pub text: String,
}

/// Final report row for one top-ranked ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerSentiment {
    pub ticker: Symbol,
    pub name: String,
    pub occurrences: usize,
    pub sentiment: SentimentLabel,
}
