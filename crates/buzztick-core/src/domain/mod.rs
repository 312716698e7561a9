//! Canonical domain types for the mention scan.
//!
//! All models are strongly typed with validation at construction time:
//! [`Symbol`] rejects anything that is not a 1-5 letter ticker, and
//! [`SentimentLabel::parse`] rejects labels outside the model's class set.

mod models;
mod symbol;

pub use models::{
    Classification, MentionRecord, SentimentLabel, Submission, TickerSentiment, ValidatedTicker,
};
pub use symbol::Symbol;
