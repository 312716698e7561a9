//! # Buzztick Core
//!
//! Core contracts and domain logic for buzztick, a single-run scanner that
//! tallies stock ticker mentions across hot stock-forum submissions and
//! reports aggregate sentiment for the most-mentioned tickers.
//!
//! ## Overview
//!
//! The scan is a thin sequential pipeline:
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │ SubmissionSource │────▶│ Ticker Extractor │
//! │ (Reddit adapter) │     │ (pattern + list) │
//! └──────────────────┘     └────────┬─────────┘
//!                                   │ candidates
//!                                   ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ TickerLookup     │────▶│ MentionAggregator│
//! │ (Yahoo adapter)  │     │ (count + text)   │
//! └──────────────────┘     └────────┬─────────┘
//!                                   │ top-ranked records
//!                                   ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ SentimentModel   │────▶│ majority vote    │
//! │ (HF inference)   │     │ per ticker       │
//! └──────────────────┘     └──────────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Reddit, Yahoo, Hugging Face) |
//! | [`aggregate`] | Mention accumulation and ranking |
//! | [`config`] | Environment-backed configuration |
//! | [`data_source`] | Service traits and request/response types |
//! | [`domain`] | Domain models (Submission, Symbol, labels, records) |
//! | [`extract`] | Ticker candidate extraction |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`scan`] | The single-pass mention scan |
//! | [`sentiment`] | Per-ticker sentiment reduction |
//! | [`source`] | Upstream service identifiers |
//!
//! ## Error Handling
//!
//! Unresolvable ticker candidates are an expected outcome and never abort
//! the run; submission-listing and model failures propagate as
//! [`SourceError`] and do. Credentials are read from the environment only
//! and never logged.

pub mod adapters;
pub mod aggregate;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod extract;
pub mod http_client;
pub mod scan;
pub mod sentiment;
pub mod source;

// Re-export commonly used types at crate root for convenience

// Adapter implementations
pub use adapters::{HuggingFaceAdapter, RedditAdapter, YahooAdapter};

// Aggregation
pub use aggregate::MentionAggregator;

// Configuration
pub use config::{Config, RedditCredentials};

// Service traits and types
pub use data_source::{
    ClassifyOptions, HotSubmissionsRequest, SentimentModel, SourceError, SourceErrorKind,
    SubmissionBatch, SubmissionSource, TickerLookup, MAX_LISTING_LIMIT,
};

// Domain models
pub use domain::{
    Classification, MentionRecord, SentimentLabel, Submission, Symbol, TickerSentiment,
    ValidatedTicker,
};

// Error types
pub use error::{ConfigError, ValidationError};

// Extraction
pub use extract::extract_candidates;

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};

// Pipeline operations
pub use scan::scan_mentions;
pub use sentiment::{classify_mentions, classify_text, majority_label};

// Service identifiers
pub use source::ProviderId;
