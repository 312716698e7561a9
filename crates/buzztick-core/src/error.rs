use thiserror::Error;

/// Validation and contract errors exposed by `buzztick-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("unknown sentiment label '{value}'")]
    UnknownSentimentLabel { value: String },
}

/// Errors raised while loading credentials and settings from the environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable '{name}'")]
    MissingVar { name: &'static str },
    #[error("environment variable '{name}' must not be empty")]
    EmptyVar { name: &'static str },
}
