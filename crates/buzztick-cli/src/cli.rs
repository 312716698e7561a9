//! CLI argument definitions for buzztick.
//!
//! A bare `buzztick` run reproduces the reference batch behavior: scan 100
//! hot submissions, report the top 10 tickers as a table. Every flag only
//! adjusts that single run; there are no subcommands.
//!
//! # Examples
//!
//! ```bash
//! # Full live run (requires credentials in the environment or .env)
//! buzztick
//!
//! # Smaller scan, JSON output
//! buzztick --limit 25 --top 5 --format json
//!
//! # Offline run against built-in fixtures
//! buzztick --mock
//! ```

use clap::{Parser, ValueEnum};

/// Buzztick - forum ticker-mention scanner and sentiment reporter
///
/// Scans the hot submissions of a fixed set of stock-market subreddits for
/// ticker mentions, validates candidates against Yahoo Finance, and reports
/// aggregate sentiment for the most-mentioned tickers.
#[derive(Debug, Parser)]
#[command(
    name = "buzztick",
    author,
    version,
    about = "Forum ticker-mention scanner and sentiment reporter"
)]
pub struct Cli {
    /// Number of hot submissions to scan (the source caps a page at 100).
    #[arg(long, default_value_t = 100)]
    pub limit: usize,

    /// Number of top-ranked tickers to classify and report.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Output format for the final report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Run offline against deterministic built-in fixtures.
    #[arg(long, default_value_t = false)]
    pub mock: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table for terminal display.
    Table,
    /// Pretty-printed JSON array.
    Json,
}
