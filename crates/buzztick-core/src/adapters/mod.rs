//! Upstream service adapters.
//!
//! Each adapter talks to its real API when given a live transport and falls
//! back to deterministic fixtures when the transport is a mock, so the whole
//! pipeline can run offline.

mod huggingface;
mod reddit;
mod yahoo;

pub use huggingface::HuggingFaceAdapter;
pub use reddit::{RedditAdapter, RedditAuthManager};
pub use yahoo::{YahooAdapter, YahooAuthManager};
