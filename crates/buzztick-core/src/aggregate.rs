//! Mention accumulation and ranking.

use std::collections::HashMap;

use crate::{MentionRecord, Symbol, ValidatedTicker};

/// Accumulates validated ticker mentions over one scan.
///
/// State is owned by the aggregator and handed out as an immutable snapshot
/// once the scan completes. Records keep first-mention order, so the
/// descending-count ranking breaks ties by encounter order.
#[derive(Debug, Default)]
pub struct MentionAggregator {
    index: HashMap<Symbol, usize>,
    records: Vec<MentionRecord>,
}

impl MentionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one validated occurrence into the aggregate.
    ///
    /// The first occurrence initializes the text buffer with the submission
    /// text; later occurrences increment the count and append to it.
    pub fn record(&mut self, ticker: ValidatedTicker, submission_text: &str) {
        match self.index.get(&ticker.symbol) {
            Some(&position) => {
                let record = &mut self.records[position];
                record.occurrences += 1;
                record.text.push_str(submission_text);
            }
            None => {
                self.index.insert(ticker.symbol.clone(), self.records.len());
                self.records.push(MentionRecord {
                    ticker: ticker.symbol,
                    name: ticker.name,
                    occurrences: 1,
                    text: submission_text.to_owned(),
                });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the aggregator and return all records ranked by occurrence
    /// count, descending. The sort is stable, so equal counts keep
    /// first-mention order.
    pub fn into_ranked(self) -> Vec<MentionRecord> {
        let mut ranked = self.records;
        ranked.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
        ranked
    }

    /// Ranked records truncated to the top `n`.
    pub fn into_top(self, n: usize) -> Vec<MentionRecord> {
        let mut ranked = self.into_ranked();
        ranked.truncate(n);
        ranked
    }
}
