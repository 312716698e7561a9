//! Single-pass mention scan: listing, extraction, validation, aggregation.

use std::collections::HashSet;

use log::{debug, info};

use crate::aggregate::MentionAggregator;
use crate::data_source::{HotSubmissionsRequest, SourceError, SubmissionSource, TickerLookup};
use crate::extract::extract_candidates;
use crate::{MentionRecord, Symbol};

/// Scan up to `limit` hot submissions and return the full ranked mention
/// records.
///
/// Candidates that fail to resolve are dropped without surfacing an error;
/// a submission source failure aborts the scan.
pub async fn scan_mentions(
    source: &dyn SubmissionSource,
    lookup: &dyn TickerLookup,
    limit: usize,
) -> Result<Vec<MentionRecord>, SourceError> {
    let request = HotSubmissionsRequest::new(limit)?;
    let batch = source.hot(request).await?;
    info!(
        "scanning {} submissions from {}",
        batch.submissions.len(),
        source.id()
    );

    let mut aggregator = MentionAggregator::new();
    for submission in &batch.submissions {
        let full_text = submission.full_text();
        let mut resolved_here: HashSet<Symbol> = HashSet::new();

        for candidate in extract_candidates(&full_text) {
            match lookup.resolve(candidate.clone()).await {
                Ok(Some(ticker)) => {
                    // One count per submission per canonical symbol, even when
                    // several distinct candidates resolve to the same security.
                    if resolved_here.insert(ticker.symbol.clone()) {
                        aggregator.record(ticker, &full_text);
                    }
                }
                Ok(None) => {
                    debug!("candidate {candidate} did not resolve, dropped");
                }
                Err(error) => {
                    debug!("lookup for {candidate} failed ({error}), dropped");
                }
            }
        }
    }

    info!("aggregated {} distinct tickers", aggregator.len());
    Ok(aggregator.into_ranked())
}
