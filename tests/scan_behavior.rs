//! Behavior tests for the mention scan and aggregation.
//!
//! The scan runs against scripted service doubles so the assertions cover
//! WHAT the pipeline produces: counts per distinct submission, silent
//! candidate discards, and the ranking contract.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use buzztick_core::{
    scan_mentions, HotSubmissionsRequest, MentionAggregator, ProviderId, SourceError, Submission,
    SubmissionBatch, SubmissionSource, Symbol, TickerLookup, ValidatedTicker,
};

struct FixedSubmissions(Vec<Submission>);

impl FixedSubmissions {
    fn new(texts: &[(&str, &str)]) -> Self {
        Self(
            texts
                .iter()
                .map(|(title, body)| Submission::new(*title, *body))
                .collect(),
        )
    }
}

impl SubmissionSource for FixedSubmissions {
    fn id(&self) -> ProviderId {
        ProviderId::Reddit
    }

    fn hot<'a>(
        &'a self,
        req: HotSubmissionsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<SubmissionBatch, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            Ok(SubmissionBatch {
                submissions: self.0.iter().take(req.limit).cloned().collect(),
            })
        })
    }
}

/// Lookup double mapping candidate strings to (canonical symbol, name).
struct MapLookup {
    known: HashMap<&'static str, (&'static str, &'static str)>,
    calls: Mutex<usize>,
}

impl MapLookup {
    fn new(entries: &[(&'static str, (&'static str, &'static str))]) -> Self {
        Self {
            known: entries.iter().copied().collect(),
            calls: Mutex::new(0),
        }
    }

    fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl TickerLookup for MapLookup {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn resolve<'a>(
        &'a self,
        candidate: Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ValidatedTicker>, SourceError>> + Send + 'a>>
    {
        Box::pin(async move {
            *self.calls.lock().unwrap() += 1;
            Ok(self
                .known
                .get(candidate.as_str())
                .map(|(canonical, name)| ValidatedTicker {
                    symbol: Symbol::parse(canonical).expect("canonical symbol is valid"),
                    name: (*name).to_owned(),
                }))
        })
    }
}

const GME: (&str, (&str, &str)) = ("GME", ("GME", "GameStop Corp."));

#[tokio::test]
async fn three_submissions_mentioning_gme_count_three() {
    let source = FixedSubmissions::new(&[
        ("Buying $GME calls, YOLO", ""),
        ("GME to the moon, bullish AF", ""),
        ("I hate GME, selling everything", ""),
    ]);
    let lookup = MapLookup::new(&[GME]);

    let ranked = scan_mentions(&source, &lookup, 100)
        .await
        .expect("scan should succeed");

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].ticker.as_str(), "GME");
    assert_eq!(ranked[0].name, "GameStop Corp.");
    assert_eq!(ranked[0].occurrences, 3);
    // The buffer holds all three submissions, in scan order.
    assert_eq!(
        ranked[0].text,
        "Buying $GME calls, YOLOGME to the moon, bullish AFI hate GME, selling everything"
    );
}

#[tokio::test]
async fn unresolved_candidates_are_discarded_silently() {
    // 50 submissions all mentioning a candidate the provider does not know.
    let texts: Vec<(String, String)> = (0..50)
        .map(|i| (format!("ZZZZZ thread number {i}"), String::new()))
        .collect();
    let source = FixedSubmissions(
        texts
            .iter()
            .map(|(title, body)| Submission::new(title.clone(), body.clone()))
            .collect(),
    );
    let lookup = MapLookup::new(&[]);

    let ranked = scan_mentions(&source, &lookup, 50)
        .await
        .expect("scan should succeed despite misses");

    assert!(ranked.is_empty());
    // Every occurrence was looked up once; none aborted the scan.
    assert_eq!(lookup.call_count(), 50);
}

#[tokio::test]
async fn count_is_per_submission_not_per_match() {
    let source = FixedSubmissions::new(&[("GME GME $GME, all one submission", "and GME again")]);
    let lookup = MapLookup::new(&[GME]);

    let ranked = scan_mentions(&source, &lookup, 100)
        .await
        .expect("scan should succeed");

    assert_eq!(ranked[0].occurrences, 1);
}

#[tokio::test]
async fn distinct_candidates_resolving_to_one_security_count_once_per_submission() {
    let source = FixedSubmissions::new(&[("GOOG or GOOGL, same company either way", "")]);
    let lookup = MapLookup::new(&[
        ("GOOG", ("GOOGL", "Alphabet Inc.")),
        ("GOOGL", ("GOOGL", "Alphabet Inc.")),
    ]);

    let ranked = scan_mentions(&source, &lookup, 100)
        .await
        .expect("scan should succeed");

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].ticker.as_str(), "GOOGL");
    assert_eq!(ranked[0].occurrences, 1);
}

#[tokio::test]
async fn ranking_is_sorted_by_count_descending_with_stable_ties() {
    let source = FixedSubmissions::new(&[
        ("TSLA thread one", ""),
        ("GME thread one", ""),
        ("GME thread two", ""),
        ("AMC thread one", ""),
    ]);
    let lookup = MapLookup::new(&[
        GME,
        ("TSLA", ("TSLA", "Tesla, Inc.")),
        ("AMC", ("AMC", "AMC Entertainment Holdings, Inc.")),
    ]);

    let ranked = scan_mentions(&source, &lookup, 100)
        .await
        .expect("scan should succeed");

    let symbols: Vec<&str> = ranked.iter().map(|r| r.ticker.as_str()).collect();
    assert_eq!(symbols, vec!["GME", "TSLA", "AMC"]);

    for window in ranked.windows(2) {
        assert!(window[0].occurrences >= window[1].occurrences);
    }
}

#[tokio::test]
async fn top_selection_caps_a_wide_ranking_at_ten() {
    let mut aggregator = MentionAggregator::new();
    for symbol in [
        "AA", "BB", "CC", "DD", "EE", "FF", "GG", "HH", "II", "JJ", "KK", "LL",
    ] {
        aggregator.record(
            ValidatedTicker {
                symbol: Symbol::parse(symbol).expect("valid symbol"),
                name: format!("{symbol} Holdings"),
            },
            "post",
        );
    }

    let top = aggregator.into_top(10);
    assert_eq!(top.len(), 10);
}

#[tokio::test]
async fn validator_outcome_is_deterministic_for_a_fixed_provider() {
    let lookup = MapLookup::new(&[GME]);
    let candidate = Symbol::parse("GME").expect("valid symbol");

    let first = lookup.resolve(candidate.clone()).await.expect("resolves");
    let second = lookup.resolve(candidate).await.expect("resolves");
    assert_eq!(first, second);
}

#[tokio::test]
async fn scan_rejects_out_of_range_limits() {
    let source = FixedSubmissions::new(&[]);
    let lookup = MapLookup::new(&[]);

    assert!(scan_mentions(&source, &lookup, 0).await.is_err());
    assert!(scan_mentions(&source, &lookup, 101).await.is_err());
}
