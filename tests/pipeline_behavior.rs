//! End-to-end pipeline behavior against the adapters' offline fixtures.
//!
//! This is the user journey of `buzztick --mock`: fixture submissions are
//! scanned, candidates validate against the built-in catalog, and the
//! keyword model reduces each top ticker to a label.

use buzztick_core::{
    classify_mentions, scan_mentions, ClassifyOptions, HuggingFaceAdapter, RedditAdapter,
    SentimentLabel, YahooAdapter,
};

#[tokio::test]
async fn offline_run_produces_the_full_ranked_report() {
    let source = RedditAdapter::default();
    let lookup = YahooAdapter::default();
    let model = HuggingFaceAdapter::default();

    let mut ranked = scan_mentions(&source, &lookup, 100)
        .await
        .expect("offline scan should succeed");
    ranked.truncate(10);

    assert!(!ranked.is_empty());
    assert!(ranked.len() <= 10);

    // GME appears in three fixture submissions and leads the ranking.
    assert_eq!(ranked[0].ticker.as_str(), "GME");
    assert_eq!(ranked[0].name, "GameStop Corp.");
    assert_eq!(ranked[0].occurrences, 3);

    for window in ranked.windows(2) {
        assert!(window[0].occurrences >= window[1].occurrences);
    }

    let report = classify_mentions(&model, ranked, ClassifyOptions::default())
        .await
        .expect("offline classification should succeed");

    // Two of the three GME submissions read bullish; the bearish final one
    // cannot flip the majority vote.
    assert_eq!(report[0].ticker.as_str(), "GME");
    assert_eq!(report[0].sentiment, SentimentLabel::Positive);

    // Every reported ticker resolved through the catalog at least once.
    for row in &report {
        assert!(row.occurrences >= 1);
        assert!(!row.name.is_empty());
    }
}

#[tokio::test]
async fn offline_run_is_deterministic() {
    let source = RedditAdapter::default();
    let lookup = YahooAdapter::default();

    let first = scan_mentions(&source, &lookup, 100)
        .await
        .expect("scan should succeed");
    let second = scan_mentions(&source, &lookup, 100)
        .await
        .expect("scan should succeed");

    assert_eq!(first, second);
}

#[tokio::test]
async fn smaller_listing_limits_shrink_the_scan() {
    let source = RedditAdapter::default();
    let lookup = YahooAdapter::default();

    let ranked = scan_mentions(&source, &lookup, 3)
        .await
        .expect("scan should succeed");

    // Only the first three fixture submissions are scanned; all mention GME.
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].ticker.as_str(), "GME");
    assert_eq!(ranked[0].occurrences, 3);
}
