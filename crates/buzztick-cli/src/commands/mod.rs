//! Orchestration of the single-run pipeline.

use std::sync::Arc;

use log::info;

use buzztick_core::{
    classify_mentions, scan_mentions, ClassifyOptions, Config, HttpClient, HuggingFaceAdapter,
    RedditAdapter, ReqwestHttpClient, SentimentModel, SubmissionSource, TickerLookup,
    TickerSentiment, YahooAdapter, MAX_LISTING_LIMIT,
};

use crate::cli::Cli;
use crate::error::CliError;

/// Assembled service handles for one run.
struct Services {
    source: Box<dyn SubmissionSource>,
    lookup: Box<dyn TickerLookup>,
    model: Box<dyn SentimentModel>,
}

pub async fn run(cli: &Cli) -> Result<Vec<TickerSentiment>, CliError> {
    if cli.limit == 0 || cli.limit > MAX_LISTING_LIMIT {
        return Err(CliError::Command(format!(
            "--limit must be between 1 and {MAX_LISTING_LIMIT}"
        )));
    }
    if cli.top == 0 {
        return Err(CliError::Command(String::from(
            "--top must be greater than zero",
        )));
    }

    let services = if cli.mock {
        mock_services()
    } else {
        live_services()?
    };

    info!("scanning up to {} hot submissions", cli.limit);
    let mut ranked = scan_mentions(services.source.as_ref(), services.lookup.as_ref(), cli.limit)
        .await?;
    ranked.truncate(cli.top);

    info!("classifying sentiment for {} tickers", ranked.len());
    let report =
        classify_mentions(services.model.as_ref(), ranked, ClassifyOptions::default()).await?;
    Ok(report)
}

fn live_services() -> Result<Services, CliError> {
    let config = Config::from_env()?;
    let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());

    Ok(Services {
        source: Box::new(RedditAdapter::with_http_client(
            Arc::clone(&http_client),
            config.reddit,
        )),
        lookup: Box::new(YahooAdapter::with_http_client(Arc::clone(&http_client))),
        model: Box::new(HuggingFaceAdapter::with_http_client(
            http_client,
            config.hf_api_token,
        )),
    })
}

fn mock_services() -> Services {
    Services {
        source: Box::new(RedditAdapter::default()),
        lookup: Box::new(YahooAdapter::default()),
        model: Box::new(HuggingFaceAdapter::default()),
    }
}
