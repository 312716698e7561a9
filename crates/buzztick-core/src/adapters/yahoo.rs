use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use log::debug;
use serde::Deserialize;

use crate::data_source::{SourceError, TickerLookup};
use crate::http_client::{HttpClient, HttpRequest, NoopHttpClient};
use crate::{ProviderId, Symbol, ValidatedTicker};

const QUOTE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/quote";

// ============================================================================
// Yahoo Auth Manager - cookie/crumb authentication
// ============================================================================

/// Manages Yahoo Finance cookie/crumb authentication.
///
/// Yahoo's unofficial API requires:
/// 1. Session cookies from fc.yahoo.com (held by the transport's cookie jar)
/// 2. A crumb token from query{1,2}.finance.yahoo.com/v1/test/getcrumb
#[derive(Debug)]
pub struct YahooAuthManager {
    /// Cached crumb token
    crumb: Mutex<Option<String>>,
    /// When the auth was last refreshed
    last_refresh: Mutex<Option<Instant>>,
    /// Auth TTL in seconds
    auth_ttl_secs: u64,
}

impl Default for YahooAuthManager {
    fn default() -> Self {
        Self {
            crumb: Mutex::new(None),
            last_refresh: Mutex::new(None),
            auth_ttl_secs: 3_600,
        }
    }
}

impl YahooAuthManager {
    fn is_auth_valid(&self) -> bool {
        if self.crumb.lock().unwrap().is_none() {
            return false;
        }
        match *self.last_refresh.lock().unwrap() {
            Some(last) => last.elapsed().as_secs() < self.auth_ttl_secs,
            None => false,
        }
    }

    /// Current crumb for use in query parameters, refreshing if needed.
    pub async fn get_crumb(
        &self,
        http_client: &Arc<dyn HttpClient>,
    ) -> Result<String, SourceError> {
        if self.is_auth_valid() {
            if let Some(crumb) = self.crumb.lock().unwrap().clone() {
                return Ok(crumb);
            }
        }

        self.refresh_auth(http_client).await?;

        self.crumb
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| SourceError::unavailable("failed to obtain Yahoo crumb"))
    }

    async fn refresh_auth(&self, http_client: &Arc<dyn HttpClient>) -> Result<(), SourceError> {
        // Step 1: visit fc.yahoo.com so the jar picks up session cookies.
        let cookie_request = HttpRequest::get("https://fc.yahoo.com")
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(10_000);

        let _ = http_client.execute(cookie_request).await.map_err(|error| {
            SourceError::unavailable(format!("failed to fetch Yahoo cookie: {}", error.message()))
        })?;

        // Step 2: fetch the crumb.
        let crumb_endpoints = [
            "https://query1.finance.yahoo.com/v1/test/getcrumb",
            "https://query2.finance.yahoo.com/v1/test/getcrumb",
        ];

        for endpoint in crumb_endpoints {
            let crumb_request = HttpRequest::get(endpoint)
                .with_header("referer", "https://finance.yahoo.com/")
                .with_timeout_ms(10_000);

            match http_client.execute(crumb_request).await {
                Ok(response) if response.is_success() => {
                    let body = response.body.trim();

                    // HTML means an error page, not a crumb.
                    if body.contains("<html") || body.contains("<!DOCTYPE") {
                        continue;
                    }

                    if !body.is_empty() && body.len() < 100 && !body.contains(' ') {
                        *self.crumb.lock().unwrap() = Some(body.to_owned());
                        *self.last_refresh.lock().unwrap() = Some(Instant::now());
                        return Ok(());
                    }
                }
                _ => continue,
            }
        }

        Err(SourceError::unavailable(
            "failed to fetch Yahoo crumb from all endpoints",
        ))
    }

    /// Invalidate cached auth (triggers a refresh on the next call).
    pub fn invalidate(&self) {
        *self.crumb.lock().unwrap() = None;
        *self.last_refresh.lock().unwrap() = None;
    }
}

// ============================================================================
// Yahoo Adapter
// ============================================================================

/// Ticker lookup backed by the Yahoo Finance quote endpoint, with a
/// deterministic catalog when the transport is a mock.
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    auth_manager: Arc<YahooAuthManager>,
    use_real_api: bool,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            auth_manager: Arc::new(YahooAuthManager::default()),
            use_real_api: false,
        }
    }
}

impl YahooAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        let use_real_api = !http_client.is_mock();
        Self {
            http_client,
            auth_manager: Arc::new(YahooAuthManager::default()),
            use_real_api,
        }
    }

    async fn resolve_real(
        &self,
        candidate: &Symbol,
    ) -> Result<Option<ValidatedTicker>, SourceError> {
        let crumb = self.auth_manager.get_crumb(&self.http_client).await?;
        let endpoint = format!(
            "{QUOTE_URL}?symbols={}&fields=symbol,shortName&crumb={}",
            urlencoding::encode(candidate.as_str()),
            urlencoding::encode(&crumb)
        );

        let request = HttpRequest::get(endpoint)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(10_000);

        let response = self.http_client.execute(request).await.map_err(|error| {
            SourceError::unavailable(format!("yahoo transport error: {}", error.message()))
        })?;

        if response.status == 401 || response.status == 429 {
            self.auth_manager.invalidate();
            return Err(SourceError::unavailable(format!(
                "yahoo rejected the request with status {}",
                response.status
            )));
        }
        if response.status == 404 {
            return Ok(None);
        }
        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        // A miss and a malformed record look the same to the caller: no ticker.
        let Ok(parsed) = serde_json::from_str::<YahooQuoteResponse>(&response.body) else {
            debug!("undecodable yahoo response for {candidate}");
            return Ok(None);
        };

        Ok(extract_ticker(parsed))
    }

    fn resolve_fake(&self, candidate: &Symbol) -> Option<ValidatedTicker> {
        yahoo_catalog()
            .iter()
            .find(|(symbol, _)| *symbol == candidate.as_str())
            .map(|(symbol, name)| ValidatedTicker {
                symbol: Symbol::parse(symbol).expect("catalog symbols are valid"),
                name: (*name).to_owned(),
            })
    }
}

impl TickerLookup for YahooAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn resolve<'a>(
        &'a self,
        candidate: Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ValidatedTicker>, SourceError>> + Send + 'a>>
    {
        Box::pin(async move {
            if self.use_real_api {
                self.resolve_real(&candidate).await
            } else {
                Ok(self.resolve_fake(&candidate))
            }
        })
    }
}

fn extract_ticker(response: YahooQuoteResponse) -> Option<ValidatedTicker> {
    let record = response.quote_response.result.into_iter().next()?;
    let symbol = Symbol::parse(&record.symbol?).ok()?;
    let name = record.short_name?;
    Some(ValidatedTicker { symbol, name })
}

// Yahoo Finance API response structures
#[derive(Debug, Deserialize)]
struct YahooQuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: YahooQuoteResponseData,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResponseData {
    #[serde(default)]
    result: Vec<YahooQuoteRecord>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteRecord {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(rename = "shortName", default)]
    short_name: Option<String>,
}

/// Securities known to the offline mode.
fn yahoo_catalog() -> &'static [(&'static str, &'static str)] {
    &[
        ("GME", "GameStop Corp."),
        ("TSLA", "Tesla, Inc."),
        ("AAPL", "Apple Inc."),
        ("MSFT", "Microsoft Corporation"),
        ("AMC", "AMC Entertainment Holdings, Inc."),
        ("NVDA", "NVIDIA Corporation"),
        ("PLTR", "Palantir Technologies Inc."),
        ("F", "Ford Motor Company"),
    ]
}
