use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::debug;
use serde::Deserialize;

use crate::config::RedditCredentials;
use crate::data_source::{HotSubmissionsRequest, SourceError, SubmissionBatch, SubmissionSource};
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, NoopHttpClient};
use crate::{ProviderId, Submission};

/// Subreddits scanned by every run, in Reddit multi-listing form.
const FORUMS: &str = "stocks+stockmarket+investing+wallstreetbets";

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const LISTING_BASE: &str = "https://oauth.reddit.com/r";

/// Safety margin subtracted from the token lifetime before a refresh.
const TOKEN_EXPIRY_SLACK_SECS: u64 = 60;

// ============================================================================
// Reddit Auth Manager - application-only OAuth2 bearer token
// ============================================================================

/// Manages the application-only OAuth2 token used by listing calls.
///
/// Reddit's API requires:
/// 1. A token from www.reddit.com/api/v1/access_token, fetched with HTTP
///    Basic auth (client id / client secret) and `grant_type=client_credentials`
/// 2. The registered user agent on every request
#[derive(Debug)]
pub struct RedditAuthManager {
    credentials: RedditCredentials,
    token: Mutex<Option<CachedToken>>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    fetched_at: Instant,
    ttl: Duration,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        self.fetched_at.elapsed() < self.ttl
    }
}

impl RedditAuthManager {
    pub fn new(credentials: RedditCredentials) -> Self {
        Self {
            credentials,
            token: Mutex::new(None),
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.credentials.user_agent
    }

    /// Current bearer token, fetching a fresh one when the cache is empty or
    /// expired.
    pub async fn bearer_token(
        &self,
        http_client: &Arc<dyn HttpClient>,
    ) -> Result<String, SourceError> {
        if let Some(cached) = self.cached() {
            return Ok(cached);
        }

        let request = HttpRequest::post(TOKEN_URL)
            .with_auth(HttpAuth::Basic {
                username: self.credentials.client_id.clone(),
                password: self.credentials.client_secret.clone(),
            })
            .with_header("user-agent", self.credentials.user_agent.as_str())
            .with_header("content-type", "application/x-www-form-urlencoded")
            .with_body("grant_type=client_credentials")
            .with_timeout_ms(10_000);

        let response = http_client.execute(request).await.map_err(|error| {
            SourceError::unavailable(format!("reddit token transport error: {}", error.message()))
        })?;

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "reddit token endpoint returned status {}",
                response.status
            )));
        }

        let token: RedditTokenResponse = serde_json::from_str(&response.body).map_err(|error| {
            SourceError::malformed_response(format!(
                "failed to parse reddit token response: {error}"
            ))
        })?;

        if token.access_token.is_empty() {
            return Err(SourceError::malformed_response(
                "reddit token response missing access_token",
            ));
        }

        let ttl = Duration::from_secs(
            token
                .expires_in
                .saturating_sub(TOKEN_EXPIRY_SLACK_SECS)
                .max(1),
        );
        let value = token.access_token;
        *self.token.lock().unwrap() = Some(CachedToken {
            value: value.clone(),
            fetched_at: Instant::now(),
            ttl,
        });
        Ok(value)
    }

    /// Invalidate the cached token (the next call refetches).
    pub fn invalidate(&self) {
        *self.token.lock().unwrap() = None;
    }

    fn cached(&self) -> Option<String> {
        let guard = self.token.lock().unwrap();
        guard
            .as_ref()
            .filter(|token| token.is_valid())
            .map(|token| token.value.clone())
    }
}

#[derive(Debug, Deserialize)]
struct RedditTokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3_600
}

// ============================================================================
// Reddit Adapter
// ============================================================================

/// Submission source backed by the Reddit API, with a deterministic offline
/// listing when the transport is a mock.
pub struct RedditAdapter {
    http_client: Arc<dyn HttpClient>,
    auth_manager: Arc<RedditAuthManager>,
    use_real_api: bool,
}

impl Default for RedditAdapter {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            auth_manager: Arc::new(RedditAuthManager::new(RedditCredentials {
                client_id: String::from("buzztick-client"),
                client_secret: String::from("buzztick-secret"),
                user_agent: String::from("buzztick/0.1.0 (offline)"),
            })),
            use_real_api: false,
        }
    }
}

impl RedditAdapter {
    pub fn with_http_client(
        http_client: Arc<dyn HttpClient>,
        credentials: RedditCredentials,
    ) -> Self {
        let use_real_api = !http_client.is_mock();
        Self {
            http_client,
            auth_manager: Arc::new(RedditAuthManager::new(credentials)),
            use_real_api,
        }
    }

    async fn fetch_real_hot(
        &self,
        req: &HotSubmissionsRequest,
    ) -> Result<SubmissionBatch, SourceError> {
        let token = self.auth_manager.bearer_token(&self.http_client).await?;
        let endpoint = format!("{LISTING_BASE}/{FORUMS}/hot?limit={}&raw_json=1", req.limit);

        let request = HttpRequest::get(endpoint)
            .with_auth(HttpAuth::BearerToken(token))
            .with_header("user-agent", self.auth_manager.user_agent())
            .with_timeout_ms(10_000);

        let response = self.http_client.execute(request).await.map_err(|error| {
            SourceError::unavailable(format!("reddit transport error: {}", error.message()))
        })?;

        if response.status == 401 {
            self.auth_manager.invalidate();
            return Err(SourceError::unavailable("reddit rejected the access token"));
        }
        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "reddit listing returned status {}",
                response.status
            )));
        }

        let listing: RedditListing = serde_json::from_str(&response.body).map_err(|error| {
            SourceError::malformed_response(format!("failed to parse reddit listing: {error}"))
        })?;

        let submissions = listing
            .data
            .children
            .into_iter()
            .map(|child| Submission::new(child.data.title, child.data.selftext))
            .take(req.limit)
            .collect();

        Ok(SubmissionBatch { submissions })
    }

    async fn fetch_fake_hot(
        &self,
        req: &HotSubmissionsRequest,
    ) -> Result<SubmissionBatch, SourceError> {
        let submissions: Vec<Submission> = fixture_submissions()
            .into_iter()
            .take(req.limit)
            .collect();
        debug!("serving {} fixture submissions", submissions.len());
        Ok(SubmissionBatch { submissions })
    }
}

impl SubmissionSource for RedditAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Reddit
    }

    fn hot<'a>(
        &'a self,
        req: HotSubmissionsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<SubmissionBatch, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            if self.use_real_api {
                self.fetch_real_hot(&req).await
            } else {
                self.fetch_fake_hot(&req).await
            }
        })
    }
}

// Reddit listing envelope
#[derive(Debug, Deserialize)]
struct RedditListing {
    data: RedditListingData,
}

#[derive(Debug, Deserialize)]
struct RedditListingData {
    #[serde(default)]
    children: Vec<RedditChild>,
}

#[derive(Debug, Deserialize)]
struct RedditChild {
    data: RedditPost,
}

#[derive(Debug, Deserialize)]
struct RedditPost {
    title: String,
    #[serde(default)]
    selftext: String,
}

/// Deterministic hot listing used by the offline mode and tests.
fn fixture_submissions() -> Vec<Submission> {
    [
        ("Buying $GME calls, YOLO", "\nGME to the moon"),
        ("GME earnings tomorrow", "\nadding more on the dip"),
        ("I hate GME, selling everything", ""),
        ("TSLA deliveries beat estimates", "\nmassive rally incoming for TSLA"),
        ("Is AAPL still a buy?", "\nAAPL services revenue keeps growing"),
        (
            "Macro week: the FED and CPI own this market",
            "\nnothing to trade until the print",
        ),
        ("AMC squeeze round two?", "\nshorts never closed"),
        ("Trimming NVDA", "\nthe runup feels done, selling half"),
    ]
    .into_iter()
    .map(|(title, body)| Submission::new(title, body))
    .collect()
}
