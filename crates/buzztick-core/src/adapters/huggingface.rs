use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use crate::data_source::{ClassifyOptions, SentimentModel, SourceError};
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, NoopHttpClient};
use crate::{Classification, ProviderId, SentimentLabel};

/// Model identifier of the hosted classification endpoint.
const DEFAULT_MODEL_ID: &str = "mwkby/distilbert-base-uncased-sentiment-reddit-crypto";

const INFERENCE_BASE: &str = "https://api-inference.huggingface.co/models";

/// Generous timeout: the hosted model may cold-start on the first call.
const CLASSIFY_TIMEOUT_MS: u64 = 30_000;

// ============================================================================
// Hugging Face Adapter
// ============================================================================

/// Sentiment model backed by the hosted inference endpoint, with a
/// deterministic keyword heuristic when the transport is a mock.
pub struct HuggingFaceAdapter {
    http_client: Arc<dyn HttpClient>,
    api_token: Option<String>,
    model_id: String,
    use_real_api: bool,
}

impl Default for HuggingFaceAdapter {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            api_token: None,
            model_id: DEFAULT_MODEL_ID.to_owned(),
            use_real_api: false,
        }
    }
}

impl HuggingFaceAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>, api_token: Option<String>) -> Self {
        let use_real_api = !http_client.is_mock();
        Self {
            http_client,
            api_token,
            model_id: DEFAULT_MODEL_ID.to_owned(),
            use_real_api,
        }
    }

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    async fn classify_real(
        &self,
        chunk: &str,
        options: ClassifyOptions,
    ) -> Result<Classification, SourceError> {
        let body = json!({
            "inputs": chunk,
            "parameters": {
                "truncation": options.truncation,
                "max_length": options.max_length,
            },
            "options": { "wait_for_model": true },
        });

        let mut request = HttpRequest::post(format!("{INFERENCE_BASE}/{}", self.model_id))
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .with_timeout_ms(CLASSIFY_TIMEOUT_MS);
        if let Some(token) = &self.api_token {
            request = request.with_auth(HttpAuth::BearerToken(token.clone()));
        }

        let response = self.http_client.execute(request).await.map_err(|error| {
            SourceError::unavailable(format!("inference transport error: {}", error.message()))
        })?;

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "inference endpoint returned status {}",
                response.status
            )));
        }

        let parsed: HfResponse = serde_json::from_str(&response.body).map_err(|error| {
            SourceError::malformed_response(format!(
                "failed to parse inference response: {error}"
            ))
        })?;

        let scores = match parsed {
            HfResponse::Nested(nested) => nested.into_iter().flatten().collect::<Vec<_>>(),
            HfResponse::Flat(flat) => flat,
        };

        let best = scores
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or_else(|| SourceError::malformed_response("inference response carried no scores"))?;

        let label = SentimentLabel::parse(&best.label)
            .map_err(|error| SourceError::malformed_response(error.to_string()))?;

        Ok(Classification {
            label,
            score: best.score,
        })
    }
}

impl SentimentModel for HuggingFaceAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::HuggingFace
    }

    fn classify<'a>(
        &'a self,
        chunk: &'a str,
        options: ClassifyOptions,
    ) -> Pin<Box<dyn Future<Output = Result<Classification, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            if self.use_real_api {
                self.classify_real(chunk, options).await
            } else {
                Ok(keyword_classification(chunk))
            }
        })
    }
}

// Inference API response structures; single inputs come back nested as
// [[{label, score}, ...]], some deployments answer flat.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HfResponse {
    Nested(Vec<Vec<HfScore>>),
    Flat(Vec<HfScore>),
}

#[derive(Debug, Deserialize)]
struct HfScore {
    label: String,
    score: f64,
}

/// Deterministic stand-in for the hosted model, keyed on common forum slang.
fn keyword_classification(chunk: &str) -> Classification {
    const BULLISH: [&str; 8] = [
        "moon", "calls", "buy", "bull", "yolo", "rocket", "rally", "beat",
    ];
    const BEARISH: [&str; 8] = [
        "sell", "puts", "bear", "crash", "drill", "hate", "short", "dump",
    ];

    let lowered = chunk.to_ascii_lowercase();
    let bullish = BULLISH.iter().filter(|k| lowered.contains(*k)).count();
    let bearish = BEARISH.iter().filter(|k| lowered.contains(*k)).count();

    if bullish > bearish {
        Classification {
            label: SentimentLabel::Positive,
            score: 0.9,
        }
    } else if bearish > bullish {
        Classification {
            label: SentimentLabel::Negative,
            score: 0.9,
        }
    } else {
        Classification {
            label: SentimentLabel::Neutral,
            score: 0.5,
        }
    }
}
