use reqwest::StatusCode;
use tracing::error;

use crate::error::ChatError;
use crate::metrics::UPSTREAM_FAILURES_TOTAL;
use crate::models::{CompletionMessage, CompletionRequest, CompletionResponse};

// Returned when the upstream answers 200 with nothing usable in it;
// a success as far as the caller is concerned, not an error
pub const EMPTY_COMPLETION_TEXT: &str =
    "Sorry, I couldn't generate a response. Please try again.";

#[derive(Clone)]
pub struct UpstreamConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

// Single pass-through call to the completion API. No retry: on failure the
// caller gets a sanitized signal and may simply ask again.
pub async fn complete(
    client: &reqwest::Client,
    cfg: &UpstreamConfig,
    api_key: &str,
    messages: Vec<CompletionMessage>,
) -> Result<String, ChatError> {
    let body = CompletionRequest {
        model: cfg.model.clone(),
        messages,
        max_tokens: cfg.max_tokens,
        temperature: cfg.temperature,
    };

    let response = client
        .post(&cfg.url)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await
        .map_err(|err| {
            UPSTREAM_FAILURES_TOTAL.inc();
            error!("completion request failed: {err}");
            ChatError::Unavailable
        })?;

    let status = response.status();
    if !status.is_success() {
        UPSTREAM_FAILURES_TOTAL.inc();
        // detail is for operators only, never relayed to the caller
        let detail = response.text().await.unwrap_or_default();
        error!(%status, "completion API error: {detail}");
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ChatError::UpstreamBusy);
        }
        return Err(ChatError::Unavailable);
    }

    let parsed: CompletionResponse = response.json().await.map_err(|err| {
        UPSTREAM_FAILURES_TOTAL.inc();
        error!("could not decode completion response: {err}");
        ChatError::Unavailable
    })?;

    Ok(parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_else(|| EMPTY_COMPLETION_TEXT.to_string()))
}
