use std::sync::Arc;
use std::time::Instant;

use axum::extract::{FromRequest, Request, State};
use axum::Json;
use tracing::{debug, error};

use crate::error::ChatError;
use crate::metrics::{RATE_LIMITED_TOTAL, REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::{
    ChatMessage, ChatRequest, ChatResponse, CompletionMessage, MAX_CONTENT_CHARS, MAX_MESSAGES,
};
use crate::prompt::{build_system_prompt, load_portfolio_data, truncate_chars};
use crate::rate_limit::ClientKey;
use crate::state::AppState;
use crate::upstream;

// Reject bad input before any other work happens. Validation failures are
// ordinary client behavior, not anomalies, so they are never logged.
fn validate(messages: &[ChatMessage]) -> Result<(), ChatError> {
    if messages.is_empty() {
        return Err(ChatError::InvalidInput(
            "messages must not be empty".to_string(),
        ));
    }
    if messages.len() > MAX_MESSAGES {
        return Err(ChatError::InvalidInput(format!(
            "at most {MAX_MESSAGES} messages are allowed"
        )));
    }
    for message in messages {
        if message.role != "user" && message.role != "assistant" {
            return Err(ChatError::InvalidInput(
                "role must be \"user\" or \"assistant\"".to_string(),
            ));
        }
        if message.content.chars().count() > MAX_CONTENT_CHARS {
            return Err(ChatError::InvalidInput(format!(
                "message content must be at most {MAX_CONTENT_CHARS} characters"
            )));
        }
    }
    Ok(())
}

// Request body extractor that keeps the error surface uniform: a body that
// doesn't parse into ChatRequest gets the same 400 { "error": ... } shape
// as the other validation failures, not axum's plain-text rejection
pub struct ChatBody(pub ChatRequest);

impl<S> FromRequest<S> for ChatBody
where
    S: Send + Sync,
{
    type Rejection = ChatError;

    async fn from_request(req: Request, state: &S) -> Result<Self, ChatError> {
        let Json(payload) = Json::<ChatRequest>::from_request(req, state)
            .await
            .map_err(|_| ChatError::InvalidInput("Invalid messages format.".to_string()))?;
        Ok(Self(payload))
    }
}

// Governor -> credential -> validation -> assemble -> proxy
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    client_key: ClientKey,
    ChatBody(payload): ChatBody,
) -> Result<Json<ChatResponse>, ChatError> {
    REQUEST_TOTAL.inc();

    if !state.limiter.check(&client_key.0) {
        RATE_LIMITED_TOTAL.inc();
        debug!(client = %client_key.0, "request rejected by rate limiter");
        return Err(ChatError::RateLimited);
    }

    let Some(api_key) = state.upstream.api_key.clone() else {
        error!("completion API key is not configured; rejecting chat request");
        return Err(ChatError::NotConfigured);
    };

    validate(&payload.messages)?;

    let start = Instant::now();

    let portfolio = load_portfolio_data(&state.data_path).await;
    let system_prompt = build_system_prompt(&portfolio);

    // limits were validated above; clamp again anyway so nothing oversized
    // can ever reach the upstream
    let keep_from = payload.messages.len().saturating_sub(MAX_MESSAGES);
    let mut messages = Vec::with_capacity(payload.messages.len() - keep_from + 1);
    messages.push(CompletionMessage {
        role: "system".to_string(),
        content: system_prompt,
    });
    for message in payload.messages.into_iter().skip(keep_from) {
        messages.push(CompletionMessage {
            role: message.role,
            content: truncate_chars(&message.content, MAX_CONTENT_CHARS).to_string(),
        });
    }

    let result = upstream::complete(&state.client, &state.upstream, &api_key, messages).await;

    // observe before unwrapping so failed calls land in the histogram too
    REQUEST_LATENCY.observe(start.elapsed().as_secs_f64());

    Ok(Json(ChatResponse { content: result? }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(role: &str, content: &str) -> ChatMessage {
        ChatMessage {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn accepts_a_well_formed_conversation() {
        let messages = vec![
            message("user", "Hi"),
            message("assistant", "Hello!"),
            message("user", "Tell me about the projects"),
        ];
        assert!(validate(&messages).is_ok());
    }

    #[test]
    fn rejects_empty_conversations() {
        assert!(matches!(
            validate(&[]),
            Err(ChatError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_more_than_thirty_messages() {
        let messages: Vec<_> = (0..31)
            .map(|i| message(if i % 2 == 0 { "user" } else { "assistant" }, "hi"))
            .collect();
        assert!(matches!(
            validate(&messages),
            Err(ChatError::InvalidInput(_))
        ));

        let messages = &messages[..30];
        assert!(validate(messages).is_ok());
    }

    #[test]
    fn rejects_oversize_content() {
        let messages = vec![message("user", &"a".repeat(2001))];
        assert!(matches!(
            validate(&messages),
            Err(ChatError::InvalidInput(_))
        ));

        let messages = vec![message("user", &"a".repeat(2000))];
        assert!(validate(&messages).is_ok());
    }

    #[test]
    fn rejects_unknown_roles() {
        for role in ["system", "tool", "invalid_role", ""] {
            let messages = vec![message(role, "hi")];
            assert!(matches!(
                validate(&messages),
                Err(ChatError::InvalidInput(_))
            ));
        }
    }
}
