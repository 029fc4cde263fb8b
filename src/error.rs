use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

// Everything a caller can see. Raw upstream detail is logged where it
// happens and never crosses this boundary.
#[derive(Debug, Error)]
pub enum ChatError {
    // local admission rejection, distinct in wording from UpstreamBusy
    #[error("Too many requests. Please wait a few minutes before asking again.")]
    RateLimited,

    #[error("Chat service is not configured. Please contact the site owner.")]
    NotConfigured,

    #[error("{0}")]
    InvalidInput(String),

    // the completion API reported its own rate limit
    #[error("The AI service is busy right now. Please try again in a moment.")]
    UpstreamBusy,

    // any other upstream failure, network error, or undecodable body
    #[error("The AI assistant is temporarily unavailable. Please try again shortly.")]
    Unavailable,
}

impl ChatError {
    pub fn status(&self) -> StatusCode {
        match self {
            ChatError::RateLimited | ChatError::UpstreamBusy => StatusCode::TOO_MANY_REQUESTS,
            ChatError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ChatError::NotConfigured | ChatError::Unavailable => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_the_taxonomy() {
        assert_eq!(ChatError::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(ChatError::UpstreamBusy.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            ChatError::InvalidInput("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ChatError::NotConfigured.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ChatError::Unavailable.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn upstream_busy_reads_differently_from_local_rejection() {
        assert_ne!(
            ChatError::RateLimited.to_string(),
            ChatError::UpstreamBusy.to_string()
        );
    }
}
