use serde::{Deserialize, Serialize};

// Validation limits for caller-supplied conversations
pub const MAX_MESSAGES: usize = 30;
pub const MAX_CONTENT_CHARS: usize = 2000;

// Inbound chat body
#[derive(Deserialize, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

// One caller-supplied turn. Role stays a plain string so a bad value maps
// to the JSON error shape instead of a body-deserialization rejection.
#[derive(Deserialize, Serialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize, Serialize, Clone)]
pub struct ChatResponse {
    pub content: String,
}

// Completion API request format (OpenAI-compatible)
#[derive(Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<CompletionMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

// A turn as sent upstream; unlike ChatMessage this may carry the
// synthesized "system" role
#[derive(Serialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: String,
}

// Completion API response format
#[derive(Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}
