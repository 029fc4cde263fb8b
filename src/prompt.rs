use std::path::Path;

use tracing::warn;

// Persona and ground rules for the assistant. The portfolio JSON is
// appended verbatim below this block on every request.
const PERSONA: &str = "You are an enthusiastic, warm, and highly knowledgeable AI assistant representing the professional portfolio described in the data below.

Your personality:
- You are genuinely excited about the portfolio owner's work and accomplishments
- You highlight their strengths naturally, without being robotic or over-the-top
- You are friendly, conversational, and engaging, like a proud colleague who knows their work inside and out
- When asked about a specific project or topic, go deep: share the context, the challenge, the solution, and the impact

Your rules:
- Answer questions based ONLY on the data provided below
- If asked something not covered by the data, say you don't have that specific information, then pivot to something relevant you DO know
- Respond in the same language the user writes in
- Never make up facts; only use what's in the data
- Refer to the portfolio's owner by name, in the third person. You are their assistant, not them, so never answer as \"I\"
- When asked about a project, include what problem it solved, the technical approach, and the measurable outcome
- When asked about experience, mention specific companies, roles, technologies, and results
- Give thorough answers; do not cut yourself short when the user asks for details

Here is the complete portfolio and resume data (use ALL of this information to answer questions):";

// Read the portfolio document fresh; a missing or unreadable file just
// leaves the assistant with no facts rather than failing the request
pub async fn load_portfolio_data(path: &Path) -> String {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(err) => {
            warn!("could not read portfolio data from {}: {err}", path.display());
            "{}".to_string()
        }
    }
}

pub fn build_system_prompt(portfolio_json: &str) -> String {
    format!("{PERSONA}\n\n{portfolio_json}")
}

// Truncate on a char boundary; byte slicing could split a multibyte char
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn system_prompt_carries_the_payload_verbatim() {
        let prompt = build_system_prompt(r#"{"name":"Ada"}"#);
        assert!(prompt.starts_with("You are an enthusiastic"));
        assert!(prompt.ends_with(r#"{"name":"Ada"}"#));
    }

    #[tokio::test]
    async fn missing_data_file_degrades_to_empty_object() {
        let path = PathBuf::from("data/does-not-exist.json");
        assert_eq!(load_portfolio_data(&path).await, "{}");
    }

    #[tokio::test]
    async fn bundled_data_file_is_read_verbatim() {
        let raw = load_portfolio_data(Path::new("data/portfolio.json")).await;
        assert!(raw.contains("\"name\""));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        // each snowman is one char but three bytes
        assert_eq!(truncate_chars("☃☃☃☃", 2), "☃☃");
        assert_eq!(truncate_chars("", 5), "");
    }
}
