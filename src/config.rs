use std::path::PathBuf;

use clap::Parser;

// CLI argument structure; every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "portfolio-gateway")]
#[command(about = "Chat backend for a personal portfolio site")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    // Origin allowed for cross-origin requests ("*" allows any)
    // Example: "https://example.github.io"
    #[arg(long, env = "ALLOWED_ORIGIN", default_value = "*")]
    pub allowed_origin: String,

    // Path of the portfolio JSON injected into the system prompt
    #[arg(long, env = "PORTFOLIO_DATA_PATH", default_value = "data/portfolio.json")]
    pub data_path: PathBuf,

    // Completion API credential; when unset every chat request is
    // rejected with a "not configured" error instead of failing startup
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    // Chat completions endpoint
    #[arg(
        long,
        env = "OPENAI_API_URL",
        default_value = "https://api.openai.com/v1/chat/completions"
    )]
    pub upstream_url: String,

    // Model identifier sent upstream
    #[arg(long, default_value = "gpt-4o-mini")]
    pub model: String,

    // Output token budget per completion
    #[arg(long, default_value_t = 1200)]
    pub max_tokens: u32,

    // Sampling temperature
    #[arg(long, default_value_t = 0.75)]
    pub temperature: f32,

    // Rate limit max requests per window
    #[arg(long, default_value_t = 15)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 600)]
    pub rate_window: u64,

    // How often expired rate limit entries are swept out, in seconds
    #[arg(long, default_value_t = 1800)]
    pub sweep_interval: u64,

    // Upstream request timeout in seconds; the completion API has no
    // contractual bound of its own
    #[arg(long, default_value_t = 30)]
    pub upstream_timeout: u64,
}
