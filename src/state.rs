use std::path::PathBuf;
use std::time::Duration;

use crate::config::Args;
use crate::rate_limit::RateLimiter;
use crate::upstream::UpstreamConfig;

// app's shared state
pub struct AppState {
    pub client: reqwest::Client,
    pub limiter: RateLimiter,
    pub upstream: UpstreamConfig,
    pub data_path: PathBuf,
}

impl AppState {
    pub fn from_args(args: &Args) -> Self {
        Self {
            // the timeout bounds the otherwise-unbounded upstream wait
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(args.upstream_timeout))
                .build()
                .expect("http client should build"),
            limiter: RateLimiter::new(args.rate_limit, Duration::from_secs(args.rate_window)),
            upstream: UpstreamConfig {
                url: args.upstream_url.clone(),
                api_key: args.api_key.clone(),
                model: args.model.clone(),
                max_tokens: args.max_tokens,
                temperature: args.temperature,
            },
            data_path: args.data_path.clone(),
        }
    }
}
