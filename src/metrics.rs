use lazy_static::lazy_static;
use prometheus::{Counter, Histogram, register_counter, register_histogram};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("portfolio_chat_requests_total", "Total chat requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter = register_counter!(
        "portfolio_chat_rate_limited_total",
        "Chat requests rejected by the rate limiter"
    )
    .unwrap();
    pub static ref UPSTREAM_FAILURES_TOTAL: Counter = register_counter!(
        "portfolio_chat_upstream_failures_total",
        "Failed completion API calls"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "portfolio_chat_request_latency_seconds",
        "Chat request latency in seconds"
    )
    .unwrap();
}
