use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use dashmap::DashMap;
use tokio::time::interval;

// Rate limit entry - one per observed client key
struct RateLimitEntry {
    count: u32,
    reset_at: Instant,
}

// Fixed-window request counter keyed by client. A client can burst up to
// twice the max across a window boundary (max at the tail of one window,
// max again at the head of the next); that imprecision is inherent to
// fixed windows and accepted here.
#[derive(Clone)]
pub struct RateLimiter {
    entries: Arc<DashMap<String, RateLimitEntry>>,
    max: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max: u32, window: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            max,
            window,
        }
    }

    // Admit or reject one request
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    // The DashMap entry guard holds the shard lock across the whole
    // check-and-increment, so two concurrent requests from the same key
    // cannot both take the last slot
    pub fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert(RateLimitEntry {
                count: 0,
                reset_at: now + self.window,
            });

        // window expired? start a fresh one
        if now >= entry.reset_at {
            entry.count = 1;
            entry.reset_at = now + self.window;
            return true;
        }

        if entry.count < self.max {
            entry.count += 1;
            return true;
        }

        false
    }

    // Drop entries whose window has already passed. Expiry is re-checked
    // under the shard lock, so an entry refreshed mid-sweep survives.
    pub fn sweep(&self) {
        self.sweep_at(Instant::now());
    }

    pub fn sweep_at(&self, now: Instant) {
        self.entries.retain(|_, entry| now < entry.reset_at);
    }

    // Periodic sweep, independent of request traffic, so idle clients
    // don't leak entries forever
    pub fn spawn_sweeper(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut ticker = interval(every);
            loop {
                ticker.tick().await;
                limiter.sweep();
            }
        })
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.entries.len()
    }
}

// Client identity for rate limiting: first x-forwarded-for entry, else the
// connection's remote address, else a sentinel. The forwarded header is
// taken on faith; without a trusted-proxy list a directly exposed service
// lets callers spoof it to dodge the limiter. The correct fix depends on
// deployment topology, so it is not hardened here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientKey(pub String);

impl<S> FromRequestParts<S> for ClientKey
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Infallible> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        if let Some(ip) = forwarded {
            return Ok(ClientKey(ip.to_string()));
        }

        let key = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        Ok(ClientKey(key))
    }
}
