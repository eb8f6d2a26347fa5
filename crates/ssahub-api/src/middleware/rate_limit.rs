//! Token bucket rate limiter middleware.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use ssahub_core::config::app::RateLimitConfig;
use ssahub_core::error::AppError;

use crate::state::AppState;

/// In-memory token bucket per client key.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    buckets: Arc<Mutex<Buckets>>,
    enabled: bool,
    trust_forwarded_for: bool,
    /// Maximum tokens per bucket.
    max_tokens: u32,
    /// Token refill rate per second.
    refill_rate: f64,
    /// How often full buckets are swept out.
    sweep_every: Duration,
}

#[derive(Debug)]
struct Buckets {
    /// Client key → bucket state.
    by_key: HashMap<String, TokenBucket>,
    last_sweep: Instant,
}

#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn refilled(&self, now: Instant, rate: f64, max: f64) -> f64 {
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        (self.tokens + elapsed * rate).min(max)
    }
}

impl RateLimiter {
    /// `max_tokens` requests, refilled evenly over `window_seconds`.
    pub fn new(max_tokens: u32, window_seconds: u64) -> Self {
        Self {
            buckets: Arc::new(Mutex::new(Buckets {
                by_key: HashMap::new(),
                last_sweep: Instant::now(),
            })),
            enabled: true,
            trust_forwarded_for: false,
            max_tokens,
            refill_rate: f64::from(max_tokens) / window_seconds.max(1) as f64,
            sweep_every: Duration::from_secs(window_seconds.max(1)),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self {
            enabled: config.enabled,
            trust_forwarded_for: config.trust_forwarded_for,
            ..Self::new(config.max_requests, config.window_seconds)
        }
    }

    /// Attempts to consume a token for the given key.
    pub async fn check(&self, key: &str) -> bool {
        if !self.enabled {
            return true;
        }

        let max = f64::from(self.max_tokens);
        let now = Instant::now();
        let mut buckets = self.buckets.lock().await;

        if now.duration_since(buckets.last_sweep) >= self.sweep_every {
            self.sweep(&mut buckets, now);
        }

        let bucket = buckets.by_key.entry(key.to_string()).or_insert(TokenBucket {
            tokens: max,
            last_refill: now,
        });

        bucket.tokens = bucket.refilled(now, self.refill_rate, max);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// A bucket that has refilled completely is indistinguishable from a new one.
    fn sweep(&self, buckets: &mut Buckets, now: Instant) {
        let max = f64::from(self.max_tokens);
        let before = buckets.by_key.len();
        buckets
            .by_key
            .retain(|_, bucket| bucket.refilled(now, self.refill_rate, max) < max);
        buckets.last_sweep = now;
        debug!(
            evicted = before - buckets.by_key.len(),
            remaining = buckets.by_key.len(),
            "Swept idle rate limit buckets"
        );
    }

    /// Number of clients currently tracked.
    pub async fn tracked_clients(&self) -> usize {
        self.buckets.lock().await.by_key.len()
    }

    /// The key a request is counted against. `X-Forwarded-For` is honoured
    /// only when configured; otherwise the socket peer is used.
    fn client_key(&self, request: &Request) -> String {
        let forwarded = self
            .trust_forwarded_for
            .then(|| {
                request
                    .headers()
                    .get("x-forwarded-for")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.split(',').next())
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
            })
            .flatten();

        forwarded
            .or_else(|| {
                request
                    .extensions()
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            })
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Rejects the request with 429 once the client's bucket is empty.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let key = state.rate_limiter.client_key(&request);
    if !state.rate_limiter.check(&key).await {
        warn!(client = %key, "Rate limit exceeded");
        return AppError::rate_limited("Too many requests, please try again later")
            .into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_from(peer: [u8; 4], forwarded: &str) -> Request {
        let mut request = axum::http::Request::builder()
            .uri("/api/health")
            .header("x-forwarded-for", forwarded)
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from((peer, 40000))));
        request
    }

    #[tokio::test]
    async fn test_bucket_empties_per_client() {
        let limiter = RateLimiter::new(2, 900);
        assert!(limiter.check("10.0.0.1").await);
        assert!(limiter.check("10.0.0.1").await);
        assert!(!limiter.check("10.0.0.1").await);
        assert!(limiter.check("10.0.0.2").await);
    }

    #[tokio::test]
    async fn test_disabled_limiter_always_admits() {
        let limiter = RateLimiter::from_config(&RateLimitConfig {
            enabled: false,
            max_requests: 0,
            window_seconds: 1,
            trust_forwarded_for: false,
        });
        for _ in 0..10 {
            assert!(limiter.check("k").await);
        }
    }

    #[test]
    fn test_forwarded_header_ignored_unless_trusted() {
        let request = request_from([192, 0, 2, 7], "203.0.113.9, 10.0.0.1");

        let direct = RateLimiter::new(5, 60);
        assert_eq!(direct.client_key(&request), "192.0.2.7");

        let proxied = RateLimiter::from_config(&RateLimitConfig {
            trust_forwarded_for: true,
            ..Default::default()
        });
        assert_eq!(proxied.client_key(&request), "203.0.113.9");
    }

    #[tokio::test]
    async fn test_full_buckets_are_swept() {
        let limiter = RateLimiter {
            sweep_every: Duration::ZERO,
            ..RateLimiter::new(1, 900)
        };
        assert!(limiter.check("198.51.100.1").await);
        assert!(limiter.check("198.51.100.2").await);
        assert_eq!(limiter.tracked_clients().await, 2);

        // Drained buckets survive the sweep.
        assert!(!limiter.check("198.51.100.1").await);
        assert_eq!(limiter.tracked_clients().await, 2);

        // As if idle for a whole window.
        for bucket in limiter.buckets.lock().await.by_key.values_mut() {
            bucket.tokens = 1.0;
        }
        assert!(limiter.check("198.51.100.3").await);
        assert_eq!(limiter.tracked_clients().await, 1);
    }
}
