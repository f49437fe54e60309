//! Fixed-window rate limiting.
//!
//! Each [`RateLimiter`] enforces one budget, e.g. `100 per minute`, per
//! client. A client's window opens with its first request and its counter
//! resets once the window has elapsed. Requests over budget are rejected with
//! `429 Too Many Requests` before they reach any handler.
//!
//! Limiters are stacked as route layers: the global budget wraps every
//! limited route and endpoint budgets wrap individual routes.
//!
//! # Budget Syntax
//!
//! ```text
//! 100 per minute
//! 5 per 10 seconds
//! 20/hour
//! ```
//!
//! # Example
//!
//! ```
//! use qr_barcode_service::server::rate_limit::{RateLimit, RateLimiter};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let limiter = RateLimiter::new("2 per minute".parse::<RateLimit>().unwrap());
//!
//! assert!(limiter.check("10.0.0.1").await.is_ok());
//! assert!(limiter.check("10.0.0.1").await.is_ok());
//! assert!(limiter.check("10.0.0.1").await.is_err());
//!
//! // Budgets are tracked per client
//! assert!(limiter.check("10.0.0.2").await.is_ok());
//! # }
//! ```

use std::fmt;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use lru::LruCache;
use tokio::sync::Mutex;
use tracing::warn;

use super::handlers::ErrorResponse;

/// Default number of clients tracked per limiter.
pub const DEFAULT_MAX_CLIENTS: usize = 10_000;

/// Key used when the peer address is unknown.
const UNKNOWN_CLIENT: &str = "unknown";

// =============================================================================
// Rate Limit Budget
// =============================================================================

/// A request budget: at most `requests` per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    requests: u32,
    window: Duration,
}

impl RateLimit {
    /// Create a budget of `requests` per `window`.
    pub fn new(requests: u32, window: Duration) -> Self {
        Self { requests, window }
    }

    /// Budget of `requests` per second.
    pub fn per_second(requests: u32) -> Self {
        Self::new(requests, Duration::from_secs(1))
    }

    /// Budget of `requests` per minute.
    pub fn per_minute(requests: u32) -> Self {
        Self::new(requests, Duration::from_secs(60))
    }

    /// Maximum number of requests per window.
    pub fn requests(&self) -> u32 {
        self.requests
    }

    /// Length of one window.
    pub fn window(&self) -> Duration {
        self.window
    }
}

const UNITS: [(&str, u64); 4] = [
    ("day", 86_400_000),
    ("hour", 3_600_000),
    ("minute", 60_000),
    ("second", 1_000),
];

fn unit_millis(unit: &str) -> Option<u64> {
    let unit = unit.strip_suffix('s').unwrap_or(unit);
    match unit {
        "millisecond" => Some(1),
        _ => UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, millis)| *millis),
    }
}

impl FromStr for RateLimit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            format!(
                "invalid rate limit '{}': expected e.g. '100 per minute' or '5 per 10 seconds'",
                s
            )
        };

        let normalized = s.trim().to_lowercase().replace('/', " per ");
        let (count, period) = normalized.split_once(" per ").ok_or_else(invalid)?;

        let requests: u32 = count.trim().parse().map_err(|_| invalid())?;
        if requests == 0 {
            return Err(format!("invalid rate limit '{}': budget must be at least 1", s));
        }

        let mut parts = period.split_whitespace();
        let (multiplier, unit) = match (parts.next(), parts.next(), parts.next()) {
            (Some(unit), None, None) => (1, unit),
            (Some(n), Some(unit), None) => (n.parse::<u64>().map_err(|_| invalid())?, unit),
            _ => return Err(invalid()),
        };
        let millis = unit_millis(unit)
            .ok_or_else(invalid)?
            .checked_mul(multiplier)
            .ok_or_else(invalid)?;
        if millis == 0 {
            return Err(invalid());
        }

        Ok(RateLimit::new(requests, Duration::from_millis(millis)))
    }
}

impl fmt::Display for RateLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.window.as_millis() as u64;
        let (unit, count) = UNITS
            .iter()
            .find(|(_, unit_ms)| millis % unit_ms == 0)
            .map(|(unit, unit_ms)| (*unit, millis / unit_ms))
            .unwrap_or(("millisecond", millis));

        if count == 1 {
            write!(f, "{} per {}", self.requests, unit)
        } else {
            write!(f, "{} per {} {}s", self.requests, count, unit)
        }
    }
}

// =============================================================================
// Rate Limiter
// =============================================================================

/// Rejection produced when a client exceeds its budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitExceeded {
    /// The budget that was exceeded
    pub limit: RateLimit,

    /// Time until the client's window resets
    pub retry_after: Duration,
}

impl fmt::Display for RateLimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rate limit exceeded ({}). Please try again later.",
            self.limit
        )
    }
}

impl IntoResponse for RateLimitExceeded {
    fn into_response(self) -> Response {
        let status = StatusCode::TOO_MANY_REQUESTS;
        let message = self.to_string();
        // Round up so clients never retry inside the current window
        let retry_secs =
            self.retry_after.as_secs() + u64::from(self.retry_after.subsec_nanos() > 0);

        let error_response = ErrorResponse::with_status("rate_limit_exceeded", message, status);
        let mut response = (status, Json(error_response)).into_response();
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(retry_secs));
        response
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Per-client fixed-window counter for a single budget.
///
/// Client windows live in a bounded LRU table; the least recently seen
/// client is dropped when the table is full.
pub struct RateLimiter {
    limit: RateLimit,
    windows: Mutex<LruCache<String, Window>>,
}

impl RateLimiter {
    /// Create a limiter tracking up to [`DEFAULT_MAX_CLIENTS`] clients.
    pub fn new(limit: RateLimit) -> Self {
        Self::with_capacity(limit, DEFAULT_MAX_CLIENTS)
    }

    /// Create a limiter tracking up to `max_clients` clients.
    pub fn with_capacity(limit: RateLimit, max_clients: usize) -> Self {
        let capacity = NonZeroUsize::new(max_clients).unwrap_or(NonZeroUsize::MIN);
        Self {
            limit,
            windows: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// The budget this limiter enforces.
    pub fn limit(&self) -> RateLimit {
        self.limit
    }

    /// Count one request from `client` against the budget.
    pub async fn check(&self, client: &str) -> Result<(), RateLimitExceeded> {
        self.check_at(client, Instant::now()).await
    }

    async fn check_at(&self, client: &str, now: Instant) -> Result<(), RateLimitExceeded> {
        let mut windows = self.windows.lock().await;

        let fresh = Window {
            started: now,
            count: 0,
        };
        let window = windows.get_or_insert_mut(client.to_string(), || fresh);
        if now.duration_since(window.started) >= self.limit.window {
            *window = fresh;
        }

        if window.count >= self.limit.requests {
            let elapsed = now.duration_since(window.started);
            return Err(RateLimitExceeded {
                limit: self.limit,
                retry_after: self.limit.window.saturating_sub(elapsed),
            });
        }

        window.count += 1;
        Ok(())
    }

    /// Number of clients currently tracked.
    pub async fn tracked_clients(&self) -> usize {
        self.windows.lock().await.len()
    }
}

// =============================================================================
// Middleware
// =============================================================================

/// Identify the client for rate limiting by its peer IP address.
pub fn client_key(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Axum middleware rejecting requests over the limiter's budget.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_key(&request);

    if let Err(rejection) = limiter.check(&client).await {
        warn!(
            client = %client,
            path = %request.uri().path(),
            limit = %rejection.limit,
            "Rate limit exceeded for {}",
            client
        );
        return rejection.into_response();
    }

    next.run(request).await
}

// =============================================================================
// Tests
// =============================================================================
