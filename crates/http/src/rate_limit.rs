//! Fixed-window request limiting keyed by caller address.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

const LIMIT_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const REMAINING_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Expired windows are swept once the table grows past this many callers.
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    hits: u32,
}

/// Outcome of counting one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

/// Allows `max_requests` per caller in each window of `window` length.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    callers: Mutex<HashMap<String, Window>>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            callers: Mutex::new(HashMap::new()),
        }
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Count a request from `caller` at `now`.
    pub fn check(&self, caller: &str, now: Instant) -> Decision {
        let mut callers = self.callers.lock().unwrap_or_else(PoisonError::into_inner);

        if callers.len() >= SWEEP_THRESHOLD {
            let window = self.window;
            callers.retain(|_, w| now.duration_since(w.started) < window);
        }

        let entry = callers.entry(caller.to_string()).or_insert(Window {
            started: now,
            hits: 0,
        });
        if now.duration_since(entry.started) >= self.window {
            *entry = Window {
                started: now,
                hits: 0,
            };
        }

        if entry.hits >= self.max_requests {
            let elapsed = now.duration_since(entry.started);
            return Decision::Limited {
                retry_after: self.window.saturating_sub(elapsed),
            };
        }

        entry.hits += 1;
        Decision::Allowed {
            remaining: self.max_requests - entry.hits,
        }
    }
}

/// Middleware enforcing the limiter. Callers are keyed by peer IP; requests
/// without connection info share one bucket.
pub async fn limit_requests(
    State(limiter): State<Arc<FixedWindowLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let caller = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    match limiter.check(&caller, Instant::now()) {
        Decision::Allowed { remaining } => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            headers.insert(LIMIT_HEADER, HeaderValue::from(limiter.max_requests()));
            headers.insert(REMAINING_HEADER, HeaderValue::from(remaining));
            response
        }
        Decision::Limited { retry_after } => {
            tracing::warn!(%caller, "rate limit exceeded");
            let retry_after_secs = retry_after.as_secs_f64().ceil() as u64;
            AppError::too_many_requests(retry_after_secs.max(1)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_the_cap_then_limits() {
        let limiter = FixedWindowLimiter::new(3, Duration::from_secs(60));
        let now = Instant::now();

        assert_eq!(limiter.check("a", now), Decision::Allowed { remaining: 2 });
        assert_eq!(limiter.check("a", now), Decision::Allowed { remaining: 1 });
        assert_eq!(limiter.check("a", now), Decision::Allowed { remaining: 0 });
        assert!(matches!(
            limiter.check("a", now + Duration::from_secs(10)),
            Decision::Limited { retry_after } if retry_after == Duration::from_secs(50)
        ));
    }

    #[test]
    fn callers_are_counted_separately() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();

        assert!(matches!(limiter.check("a", now), Decision::Allowed { .. }));
        assert!(matches!(limiter.check("b", now), Decision::Allowed { .. }));
        assert!(matches!(limiter.check("a", now), Decision::Limited { .. }));
    }

    #[test]
    fn window_resets_after_expiry() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();

        assert!(matches!(limiter.check("a", now), Decision::Allowed { .. }));
        assert!(matches!(limiter.check("a", now), Decision::Limited { .. }));
        assert_eq!(
            limiter.check("a", now + Duration::from_secs(60)),
            Decision::Allowed { remaining: 0 }
        );
    }
}
