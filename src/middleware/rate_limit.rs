//! Rate limiting middleware
//!
//! A single fixed-window bucket shared by all callers in the process: no
//! per-client keying and no distributed coordination. The counter resets on
//! window rollover. Rejected requests are answered with 429 before the
//! authentication stage runs.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;
use crate::error::AppError;

#[derive(Debug)]
struct Window {
    started_at: Instant,
    count: u64,
}

/// Process-global fixed-window request limiter.
pub struct RateLimiter {
    max_requests: u64,
    window: Duration,
    // Only shared mutable state in the pipeline; never held across an await.
    state: Mutex<Window>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            max_requests: config.max_requests,
            window: Duration::from_secs(config.window_secs),
            state: Mutex::new(Window {
                started_at: Instant::now(),
                count: 0,
            }),
        }
    }

    /// Admit or reject one request. Returns `true` when admitted.
    pub fn check(&self) -> bool {
        self.check_at(Instant::now())
    }

    fn check_at(&self, now: Instant) -> bool {
        let mut window = self.state.lock().unwrap();

        if now.duration_since(window.started_at) >= self.window {
            window.started_at = now;
            window.count = 0;
        }

        if window.count >= self.max_requests {
            return false;
        }
        window.count += 1;
        true
    }
}

/// Rate limiting middleware function. Runs before authentication; rejected
/// requests never reach it.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !limiter.check() {
        tracing::warn!(path = %request.uri().path(), "request rejected by rate limiter");
        return AppError::TooManyRequests.into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::{middleware, routing::get, Router};
    use tower::ServiceExt;

    fn limiter(max_requests: u64, window_secs: u64) -> RateLimiter {
        RateLimiter::new(&RateLimitConfig {
            max_requests,
            window_secs,
        })
    }

    #[test]
    fn test_admits_up_to_limit_then_rejects() {
        let limiter = limiter(10, 60);
        for _ in 0..10 {
            assert!(limiter.check());
        }
        // The (N+1)-th request within the window is rejected
        assert!(!limiter.check());
        assert!(!limiter.check());
    }

    #[test]
    fn test_monotonic_for_any_n_up_to_threshold() {
        for n in 1..=20u64 {
            let limiter = limiter(n, 60);
            for i in 0..n {
                assert!(limiter.check(), "request {} of {} should be admitted", i + 1, n);
            }
            assert!(!limiter.check());
        }
    }

    #[test]
    fn test_window_rollover_resets_counter() {
        let limiter = limiter(2, 60);
        let start = Instant::now();

        assert!(limiter.check_at(start));
        assert!(limiter.check_at(start));
        assert!(!limiter.check_at(start + Duration::from_secs(59)));

        // Past the window boundary the quota is fresh
        assert!(limiter.check_at(start + Duration::from_secs(60)));
        assert!(limiter.check_at(start + Duration::from_secs(61)));
        assert!(!limiter.check_at(start + Duration::from_secs(62)));
    }

    #[tokio::test]
    async fn test_middleware_returns_429_when_exhausted() {
        let limiter = Arc::new(limiter(1, 60));

        let app = Router::new()
            .route("/test", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(
                limiter.clone(),
                rate_limit_middleware,
            ));

        let first = app
            .clone()
            .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
