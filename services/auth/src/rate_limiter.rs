//! Rate limiter for the OTP endpoints
//!
//! A 6-digit code space is only safe together with a cap on guessing
//! speed, so forgot/verify/reset requests are limited per target email.
//! The window state lives in process memory; a restart forgets it, which
//! is acceptable for this threat model.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::warn;

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Maximum number of attempts allowed per window
    pub max_attempts: u32,
    /// Time window
    pub window: Duration,
    /// How long a key stays blocked after exceeding the limit
    pub block_duration: Duration,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        // 5 attempts per 10 minutes, matching the OTP lifetime; a blocked
        // email frees up after 15 minutes
        Self {
            max_attempts: 5,
            window: Duration::from_secs(600),
            block_duration: Duration::from_secs(900),
        }
    }
}

/// Per-key attempt tracking
#[derive(Debug)]
struct AttemptWindow {
    attempts: u32,
    window_started: Instant,
    blocked_until: Option<Instant>,
}

/// In-memory sliding-window rate limiter keyed by email
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    windows: Arc<Mutex<HashMap<String, AttemptWindow>>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Record an attempt for a key and report whether it is allowed
    pub async fn is_allowed(&self, key: &str) -> bool {
        let mut windows = self.windows.lock().await;
        let now = Instant::now();

        // Drop entries that are fully stale so the map does not grow with
        // every email ever seen
        windows.retain(|_, w| {
            w.blocked_until.map(|t| now < t).unwrap_or(false)
                || now.duration_since(w.window_started) < self.config.window
        });

        let window = windows.entry(key.to_string()).or_insert(AttemptWindow {
            attempts: 0,
            window_started: now,
            blocked_until: None,
        });

        if let Some(blocked_until) = window.blocked_until {
            if now < blocked_until {
                return false;
            }
            window.attempts = 0;
            window.window_started = now;
            window.blocked_until = None;
        }

        if now.duration_since(window.window_started) >= self.config.window {
            window.attempts = 0;
            window.window_started = now;
        }

        if window.attempts >= self.config.max_attempts {
            window.blocked_until = Some(now + self.config.block_duration);
            warn!(
                "Rate limit hit for {}, blocked for {:?}",
                key, self.config.block_duration
            );
            return false;
        }

        window.attempts += 1;
        true
    }
}
