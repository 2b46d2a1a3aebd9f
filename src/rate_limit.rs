// src/rate_limit.rs
use chrono::{DateTime, Duration, Utc};

pub const MAX_REQUESTS_PER_WINDOW: u32 = 3;
pub const WINDOW_MINUTES: i64 = 60;

/// Rolling one-hour window over OTP issuance attempts.
///
/// The window re-anchors to the first request after the previous window has
/// fully elapsed; a denied attempt never counts against the window.
#[derive(Debug, Clone)]
pub struct RateLimitWindow {
    window_start: DateTime<Utc>,
    count: u32,
}

impl RateLimitWindow {
    pub fn new(now: DateTime<Utc>) -> Self {
        RateLimitWindow {
            window_start: now,
            count: 0,
        }
    }

    /// Consume one attempt, or report how long until the window reopens.
    pub fn try_consume(&mut self, now: DateTime<Utc>) -> std::result::Result<(), Duration> {
        if now - self.window_start >= Duration::minutes(WINDOW_MINUTES) {
            self.window_start = now;
            self.count = 0;
        }

        if self.count < MAX_REQUESTS_PER_WINDOW {
            self.count += 1;
            Ok(())
        } else {
            Err(self.window_start + Duration::minutes(WINDOW_MINUTES) - now)
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}
