//! Outbound request rate limiting
//!
//! Two fixed windows guard the SearXNG instance: a one-second window and a
//! calendar-month window (local time). A request is admitted only when both
//! windows have room, and admission counts against both.

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::config::RateLimitConfig;

const SECOND: Duration = Duration::from_secs(1);

/// Which window rejected the request
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("Rate limit exceeded: at most {limit} request(s) per second")]
    PerSecond { limit: u32 },

    #[error("Rate limit exceeded: monthly quota of {limit} requests used up")]
    PerMonth { limit: u32 },
}

/// Year and month a monthly window belongs to
type MonthKey = (i32, u32);

fn current_month() -> MonthKey {
    let now = Local::now();
    (now.year(), now.month())
}

#[derive(Debug)]
struct Windows {
    second_started: Instant,
    second_count: u32,
    month: MonthKey,
    month_count: u32,
}

/// Point-in-time view of the limiter, reported by `get_config`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateLimitSnapshot {
    pub per_second: u32,
    pub per_month: u32,
    pub used_this_second: u32,
    pub used_this_month: u32,
}

/// Shared fixed-window rate limiter
///
/// A limit of `0` disables that window.
#[derive(Debug)]
pub struct RateLimiter {
    per_second: u32,
    per_month: u32,
    windows: Mutex<Windows>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self::starting_at(config, Instant::now(), current_month())
    }

    fn starting_at(config: &RateLimitConfig, now: Instant, month: MonthKey) -> Self {
        Self {
            per_second: config.per_second,
            per_month: config.per_month,
            windows: Mutex::new(Windows {
                second_started: now,
                second_count: 0,
                month,
                month_count: 0,
            }),
        }
    }

    /// Take one request from the budget, or report which window is exhausted
    pub fn try_acquire(&self) -> Result<(), RateLimitError> {
        self.try_acquire_at(Instant::now(), current_month())
    }

    fn try_acquire_at(&self, now: Instant, month: MonthKey) -> Result<(), RateLimitError> {
        let mut w = self.windows.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if now.saturating_duration_since(w.second_started) >= SECOND {
            w.second_started = now;
            w.second_count = 0;
        }
        if month != w.month {
            w.month = month;
            w.month_count = 0;
        }

        if self.per_second > 0 && w.second_count >= self.per_second {
            tracing::debug!(count = w.second_count, "per-second rate limit hit");
            return Err(RateLimitError::PerSecond {
                limit: self.per_second,
            });
        }
        if self.per_month > 0 && w.month_count >= self.per_month {
            tracing::warn!(count = w.month_count, "monthly rate limit hit");
            return Err(RateLimitError::PerMonth {
                limit: self.per_month,
            });
        }

        w.second_count += 1;
        w.month_count += 1;
        Ok(())
    }

    pub fn snapshot(&self) -> RateLimitSnapshot {
        let w = self.windows.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        RateLimitSnapshot {
            per_second: self.per_second,
            per_month: self.per_month,
            used_this_second: w.second_count,
            used_this_month: w.month_count,
        }
    }
}
