//! Core rate limiter implementation.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::config::ThrottleConfig;
use crate::error::Result;

use super::window::AttemptWindow;

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckStatus {
    /// Whether the caller may perform the guarded action now
    pub allowed: bool,
    /// Attempts left before the key is throttled
    pub remaining: u32,
    /// When the oldest counted bucket expires and usage drops, in seconds
    /// since the Unix epoch. Present only when the key is throttled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_at: Option<u64>,
}

/// The core rate limiter that tracks per-key attempt windows.
///
/// This struct is thread-safe and can be shared across threads behind an
/// `Arc`. One exclusive lock guards the whole store; every operation is a
/// bounded in-memory computation, so the critical sections are tiny. All
/// state lives in process memory and does not survive a restart.
pub struct RateLimiter<C = SystemClock>
where
    C: Clock,
{
    /// Admission policy
    config: ThrottleConfig,
    /// Time source
    clock: C,
    /// Attempt windows indexed by key
    windows: RwLock<HashMap<String, AttemptWindow>>,
}

impl RateLimiter<SystemClock> {
    /// Create a new rate limiter using the system clock.
    pub fn new(config: ThrottleConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C> RateLimiter<C>
where
    C: Clock,
{
    /// Create a new rate limiter with an explicit time source.
    pub fn with_clock(config: ThrottleConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            clock,
            windows: RwLock::new(HashMap::new()),
        })
    }

    /// The policy this limiter enforces.
    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }

    /// Decide whether an event for `key` is admissible right now.
    ///
    /// Callers invoke this before performing the guarded action and, when
    /// denied, surface the returned `reset_at` to the subject. A key with no
    /// recorded events inside the window is always admitted. This operation
    /// never fails.
    pub fn check(&self, key: &str) -> CheckStatus {
        let now = self.clock.now();
        let window_start = now.saturating_sub(self.config.window_secs);

        let (usage, oldest) = {
            let mut windows = self.windows.write();

            match windows.get_mut(key) {
                Some(window) => {
                    window.prune(window_start);
                    if window.is_empty() {
                        // An empty window is equivalent to an absent key;
                        // drop it so idle keys do not accumulate.
                        windows.remove(key);
                        (0, None)
                    } else {
                        (window.usage(), window.oldest_bucket())
                    }
                }
                None => (0, None),
            }
        };

        let allowed = usage < self.config.max_attempts;
        let remaining = self.config.max_attempts.saturating_sub(usage);

        trace!(key = %key, usage, remaining, "Checked rate limit");

        if allowed {
            CheckStatus {
                allowed: true,
                remaining,
                reset_at: None,
            }
        } else {
            // The oldest surviving bucket is the first to expire and the
            // earliest moment usage can drop below the limit.
            let reset_at = oldest.map(|bucket| bucket + self.config.window_secs);
            debug!(key = %key, usage, reset_at = ?reset_at, "Rate limit exceeded");

            CheckStatus {
                allowed: false,
                remaining,
                reset_at,
            }
        }
    }

    /// Count one completed event against `key`.
    ///
    /// Must be called only after the guarded action actually happened (e.g.
    /// the passcode was dispatched), otherwise a failed action still
    /// consumes quota.
    pub fn record(&self, key: &str) {
        let now = self.clock.now();
        let window_start = now.saturating_sub(self.config.window_secs);
        let bucket_start = now - now % self.config.bucket_secs;

        let mut windows = self.windows.write();

        let window = windows.entry(key.to_string()).or_insert_with(|| {
            debug!(key = %key, "Creating attempt window");
            AttemptWindow::new()
        });
        window.prune(window_start);
        window.record(bucket_start);

        trace!(
            key = %key,
            bucket_start,
            usage = window.usage(),
            "Recorded attempt"
        );
    }

    /// Reset a single key's usage to zero.
    ///
    /// Administrative override for unblocking a subject. Clearing an
    /// unknown key is a no-op.
    pub fn clear(&self, key: &str) {
        if self.windows.write().remove(key).is_some() {
            debug!(key = %key, "Cleared attempt window");
        }
    }

    /// Reset every key's usage to zero.
    ///
    /// Primarily useful for test isolation.
    pub fn clear_all(&self) {
        self.windows.write().clear();
    }

    /// Current non-expired usage for a key.
    ///
    /// Read-only: expired buckets are excluded from the sum but not pruned.
    pub fn usage(&self, key: &str) -> u32 {
        let window_start = self.clock.now().saturating_sub(self.config.window_secs);
        let windows = self.windows.read();
        windows
            .get(key)
            .map_or(0, |window| window.usage_since(window_start))
    }

    /// Number of keys with live attempt windows.
    pub fn key_count(&self) -> usize {
        self.windows.read().len()
    }
}
