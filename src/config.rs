//! Configuration management for the OTP throttle.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::error::{Result, ThrottleError};

/// Admission policy for the rate limiter.
///
/// A key is admitted while it has fewer than `max_attempts` events inside
/// the rolling `window_secs` window. Events are counted in `bucket_secs`
/// slices, so per-key memory is bounded by `window_secs / bucket_secs`
/// entries regardless of event volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Maximum events permitted per key within the window
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Rolling window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Width of a counting bucket in seconds
    #[serde(default = "default_bucket_secs")]
    pub bucket_secs: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            window_secs: default_window_secs(),
            bucket_secs: default_bucket_secs(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_window_secs() -> u64 {
    600
}

fn default_bucket_secs() -> u64 {
    60
}

impl ThrottleConfig {
    /// Check the policy for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(ThrottleError::ZeroMaxAttempts);
        }
        if self.bucket_secs == 0 {
            return Err(ThrottleError::ZeroBucketWidth);
        }
        if self.bucket_secs > self.window_secs {
            return Err(ThrottleError::BucketWiderThanWindow {
                bucket_secs: self.bucket_secs,
                window_secs: self.window_secs,
            });
        }
        Ok(())
    }

    /// Load and validate configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading throttle configuration");

        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load and validate configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ThrottleConfig = serde_yaml::from_str(yaml)
            .map_err(|e| ThrottleError::Config(format!("Failed to parse throttle config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Length of the rolling window.
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Width of a single counting bucket.
    pub fn bucket_width(&self) -> Duration {
        Duration::from_secs(self.bucket_secs)
    }
}
