//! Error types for the otp-throttle crate.

use thiserror::Error;

/// Main error type for throttle operations.
///
/// Errors arise only at the configuration boundary. The limiter operations
/// themselves are total: a denied check is a regular result value, not an
/// error.
#[derive(Error, Debug)]
pub enum ThrottleError {
    /// The attempt budget must admit at least one event
    #[error("max_attempts must be at least 1")]
    ZeroMaxAttempts,

    /// The bucket width must cover at least one second
    #[error("bucket_secs must be at least 1")]
    ZeroBucketWidth,

    /// A bucket wider than the window can never expire inside it
    #[error("bucket_secs ({bucket_secs}s) must not exceed window_secs ({window_secs}s)")]
    BucketWiderThanWindow {
        bucket_secs: u64,
        window_secs: u64,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for throttle operations.
pub type Result<T> = std::result::Result<T, ThrottleError>;
