//! Rate limiting logic and state management.

mod limiter;
mod window;

pub use limiter::{CheckStatus, RateLimiter};
pub use window::AttemptWindow;
