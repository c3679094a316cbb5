//! Otp-Throttle - Sliding-Window Rate Limiting for OTP Issuance
//!
//! This crate implements a per-key rate limiter used to throttle
//! one-time-passcode issuance. Usage is counted in fixed-width time buckets
//! summed over a rolling window, so per-key memory stays bounded while old
//! activity retires gradually instead of resetting all at once. State lives
//! entirely in process memory; there is no persistence and no cross-process
//! coordination.

pub mod clock;
pub mod config;
pub mod error;
pub mod ratelimit;
