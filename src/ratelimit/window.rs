//! Per-key bucketed attempt accounting.

use std::collections::BTreeMap;

/// Attempt counts for one key, grouped into fixed-width time buckets.
///
/// Buckets are keyed by their start time (seconds since the Unix epoch,
/// truncated to the bucket width), so the oldest surviving bucket is always
/// the first entry. Expired buckets are pruned lazily by the limiter on
/// every access to the key; no background sweep runs.
#[derive(Debug, Default)]
pub struct AttemptWindow {
    /// Event counts indexed by bucket start time
    buckets: BTreeMap<u64, u32>,
}

impl AttemptWindow {
    /// Create an empty window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every bucket that started before `window_start`.
    pub fn prune(&mut self, window_start: u64) {
        self.buckets = self.buckets.split_off(&window_start);
    }

    /// Count one event in the bucket beginning at `bucket_start`.
    pub fn record(&mut self, bucket_start: u64) {
        let count = self.buckets.entry(bucket_start).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Total events across all retained buckets.
    pub fn usage(&self) -> u32 {
        self.buckets.values().sum()
    }

    /// Total events across buckets starting at or after `window_start`.
    ///
    /// Read-only counterpart of [`prune`](Self::prune) followed by
    /// [`usage`](Self::usage), for callers holding a shared reference.
    pub fn usage_since(&self, window_start: u64) -> u32 {
        self.buckets.range(window_start..).map(|(_, count)| count).sum()
    }

    /// Start time of the oldest retained bucket.
    pub fn oldest_bucket(&self) -> Option<u64> {
        self.buckets.keys().next().copied()
    }

    /// Whether no buckets remain.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of retained buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
