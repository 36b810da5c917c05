//! Fixed-window request throttling.
//!
//! Counters are keyed by a client identifier and reset each window. The
//! limiter hangs off application state rather than a process global, so
//! a multi-instance deployment can swap in a shared implementation
//! behind the same surface.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

/// Outcome of a throttle check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Limited,
}

struct WindowCounter {
    window_start: Instant,
    count: u32,
}

/// Fixed-window counter limiter.
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    counters: Mutex<HashMap<String, WindowCounter>>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Record a request for `key` and decide whether it may proceed.
    pub fn check(&self, key: &str) -> Decision {
        let now = Instant::now();
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());

        // Sweep keys idle for two full windows so the map stays bounded
        // by the recently active client set.
        counters.retain(|_, counter| now.duration_since(counter.window_start) < self.window * 2);

        let counter = counters.entry(key.to_string()).or_insert(WindowCounter {
            window_start: now,
            count: 0,
        });

        if now.duration_since(counter.window_start) >= self.window {
            counter.window_start = now;
            counter.count = 0;
        }

        counter.count += 1;
        if counter.count > self.max_requests {
            debug!(key = %key, count = counter.count, "Request rate limited");
            Decision::Limited
        } else {
            Decision::Allowed
        }
    }
}
