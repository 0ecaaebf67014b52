use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Sliding-window limiter keyed by caller IP. Timestamps older than the
/// window are dropped on each check, so memory stays bounded by traffic.
#[derive(Debug, Clone)]
pub struct IpRateLimiter {
    hits: Arc<Mutex<HashMap<String, VecDeque<Instant>>>>,
    window: Duration,
    max_requests: usize,
}

impl IpRateLimiter {
    pub fn new(window: Duration, max_requests: usize) -> Self {
        Self {
            hits: Arc::new(Mutex::new(HashMap::new())),
            window,
            max_requests,
        }
    }

    pub fn allow(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut guard = self.hits.lock();
        let recent = guard.entry(key.to_string()).or_default();

        while recent
            .front()
            .is_some_and(|hit| now.duration_since(*hit) > self.window)
        {
            recent.pop_front();
        }

        if recent.len() >= self.max_requests {
            return false;
        }

        recent.push_back(now);
        true
    }
}
