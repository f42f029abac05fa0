use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Idle clients are dropped once this many keys are tracked.
const SWEEP_THRESHOLD: usize = 4_096;

/// Sliding-window request counter keyed by client IP.
#[derive(Debug, Clone)]
pub struct IpRateLimiter {
    windows: Arc<Mutex<HashMap<String, VecDeque<Instant>>>>,
    window: Duration,
    max_requests: usize,
}

impl IpRateLimiter {
    pub fn new(window: Duration, max_requests: usize) -> Self {
        Self {
            windows: Arc::new(Mutex::new(HashMap::new())),
            window,
            max_requests,
        }
    }

    pub fn allow(&self, key: &str) -> bool {
        self.allow_at(key, Instant::now())
    }

    fn allow_at(&self, key: &str, now: Instant) -> bool {
        let mut windows = self.windows.lock();
        if windows.len() >= SWEEP_THRESHOLD {
            let window = self.window;
            windows.retain(|_, hits| {
                hits.back()
                    .is_some_and(|last| now.duration_since(*last) <= window)
            });
        }

        let hits = windows.entry(key.to_string()).or_default();
        while hits
            .front()
            .is_some_and(|first| now.duration_since(*first) > self.window)
        {
            hits.pop_front();
        }

        if hits.len() >= self.max_requests {
            return false;
        }
        hits.push_back(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_after_limit_until_window_passes() {
        let limiter = IpRateLimiter::new(Duration::from_secs(60), 2);
        let start = Instant::now();

        assert!(limiter.allow_at("10.0.0.1", start));
        assert!(limiter.allow_at("10.0.0.1", start));
        assert!(!limiter.allow_at("10.0.0.1", start + Duration::from_secs(1)));
        assert!(limiter.allow_at("10.0.0.2", start + Duration::from_secs(1)));
        assert!(limiter.allow_at("10.0.0.1", start + Duration::from_secs(61)));
    }

    #[test]
    fn clones_share_counters() {
        let limiter = IpRateLimiter::new(Duration::from_secs(60), 1);
        let clone = limiter.clone();
        assert!(limiter.allow("local"));
        assert!(!clone.allow("local"));
    }
}
