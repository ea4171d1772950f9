use dashmap::DashMap;
use std::time::Duration;

// Rate limit entry - one fixed window per client key
pub struct RateLimitEntry {
    pub count: u32,
    pub reset_at_ms: u64,
}

// Outcome of a single check. Carries everything the handlers need to
// build the X-RateLimit-* headers without touching the map again.
#[derive(Debug, Clone, Copy)]
pub struct Decision {
    pub admitted: bool,
    pub limit: u32,
    pub count: u32,
    pub reset_at_ms: u64,
}

impl Decision {
    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.count)
    }

    // Epoch seconds, rounded up, for the X-RateLimit-Reset header
    pub fn reset_epoch_secs(&self) -> u64 {
        self.reset_at_ms.div_ceil(1000)
    }
}

pub struct RateLimiter {
    windows: DashMap<String, RateLimitEntry>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: DashMap::new(),
            max_requests,
            window,
        }
    }

    pub fn check(&self, key: &str) -> Decision {
        self.check_at(key, now_ms())
    }

    // Fixed window: the first request (or any request at/after the reset
    // mark) starts a fresh window with count = 1. Every later request in
    // the window increments, including rejected ones, so the count on a
    // 429 is the over-limit value. The dashmap entry holds the shard lock
    // for the whole read-modify-write, so the update is atomic per key.
    pub fn check_at(&self, key: &str, now_ms: u64) -> Decision {
        let window_ms = self.window.as_millis() as u64;

        let mut entry = self
            .windows
            .entry(key.to_string())
            .or_insert(RateLimitEntry {
                count: 0,
                reset_at_ms: now_ms + window_ms,
            });

        if now_ms >= entry.reset_at_ms {
            // window expired, start over
            entry.count = 1;
            entry.reset_at_ms = now_ms + window_ms;
        } else {
            entry.count += 1;
        }

        Decision {
            admitted: entry.count <= self.max_requests,
            limit: self.max_requests,
            count: entry.count,
            reset_at_ms: entry.reset_at_ms,
        }
    }

    // Drop windows that already expired so the map does not grow forever.
    // Called from the background sweeper.
    pub fn sweep(&self) {
        let now = now_ms();
        self.windows.retain(|_, entry| entry.reset_at_ms > now);
    }

    pub fn active_windows(&self) -> usize {
        self.windows.len()
    }
}

pub fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn counts_down_remaining_then_rejects() {
        let limiter = RateLimiter::new(10, WINDOW);
        let t0 = 1_000;

        for n in 1..=10u32 {
            let d = limiter.check_at("1.2.3.4", t0 + n as u64);
            assert!(d.admitted, "request {} should be admitted", n);
            assert_eq!(d.remaining(), 10 - n);
        }

        let d = limiter.check_at("1.2.3.4", t0 + 11);
        assert!(!d.admitted);
        assert_eq!(d.count, 11);
        assert_eq!(d.remaining(), 0);
    }

    #[test]
    fn rejected_requests_keep_incrementing() {
        let limiter = RateLimiter::new(2, WINDOW);
        limiter.check_at("k", 0);
        limiter.check_at("k", 1);

        let d = limiter.check_at("k", 2);
        assert!(!d.admitted);
        assert_eq!(d.count, 3);

        let d = limiter.check_at("k", 3);
        assert!(!d.admitted);
        assert_eq!(d.count, 4);
    }

    #[test]
    fn window_boundary_is_a_hard_cutoff() {
        let limiter = RateLimiter::new(3, WINDOW);
        let t0 = 5_000;
        for _ in 0..5 {
            limiter.check_at("k", t0);
        }
        assert!(!limiter.check_at("k", t0 + 59_999).admitted);

        // exactly at reset_at a fresh window starts, old count discarded
        let d = limiter.check_at("k", t0 + 60_000);
        assert!(d.admitted);
        assert_eq!(d.count, 1);
        assert_eq!(d.reset_at_ms, t0 + 120_000);
    }

    #[test]
    fn keys_do_not_share_quota() {
        let limiter = RateLimiter::new(1, WINDOW);
        assert!(limiter.check_at("a", 0).admitted);
        assert!(!limiter.check_at("a", 1).admitted);
        assert!(limiter.check_at("b", 1).admitted);
    }

    #[test]
    fn sweep_drops_expired_windows_only() {
        let limiter = RateLimiter::new(10, WINDOW);
        // reset_at far in the past relative to the wall clock
        limiter.check_at("stale", 0);
        // current window
        limiter.check("fresh");
        assert_eq!(limiter.active_windows(), 2);

        limiter.sweep();
        assert_eq!(limiter.active_windows(), 1);
        assert!(limiter.windows.contains_key("fresh"));
    }

    #[test]
    fn reset_header_rounds_up_to_whole_seconds() {
        let d = Decision {
            admitted: true,
            limit: 10,
            count: 1,
            reset_at_ms: 60_001,
        };
        assert_eq!(d.reset_epoch_secs(), 61);

        let d = Decision {
            admitted: true,
            limit: 10,
            count: 1,
            reset_at_ms: 60_000,
        };
        assert_eq!(d.reset_epoch_secs(), 60);
    }
}
