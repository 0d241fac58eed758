//! Login failure tracking
//!
//! Counts failed password attempts per email and locks the account for a
//! while once the limit is reached. Lock-free via `DashMap`; state is
//! per-process and resets on restart.

use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Failed attempts allowed inside one window
pub const MAX_FAILED_ATTEMPTS: u32 = 5;

/// Window for counting failures, also the lock duration
pub const LOCK_WINDOW: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone, Copy)]
struct FailureEntry {
    count: u32,
    window_start: Instant,
}

#[derive(Debug)]
pub struct LoginGuard {
    failures: DashMap<String, FailureEntry>,
    max_attempts: u32,
    window: Duration,
}

impl LoginGuard {
    pub fn new() -> Self {
        Self::with_limits(MAX_FAILED_ATTEMPTS, LOCK_WINDOW)
    }

    pub fn with_limits(max_attempts: u32, window: Duration) -> Self {
        Self {
            failures: DashMap::new(),
            max_attempts,
            window,
        }
    }

    /// Whether logins for `email` are currently refused
    pub fn is_locked(&self, email: &str) -> bool {
        match self.failures.get(email) {
            Some(entry) => {
                entry.count >= self.max_attempts && entry.window_start.elapsed() < self.window
            }
            None => false,
        }
    }

    /// Record a failed attempt, returning the failure count in the current window
    pub fn record_failure(&self, email: &str) -> u32 {
        let now = Instant::now();
        let mut entry = self
            .failures
            .entry(email.to_string())
            .or_insert(FailureEntry {
                count: 0,
                window_start: now,
            });

        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 0;
            entry.window_start = now;
        }
        entry.count += 1;
        entry.count
    }

    /// Forget failures after a successful login
    pub fn record_success(&self, email: &str) {
        self.failures.remove(email);
    }

    /// Drop entries whose window has passed
    pub fn cleanup(&self) {
        let window = self.window;
        self.failures
            .retain(|_, entry| entry.window_start.elapsed() < window);
    }
}

impl Default for LoginGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locks_after_limit() {
        let guard = LoginGuard::with_limits(3, Duration::from_secs(60));
        assert!(!guard.is_locked("a@spoke.shop"));
        guard.record_failure("a@spoke.shop");
        guard.record_failure("a@spoke.shop");
        assert!(!guard.is_locked("a@spoke.shop"));
        assert_eq!(guard.record_failure("a@spoke.shop"), 3);
        assert!(guard.is_locked("a@spoke.shop"));
        assert!(!guard.is_locked("b@spoke.shop"));
    }

    #[test]
    fn test_success_clears_failures() {
        let guard = LoginGuard::with_limits(2, Duration::from_secs(60));
        guard.record_failure("a@spoke.shop");
        guard.record_success("a@spoke.shop");
        assert_eq!(guard.record_failure("a@spoke.shop"), 1);
    }

    #[test]
    fn test_window_expiry_unlocks() {
        let guard = LoginGuard::with_limits(1, Duration::from_millis(5));
        guard.record_failure("a@spoke.shop");
        assert!(guard.is_locked("a@spoke.shop"));
        std::thread::sleep(Duration::from_millis(10));
        assert!(!guard.is_locked("a@spoke.shop"));
        guard.cleanup();
        assert_eq!(guard.record_failure("a@spoke.shop"), 1);
    }
}
