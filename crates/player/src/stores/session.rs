//! Session activity guard.
//!
//! There is no timer: validity is worked out on demand from the time of the
//! last recorded activity.

use std::time::Duration;

use crate::state::Platform;

/// Tracks the last activity and answers "is the session still alive?".
pub struct SessionGuard {
    platform: Platform,
    timeout: Duration,
    last_activity_millis: u64,
}

impl SessionGuard {
    /// Start a session whose last activity is now.
    pub fn new(platform: Platform, timeout: Duration) -> Self {
        let last_activity_millis = platform.now_millis();
        Self {
            platform,
            timeout,
            last_activity_millis,
        }
    }

    pub fn record_activity(&mut self) {
        self.last_activity_millis = self.platform.now_millis();
        tracing::trace!(at = self.last_activity_millis, "Session activity recorded");
    }

    /// True while less than the timeout has passed since the last activity.
    pub fn is_valid(&self) -> bool {
        self.elapsed_millis() < self.timeout_millis()
    }

    /// Whole seconds left before expiry; zero once expired.
    pub fn remaining_seconds(&self) -> u64 {
        self.timeout_millis().saturating_sub(self.elapsed_millis()) / 1000
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn last_activity_millis(&self) -> u64 {
        self.last_activity_millis
    }

    // A clock reading before the last activity counts as no time passed.
    fn elapsed_millis(&self) -> u64 {
        self.platform
            .now_millis()
            .saturating_sub(self.last_activity_millis)
    }

    fn timeout_millis(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}
