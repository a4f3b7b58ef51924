//! Single-slot holding area for a captured login.
//!
//! A login submitted on one page is staged here so that the page loaded
//! after the navigation can offer to save it. The slot holds at most one
//! capture; a newer capture replaces an unclaimed one.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;

use keyhold_protocols::{Clock, PendingCapture};

use crate::domain::{hosts_match, url_host};

/// Default time a capture waits to be claimed.
pub const DEFAULT_PENDING_TTL: Duration = Duration::from_secs(60);

/// Pending-capture slot owned by the background service.
pub struct PendingCredentialCache {
    slot: Mutex<Option<PendingCapture>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl PendingCredentialCache {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            clock,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Stage a capture, replacing whatever was there.
    pub fn cache(&self, url: &str, username: &str, password: &str) {
        let capture = PendingCapture {
            url: url.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            timestamp: self.clock.now(),
        };

        let previous = self.slot.lock().replace(capture);
        if let Some(previous) = previous {
            debug!("Discarding unclaimed capture from {}", previous.url);
        }
    }

    /// Claim the staged capture for a page on `requesting_url`.
    ///
    /// Returns `None` when the slot is empty, the capture expired, either URL
    /// does not parse, or the hosts are unrelated. A returned capture has
    /// been removed from the slot, so no other page can claim it.
    pub fn take_if_fresh(&self, requesting_url: &str) -> Option<PendingCapture> {
        let mut slot = self.slot.lock();
        let capture = slot.as_ref()?;

        if !self.is_fresh(capture) {
            debug!("Pending capture from {} expired", capture.url);
            *slot = None;
            return None;
        }

        let (origin, current) = match (url_host(&capture.url), url_host(requesting_url)) {
            (Some(origin), Some(current)) => (origin, current),
            _ => return None,
        };

        if !hosts_match(&origin, &current) {
            debug!("Pending capture from {} not offered to {}", origin, current);
            return None;
        }

        slot.take()
    }

    /// Whether a capture is currently staged, fresh or not.
    pub fn is_occupied(&self) -> bool {
        self.slot.lock().is_some()
    }

    fn is_fresh(&self, capture: &PendingCapture) -> bool {
        let ttl_millis = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        capture.age_millis(self.clock.now()) < ttl_millis
    }
}

#[cfg(test)]
#[path = "pending_tests.rs"]
mod tests;
