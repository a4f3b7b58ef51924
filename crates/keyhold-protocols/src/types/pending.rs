//! Captured credential awaiting confirmation on the next page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A login observed on one page and held until the next page asks for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCapture {
    /// Full URL of the page the form was submitted from.
    pub url: String,
    pub username: String,
    pub password: String,
    /// Capture instant, epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl PendingCapture {
    /// Milliseconds elapsed between capture and `now`.
    ///
    /// Negative when the clock went backwards.
    pub fn age_millis(&self, now: DateTime<Utc>) -> i64 {
        (now - self.timestamp).num_milliseconds()
    }
}
