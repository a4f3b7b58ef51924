//! Time source abstraction.

use chrono::{DateTime, Utc};

/// Source of the current instant.
///
/// The background service never reads the system clock directly so that
/// expiry of pending captures can be driven by tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
