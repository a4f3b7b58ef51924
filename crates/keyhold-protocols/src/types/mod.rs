//! Record types shared across contexts.

mod credential;
mod feature;
mod pending;

pub use credential::CredentialRecord;
pub use feature::PausedFeature;
pub use pending::PendingCapture;

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
