//! # Keyhold Protocols
//!
//! Shared definitions for the two keyhold contexts: the background service
//! that owns storage and the pending-capture slot, and the page context that
//! observes login forms.
//!
//! Contains only data types and interfaces - no implementations.
//!
//! ## Core Items
//!
//! - [`CredentialRecord`] / [`PendingCapture`] - persisted and transient credentials
//! - [`Request`] / [`Response`] - the message union exchanged between contexts
//! - [`KeyValueStore`] - storage capability used by the background service
//! - [`Clock`] - time source, injectable for TTL tests

pub mod clock;
pub mod error;
pub mod message;
pub mod store;
pub mod types;

pub use clock::Clock;
pub use error::{ClientError, DispatchError, StoreError};
pub use message::{CacheAck, MessageKind, Request, Response};
pub use store::KeyValueStore;
pub use types::*;
