//! # Keyhold Core
//!
//! Background-side logic for keyhold.
//!
//! ## Components
//!
//! - [`BackgroundService`] - owns storage and the pending-capture slot
//! - [`Dispatcher`] - request table, one [`MessageHandler`] per kind
//! - [`PendingCredentialCache`] - single-slot, TTL-bounded capture staging
//! - [`VaultService`] - saved logins, CSV import/export
//! - [`PausedSites`] - per-site autofill and auto-login pause lists
//! - [`domain`] - loose hostname matching shared by both contexts

pub mod background;
pub mod clock;
pub mod csv;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod generator;
pub mod memory_store;
pub mod paused;
pub mod pending;
pub mod vault;

pub use background::BackgroundService;
pub use clock::{ManualClock, SystemClock};
pub use dispatch::{Dispatcher, MessageHandler};
pub use error::VaultError;
pub use generator::{classify, generate, CharClass, GeneratorOptions};
pub use memory_store::MemoryKeyValueStore;
pub use paused::PausedSites;
pub use pending::{PendingCredentialCache, DEFAULT_PENDING_TTL};
pub use vault::{is_weak, VaultService};
