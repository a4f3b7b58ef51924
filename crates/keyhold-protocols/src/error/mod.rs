//! Error types for the keyhold protocol layer.

mod client;
mod dispatch;
mod store;

pub use client::*;
pub use dispatch::*;
pub use store::*;
