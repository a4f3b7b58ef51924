//! JSON file storage for keyhold.
//!
//! Keeps every key in one JSON object on disk.

mod backend;

pub use backend::FileKeyValueStore;
