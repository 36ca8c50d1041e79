//! quizdeck-store: File-backed key/value storage.
//!
//! Provides [`FileStorage`], a [`KeyValueStore`](quizdeck_core::KeyValueStore)
//! that keeps every key in one JSON object on disk, playing the part a
//! browser's local storage plays for the web pages.

pub mod file;

pub use file::{default_store_path, FileStorage};
