//! Key-value persistence for leadbox.
//!
//! The lead store keeps everything as one JSON string under one key, the way
//! a web page would in `localStorage`. This module provides the string
//! key-value layer underneath it: a persistent `SQLite` backend and an
//! in-memory backend for tests.

pub mod memory;
pub mod migrations;
pub mod schema;
pub mod sqlite;

pub use memory::MemoryBackend;
pub use sqlite::{SqliteBackend, StorageStats};

use crate::error::Result;

/// A string-to-string persistent map.
///
/// Implementations are used from a single thread; they take `&self` so that
/// one backend handle can be shared by the submission form and the admin
/// console.
pub trait KeyValueBackend {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for &B {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}
