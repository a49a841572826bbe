//! In-memory key-value backend.

use std::cell::RefCell;
use std::collections::HashMap;

use super::KeyValueBackend;
use crate::error::Result;

/// A `HashMap`-backed backend that forgets everything on drop.
///
/// Used as the test double for [`super::SqliteBackend`].
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
