use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

/// Errors from the durable storage layer. These never cross the engine's
/// outer boundary; the store logs them and keeps the in-memory record
/// authoritative for the rest of the session.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage write failed: {0}")]
    WriteFailed(String),
}

/// Durable key/value storage for the progress record.
///
/// The web bridge implements this against browser `localStorage`; native
/// code and tests use [`MemoryBackend`].
pub trait ProgressBackend {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&mut self, key: &str, payload: &str) -> Result<(), StorageError>;
    fn clear(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend. Clones share the same underlying map, so a test can
/// hand one clone to a store, drop the store, and hydrate a fresh store from
/// the other clone to simulate a page reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Rc<RefCell<HashMap<String, String>>>,
    /// When set, every write reports failure (quota-exceeded simulation).
    fail_writes: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose writes always fail, for fail-soft tests.
    pub fn failing() -> Self {
        Self {
            entries: Rc::default(),
            fail_writes: true,
        }
    }

    /// Raw payload stored under `key`, if any.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Seed a payload directly, bypassing the store.
    pub fn seed(&self, key: &str, payload: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), payload.to_owned());
    }
}

impl ProgressBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&mut self, key: &str, payload: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::WriteFailed("simulated quota".into()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), payload.to_owned());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
