use glint_engine::{ProgressBackend, StorageError};

/// Progress persistence against browser `localStorage`.
///
/// Construction fails when storage is disabled (private browsing policies,
/// sandboxed frames); the runner then degrades to an in-memory backend and
/// progress simply does not survive the session.
pub struct LocalStorageBackend {
    storage: web_sys::Storage,
}

impl LocalStorageBackend {
    pub fn new() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

impl ProgressBackend for LocalStorageBackend {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }

    fn save(&mut self, key: &str, payload: &str) -> Result<(), StorageError> {
        // Fails on quota exceeded; the store logs and keeps going.
        self.storage
            .set_item(key, payload)
            .map_err(|err| StorageError::WriteFailed(format!("{err:?}")))
    }

    fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|err| StorageError::WriteFailed(format!("{err:?}")))
    }
}
