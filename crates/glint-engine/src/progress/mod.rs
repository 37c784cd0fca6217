pub mod backend;
pub mod record;
pub mod store;

pub use backend::{MemoryBackend, ProgressBackend, StorageError};
pub use record::{ProgressRecord, STORAGE_KEY};
pub use store::{MarkFound, ProgressStore};
