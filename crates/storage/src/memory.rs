use crate::{LinkStore, Store, StorageError};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Store>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new(store: Store) -> Self {
        Self {
            inner: Mutex::new(store),
            fail_writes: false,
        }
    }

    /// A store whose every `persist` fails, as a full disk would.
    pub fn failing(store: Store) -> Self {
        Self {
            inner: Mutex::new(store),
            fail_writes: true,
        }
    }

    pub fn snapshot(&self) -> Store {
        self.inner.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl LinkStore for MemoryStore {
    fn load(&self) -> Store {
        self.snapshot()
    }

    fn persist(&self, store: &Store) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(memory_error("writes disabled"));
        }
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| memory_error("store lock poisoned"))?;
        *inner = store.clone();
        Ok(())
    }
}

fn memory_error(reason: &str) -> StorageError {
    StorageError::Io {
        path: PathBuf::from("<memory>"),
        source: io::Error::new(io::ErrorKind::Other, reason.to_string()),
    }
}
