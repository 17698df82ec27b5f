//! Storage layer: the link snapshot and its whole-file persistence.
//!
//! A store is always read and written as one unit; there are no incremental
//! updates.

use std::path::PathBuf;
use thiserror::Error;

pub mod memory;
pub mod models;
pub mod snapshot;

pub use memory::MemoryStore;
pub use models::{Link, Store};
pub use snapshot::{JsonFileStore, StagedSnapshot};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot {}: {}", .path.display(), .source)]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Whole-snapshot persistence capability.
///
/// `load` never fails the caller: missing or unreadable storage yields an
/// empty store. `persist` replaces the previous snapshot as a unit.
pub trait LinkStore {
    fn load(&self) -> Store;
    fn persist(&self, store: &Store) -> Result<(), StorageError>;
}
