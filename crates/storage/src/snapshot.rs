//! JSON document backend with atomic whole-file replace.

use crate::{LinkStore, Store, StorageError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Strict read. A missing file is an empty store; anything else that goes
    /// wrong is reported.
    pub fn read(&self) -> Result<Store, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no snapshot at {}, starting empty", self.path.display());
                return Ok(Store::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_slice(&bytes).map_err(|source| StorageError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes the full document to a temporary file next to the snapshot.
    /// Nothing is visible under the canonical name until `commit`.
    pub fn stage(&self, store: &Store) -> Result<StagedSnapshot, StorageError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.io_error(e))?;

        let mut file = NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        let body = serde_json::to_vec_pretty(store)?;
        file.write_all(&body).map_err(|e| self.io_error(e))?;
        file.write_all(b"\n").map_err(|e| self.io_error(e))?;
        file.as_file().sync_all().map_err(|e| self.io_error(e))?;

        Ok(StagedSnapshot {
            file,
            target: self.path.clone(),
        })
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl LinkStore for JsonFileStore {
    fn load(&self) -> Store {
        match self.read() {
            Ok(store) => store,
            Err(e) => {
                warn!("ignoring unreadable link store: {}", e);
                Store::default()
            }
        }
    }

    fn persist(&self, store: &Store) -> Result<(), StorageError> {
        self.stage(store)?.commit()?;
        info!("wrote {} link(s) to {}", store.len(), self.path.display());
        Ok(())
    }
}

/// A fully written temporary snapshot awaiting its rename.
///
/// Dropping it without calling `commit` removes the temporary file and leaves
/// the previously committed snapshot untouched.
#[derive(Debug)]
pub struct StagedSnapshot {
    file: NamedTempFile,
    target: PathBuf,
}

impl StagedSnapshot {
    pub fn temp_path(&self) -> &Path {
        self.file.path()
    }

    pub fn commit(self) -> Result<(), StorageError> {
        let target = self.target;
        self.file.persist(&target).map_err(|e| StorageError::Io {
            path: target.clone(),
            source: e.error,
        })?;
        Ok(())
    }
}
