//! Storage layer for Finboard
//!
//! All client-side state lives in one local key-value file. The backend owns
//! every financial record; nothing here caches them.

pub mod allocation;
pub mod file_io;
pub mod local_store;
pub mod session;

pub use allocation::{AllocationStore, ALLOCATION_KEY};
pub use file_io::{read_json, write_json_atomic};
pub use local_store::LocalStore;
pub use session::{Password, Session, SessionStore, SessionUser};

use crate::config::paths::FinboardPaths;
use crate::error::FinboardResult;

/// Main storage coordinator handing out the typed stores
pub struct Storage {
    paths: FinboardPaths,
    pub allocation: AllocationStore,
    pub session: SessionStore,
}

impl Storage {
    /// Create a new Storage instance, creating the data directory if needed
    pub fn new(paths: FinboardPaths) -> FinboardResult<Self> {
        paths.ensure_directories()?;

        let local = LocalStore::new(paths.local_store_file());
        Ok(Self {
            allocation: AllocationStore::new(local.clone()),
            session: SessionStore::new(local),
            paths,
        })
    }

    pub fn paths(&self) -> &FinboardPaths {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinboardPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(storage.session.load().is_none());
    }

    #[test]
    fn test_stores_share_one_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinboardPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        storage
            .allocation
            .validate_and_save(60.0, 20.0, 10.0, 10.0)
            .unwrap();
        storage
            .session
            .save(&Session {
                token: "t".into(),
                user: SessionUser {
                    username: "u".into(),
                    first_name: None,
                },
            })
            .unwrap();

        let raw = std::fs::read_to_string(storage.paths().local_store_file()).unwrap();
        assert!(raw.contains(ALLOCATION_KEY));
        assert!(raw.contains("authToken"));
    }
}
