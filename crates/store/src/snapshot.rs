//! JSON snapshot persistence.
//!
//! Convenience for embedding frontends (the CLI): the whole store is
//! written as one JSON file. No durability guarantees beyond a plain
//! write; anything stronger belongs to the embedding system.

use std::path::Path;
use tracing::debug;

use crate::{ProjectStore, Result};

impl ProjectStore {
    /// Load a store from a snapshot file. A missing file yields a fresh
    /// empty store; a malformed one is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let store = serde_json::from_str(&contents)?;
                debug!(path = %path.display(), "snapshot loaded");
                Ok(store)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no snapshot, starting fresh");
                Ok(Self::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Write the store to a snapshot file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!(path = %path.display(), "snapshot saved");
        Ok(())
    }
}
