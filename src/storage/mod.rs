//! Storage Module - Persistence Adapter
//!
//! List contents move through the [`Storage`] capability as serialized text.
//! Backends decide whether a write is durable:
//! - [`FileStorage`]: one JSON file per list, atomically replaced
//! - [`EphemeralStorage`]: in-memory only, every write carries a warning
//! - [`EnvSwitchedStorage`]: file-backed, but re-checks an environment flag on
//!   every write and skips the disk when the deployment is read-only

pub mod env_switched;
pub mod ephemeral;
pub mod file;

pub use env_switched::*;
pub use ephemeral::*;
pub use file::*;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::types::ListName;

/// How a write was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    /// Written to durable storage
    Durable,
    /// Held in memory only; the warning should be surfaced to the user
    Ephemeral { warning: String },
}

impl Persistence {
    pub fn warning(&self) -> Option<&str> {
        match self {
            Persistence::Durable => None,
            Persistence::Ephemeral { warning } => Some(warning),
        }
    }
}

/// Storage failures other than "list absent"
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read/write capability for serialized lists
#[async_trait]
pub trait Storage: Send + Sync {
    /// Serialized list, or `Ok(None)` when nothing is stored for it yet
    async fn read(&self, list: ListName) -> Result<Option<String>, StorageError>;

    /// Replace the stored list with `contents`
    async fn write(&self, list: ListName, contents: &str) -> Result<Persistence, StorageError>;
}
