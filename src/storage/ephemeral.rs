//! In-memory backend for deployments without a writable filesystem

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::warn;

use super::{Persistence, Storage, StorageError};
use crate::models::types::ListName;
use crate::utils::constants::EPHEMERAL_WRITE_WARNING;

/// Lists held in process memory. Never touches the disk.
#[derive(Debug, Default)]
pub struct EphemeralStorage {
    lists: DashMap<ListName, String>,
}

impl EphemeralStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `contents` already stored for `list`
    pub fn with_list(self, list: ListName, contents: impl Into<String>) -> Self {
        self.lists.insert(list, contents.into());
        self
    }
}

#[async_trait]
impl Storage for EphemeralStorage {
    async fn read(&self, list: ListName) -> Result<Option<String>, StorageError> {
        Ok(self.lists.get(&list).map(|entry| entry.value().clone()))
    }

    async fn write(&self, list: ListName, contents: &str) -> Result<Persistence, StorageError> {
        self.lists.insert(list, contents.to_string());
        warn!(list = %list, "⚠️ {}", EPHEMERAL_WRITE_WARNING);
        Ok(Persistence::Ephemeral {
            warning: EPHEMERAL_WRITE_WARNING.to_string(),
        })
    }
}
