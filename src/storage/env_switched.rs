//! File-backed storage that honours a read-only deployment flag
//!
//! Serverless hosts ship the data directory inside a read-only bundle. When
//! the configured env flag is set, writes are skipped and reported as
//! ephemeral; reads still come from the bundled files. The flag is looked up
//! on every write because one process may serve differently configured
//! invocations.

use async_trait::async_trait;
use tracing::warn;

use super::{FileStorage, Persistence, Storage, StorageError};
use crate::models::types::ListName;
use crate::utils::constants::EPHEMERAL_WRITE_WARNING;

#[derive(Debug, Clone)]
pub struct EnvSwitchedStorage {
    durable: FileStorage,
    flag: String,
}

impl EnvSwitchedStorage {
    pub fn new(durable: FileStorage, flag: impl Into<String>) -> Self {
        Self {
            durable,
            flag: flag.into(),
        }
    }

    /// True when the flag is set to a non-empty value right now
    pub fn is_ephemeral(&self) -> bool {
        std::env::var_os(&self.flag).is_some_and(|v| !v.is_empty())
    }
}

#[async_trait]
impl Storage for EnvSwitchedStorage {
    async fn read(&self, list: ListName) -> Result<Option<String>, StorageError> {
        self.durable.read(list).await
    }

    async fn write(&self, list: ListName, contents: &str) -> Result<Persistence, StorageError> {
        if self.is_ephemeral() {
            warn!(list = %list, flag = %self.flag, "⚠️ {}", EPHEMERAL_WRITE_WARNING);
            return Ok(Persistence::Ephemeral {
                warning: EPHEMERAL_WRITE_WARNING.to_string(),
            });
        }
        self.durable.write(list, contents).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_flag_is_rechecked_per_write() {
        let dir = std::env::temp_dir().join(format!("rug-hunter-env-{}", Uuid::new_v4()));
        // Unique flag name so parallel tests never observe it
        let flag = format!("RUG_HUNTER_TEST_EPHEMERAL_{}", Uuid::new_v4().simple());
        let storage = EnvSwitchedStorage::new(FileStorage::new(&dir), flag.clone());

        assert!(!storage.is_ephemeral());
        let persistence = storage.write(ListName::Rugged, "[\"a\"]\n").await.unwrap();
        assert_eq!(persistence, Persistence::Durable);

        std::env::set_var(&flag, "1");
        let persistence = storage.write(ListName::Rugged, "[\"b\"]\n").await.unwrap();
        assert!(persistence.warning().is_some());
        // disk still holds the durable write
        assert_eq!(
            storage.read(ListName::Rugged).await.unwrap().as_deref(),
            Some("[\"a\"]\n")
        );

        std::env::remove_var(&flag);
        assert!(!storage.is_ephemeral());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
