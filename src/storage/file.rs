//! Durable JSON-file backend

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

use super::{Persistence, Storage, StorageError};
use crate::models::types::ListName;

/// One file per list inside `data_dir`
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Backing file of `list`
    pub fn path_for(&self, list: ListName) -> PathBuf {
        self.data_dir.join(list.file_name())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn read(&self, list: ListName) -> Result<Option<String>, StorageError> {
        let path = self.path_for(list);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    async fn write(&self, list: ListName, contents: &str) -> Result<Persistence, StorageError> {
        let path = self.path_for(list);

        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|source| StorageError::Write {
                path: self.data_dir.clone(),
                source,
            })?;

        // Write a sibling temp file, then rename over the target
        let tmp = self
            .data_dir
            .join(format!(".{}.{}.tmp", list.file_name(), Uuid::new_v4()));
        if let Err(source) = tokio::fs::write(&tmp, contents).await {
            return Err(StorageError::Write { path: tmp, source });
        }
        if let Err(source) = tokio::fs::rename(&tmp, &path).await {
            if let Err(e) = tokio::fs::remove_file(&tmp).await {
                warn!(path = %tmp.display(), "failed to clean up temp file: {}", e);
            }
            return Err(StorageError::Write { path, source });
        }

        debug!(list = %list, path = %path.display(), bytes = contents.len(), "💾 list written");
        Ok(Persistence::Durable)
    }
}
