//! AddressList Store
//!
//! Named lists of normalized addresses backed by a [`Storage`] capability.
//!
//! Every mutation is a full read-modify-write of the list. Without
//! serialization two concurrent writers race and the later write wins for
//! the whole list. [`AddressListStore::with_serialized_writes`] opts into a
//! per-list async mutex that closes that window inside one process.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, error, info, warn};

use crate::models::config::AppConfig;
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::{Address, ListMutation, ListName, MutationOutcome};
use crate::storage::{EnvSwitchedStorage, FileStorage, Storage};

/// List store over a pluggable storage backend
#[derive(Clone)]
pub struct AddressListStore {
    storage: Arc<dyn Storage>,
    write_locks: Option<Arc<DashMap<ListName, Arc<Mutex<()>>>>>,
}

impl AddressListStore {
    /// Store with last-write-wins semantics
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            write_locks: None,
        }
    }

    /// File-backed store under `config.data_dir`, switching to ephemeral
    /// writes whenever the configured deployment flag is set
    pub fn from_config(config: &AppConfig) -> Self {
        let storage = EnvSwitchedStorage::new(
            FileStorage::new(config.data_dir.clone()),
            config.ephemeral_flag.clone(),
        );
        let store = Self::new(Arc::new(storage));
        if config.serialize_writes {
            store.with_serialized_writes()
        } else {
            store
        }
    }

    /// Serialize mutations per list name
    pub fn with_serialized_writes(mut self) -> Self {
        self.write_locks = Some(Arc::new(DashMap::new()));
        self
    }

    pub fn serializes_writes(&self) -> bool {
        self.write_locks.is_some()
    }

    // ============================================
    // Reads
    // ============================================

    /// Current contents in insertion order. Fails open: a missing list is
    /// empty (warned), an unreadable or malformed one is empty (logged as error).
    pub async fn load(&self, list: ListName) -> Vec<Address> {
        match self.storage.read(list).await {
            Ok(Some(contents)) => match parse_list(&contents) {
                Ok(addresses) => addresses,
                Err(e) => {
                    error!(list = %list, "❌ Malformed list data, treating as empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => {
                warn!(
                    list = %list,
                    "📭 No stored data for list, returning empty list. \
                     Commit the list file (e.g. with '[]') if it should ship with the deployment."
                );
                Vec::new()
            }
            Err(e) => {
                error!(list = %list, "❌ Failed to read list, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Alias of [`load`](Self::load) for list-maintenance callers
    pub async fn list(&self, list: ListName) -> Vec<Address> {
        self.load(list).await
    }

    /// Case-insensitive membership. Empty input is never a member.
    pub async fn contains(&self, list: ListName, address: &str) -> bool {
        let Some(probe) = Address::normalize(address) else {
            return false;
        };
        self.load(list).await.contains(&probe)
    }

    // ============================================
    // Mutations
    // ============================================

    /// Append `address` unless an equal (case-insensitive) entry exists.
    pub async fn add(&self, list: ListName, address: &str) -> AppResult<ListMutation> {
        let address = Address::parse_strict(address)?;
        let _guard = self.lock(list).await;

        let mut snapshot = self.read_for_update(list).await?;
        if snapshot.contains(&address) {
            debug!(list = %list, address = %address, "address already present");
            return Ok(ListMutation {
                list,
                address,
                outcome: MutationOutcome::AlreadyPresent,
                snapshot,
                warning: None,
            });
        }

        snapshot.push(address.clone());
        let warning = self.persist(list, &snapshot).await?;
        info!(list = %list, address = %address, size = snapshot.len(), "➕ address added");

        Ok(ListMutation {
            list,
            address,
            outcome: MutationOutcome::Added,
            snapshot,
            warning,
        })
    }

    /// Drop every case-insensitive match of `address`. Absent is not an error.
    pub async fn remove(&self, list: ListName, address: &str) -> AppResult<ListMutation> {
        let address = Address::normalize(address)
            .ok_or_else(|| AppError::invalid_input("Address cannot be empty."))?;
        let _guard = self.lock(list).await;

        let mut snapshot = self.read_for_update(list).await?;
        let before = snapshot.len();
        snapshot.retain(|entry| *entry != address);

        if snapshot.len() == before {
            debug!(list = %list, address = %address, "address not present");
            return Ok(ListMutation {
                list,
                address,
                outcome: MutationOutcome::NotPresent,
                snapshot,
                warning: None,
            });
        }

        let warning = self.persist(list, &snapshot).await?;
        info!(list = %list, address = %address, size = snapshot.len(), "➖ address removed");

        Ok(ListMutation {
            list,
            address,
            outcome: MutationOutcome::Removed,
            snapshot,
            warning,
        })
    }

    // ============================================
    // Internals
    // ============================================

    async fn lock(&self, list: ListName) -> Option<OwnedMutexGuard<()>> {
        let locks = self.write_locks.as_ref()?;
        let mutex = locks.entry(list).or_default().clone();
        Some(mutex.lock_owned().await)
    }

    /// Like `load`, but only "absent" is recovered; anything else aborts the mutation.
    async fn read_for_update(&self, list: ListName) -> AppResult<Vec<Address>> {
        match self.storage.read(list).await? {
            Some(contents) => parse_list(&contents).map_err(|e| {
                error!(list = %list, "❌ Cannot update malformed list: {}", e);
                AppError::with_source(
                    ErrorCode::PersistenceFailed,
                    format!("Could not read existing '{}' list data", list),
                    e,
                )
            }),
            None => {
                debug!(list = %list, "list not stored yet, it will be created");
                Ok(Vec::new())
            }
        }
    }

    async fn persist(&self, list: ListName, snapshot: &[Address]) -> AppResult<Option<String>> {
        let mut contents = serde_json::to_string_pretty(snapshot).map_err(|e| {
            AppError::persistence(format!("Could not serialize '{}' list: {}", list, e))
        })?;
        contents.push('\n');

        let persistence = self.storage.write(list, &contents).await?;
        Ok(persistence.warning().map(str::to_string))
    }
}

/// Parse a stored list, normalizing entries and keeping the first of any duplicates.
fn parse_list(contents: &str) -> Result<Vec<Address>, serde_json::Error> {
    let raw: Vec<String> = serde_json::from_str(contents)?;
    let mut addresses: Vec<Address> = Vec::with_capacity(raw.len());
    for entry in raw {
        if let Some(address) = Address::normalize(&entry) {
            if !addresses.contains(&address) {
                addresses.push(address);
            }
        }
    }
    Ok(addresses)
}
