//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use dashmap::DashMap;
use rug_hunter::storage::{EphemeralStorage, Persistence, Storage, StorageError};
use rug_hunter::utils::decoder::{MetadataHeader, MintInfo};
use rug_hunter::utils::pubkey::{Pubkey, METADATA_PROGRAM_ID, TOKEN_PROGRAM_ID};
use rug_hunter::{AddressListStore, AuthorityResolver, FileStorage, LedgerAccount, LedgerClient, LedgerError, ListName};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Barrier;
use uuid::Uuid;

/// Wrapped SOL mint: a real 43-character address
pub const SO1_ADDRESS: &str = "So11111111111111111111111111111111111111112";

/// Distinct keys whose base-58 form is 44 characters
pub fn test_key(n: u8) -> Pubkey {
    Pubkey::new_from_array([0x80 | n; 32])
}

/// Unique scratch directory under the system temp dir
pub fn temp_data_dir() -> PathBuf {
    std::env::temp_dir().join(format!("rug-hunter-test-{}", Uuid::new_v4()))
}

pub fn file_store(dir: &PathBuf) -> AddressListStore {
    AddressListStore::new(Arc::new(FileStorage::new(dir.clone())))
}

// ============================================
// Mock ledger
// ============================================

/// In-process ledger that records every fetch
#[derive(Default)]
pub struct MockLedger {
    accounts: DashMap<Pubkey, LedgerAccount>,
    calls: AtomicUsize,
    fetched: Mutex<Vec<Pubkey>>,
    delay: Option<Duration>,
    failure: Option<LedgerError>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, address: Pubkey, owner: Pubkey, data: Vec<u8>) -> Self {
        self.accounts.insert(
            address,
            LedgerAccount {
                owner,
                lamports: 1_461_600,
                data,
            },
        );
        self
    }

    /// Metadata account at the mint's PDA
    pub fn with_metadata(self, mint: Pubkey, update_authority: Option<Pubkey>) -> Self {
        let pda = AuthorityResolver::metadata_address(&mint).unwrap();
        let data = MetadataHeader {
            update_authority,
            mint,
        }
        .encode();
        self.with_account(pda, METADATA_PROGRAM_ID, data)
    }

    /// Raw bytes at the mint's metadata PDA
    pub fn with_metadata_bytes(self, mint: Pubkey, data: Vec<u8>) -> Self {
        let pda = AuthorityResolver::metadata_address(&mint).unwrap();
        self.with_account(pda, METADATA_PROGRAM_ID, data)
    }

    /// Initialized SPL mint owned by the Token program
    pub fn with_mint(self, mint: Pubkey, mint_authority: Option<Pubkey>) -> Self {
        let data = MintInfo {
            mint_authority,
            supply: 1_000_000_000,
            decimals: 6,
            is_initialized: true,
            freeze_authority: None,
        }
        .encode();
        self.with_account(mint, TOKEN_PROGRAM_ID, data)
    }

    /// Every fetch sleeps first
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every fetch fails with `err`
    pub fn failing(mut self, err: LedgerError) -> Self {
        self.failure = Some(err);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fetched(&self) -> Vec<Pubkey> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<LedgerAccount>, LedgerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.fetched.lock().unwrap().push(*address);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.accounts.get(address).map(|entry| entry.value().clone()))
    }
}

pub fn resolver_over(ledger: Arc<MockLedger>) -> AuthorityResolver {
    AuthorityResolver::new(ledger, Duration::from_secs(5))
}

// ============================================
// Storage that forces overlapping read-modify-write cycles
// ============================================

/// Every read waits until `parties` readers have arrived
pub struct BarrierStorage {
    pub inner: Arc<EphemeralStorage>,
    barrier: Barrier,
}

impl BarrierStorage {
    pub fn new(inner: Arc<EphemeralStorage>, parties: usize) -> Self {
        Self {
            inner,
            barrier: Barrier::new(parties),
        }
    }
}

#[async_trait]
impl Storage for BarrierStorage {
    async fn read(&self, list: ListName) -> Result<Option<String>, StorageError> {
        let contents = self.inner.read(list).await;
        self.barrier.wait().await;
        contents
    }

    async fn write(&self, list: ListName, contents: &str) -> Result<Persistence, StorageError> {
        self.inner.write(list, contents).await
    }
}
