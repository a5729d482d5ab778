//! Rug Hunter Library
//!
//! Solana token authority resolver and address-list classifier:
//! - Resolves the authority controlling a mint (metadata update authority,
//!   falling back to the base mint authority)
//! - Maintains normalized "rugged" and "good" address lists
//! - Classifies a mint's authority against both lists

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod storage;
pub mod utils;

pub use crate::core::{AddressListStore, AuthorityResolver, Classifier};
pub use models::{
    Address, AppConfig, AppError, AppResult, AuthorityType, ClassificationResult, ErrorCode,
    ErrorKind, ListMutation, ListName, ListOperation, MintAuthorityRecord, MutationOutcome,
    Verdict,
};
pub use providers::{LedgerAccount, LedgerClient, LedgerError, SolanaRpcClient};
pub use storage::{EnvSwitchedStorage, EphemeralStorage, FileStorage, Persistence, Storage};
pub use utils::pubkey::Pubkey;
