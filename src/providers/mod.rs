//! Providers Module - External Data Sources
//!
//! The ledger is reached through [`LedgerClient`]; the resolver never talks
//! HTTP directly, so tests substitute an in-process ledger.

pub mod solana;

pub use solana::*;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::utils::pubkey::Pubkey;

/// Raw account as returned by the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerAccount {
    /// Program that owns the account
    pub owner: Pubkey,
    pub lamports: u64,
    /// Raw account bytes
    pub data: Vec<u8>,
}

/// Ledger query failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("ledger request timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("rate limited (HTTP 429)")]
    RateLimited,
    #[error("HTTP error: {0}")]
    Http(u16),
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("invalid RPC response: {0}")]
    InvalidResponse(String),
}

impl LedgerError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Transient failures worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::RateLimited => true,
            Self::Http(status) => *status >= 500,
            _ => false,
        }
    }
}

/// "Get account bytes at address"
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// `Ok(None)` when no account exists at `address`
    async fn get_account(&self, address: &Pubkey) -> Result<Option<LedgerAccount>, LedgerError>;
}
