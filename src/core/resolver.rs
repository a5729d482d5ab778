//! Authority Resolver
//!
//! Finds the address that controls a mint through an ordered fallback chain:
//!
//! 1. Token metadata account at the PDA `("metadata", metadata_program, mint)`.
//!    If it exists, decodes, and carries an update authority, that wins.
//! 2. Otherwise the base mint account, whose mint authority (possibly
//!    revoked) is returned.
//!
//! A metadata account that is missing or does not decode is not an error,
//! many valid mints simply have none. Network failures at either stage are.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::models::config::AppConfig;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{AuthorityType, MintAuthorityRecord};
use crate::providers::{LedgerAccount, LedgerClient, SolanaRpcClient};
use crate::utils::constants::METADATA_SEED;
use crate::utils::decoder::{AccountDecoder, DecodeError};
use crate::utils::pubkey::{Pubkey, METADATA_PROGRAM_ID, TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID};

/// Outcome of one fallback stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage<T> {
    /// The stage produced an answer; later stages are skipped
    Resolved(T),
    /// The stage had nothing to say; try the next one
    Fallthrough(FallthroughReason),
}

/// Why the metadata stage handed over to the mint stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallthroughReason {
    NoAccount,
    WrongOwner(Pubkey),
    Undecodable(DecodeError),
    NoUpdateAuthority,
}

impl fmt::Display for FallthroughReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAccount => write!(f, "no metadata account"),
            Self::WrongOwner(owner) => write!(f, "metadata PDA owned by {}", owner),
            Self::Undecodable(e) => write!(f, "metadata did not decode: {}", e),
            Self::NoUpdateAuthority => write!(f, "metadata has no update authority"),
        }
    }
}

/// Resolves mint authorities against a ledger
#[derive(Clone)]
pub struct AuthorityResolver {
    ledger: Arc<dyn LedgerClient>,
    timeout: Duration,
}

impl AuthorityResolver {
    /// `timeout` bounds each ledger fetch separately
    pub fn new(ledger: Arc<dyn LedgerClient>, timeout: Duration) -> Self {
        Self { ledger, timeout }
    }

    /// Resolver over the configured Solana RPC endpoint
    pub fn from_config(config: &AppConfig) -> eyre::Result<Self> {
        let client = SolanaRpcClient::new(config)?;
        Ok(Self::new(Arc::new(client), config.rpc_timeout))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Metadata PDA of `mint`
    pub fn metadata_address(mint: &Pubkey) -> AppResult<Pubkey> {
        let seeds: [&[u8]; 3] = [METADATA_SEED, METADATA_PROGRAM_ID.as_ref(), mint.as_ref()];
        Pubkey::find_program_address(&seeds, &METADATA_PROGRAM_ID)
            .map(|(address, _bump)| address)
            .map_err(|e| AppError::resolution(format!("Cannot derive metadata address: {}", e)))
    }

    /// Resolve with the configured timeout
    pub async fn resolve(&self, mint_address: &str) -> AppResult<MintAuthorityRecord> {
        self.resolve_with_timeout(mint_address, self.timeout).await
    }

    /// Resolve with a caller-supplied per-fetch timeout
    pub async fn resolve_with_timeout(
        &self,
        mint_address: &str,
        timeout: Duration,
    ) -> AppResult<MintAuthorityRecord> {
        let mint: Pubkey = mint_address.trim().parse().map_err(|e| {
            AppError::invalid_input(format!("Invalid mintAddress format: {}", e))
        })?;

        match self.metadata_stage(&mint, timeout).await? {
            Stage::Resolved(record) => {
                info!(mint = %mint, "🔑 update authority resolved from metadata");
                return Ok(record);
            }
            Stage::Fallthrough(reason) => {
                debug!(mint = %mint, %reason, "metadata stage fell through to mint account");
            }
        }

        let record = self.mint_stage(&mint, timeout).await?;
        info!(
            mint = %mint,
            revoked = record.authority.is_none(),
            "🔑 mint authority resolved from mint account"
        );
        Ok(record)
    }

    async fn metadata_stage(
        &self,
        mint: &Pubkey,
        timeout: Duration,
    ) -> AppResult<Stage<MintAuthorityRecord>> {
        let pda = Self::metadata_address(mint)?;
        let Some(account) = self.fetch(&pda, timeout, "metadata").await? else {
            return Ok(Stage::Fallthrough(FallthroughReason::NoAccount));
        };
        if account.owner != METADATA_PROGRAM_ID {
            return Ok(Stage::Fallthrough(FallthroughReason::WrongOwner(account.owner)));
        }

        let header = match AccountDecoder::decode_metadata(&account.data, mint) {
            Ok(header) => header,
            Err(e) => return Ok(Stage::Fallthrough(FallthroughReason::Undecodable(e))),
        };

        Ok(match header.update_authority {
            Some(authority) => Stage::Resolved(MintAuthorityRecord {
                mint_address: *mint,
                authority_type: AuthorityType::UpdateAuthority,
                authority: Some(authority),
            }),
            None => Stage::Fallthrough(FallthroughReason::NoUpdateAuthority),
        })
    }

    async fn mint_stage(&self, mint: &Pubkey, timeout: Duration) -> AppResult<MintAuthorityRecord> {
        let account = self
            .fetch(mint, timeout, "mint")
            .await?
            .ok_or_else(|| AppError::not_found(format!("Mint account not found for address: {}", mint)))?;

        if account.owner != TOKEN_PROGRAM_ID && account.owner != TOKEN_2022_PROGRAM_ID {
            return Err(AppError::resolution(format!(
                "Account {} is not a token mint (owner {})",
                mint, account.owner
            )));
        }

        let info = AccountDecoder::decode_mint(&account.data).map_err(|e| {
            AppError::resolution(format!("Error decoding SPL token mint {}: {}", mint, e))
        })?;

        Ok(MintAuthorityRecord {
            mint_address: *mint,
            authority_type: AuthorityType::MintAuthority,
            authority: info.mint_authority,
        })
    }

    /// One ledger fetch bounded by `timeout`
    async fn fetch(
        &self,
        address: &Pubkey,
        timeout: Duration,
        what: &str,
    ) -> AppResult<Option<LedgerAccount>> {
        match tokio::time::timeout(timeout, self.ledger.get_account(address)).await {
            Ok(result) => result.map_err(|e| {
                let mut err = AppError::from(e);
                err.message = format!("{} account fetch for {} failed: {}", what, address, err.message);
                err
            }),
            Err(_) => Err(AppError::timeout(format!(
                "{} account fetch for {} timed out after {}ms",
                what,
                address,
                timeout.as_millis()
            ))),
        }
    }
}
