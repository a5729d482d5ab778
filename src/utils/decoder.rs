//! Account Layout Decoder
//!
//! Decodes the two byte layouts the resolver needs:
//! - Token Metadata account (MetadataV1): `key | update_authority | mint | ...`
//! - SPL mint account: `COption<Pubkey> | u64 supply | u8 decimals | bool | COption<Pubkey>`
//!
//! Only the leading fixed-size fields are read; the variable-length tail of
//! a metadata account (name, symbol, uri, creators) is never touched.

use thiserror::Error;

use super::constants::{METADATA_HEADER_LEN, METADATA_V1_KEY, MINT_ACCOUNT_LEN};
use super::pubkey::Pubkey;

/// Layout decoding failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("account data is {actual} bytes, expected at least {expected}")]
    TooShort { expected: usize, actual: usize },
    #[error("unexpected account key {0}, expected MetadataV1")]
    WrongKey(u8),
    #[error("invalid COption tag {0}")]
    InvalidOptionTag(u32),
    #[error("metadata belongs to mint {found}, expected {expected}")]
    MintMismatch { expected: Pubkey, found: Pubkey },
    #[error("mint account is not initialized")]
    Uninitialized,
}

/// Leading fields of a metadata account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataHeader {
    /// `None` when the on-chain field is the all-zero key
    pub update_authority: Option<Pubkey>,
    pub mint: Pubkey,
}

/// Decoded SPL mint account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintInfo {
    pub mint_authority: Option<Pubkey>,
    pub supply: u64,
    pub decimals: u8,
    pub is_initialized: bool,
    pub freeze_authority: Option<Pubkey>,
}

/// Account layout decoder
pub struct AccountDecoder;

impl AccountDecoder {
    /// Decode a metadata account and check it describes `expected_mint`.
    pub fn decode_metadata(data: &[u8], expected_mint: &Pubkey) -> Result<MetadataHeader, DecodeError> {
        if data.len() < METADATA_HEADER_LEN {
            return Err(DecodeError::TooShort {
                expected: METADATA_HEADER_LEN,
                actual: data.len(),
            });
        }
        if data[0] != METADATA_V1_KEY {
            return Err(DecodeError::WrongKey(data[0]));
        }

        let update_authority = read_pubkey(&data[1..33]);
        let mint = read_pubkey(&data[33..65]);
        if mint != *expected_mint {
            return Err(DecodeError::MintMismatch {
                expected: *expected_mint,
                found: mint,
            });
        }

        Ok(MetadataHeader {
            update_authority: (!update_authority.is_zero()).then_some(update_authority),
            mint,
        })
    }

    /// Decode an SPL mint account. Token-2022 mints carry extensions after
    /// the base layout, so longer buffers are accepted.
    pub fn decode_mint(data: &[u8]) -> Result<MintInfo, DecodeError> {
        if data.len() < MINT_ACCOUNT_LEN {
            return Err(DecodeError::TooShort {
                expected: MINT_ACCOUNT_LEN,
                actual: data.len(),
            });
        }

        let mint_authority = read_coption_pubkey(&data[0..36])?;
        let supply = u64::from_le_bytes(slice_array(&data[36..44]));
        let decimals = data[44];
        let is_initialized = data[45] != 0;
        let freeze_authority = read_coption_pubkey(&data[46..82])?;

        if !is_initialized {
            return Err(DecodeError::Uninitialized);
        }

        Ok(MintInfo {
            mint_authority,
            supply,
            decimals,
            is_initialized,
            freeze_authority,
        })
    }
}

fn read_pubkey(bytes: &[u8]) -> Pubkey {
    Pubkey::new_from_array(slice_array(bytes))
}

fn read_coption_pubkey(bytes: &[u8]) -> Result<Option<Pubkey>, DecodeError> {
    let tag = u32::from_le_bytes(slice_array(&bytes[0..4]));
    match tag {
        0 => Ok(None),
        1 => Ok(Some(read_pubkey(&bytes[4..36]))),
        other => Err(DecodeError::InvalidOptionTag(other)),
    }
}

/// Copy a slice whose length the caller already checked.
fn slice_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}

// ============================================
// Encoders (fixtures for tests and mocks)
// ============================================

impl MetadataHeader {
    /// Encode as a minimal metadata account body.
    pub fn encode(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(METADATA_HEADER_LEN + 32);
        data.push(METADATA_V1_KEY);
        data.extend_from_slice(self.update_authority.unwrap_or_default().as_ref());
        data.extend_from_slice(self.mint.as_ref());
        // name length prefix, empty name
        data.extend_from_slice(&0u32.to_le_bytes());
        data
    }
}

impl MintInfo {
    /// Encode in the 82-byte SPL layout.
    pub fn encode(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(MINT_ACCOUNT_LEN);
        push_coption(&mut data, self.mint_authority);
        data.extend_from_slice(&self.supply.to_le_bytes());
        data.push(self.decimals);
        data.push(self.is_initialized as u8);
        push_coption(&mut data, self.freeze_authority);
        data
    }
}

fn push_coption(data: &mut Vec<u8>, key: Option<Pubkey>) {
    match key {
        Some(k) => {
            data.extend_from_slice(&1u32.to_le_bytes());
            data.extend_from_slice(k.as_ref());
        }
        None => {
            data.extend_from_slice(&0u32.to_le_bytes());
            data.extend_from_slice(&[0u8; 32]);
        }
    }
}
