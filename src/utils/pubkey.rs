//! Base-58 public keys and program-derived addresses
//!
//! Ledger addresses are 32-byte ed25519 public keys rendered in base-58.
//! A program-derived address (PDA) is the SHA-256 of a seed tuple, the
//! owning program id and a fixed marker, searched over a trailing bump seed
//! until the hash falls off the ed25519 curve.

use curve25519_dalek::edwards::CompressedEdwardsY;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::constants::{MAX_SEEDS, MAX_SEED_LEN, PDA_MARKER};

/// Errors from parsing keys or deriving addresses
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PubkeyError {
    #[error("address is empty")]
    Empty,
    #[error("address is not valid base58: {0}")]
    InvalidBase58(String),
    #[error("address decodes to {0} bytes, expected 32")]
    WrongLength(usize),
    #[error("seed tuple exceeds {MAX_SEEDS} seeds of {MAX_SEED_LEN} bytes")]
    MaxSeedLengthExceeded,
    #[error("derived address lies on the ed25519 curve")]
    InvalidSeeds,
    #[error("no viable bump seed found")]
    NoViableBump,
}

/// 32-byte ledger address
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pubkey([u8; 32]);

/// Token Metadata program (`metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s`)
pub const METADATA_PROGRAM_ID: Pubkey = Pubkey::new_from_array([
    11, 112, 101, 177, 227, 209, 124, 69, 56, 157, 82, 127, 107, 4, 195, 205, 88, 184, 108, 115,
    26, 160, 253, 181, 73, 182, 209, 188, 3, 248, 41, 70,
]);

/// SPL Token program (`TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`)
pub const TOKEN_PROGRAM_ID: Pubkey = Pubkey::new_from_array([
    6, 221, 246, 225, 215, 101, 161, 147, 217, 203, 225, 70, 206, 235, 121, 172, 28, 180, 133,
    237, 95, 91, 55, 145, 58, 140, 245, 133, 126, 255, 0, 169,
]);

/// Token-2022 program (`TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb`)
pub const TOKEN_2022_PROGRAM_ID: Pubkey = Pubkey::new_from_array([
    6, 221, 246, 225, 238, 117, 143, 222, 24, 66, 93, 188, 228, 108, 205, 218, 182, 26, 252, 77,
    131, 185, 13, 39, 254, 189, 249, 40, 216, 161, 139, 252,
]);

impl Pubkey {
    pub const fn new_from_array(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// All-zero key, used on-chain as "no authority"
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Whether the bytes decompress to a valid ed25519 point
    pub fn is_on_curve(&self) -> bool {
        CompressedEdwardsY(self.0).decompress().is_some()
    }

    /// Hash `seeds` under `program_id` into an off-curve address.
    pub fn create_program_address(
        seeds: &[&[u8]],
        program_id: &Pubkey,
    ) -> Result<Pubkey, PubkeyError> {
        if seeds.len() > MAX_SEEDS {
            return Err(PubkeyError::MaxSeedLengthExceeded);
        }
        if seeds.iter().any(|seed| seed.len() > MAX_SEED_LEN) {
            return Err(PubkeyError::MaxSeedLengthExceeded);
        }

        let mut hasher = Sha256::new();
        for seed in seeds {
            hasher.update(seed);
        }
        hasher.update(program_id.as_ref());
        hasher.update(PDA_MARKER);
        let hash: [u8; 32] = hasher.finalize().into();

        let candidate = Pubkey(hash);
        if candidate.is_on_curve() {
            return Err(PubkeyError::InvalidSeeds);
        }
        Ok(candidate)
    }

    /// Search bump seeds from 255 down and return the first off-curve address.
    pub fn find_program_address(
        seeds: &[&[u8]],
        program_id: &Pubkey,
    ) -> Result<(Pubkey, u8), PubkeyError> {
        for bump in (0..=u8::MAX).rev() {
            let bump_seed = [bump];
            let mut seeds_with_bump: Vec<&[u8]> = seeds.to_vec();
            seeds_with_bump.push(&bump_seed);

            match Self::create_program_address(&seeds_with_bump, program_id) {
                Ok(address) => return Ok((address, bump)),
                Err(PubkeyError::InvalidSeeds) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(PubkeyError::NoViableBump)
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Pubkey {
    type Err = PubkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PubkeyError::Empty);
        }
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| PubkeyError::InvalidBase58(e.to_string()))?;
        let array: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| PubkeyError::WrongLength(bytes.len()))?;
        Ok(Self(array))
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({})", self)
    }
}

impl Serialize for Pubkey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pubkey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
