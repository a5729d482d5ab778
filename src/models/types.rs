//! Type definitions for Rug Hunter
//! Core data structures for list maintenance, authority resolution and classification

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::AppError;
use crate::utils::constants::{
    BASE58_ALPHABET, GOOD_LIST_FILE, MAX_ADDRESS_LEN, MIN_ADDRESS_LEN, RUGGED_LIST_FILE,
};
use crate::utils::pubkey::Pubkey;

// ============================================
// Address
// ============================================

/// Canonical (trimmed, lowercase) address as stored in and compared against lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Normalize a raw address. Returns `None` for empty or whitespace-only input.
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_lowercase()))
    }

    /// Normalize after checking the raw input is a 43-44 character base-58 string.
    pub fn parse_strict(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if !is_base58_address_syntax(trimmed) {
            return Err(AppError::invalid_input(format!(
                "Invalid Solana address format: '{}'. Must be {}-{} Base58 characters.",
                trimmed, MIN_ADDRESS_LEN, MAX_ADDRESS_LEN
            )));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&Pubkey> for Address {
    fn from(key: &Pubkey) -> Self {
        Self(key.to_string().to_lowercase())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Address::normalize(&raw).ok_or_else(|| serde::de::Error::custom("empty address"))
    }
}

/// 43-44 characters from the base-58 alphabet
pub fn is_base58_address_syntax(raw: &str) -> bool {
    (MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&raw.len())
        && raw.chars().all(|c| BASE58_ALPHABET.contains(c))
}

// ============================================
// Lists
// ============================================

/// Named address lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListName {
    /// Addresses reported as tied to a scam or exit event
    Rugged,
    /// Addresses observed as benign
    Good,
}

impl ListName {
    pub const ALL: [ListName; 2] = [ListName::Rugged, ListName::Good];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListName::Rugged => "rugged",
            ListName::Good => "good",
        }
    }

    /// Backing file name inside the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            ListName::Rugged => RUGGED_LIST_FILE,
            ListName::Good => GOOD_LIST_FILE,
        }
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rugged" => Ok(ListName::Rugged),
            "good" => Ok(ListName::Good),
            other => Err(AppError::invalid_input(format!(
                "Unknown list '{}'. Expected 'rugged' or 'good'.",
                other
            ))),
        }
    }
}

/// List mutation operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListOperation {
    Add,
    Remove,
}

/// Outcome of a list mutation. The idempotent outcomes are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationOutcome {
    Added,
    AlreadyPresent,
    Removed,
    NotPresent,
}

impl MutationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationOutcome::Added => "added",
            MutationOutcome::AlreadyPresent => "already_present",
            MutationOutcome::Removed => "removed",
            MutationOutcome::NotPresent => "not_present",
        }
    }

    /// Whether the list changed
    pub fn changed(&self) -> bool {
        matches!(self, MutationOutcome::Added | MutationOutcome::Removed)
    }
}

/// Result of `add`/`remove`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMutation {
    pub list: ListName,
    pub address: Address,
    pub outcome: MutationOutcome,
    /// List contents after the operation
    pub snapshot: Vec<Address>,
    /// Set when the change was held in memory only
    pub warning: Option<String>,
}

impl ListMutation {
    /// `add` convenience: true when the address was appended
    pub fn added(&self) -> bool {
        self.outcome == MutationOutcome::Added
    }

    /// `remove` convenience: true when at least one entry was filtered out
    pub fn removed(&self) -> bool {
        self.outcome == MutationOutcome::Removed
    }

    pub fn reason(&self) -> &'static str {
        self.outcome.as_str()
    }
}

// ============================================
// Resolution
// ============================================

/// Which authority field the resolver settled on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthorityType {
    /// Update authority of the token metadata account
    UpdateAuthority,
    /// Mint authority of the base mint account
    MintAuthority,
}

impl AuthorityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorityType::UpdateAuthority => "updateAuthority",
            AuthorityType::MintAuthority => "mintAuthority",
        }
    }
}

/// Resolved controlling authority of a mint. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintAuthorityRecord {
    pub mint_address: Pubkey,
    pub authority_type: AuthorityType,
    /// `None` when the mint authority has been revoked
    pub authority: Option<Pubkey>,
}

// ============================================
// Classification
// ============================================

/// Classification of a resolved authority against the lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Authority is on the rugged list (wins over good)
    Rugged,
    /// Authority is on the good list only
    Good,
    /// Authority is on neither list
    Unknown,
    /// Mint has no authority (revoked / immutable)
    NotApplicable,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Rugged => "Rugged",
            Verdict::Good => "Good",
            Verdict::Unknown => "Unknown",
            Verdict::NotApplicable => "NotApplicable",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Verdict::Rugged => "💀",
            Verdict::Good => "✅",
            Verdict::Unknown => "❔",
            Verdict::NotApplicable => "➖",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification outcome. Failures to classify are `AppError`s, never a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Normalized authority, `None` for `NotApplicable`
    pub authority: Option<Address>,
    pub verdict: Verdict,
    /// The resolution the verdict was computed from
    pub record: MintAuthorityRecord,
}
