//! Constants Module - Single Source of Truth
//!
//! Program ids, file names, environment variable names and defaults used
//! across the crate. No other module hardcodes these values.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "RugHunter";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for HTTP requests
pub const USER_AGENT: &str = concat!("RugHunter/", env!("CARGO_PKG_VERSION"));

// ============================================
// SOLANA PROGRAM IDS
// ============================================

/// Metaplex Token Metadata program
pub const METADATA_PROGRAM: &str = "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s";

/// SPL Token program
pub const TOKEN_PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// Token-2022 program
pub const TOKEN_2022_PROGRAM: &str = "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb";

/// First seed of the metadata PDA
pub const METADATA_SEED: &[u8] = b"metadata";

/// Marker appended when hashing program-derived addresses
pub const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Maximum number of seeds for a program-derived address
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed
pub const MAX_SEED_LEN: usize = 32;

// ============================================
// ACCOUNT LAYOUTS
// ============================================

/// Size of an SPL mint account (Token-2022 mints may be longer)
pub const MINT_ACCOUNT_LEN: usize = 82;

/// Metadata account discriminator for MetadataV1
pub const METADATA_V1_KEY: u8 = 4;

/// Key byte + update authority + mint
pub const METADATA_HEADER_LEN: usize = 1 + 32 + 32;

// ============================================
// ADDRESS SYNTAX
// ============================================

/// Base-58 alphabet (no 0, O, I, l)
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Shortest accepted list address
pub const MIN_ADDRESS_LEN: usize = 43;

/// Longest accepted list address
pub const MAX_ADDRESS_LEN: usize = 44;

// ============================================
// LIST STORAGE
// ============================================

/// Backing file of the rugged list
pub const RUGGED_LIST_FILE: &str = "rugged-wallets.json";

/// Backing file of the good list
pub const GOOD_LIST_FILE: &str = "good-wallets.json";

/// Notice returned when a mutation is held in memory only
pub const EPHEMERAL_WRITE_WARNING: &str = "Changes were applied in memory only. \
     This deployment has no persistent filesystem, so they may not persist across requests or deployments.";

// ============================================
// ENVIRONMENT
// ============================================

pub const ENV_DATA_DIR: &str = "RUG_HUNTER_DATA_DIR";
pub const ENV_RPC_ENDPOINT: &str = "SOLANA_RPC_ENDPOINT";
pub const ENV_RPC_TIMEOUT_MS: &str = "RUG_HUNTER_RPC_TIMEOUT_MS";
pub const ENV_RPC_MAX_RETRIES: &str = "RUG_HUNTER_RPC_MAX_RETRIES";
pub const ENV_EPHEMERAL_FLAG: &str = "RUG_HUNTER_EPHEMERAL_FLAG";
pub const ENV_SERIALIZE_WRITES: &str = "RUG_HUNTER_SERIALIZE_WRITES";
pub const ENV_HOST: &str = "RUG_HUNTER_HOST";
pub const ENV_PORT: &str = "RUG_HUNTER_PORT";

// ============================================
// DEFAULTS
// ============================================

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_RPC_ENDPOINT: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_RPC_MAX_RETRIES: u32 = 3;

/// Env flag whose presence marks a serverless deployment with a read-only bundle
pub const DEFAULT_EPHEMERAL_FLAG: &str = "VERCEL";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

// ============================================
// RPC RETRY
// ============================================

/// Base retry delay in milliseconds
pub const BASE_RETRY_MS: u64 = 250;

/// Maximum retry delay in milliseconds
pub const MAX_RETRY_MS: u64 = 4_000;

/// Jitter percentage added to each retry delay
pub const RETRY_JITTER_PERCENT: u64 = 20;

// ============================================
// API
// ============================================

/// Requests per client per window
pub const RATE_LIMIT_REQUESTS: u32 = 100;

/// Rate limit window in seconds
pub const RATE_LIMIT_WINDOW_SECS: u64 = 60;
