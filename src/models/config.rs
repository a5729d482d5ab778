//! Configuration module for Rug Hunter
//!
//! Every component receives its settings through [`AppConfig`]; nothing
//! reads a process-wide path or endpoint on its own. Defaults live in
//! `utils/constants.rs`.

use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::utils::constants::{
    DEFAULT_DATA_DIR, DEFAULT_EPHEMERAL_FLAG, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_RPC_ENDPOINT,
    DEFAULT_RPC_MAX_RETRIES, DEFAULT_RPC_TIMEOUT_MS, ENV_DATA_DIR, ENV_EPHEMERAL_FLAG, ENV_HOST,
    ENV_PORT, ENV_RPC_ENDPOINT, ENV_RPC_MAX_RETRIES, ENV_RPC_TIMEOUT_MS, ENV_SERIALIZE_WRITES,
};

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding `rugged-wallets.json` / `good-wallets.json`
    pub data_dir: PathBuf,
    /// Ledger JSON-RPC endpoint
    pub rpc_url: String,
    /// Upper bound for each ledger fetch
    pub rpc_timeout: Duration,
    /// Retries on HTTP 429 / transport failures
    pub rpc_max_retries: u32,
    /// Env flag whose presence switches list writes to ephemeral mode
    pub ephemeral_flag: String,
    /// Serialize mutations per list (off = last write wins)
    pub serialize_writes: bool,
    /// API bind host
    pub host: String,
    /// API bind port
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            rpc_url: DEFAULT_RPC_ENDPOINT.to_string(),
            rpc_timeout: Duration::from_millis(DEFAULT_RPC_TIMEOUT_MS),
            rpc_max_retries: DEFAULT_RPC_MAX_RETRIES,
            ephemeral_flag: DEFAULT_EPHEMERAL_FLAG.to_string(),
            serialize_writes: false,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Load from environment, falling back to defaults for unset or unparsable values
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Hosting platforms inject PORT; RUG_HUNTER_PORT is for local runs
        let port = non_empty("PORT")
            .or_else(|| non_empty(ENV_PORT))
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let config = Self {
            data_dir: non_empty(ENV_DATA_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            rpc_url: non_empty(ENV_RPC_ENDPOINT).unwrap_or(defaults.rpc_url),
            rpc_timeout: non_empty(ENV_RPC_TIMEOUT_MS)
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.rpc_timeout),
            rpc_max_retries: non_empty(ENV_RPC_MAX_RETRIES)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rpc_max_retries),
            ephemeral_flag: non_empty(ENV_EPHEMERAL_FLAG).unwrap_or(defaults.ephemeral_flag),
            serialize_writes: non_empty(ENV_SERIALIZE_WRITES)
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            host: non_empty(ENV_HOST).unwrap_or(defaults.host),
            port,
        };

        // The endpoint may embed an API key, so only the host is logged
        info!(
            data_dir = %config.data_dir.display(),
            rpc_host = %rpc_host(&config.rpc_url),
            timeout_ms = config.rpc_timeout.as_millis() as u64,
            serialize_writes = config.serialize_writes,
            "⚙️ Configuration loaded"
        );

        config
    }
}

fn rpc_host(url: &str) -> &str {
    url.split("://")
        .nth(1)
        .and_then(|rest| rest.split('/').next())
        .unwrap_or("unknown")
}
