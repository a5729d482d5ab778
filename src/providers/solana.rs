//! Solana Provider Module
//!
//! JSON-RPC access to Solana account data:
//! - `getAccountInfo` with base64 encoding at `confirmed` commitment
//! - Exponential backoff with jitter on HTTP 429, 5xx and transport errors
//! - Gzip-compressed responses
//!
//! Timeouts for a whole fetch (retries included) are applied by the caller;
//! the HTTP client carries the same bound per request.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use eyre::{eyre, Result};
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{LedgerAccount, LedgerClient, LedgerError};
use crate::models::config::AppConfig;
use crate::utils::constants::{
    BASE_RETRY_MS, MAX_RETRY_MS, RETRY_JITTER_PERCENT, USER_AGENT as USER_AGENT_CONST,
};
use crate::utils::pubkey::Pubkey;

// ============================================
// SOLANA RPC TYPES
// ============================================

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// `getAccountInfo` result envelope
#[derive(Debug, Deserialize)]
struct AccountInfoResult {
    value: Option<RpcAccount>,
}

/// Account as encoded by the RPC node
#[derive(Debug, Deserialize)]
struct RpcAccount {
    lamports: u64,
    owner: String,
    /// `[payload, encoding]`
    data: (String, String),
}

impl RpcAccount {
    fn into_ledger_account(self) -> Result<LedgerAccount, LedgerError> {
        let (payload, encoding) = self.data;
        if encoding != "base64" {
            return Err(LedgerError::InvalidResponse(format!(
                "unexpected account encoding '{}'",
                encoding
            )));
        }
        let data = STANDARD
            .decode(payload.as_bytes())
            .map_err(|e| LedgerError::InvalidResponse(format!("bad base64 account data: {}", e)))?;
        let owner = self
            .owner
            .parse()
            .map_err(|e| LedgerError::InvalidResponse(format!("bad owner key: {}", e)))?;

        Ok(LedgerAccount {
            owner,
            lamports: self.lamports,
            data,
        })
    }
}

// ============================================
// SOLANA RPC CLIENT
// ============================================

/// Solana JSON-RPC client
#[derive(Clone)]
pub struct SolanaRpcClient {
    rpc_url: String,
    client: reqwest::Client,
    max_retries: u32,
    timeout: Duration,
}

impl SolanaRpcClient {
    /// Create a client from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        if config.rpc_url.trim().is_empty() {
            return Err(eyre!("Solana RPC endpoint is empty"));
        }

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_CONST));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.rpc_timeout)
            .gzip(true)
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            rpc_url: config.rpc_url.clone(),
            client,
            max_retries: config.rpc_max_retries,
            timeout: config.rpc_timeout,
        })
    }

    /// Execute JSON-RPC call with exponential backoff
    async fn call<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, LedgerError> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        let mut attempt = 0;
        loop {
            match self.execute_call::<T>(&payload).await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = backoff_delay(attempt);
                    warn!(
                        method,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "⏳ {}, retrying",
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Execute single RPC call
    async fn execute_call<T: for<'de> Deserialize<'de>>(
        &self,
        payload: &serde_json::Value,
    ) -> Result<T, LedgerError> {
        let response = self
            .client
            .post(&self.rpc_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(LedgerError::RateLimited);
        }
        if !status.is_success() {
            return Err(LedgerError::Http(status.as_u16()));
        }

        let body: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| LedgerError::InvalidResponse(e.to_string()))?;

        if let Some(error) = body.error {
            return Err(LedgerError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        body.result
            .ok_or_else(|| LedgerError::InvalidResponse("no result in response".to_string()))
    }

    fn map_transport_error(&self, err: reqwest::Error) -> LedgerError {
        if err.is_timeout() {
            LedgerError::Timeout(self.timeout)
        } else {
            LedgerError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl LedgerClient for SolanaRpcClient {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<LedgerAccount>, LedgerError> {
        debug!("📡 getAccountInfo {}", address);

        let params = serde_json::json!([
            address.to_string(),
            {"encoding": "base64", "commitment": "confirmed"}
        ]);
        let result: AccountInfoResult = self.call("getAccountInfo", params).await?;

        result.value.map(RpcAccount::into_ledger_account).transpose()
    }
}

/// Exponential backoff with ±jitter, capped
fn backoff_delay(attempt: u32) -> Duration {
    let base_delay = BASE_RETRY_MS.saturating_mul(2_u64.saturating_pow(attempt.saturating_sub(1)));
    let capped_delay = base_delay.min(MAX_RETRY_MS);

    let jitter_range = (capped_delay * RETRY_JITTER_PERCENT) / 100;
    let jitter: i64 =
        rand::thread_rng().gen_range(-(jitter_range as i64)..=(jitter_range as i64));
    Duration::from_millis((capped_delay as i64 + jitter).max(50) as u64)
}
