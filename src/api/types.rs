//! API Request/Response Types

use serde::{Deserialize, Serialize};

use crate::models::errors::{AppError, ErrorKind};
use crate::models::types::{Address, ListMutation, ListName, ListOperation};

/// API Response wrapper
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Typed error body: `{ kind, code, detail }`
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    pub code: String,
    pub detail: String,
}

impl ApiError {
    pub fn rate_limited(retry_after: u64) -> Self {
        Self {
            kind: None,
            code: "RATE_LIMITED".to_string(),
            detail: format!("Rate limit exceeded. Retry after {} seconds", retry_after),
        }
    }
}

impl From<&AppError> for ApiError {
    fn from(err: &AppError) -> Self {
        Self {
            kind: Some(err.kind()),
            code: err.code_str().to_string(),
            detail: err.message.clone(),
        }
    }
}

// ============================================
// Authority / Classification
// ============================================

/// `GET /v1/authority?mintAddress=...`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorityQuery {
    #[serde(default)]
    pub mint_address: Option<String>,
}

/// `POST /v1/classify`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    #[serde(default)]
    pub mint_address: Option<String>,
}

// ============================================
// Lists
// ============================================

/// `POST /v1/lists/:list` body. `listName` is only read by `POST /v1/lists`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMutationRequest {
    #[serde(default)]
    pub list_name: Option<String>,
    pub address: String,
    pub operation: ListOperation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMutationData {
    /// Idempotent no-ops (`already_present`, `not_present`) still succeed
    pub success: bool,
    pub reason: String,
    pub changed: bool,
    pub snapshot: Vec<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<ListMutation> for ListMutationData {
    fn from(mutation: ListMutation) -> Self {
        Self {
            success: true,
            reason: mutation.reason().to_string(),
            changed: mutation.outcome.changed(),
            snapshot: mutation.snapshot,
            warning: mutation.warning,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSnapshotData {
    pub list_name: ListName,
    pub count: usize,
    pub addresses: Vec<Address>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipData {
    pub list_name: ListName,
    pub address: String,
    pub member: bool,
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub serialize_writes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::MutationOutcome;

    #[test]
    fn test_error_body_shape() {
        let err = AppError::not_found("Mint account not found for address: abc");
        let body = serde_json::to_value(ApiResponse::error(ApiError::from(&err), 1.5)).unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["kind"], "NotFound");
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["latencyMs"], 1.5);
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_noop_mutation_is_success() {
        let mutation = ListMutation {
            list: ListName::Good,
            address: Address::normalize("abc").unwrap(),
            outcome: MutationOutcome::NotPresent,
            snapshot: vec![],
            warning: None,
        };
        let data = ListMutationData::from(mutation);
        assert!(data.success);
        assert!(!data.changed);
        assert_eq!(data.reason, "not_present");

        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("warning").is_none());
    }

    #[test]
    fn test_mutation_request_parsing() {
        let req: ListMutationRequest =
            serde_json::from_str(r#"{"address":"abc","operation":"remove"}"#).unwrap();
        assert_eq!(req.operation, ListOperation::Remove);
        assert!(req.list_name.is_none());
    }
}
