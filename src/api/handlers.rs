//! API Request Handlers

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, warn};

use super::middleware::RateLimiter;
use super::types::*;
use crate::core::{AddressListStore, AuthorityResolver, Classifier};
use crate::models::config::AppConfig;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{ClassificationResult, ListName, ListOperation, MintAuthorityRecord};
use crate::utils::constants::APP_VERSION;

/// Shared application state
pub struct AppState {
    pub store: AddressListStore,
    pub resolver: AuthorityResolver,
    pub classifier: Classifier,
    pub rate_limiter: Arc<RateLimiter>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: AddressListStore, resolver: AuthorityResolver) -> Self {
        let classifier = Classifier::new(resolver.clone(), store.clone());
        Self {
            store,
            resolver,
            classifier,
            rate_limiter: Arc::new(RateLimiter::default()),
            start_time: Instant::now(),
        }
    }

    /// Wire the file-backed store and the Solana RPC resolver from config
    pub fn from_config(config: &AppConfig) -> eyre::Result<Self> {
        let store = AddressListStore::from_config(config);
        let resolver = AuthorityResolver::from_config(config)?;
        Ok(Self::new(store, resolver))
    }

    pub fn with_rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.rate_limiter = limiter;
        self
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<()>>)>;

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Map an `AppError` to its status and error envelope
fn error_response(err: AppError, start: Instant) -> (StatusCode, Json<ApiResponse<()>>) {
    let status =
        StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(code = err.code_str(), "❌ {}", err.message);
    } else {
        warn!(code = err.code_str(), "⚠️ {}", err.message);
    }
    (
        status,
        Json(ApiResponse::error(ApiError::from(&err), elapsed_ms(start))),
    )
}

fn respond<T: serde::Serialize>(result: AppResult<T>, start: Instant) -> ApiResult<T> {
    match result {
        Ok(data) => Ok(Json(ApiResponse::success(data, elapsed_ms(start)))),
        Err(err) => Err(error_response(err, start)),
    }
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::invalid_input(format!("Missing {} parameter", field)))
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: APP_VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
        serialize_writes: state.store.serializes_writes(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

// ============================================
// Authority Resolution
// ============================================

pub async fn get_authority(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AuthorityQuery>,
) -> ApiResult<MintAuthorityRecord> {
    let start = Instant::now();
    let result = match required(query.mint_address, "mintAddress") {
        Ok(mint) => state.resolver.resolve(&mint).await,
        Err(e) => Err(e),
    };
    respond(result, start)
}

// ============================================
// Classification
// ============================================

pub async fn classify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClassifyRequest>,
) -> ApiResult<ClassificationResult> {
    let start = Instant::now();
    let result = match required(req.mint_address, "mintAddress") {
        Ok(mint) => state.classifier.classify(&mint).await,
        Err(e) => Err(e),
    };
    respond(result, start)
}

// ============================================
// List Maintenance
// ============================================

pub async fn get_list(
    State(state): State<Arc<AppState>>,
    Path(list): Path<String>,
) -> ApiResult<ListSnapshotData> {
    let start = Instant::now();
    let list_name: ListName = match list.parse() {
        Ok(name) => name,
        Err(e) => return Err(error_response(e, start)),
    };

    let addresses = state.store.list(list_name).await;
    respond(
        Ok(ListSnapshotData {
            list_name,
            count: addresses.len(),
            addresses,
        }),
        start,
    )
}

pub async fn check_membership(
    State(state): State<Arc<AppState>>,
    Path((list, address)): Path<(String, String)>,
) -> ApiResult<MembershipData> {
    let start = Instant::now();
    let list_name: ListName = match list.parse() {
        Ok(name) => name,
        Err(e) => return Err(error_response(e, start)),
    };

    let member = state.store.contains(list_name, &address).await;
    respond(
        Ok(MembershipData {
            list_name,
            address,
            member,
        }),
        start,
    )
}

/// `POST /v1/lists/:list`
pub async fn mutate_list(
    State(state): State<Arc<AppState>>,
    Path(list): Path<String>,
    Json(req): Json<ListMutationRequest>,
) -> ApiResult<ListMutationData> {
    let start = Instant::now();
    let result = apply_mutation(&state, &list, &req).await;
    respond(result, start)
}

/// `POST /v1/lists` with `listName` in the body
pub async fn mutate_named_list(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListMutationRequest>,
) -> ApiResult<ListMutationData> {
    let start = Instant::now();
    let result = match required(req.list_name.clone(), "listName") {
        Ok(list) => apply_mutation(&state, &list, &req).await,
        Err(e) => Err(e),
    };
    respond(result, start)
}

async fn apply_mutation(
    state: &AppState,
    list: &str,
    req: &ListMutationRequest,
) -> AppResult<ListMutationData> {
    let list_name: ListName = list.parse()?;
    let mutation = match req.operation {
        ListOperation::Add => state.store.add(list_name, &req.address).await?,
        ListOperation::Remove => state.store.remove(list_name, &req.address).await?,
    };
    Ok(mutation.into())
}
