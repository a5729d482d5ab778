//! Centralized Error Handling Module
//!
//! Every failure that reaches a caller flows through [`AppError`] and carries
//! a unique code, so logs and API responses can be grepped by category.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - INVALID_INPUT: malformed address or list name, rejected before any I/O
//! - NOT_FOUND: target account does not exist on the ledger
//! - RESOLUTION_xxx: transport, timeout or decoding failures during resolution
//! - PERSISTENCE_ERROR: list read/write failures other than "file absent"

use serde::Serialize;
use std::fmt;

use crate::providers::LedgerError;
use crate::storage::StorageError;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    /// Coarse error category exposed to callers
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    /// True when the failure was a timeout, so the caller can retry
    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::ResolutionTimeout
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error taxonomy visible to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    ResolutionError,
    PersistenceError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "InvalidInput",
            Self::NotFound => "NotFound",
            Self::ResolutionError => "ResolutionError",
            Self::PersistenceError => "PersistenceError",
        }
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed address syntax or unknown list name
    InvalidInput,
    /// Mint account does not exist
    NotFound,
    /// RPC error, unexpected owner or undecodable layout during resolution
    ResolutionFailed,
    /// Transient transport failure (connection, HTTP 429/5xx) talking to the ledger
    ResolutionTransport,
    /// A ledger fetch exceeded the caller-supplied timeout
    ResolutionTimeout,
    /// List read/write failure other than "file absent"
    PersistenceFailed,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::NotFound => "NOT_FOUND",
            Self::ResolutionFailed => "RESOLUTION_ERROR",
            Self::ResolutionTransport => "RESOLUTION_TRANSPORT",
            Self::ResolutionTimeout => "RESOLUTION_TIMEOUT",
            Self::PersistenceFailed => "PERSISTENCE_ERROR",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput => ErrorKind::InvalidInput,
            Self::NotFound => ErrorKind::NotFound,
            Self::ResolutionFailed | Self::ResolutionTransport | Self::ResolutionTimeout => {
                ErrorKind::ResolutionError
            }
            Self::PersistenceFailed => ErrorKind::PersistenceError,
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::NotFound => 404,
            Self::ResolutionTransport => 502,
            Self::ResolutionTimeout => 504,
            Self::ResolutionFailed | Self::PersistenceFailed => 500,
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ResolutionTimeout | Self::ResolutionTransport)
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Malformed input, rejected before any I/O
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, msg)
    }

    /// Target account does not exist
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, msg)
    }

    /// Resolution failed for a reason other than a timeout
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResolutionFailed, msg)
    }

    /// A ledger fetch timed out
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResolutionTimeout, msg)
    }

    /// List storage failure
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::PersistenceFailed, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from component error types
// ============================================

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let code = if err.is_timeout() {
            ErrorCode::ResolutionTimeout
        } else if err.is_retryable() {
            ErrorCode::ResolutionTransport
        } else {
            ErrorCode::ResolutionFailed
        };
        Self::new(code, err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        let message = err.to_string();
        Self::with_source(ErrorCode::PersistenceFailed, message, err)
    }
}
