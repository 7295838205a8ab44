// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system. Only a
//! few of them ever reach the user: missing credentials, and ids that are
//! neither a page nor a database. Partial fetch failures, cache corruption
//! and unreachable ancestors are handled where they happen.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded, back off and retry
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            429 => Self::RateLimited,
            404 => Self::ObjectNotFound,
            401 => Self::Unauthorized,
            403 => Self::RestrictedResource,
            503 => Self::ServiceUnavailable,
            other => Self::HttpStatus(other),
        }
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError
        ) || matches!(self, Self::HttpStatus(status) if *status >= 500)
    }

    /// Whether this error means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound)
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// No credentials: every call that needs the remote API fails with this.
    #[error("Notion is not configured: {0}")]
    NotConfigured(String),

    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    /// The id resolved neither as a page nor as a database.
    #[error("No page or database found for id {id}")]
    KindMismatch { id: String },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}): {message}")]
    NotionService {
        code: NotionErrorCode,
        message: String,
        status: u16,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Whether the remote API reported that the object does not exist, or
    /// exists under another kind than the one requested.
    pub fn is_not_found(&self) -> bool {
        match self {
            AppError::NotionService { code, .. } => {
                code.is_not_found() || matches!(code, NotionErrorCode::ValidationFailed)
            }
            AppError::KindMismatch { .. } => true,
            _ => false,
        }
    }

    pub fn is_not_configured(&self) -> bool {
        matches!(self, AppError::NotConfigured(_))
    }

    /// Transient failures: rate limiting, server errors, dropped connections.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::NotionService { code, .. } => code.is_retryable(),
            AppError::NetworkFailure(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Domain vocabulary for why a database fetch failed.
///
/// This is not an error type. It classifies the failure so a degraded inline
/// table can be logged with a meaningful reason.
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseFetchFailure {
    /// The database is a linked database (Notion API limitation).
    LinkedDatabase,
    /// The integration lacks permission to access this database.
    PermissionDenied { reason: String },
    /// The database was not found.
    NotFound,
    /// Some other failure occurred.
    Other { cause: String },
}

impl std::fmt::Display for DatabaseFetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LinkedDatabase => write!(
                f,
                "linked database (Notion API does not support retrieving linked databases)"
            ),
            Self::PermissionDenied { reason } => write!(f, "permission denied: {}", reason),
            Self::NotFound => write!(f, "database not found"),
            Self::Other { cause } => write!(f, "{}", cause),
        }
    }
}

/// Classifies a database fetch error into a domain-specific failure reason.
pub fn classify_database_fetch_failure(error: &AppError) -> DatabaseFetchFailure {
    match error {
        AppError::NotionService { code, message, .. } => {
            if message.contains("linked database") {
                DatabaseFetchFailure::LinkedDatabase
            } else if code.is_not_found() {
                DatabaseFetchFailure::NotFound
            } else if matches!(
                code,
                NotionErrorCode::RestrictedResource | NotionErrorCode::Unauthorized
            ) {
                DatabaseFetchFailure::PermissionDenied {
                    reason: message.clone(),
                }
            } else {
                DatabaseFetchFailure::Other {
                    cause: error.to_string(),
                }
            }
        }
        _ => DatabaseFetchFailure::Other {
            cause: error.to_string(),
        },
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    fn service_error(code: &str, message: &str) -> AppError {
        AppError::NotionService {
            code: NotionErrorCode::from_api_response(code),
            message: message.to_string(),
            status: 400,
        }
    }

    #[test]
    fn test_retryable_codes() {
        assert!(NotionErrorCode::RateLimited.is_retryable());
        assert!(NotionErrorCode::from_http_status(502).is_retryable());
        assert!(!NotionErrorCode::ObjectNotFound.is_retryable());
        assert!(!NotionErrorCode::from_http_status(400).is_retryable());
    }

    #[test]
    fn test_not_found_covers_kind_mismatch() {
        assert!(service_error("object_not_found", "gone").is_not_found());
        assert!(service_error("validation_error", "is a database, not a page").is_not_found());
        assert!(!service_error("unauthorized", "bad token").is_not_found());
        assert!(!AppError::NotConfigured("no key".into()).is_not_found());
    }

    #[test]
    fn test_classify_linked_database() {
        let err = service_error(
            "validation_error",
            "Database does not support this operation: linked database",
        );
        assert_eq!(
            classify_database_fetch_failure(&err),
            DatabaseFetchFailure::LinkedDatabase
        );
        assert_eq!(
            classify_database_fetch_failure(&service_error("restricted_resource", "nope")),
            DatabaseFetchFailure::PermissionDenied {
                reason: "nope".into()
            }
        );
    }
}
