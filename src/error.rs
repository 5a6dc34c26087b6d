//! Error types for the sieve server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Sieve Error Enum ==
/// Unified request-path error type for the sieve server.
#[derive(Error, Debug)]
pub enum SieveError {
    /// Request parameters are malformed or exceed configured limits
    #[error("Invalid bound: {0}")]
    InvalidBound(String),

    /// Requested domain is not configured
    #[error("Unknown domain: {0}")]
    UnknownDomain(String),

    /// Awaiting a prefix extension exceeded the configured timeout
    #[error("Computation timed out: {0}")]
    ComputeTimeout(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SieveError {
    /// Machine-readable error kind carried in every error body.
    pub fn kind(&self) -> &'static str {
        match self {
            SieveError::InvalidBound(_) => "invalid_bound",
            SieveError::UnknownDomain(_) => "unknown_domain",
            SieveError::ComputeTimeout(_) => "timeout",
            SieveError::Internal(_) => "internal",
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for SieveError {
    fn into_response(self) -> Response {
        let status = match &self {
            SieveError::InvalidBound(_) => StatusCode::BAD_REQUEST,
            SieveError::UnknownDomain(_) => StatusCode::NOT_FOUND,
            SieveError::ComputeTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            SieveError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

// == Config Error Enum ==
/// Startup configuration errors. Always fatal: the process reports the
/// error and exits non-zero instead of serving with a broken config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot fetch config from '{url}': {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

// == Result Type Alias ==
/// Convenience Result type for the request path.
pub type Result<T> = std::result::Result<T, SieveError>;
