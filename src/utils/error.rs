//! Error types and handling
//!
//! Lookup failures are reported to the caller unchanged. Over HTTP they are
//! rendered in a consistent JSON response format.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::Selector;

/// Alert rule lookup errors
#[derive(Debug, Error)]
pub enum LookupError {
    /// Neither a rule ID nor a rule name was supplied (400)
    #[error("must define rule_name or rule_id")]
    MissingCriteria,

    /// The lookup parameters could not be decoded (400)
    #[error("invalid lookup criteria: {0}")]
    InvalidCriteria(String),

    /// Both a rule ID and a rule name were supplied (400)
    #[error("rule_id ({rule_id}) and rule_name ({rule_name:?}) are mutually exclusive")]
    AmbiguousCriteria { rule_id: i64, rule_name: String },

    /// The remote alert rule listing could not be read (502)
    #[error("failed to fetch alert rules: {0}")]
    FetchFailed(#[source] anyhow::Error),

    /// The listing was read but no rule matched (404)
    #[error("no alert rule found with {0}")]
    NotFound(Selector),
}

impl LookupError {
    /// Stable identifier for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::MissingCriteria => "missing_criteria",
            LookupError::InvalidCriteria(_) => "invalid_criteria",
            LookupError::AmbiguousCriteria { .. } => "ambiguous_criteria",
            LookupError::FetchFailed(_) => "fetch_failed",
            LookupError::NotFound(_) => "not_found",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            LookupError::MissingCriteria
            | LookupError::InvalidCriteria(_)
            | LookupError::AmbiguousCriteria { .. } => {
                StatusCode::BAD_REQUEST
            }
            LookupError::FetchFailed(_) => StatusCode::BAD_GATEWAY,
            LookupError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// Error response body
#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    /// Error type identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Add details to the error response
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&LookupError> for ErrorResponse {
    fn from(err: &LookupError) -> Self {
        let response = ErrorResponse::new(err.kind(), err.to_string());
        match err {
            LookupError::FetchFailed(cause) => {
                let chain: Vec<String> = cause.chain().skip(1).map(|c| c.to_string()).collect();
                if chain.is_empty() {
                    response
                } else {
                    response.with_details(serde_json::json!({ "caused_by": chain }))
                }
            }
            _ => response,
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorResponse::from(&self))).into_response()
    }
}

/// Result type alias for lookups
pub type LookupResult<T> = Result<T, LookupError>;
