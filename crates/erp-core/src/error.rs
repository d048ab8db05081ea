//! Core error types for the ERP client SDK
//!
//! `QueryError` covers contract violations in the query-construction layer,
//! `ErpError` everything a client call can fail with.

use thiserror::Error;

/// Core error type for all client operations
#[derive(Error, Debug)]
pub enum ErpError {
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Not found: {path}")]
    NotFound { path: String },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Missing path parameter '{param}' for endpoint {template}")]
    MissingPathParam { template: String, param: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors raised while building query strings or compiling search criteria
///
/// These are integration mistakes, never transient conditions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unsupported operator '{operator}' on field {field}")]
    UnsupportedOperator { field: String, operator: String },

    #[error("Invalid query options: {0}")]
    InvalidQueryOptions(String),

    #[error("Invalid criteria for field {field}: {message}")]
    InvalidCriteria { field: String, message: String },
}

impl QueryError {
    pub fn unsupported(field: impl Into<String>, operator: impl Into<String>) -> Self {
        Self::UnsupportedOperator {
            field: field.into(),
            operator: operator.into(),
        }
    }

    pub fn invalid_criteria(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCriteria {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ErpError {
    fn from(err: serde_json::Error) -> Self {
        ErpError::Decode(err.to_string())
    }
}

/// HTTP status code mapping for errors
impl ErpError {
    /// Status code reported by the server, if the error came from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ErpError::NotFound { .. } => Some(404),
            ErpError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ErpError::Query(QueryError::UnsupportedOperator { .. }) => "unsupported_operator",
            ErpError::Query(QueryError::InvalidQueryOptions(_)) => "invalid_query_options",
            ErpError::Query(QueryError::InvalidCriteria { .. }) => "invalid_criteria",
            ErpError::NotFound { .. } => "not_found",
            ErpError::Api { .. } => "api_error",
            ErpError::Transport(_) => "transport_error",
            ErpError::Decode(_) => "decode_error",
            ErpError::MissingPathParam { .. } => "missing_path_param",
            ErpError::Config(_) => "configuration_error",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ErpError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_converts() {
        let err: ErpError = QueryError::unsupported("CODE", "between").into();
        assert_eq!(err.error_code(), "unsupported_operator");
        assert_eq!(
            err.to_string(),
            "Query error: Unsupported operator 'between' on field CODE"
        );
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_status_codes() {
        let not_found = ErpError::NotFound {
            path: "/salesOrders/9".to_string(),
        };
        assert_eq!(not_found.status_code(), Some(404));
        assert!(not_found.is_not_found());

        let api = ErpError::Api {
            status: 422,
            message: "bad payload".to_string(),
        };
        assert_eq!(api.status_code(), Some(422));
        assert!(!api.is_not_found());
    }

    #[test]
    fn test_decode_from_serde() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: ErpError = err.into();
        assert_eq!(err.error_code(), "decode_error");
    }
}
