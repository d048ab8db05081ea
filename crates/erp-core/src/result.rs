//! Result type aliases

use crate::error::{ErpError, QueryError};

/// Standard Result type for client operations
pub type ErpResult<T> = Result<T, ErpError>;

/// Result type for the query-construction layer
pub type QueryResult<T> = Result<T, QueryError>;
