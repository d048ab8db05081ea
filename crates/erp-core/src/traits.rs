//! Core traits shared by the query layer, the models and the clients

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::result::ErpResult;

/// Primary key type used by the ERP API
pub type Id = i64;

/// Trait for entities that have a primary key
pub trait Identifiable {
    fn id(&self) -> Option<Id>;
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}

/// HTTP verb accepted by a [`Transport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "patch" => Some(Self::Patch),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The request primitive every client call goes through.
///
/// `path` is relative to the API base and already carries its query string.
/// Implementations return the parsed JSON body (`Value::Null` for an empty
/// body) and fail with an [`crate::ErpError`] on network or API failure.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> ErpResult<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing() {
        assert_eq!(Method::from_str("get"), Some(Method::Get));
        assert_eq!(Method::from_str("PATCH"), Some(Method::Patch));
        assert_eq!(Method::from_str("head"), None);
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
