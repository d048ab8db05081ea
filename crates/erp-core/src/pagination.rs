//! Paging envelope for list responses
//!
//! The ERP answers listing requests either with a bare JSON array or, when a
//! total count was requested, with an object carrying the rows and the count.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ErpError;
use crate::result::ErpResult;

/// One page of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Rows of this page
    pub items: Vec<T>,
    /// Total number of matching rows, present when `count=true` was sent
    pub total: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListPayload<T> {
    Plain(Vec<T>),
    Envelope {
        #[serde(alias = "data", alias = "elements")]
        items: Vec<T>,
        #[serde(default, alias = "total")]
        count: Option<u64>,
    },
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode a list response in either shape
    pub fn from_value(value: Value) -> ErpResult<Self> {
        if value.is_null() {
            return Ok(Self::empty());
        }

        let payload: ListPayload<T> = serde_json::from_value(value)
            .map_err(|e| ErpError::Decode(format!("unexpected list payload: {}", e)))?;

        Ok(match payload {
            ListPayload::Plain(items) => Self { items, total: None },
            ListPayload::Envelope { items, count } => Self {
                items,
                total: count,
            },
        })
    }
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: vec![],
            total: None,
        }
    }

    /// Number of rows in this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether more rows exist past this page, given the offset it was fetched at
    pub fn has_more(&self, offset: u64) -> bool {
        match self.total {
            Some(total) => offset.saturating_add(self.items.len() as u64) < total,
            None => false,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_array() {
        let page: Page<u32> = Page::from_value(json!([1, 2, 3])).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total, None);
        assert!(!page.has_more(0));
    }

    #[test]
    fn test_envelope_with_count() {
        let page: Page<u32> = Page::from_value(json!({"items": [1, 2], "count": 5})).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.total, Some(5));
        assert!(page.has_more(0));
        assert!(!page.has_more(3));
    }

    #[test]
    fn test_has_more_at_offset_limit() {
        let page: Page<u32> = Page::from_value(json!({"items": [1], "count": u64::MAX})).unwrap();
        assert!(!page.has_more(u64::MAX));
        assert!(page.has_more(0));
    }

    #[test]
    fn test_envelope_aliases() {
        let page: Page<u32> = Page::from_value(json!({"data": [7], "total": 1})).unwrap();
        assert_eq!(page.items, vec![7]);
        assert_eq!(page.total, Some(1));
    }

    #[test]
    fn test_null_is_empty() {
        let page: Page<u32> = Page::from_value(Value::Null).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_bad_payload() {
        let err = Page::<u32>::from_value(json!({"rows": 1})).unwrap_err();
        assert!(matches!(err, ErpError::Decode(_)));
    }
}
