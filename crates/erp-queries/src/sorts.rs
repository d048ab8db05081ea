//! Sort specifications
//!
//! A listing can be sorted by one field or a list of fields, with one
//! direction applying to all of them. The four accepted shapes normalize to a
//! single [`SortOrder`].

use erp_core::{QueryError, QueryResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 1-9, oldest first)
    #[default]
    Asc,
    /// Descending order (Z-A, 9-1, newest first)
    Desc,
}

impl SortDirection {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// The accepted sort shapes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum SortSpec {
    /// `[field]`
    Field(String),
    /// `[field, direction]`
    FieldWithDirection(String, SortDirection),
    /// `[fields]`
    FieldList(Vec<String>),
    /// `[fields, direction]`, the direction applies to every field
    FieldListWithDirection(Vec<String>, SortDirection),
}

/// Canonical form of a [`SortSpec`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortOrder {
    fields: Vec<String>,
    direction: SortDirection,
}

impl SortOrder {
    pub fn new(fields: Vec<String>, direction: SortDirection) -> Self {
        Self { fields, direction }
    }

    /// Fields in the order they were given
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl SortSpec {
    /// Ascending sort on a single field
    pub fn field(field: impl Into<String>) -> Self {
        Self::Field(field.into())
    }

    /// Descending sort on a single field
    pub fn desc(field: impl Into<String>) -> Self {
        Self::FieldWithDirection(field.into(), SortDirection::Desc)
    }

    /// Ascending sort on several fields
    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::FieldList(fields.into_iter().map(Into::into).collect())
    }

    /// Apply a direction, keeping the field or field list
    pub fn with_direction(self, direction: SortDirection) -> Self {
        match self {
            Self::Field(f) | Self::FieldWithDirection(f, _) => Self::FieldWithDirection(f, direction),
            Self::FieldList(fs) | Self::FieldListWithDirection(fs, _) => {
                Self::FieldListWithDirection(fs, direction)
            }
        }
    }

    /// Collapse any shape into fields plus one direction
    pub fn normalize(&self) -> SortOrder {
        match self {
            Self::Field(field) => SortOrder::new(vec![field.clone()], SortDirection::Asc),
            Self::FieldWithDirection(field, dir) => SortOrder::new(vec![field.clone()], *dir),
            Self::FieldList(fields) => SortOrder::new(fields.clone(), SortDirection::Asc),
            Self::FieldListWithDirection(fields, dir) => SortOrder::new(fields.clone(), *dir),
        }
    }

    /// Parse `CODE`, `CODE:desc` or `CODE,NAME:asc`
    pub fn parse(raw: &str) -> QueryResult<Self> {
        let raw = raw.trim();
        let (list, direction) = match raw.rsplit_once(':') {
            Some((list, dir)) => {
                let dir = SortDirection::from_str(dir.trim()).ok_or_else(|| {
                    QueryError::InvalidQueryOptions(format!("unknown sort direction '{}'", dir))
                })?;
                (list, Some(dir))
            }
            None => (raw, None),
        };

        let mut fields: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(String::from)
            .collect();

        match (fields.len(), direction) {
            (0, _) => Err(QueryError::InvalidQueryOptions(format!(
                "sort '{}' names no field",
                raw
            ))),
            (1, None) => Ok(Self::Field(fields.remove(0))),
            (1, Some(dir)) => Ok(Self::FieldWithDirection(fields.remove(0), dir)),
            (_, None) => Ok(Self::FieldList(fields)),
            (_, Some(dir)) => Ok(Self::FieldListWithDirection(fields, dir)),
        }
    }
}

impl TryFrom<Value> for SortSpec {
    type Error = QueryError;

    /// Accepts `"A"`, `["A"]`, `["A", "desc"]`, `[["A", "B"]]` and `[["A", "B"], "desc"]`
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let invalid = |msg: &str| QueryError::InvalidQueryOptions(format!("sort: {}", msg));

        let items = match value {
            Value::String(field) => return Ok(Self::Field(field)),
            Value::Array(items) => items,
            _ => return Err(invalid("expected a field name or an array")),
        };

        if items.is_empty() || items.len() > 2 {
            return Err(invalid("expected one or two elements"));
        }

        let mut items = items.into_iter();
        let head = items.next().unwrap_or(Value::Null);
        let direction = match items.next() {
            None => None,
            Some(Value::String(dir)) => Some(
                SortDirection::from_str(&dir)
                    .ok_or_else(|| invalid(&format!("unknown direction '{}'", dir)))?,
            ),
            Some(_) => return Err(invalid("direction must be a string")),
        };

        match (head, direction) {
            (Value::String(field), None) => Ok(Self::Field(field)),
            (Value::String(field), Some(dir)) => Ok(Self::FieldWithDirection(field, dir)),
            (Value::Array(list), dir) => {
                let fields = list
                    .into_iter()
                    .map(|v| match v {
                        Value::String(s) => Ok(s),
                        _ => Err(invalid("field names must be strings")),
                    })
                    .collect::<QueryResult<Vec<_>>>()?;
                Ok(match dir {
                    None => Self::FieldList(fields),
                    Some(dir) => Self::FieldListWithDirection(fields, dir),
                })
            }
            _ => Err(invalid("first element must be a field or a field list")),
        }
    }
}
