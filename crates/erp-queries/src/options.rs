//! Query Options
//!
//! Pagination, projection, sorting and filtering parameters for a listing
//! request. Every option is independently optional.

use erp_core::QueryResult;
use serde::Deserialize;

use crate::builder;
use crate::compiler;
use crate::criteria::SearchCriteria;
use crate::sorts::{SortDirection, SortSpec};

/// Options accepted by every listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryOptions {
    /// Max rows; server default when absent
    pub limit: Option<u64>,
    /// Rows to skip
    pub offset: Option<u64>,
    /// Projection, in the given order
    pub fields: Option<Vec<String>>,
    pub sort: Option<SortSpec>,
    pub expand: Option<String>,
    pub expand_level: Option<String>,
    /// Raw filter expression
    pub q: Option<String>,
    /// Ask the server for a total count
    pub count: Option<bool>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying only the filter compiled from `criteria`
    pub fn from_criteria(criteria: &SearchCriteria) -> QueryResult<Self> {
        Self::new().with_criteria(criteria)
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set limit and offset for a 1-indexed page
    pub fn page(self, page: u64, per_page: u64) -> Self {
        self.limit(per_page)
            .offset(page.saturating_sub(1).saturating_mul(per_page))
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Append one field to the projection
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.fields.get_or_insert_with(Vec::new).push(field.into());
        self
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Ascending sort on one field
    pub fn sort_by(self, field: impl Into<String>) -> Self {
        self.sort(SortSpec::field(field))
    }

    /// Descending sort on one field
    pub fn sort_desc(self, field: impl Into<String>) -> Self {
        self.sort(SortSpec::FieldWithDirection(field.into(), SortDirection::Desc))
    }

    pub fn expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    pub fn expand_level(mut self, level: impl Into<String>) -> Self {
        self.expand_level = Some(level.into());
        self
    }

    /// Replace the raw filter expression
    pub fn q(mut self, expression: impl Into<String>) -> Self {
        self.q = Some(expression.into());
        self
    }

    pub fn with_count(mut self) -> Self {
        self.count = Some(true);
        self
    }

    /// Add a filter expression on top of any existing `q`.
    /// A side with a top-level `or` is parenthesized so the conjunction
    /// cannot widen either filter.
    pub fn and_filter(mut self, expression: impl Into<String>) -> Self {
        let expression = expression.into();
        self.q = match self.q.take() {
            None => Some(expression),
            Some(existing) => compiler::and_all(&[conjunct(existing), conjunct(expression)]),
        };
        self
    }

    /// Compile criteria and add the result to `q`; empty criteria leave the options untouched
    pub fn with_criteria(self, criteria: &SearchCriteria) -> QueryResult<Self> {
        Ok(match compiler::compile(criteria)? {
            Some(expression) => self.and_filter(expression),
            None => self,
        })
    }

    /// Serialize to a query string without the leading `?`
    pub fn to_query_string(&self) -> String {
        builder::build(self)
    }

    /// Whether these options add nothing to a URL
    pub fn is_empty(&self) -> bool {
        self.to_query_string().is_empty()
    }
}

fn conjunct(expression: String) -> String {
    if has_top_level_or(&expression) {
        format!("({})", expression.trim())
    } else {
        expression
    }
}

/// Whether `expression` has an `or` (any case) outside quotes and parentheses
fn has_top_level_or(expression: &str) -> bool {
    let bytes = expression.as_bytes();
    let mut depth = 0usize;
    let mut quoted = false;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'\'' => quoted = !quoted,
            b'(' if !quoted => depth += 1,
            b')' if !quoted => depth = depth.saturating_sub(1),
            b if b.is_ascii_whitespace() && !quoted && depth == 0 => {
                let rest = &bytes[i + 1..];
                if rest.len() > 2 && rest[..2].eq_ignore_ascii_case(b"or") && rest[2].is_ascii_whitespace() {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}
