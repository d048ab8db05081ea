//! Query String Builder
//!
//! Serializes [`QueryOptions`] into the query string appended to listing URLs.
//! Keys always come out in the same order:
//! `limit`, `offset`, `fields`, `sort`, `dir`, `expand`, `expandLevel`, `q`, `count`.
//!
//! Descending sorts add `dir=desc` right after `sort`; ascending is implied.
//! An empty field list or sort field list drops the key instead of sending an
//! empty value.

use crate::options::QueryOptions;
use crate::sorts::SortDirection;

/// Accumulates `key=value` pairs in insertion order
#[derive(Debug, Default)]
pub struct QueryStringBuilder {
    pairs: Vec<(&'static str, String)>,
}

impl QueryStringBuilder {
    pub fn new() -> Self {
        Self { pairs: vec![] }
    }

    /// Add a pair whose value is already encoded
    pub fn push_raw(&mut self, key: &'static str, value: String) -> &mut Self {
        self.pairs.push((key, value));
        self
    }

    /// Add a pair, URL-encoding the value as one component
    pub fn push(&mut self, key: &'static str, value: &str) -> &mut Self {
        self.push_raw(key, urlencoding::encode(value).into_owned())
    }

    /// Add a comma-separated list; each item is encoded, the commas are not.
    /// An empty list adds nothing.
    pub fn push_list(&mut self, key: &'static str, items: &[String]) -> &mut Self {
        if items.is_empty() {
            return self;
        }
        let joined = items
            .iter()
            .map(|item| urlencoding::encode(item).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        self.push_raw(key, joined)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Join into `k=v&k=v`
    pub fn finish(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Build the query string for `options`, without a leading `?`
pub fn build(options: &QueryOptions) -> String {
    let mut qs = QueryStringBuilder::new();

    if let Some(limit) = options.limit {
        qs.push_raw("limit", limit.to_string());
    }
    if let Some(offset) = options.offset {
        qs.push_raw("offset", offset.to_string());
    }
    if let Some(fields) = &options.fields {
        qs.push_list("fields", fields);
    }
    if let Some(sort) = &options.sort {
        let order = sort.normalize();
        if !order.is_empty() {
            qs.push_list("sort", order.fields());
            if order.direction() == SortDirection::Desc {
                qs.push_raw("dir", SortDirection::Desc.as_str().to_string());
            }
        }
    }
    if let Some(expand) = &options.expand {
        qs.push("expand", expand);
    }
    if let Some(level) = &options.expand_level {
        qs.push("expandLevel", level);
    }
    if let Some(q) = &options.q {
        qs.push("q", q);
    }
    if options.count == Some(true) {
        qs.push_raw("count", "true".to_string());
    }

    qs.finish()
}

/// Append the query string for `options` to `path`, if there is one
pub fn with_query(path: &str, options: &QueryOptions) -> String {
    let qs = build(options);
    if qs.is_empty() {
        path.to_string()
    } else if path.contains('?') {
        format!("{}&{}", path, qs)
    } else {
        format!("{}?{}", path, qs)
    }
}
