//! # erp-queries
//!
//! Query construction for the ERP client SDK.
//!
//! Listing endpoints accept an OData-like query string. This crate turns typed
//! options into that string and compiles per-field search criteria into the
//! filter expression carried by its `q` parameter.
//!
//! ## Structure
//!
//! - `sorts` - Sort specifications and directions
//! - `criteria` - Literals, operators and the search-criteria mapping
//! - `compiler` - Criteria to filter-expression compilation
//! - `options` - The query options value
//! - `builder` - Query-string serialization
//!
//! ## Example
//!
//! ```
//! use erp_queries::{compile, Criterion, QueryOptions, SearchCriteria, SortSpec};
//!
//! let criteria = SearchCriteria::new()
//!     .with("status", Criterion::any_of([1, 2]))
//!     .with("code", Criterion::like("AB"));
//!
//! assert_eq!(
//!     compile(&criteria).unwrap().as_deref(),
//!     Some("(STATUS eq 1 or STATUS eq 2) and CODE like 'AB*'")
//! );
//!
//! let options = QueryOptions::new()
//!     .limit(10)
//!     .offset(0)
//!     .sort(SortSpec::field("TYPE"));
//!
//! assert_eq!(options.to_query_string(), "limit=10&offset=0&sort=TYPE");
//! ```

pub mod sorts;
pub mod criteria;
pub mod compiler;
pub mod options;
pub mod builder;

// Re-exports for convenience
pub use sorts::{SortDirection, SortOrder, SortSpec};
pub use criteria::{filter_field_name, Condition, Criterion, Literal, Operand, Operator, SearchCriteria};
pub use compiler::{and_all, compile, compile_condition, compile_criterion};
pub use options::QueryOptions;
pub use builder::{build, with_query, QueryStringBuilder};
