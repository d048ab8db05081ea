//! # erp-client
//!
//! Typed REST client for the ERP API.
//!
//! Every entity client is a [`ResourceClient`] bound to one endpoint. Calls
//! build a path from the endpoint template and the query options, then go
//! through a shared [`Transport`](erp_core::Transport).
//!
//! ## Example
//!
//! ```no_run
//! use erp_client::ErpClient;
//! use erp_queries::QueryOptions;
//!
//! # async fn run() -> erp_core::ErpResult<()> {
//! let client = ErpClient::from_env()?;
//!
//! let recent = client
//!     .sales_orders()
//!     .list(&QueryOptions::new().limit(10).sort_desc("ORDER_DATE"))
//!     .await?;
//!
//! let docs = client
//!     .firmdocs()
//!     .search_by_auxil_code("test", &QueryOptions::new())
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod transport;
pub mod endpoint;
pub mod resource;
pub mod sales_orders;
pub mod firmdocs;
pub mod sys;
pub mod client;

#[cfg(test)]
pub(crate) mod testing;

pub use client::ErpClient;
pub use endpoint::Endpoint;
pub use resource::{Resource, ResourceClient};
pub use sales_orders::{SalesOrderResource, SalesOrders};
pub use firmdocs::{FirmdocResource, Firmdocs};
pub use sys::SysClient;
pub use transport::HttpTransport;
