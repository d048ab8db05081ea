//! # erp-models
//!
//! Entity shapes returned by the ERP REST API.
//!
//! These are plain data declarations. Attributes the SDK does not model
//! explicitly are kept in each entity's `extra` map.

pub use erp_core::traits::{Id, Identifiable};

pub mod sales_order;
pub mod firmdoc;
pub mod sys;

// Re-exports for convenience
pub use sales_order::{SalesOrder, SalesOrderItem, SalesOrderStatus};
pub use firmdoc::{Firmdoc, FirmdocLine};
pub use sys::{DictionaryEntry, SysInfo};
