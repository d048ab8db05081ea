//! # erp-core
//!
//! Core types, traits, and utilities for the ERP client SDK.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Common error types
//! - Result type alias
//! - Core traits (Transport, Identifiable)
//! - Paging envelope for list responses
//! - Client configuration

pub mod error;
pub mod result;
pub mod traits;
pub mod pagination;
pub mod config;

pub use error::*;
pub use result::*;
pub use traits::*;
pub use pagination::*;
