//! # Meterlink Domain
//!
//! Domain types for metered-usage reporting.
//!
//! This crate contains:
//! - Usage payloads and the canonical wire request
//! - Tenant signing credentials
//! - Call outcomes (`ApiResult`, `RawResponse`)
//! - The `UsageError` taxonomy and Result alias
//! - Reporter configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other meterlink crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
