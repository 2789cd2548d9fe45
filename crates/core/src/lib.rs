//! # Meterlink Core
//!
//! Usage reporting logic with no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces for credential lookup and signed HTTP transport
//! - The request builder and outcome classifier
//! - `MeteredUsageService`, the caller-facing entry point
//!
//! ## Architecture Principles
//! - Only depends on `meterlink-domain`
//! - No HTTP, signing or configuration code
//! - All external collaborators via traits

pub mod usage;

// Re-export specific items to avoid ambiguity
pub use usage::builder::{build_request, build_single_request, generate_idempotency_key};
pub use usage::classifier::classify;
pub use usage::options::ReportOptions;
pub use usage::policy::{enforce_success, is_duplicate_submission};
pub use usage::ports::{CredentialsSupplier, SignedTransport};
pub use usage::service::MeteredUsageService;
