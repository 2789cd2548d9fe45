//! # Meterlink Infrastructure
//!
//! Infrastructure implementations of the usage reporting ports.
//!
//! This crate contains:
//! - The reqwest-backed HTTP client
//! - OAuth 1.0a one-legged request signing
//! - The signed usage transport and credential suppliers
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `meterlink-core`
//! - Contains all "impure" code (network, environment, files)

pub mod config;
pub mod errors;
pub mod http;
pub mod signing;
pub mod usage;

// Re-export commonly used items
pub use http::{HttpClient, HttpClientBuilder};
pub use signing::OAuth1Signer;
pub use usage::{
    usage_service, ChainedCredentialsSupplier, EnvCredentialsSupplier,
    InMemoryCredentialsSupplier, OAuthSignedTransport,
};
