//! Port interfaces for usage reporting
//!
//! These traits define the boundaries between the reporting pipeline and the
//! credential store / HTTP stack that back it.

use async_trait::async_trait;
use meterlink_domain::{Credentials, RawResponse, Result, UsageRequest};

/// Resolves a tenant secret key to its signing credentials
#[async_trait]
pub trait CredentialsSupplier: Send + Sync {
    /// Look up the credentials registered for `secret_key`.
    ///
    /// Fails with `UsageError::UnknownTenant` when the key is not registered.
    async fn resolve(&self, secret_key: &str) -> Result<Credentials>;
}

/// Sends one signed usage request
#[async_trait]
pub trait SignedTransport: Send + Sync {
    /// Sign `request` with `credentials` and POST it to the usage endpoint
    /// under `base_url`.
    ///
    /// Implementations issue exactly one HTTP call and build their signing
    /// state per call. Non-2xx statuses are returned as `RawResponse`; only
    /// I/O failures become `UsageError::Transport`.
    async fn send(
        &self,
        base_url: &str,
        credentials: &Credentials,
        request: &UsageRequest,
    ) -> Result<RawResponse>;
}
