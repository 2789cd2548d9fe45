//! Usage reporting adapters

pub mod credentials;
pub mod transport;

use std::sync::Arc;

use meterlink_core::{CredentialsSupplier, MeteredUsageService};
use meterlink_domain::{ReporterConfig, Result};

pub use credentials::{
    ChainedCredentialsSupplier, EnvCredentialsSupplier, InMemoryCredentialsSupplier,
};
pub use transport::{usage_endpoint, OAuthSignedTransport};

/// Wire a [`MeteredUsageService`] to the signed HTTP transport described by
/// `config`.
pub fn usage_service(
    config: &ReporterConfig,
    credentials: Arc<dyn CredentialsSupplier>,
) -> Result<MeteredUsageService> {
    let transport = OAuthSignedTransport::from_config(config)?;
    Ok(MeteredUsageService::new(credentials, Arc::new(transport)))
}
