//! Credential suppliers
//!
//! Every supplier answers `resolve(secret_key)` with the tenant's consumer
//! secret or `UsageError::UnknownTenant`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use meterlink_core::CredentialsSupplier;
use meterlink_domain::{Credentials, ReporterConfig, Result, UsageError};
use tracing::debug;

/// Fixed tenant table, typically loaded from [`ReporterConfig::tenants`].
#[derive(Clone, Default)]
pub struct InMemoryCredentialsSupplier {
    secrets: HashMap<String, String>,
}

impl InMemoryCredentialsSupplier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ReporterConfig) -> Self {
        Self { secrets: config.tenants.clone().into_iter().collect() }
    }

    pub fn with_tenant(mut self, secret_key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.secrets.insert(secret_key.into(), secret.into());
        self
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

#[async_trait]
impl CredentialsSupplier for InMemoryCredentialsSupplier {
    async fn resolve(&self, secret_key: &str) -> Result<Credentials> {
        self.secrets
            .get(secret_key)
            .map(|secret| Credentials::new(secret_key, secret.clone()))
            .ok_or_else(|| UsageError::UnknownTenant(secret_key.to_string()))
    }
}

/// Reads `METERLINK_TENANT_<KEY>_SECRET`, where `<KEY>` is the secret key
/// upper-cased with every non-alphanumeric character replaced by `_`.
#[derive(Debug, Clone)]
pub struct EnvCredentialsSupplier {
    prefix: String,
}

impl Default for EnvCredentialsSupplier {
    fn default() -> Self {
        Self { prefix: "METERLINK_TENANT_".to_string() }
    }
}

impl EnvCredentialsSupplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different variable prefix (the `_SECRET` suffix is fixed).
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// Environment variable consulted for `secret_key`.
    pub fn variable_name(&self, secret_key: &str) -> String {
        let normalized: String = secret_key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
            .collect();
        format!("{}{}_SECRET", self.prefix, normalized)
    }
}

#[async_trait]
impl CredentialsSupplier for EnvCredentialsSupplier {
    async fn resolve(&self, secret_key: &str) -> Result<Credentials> {
        let variable = self.variable_name(secret_key);
        match std::env::var(&variable) {
            Ok(secret) if !secret.is_empty() => Ok(Credentials::new(secret_key, secret)),
            _ => {
                debug!(variable = %variable, "No tenant secret in environment");
                Err(UsageError::UnknownTenant(secret_key.to_string()))
            }
        }
    }
}

/// Asks each supplier in turn; the first one that knows the tenant wins.
///
/// Only `UnknownTenant` moves on to the next supplier; any other error is
/// returned as is.
#[derive(Clone, Default)]
pub struct ChainedCredentialsSupplier {
    suppliers: Vec<Arc<dyn CredentialsSupplier>>,
}

impl ChainedCredentialsSupplier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, supplier: Arc<dyn CredentialsSupplier>) -> Self {
        self.suppliers.push(supplier);
        self
    }
}

#[async_trait]
impl CredentialsSupplier for ChainedCredentialsSupplier {
    async fn resolve(&self, secret_key: &str) -> Result<Credentials> {
        for supplier in &self.suppliers {
            match supplier.resolve(secret_key).await {
                Err(UsageError::UnknownTenant(_)) => continue,
                other => return other,
            }
        }
        Err(UsageError::UnknownTenant(secret_key.to_string()))
    }
}
