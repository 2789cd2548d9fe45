//! Configuration management

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_USAGE_PATH, DEFAULT_USER_AGENT,
};

/// Reporter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReporterConfig {
    pub base_url: String,
    #[serde(default = "default_usage_path")]
    pub usage_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Tenant secret key -> consumer secret.
    #[serde(default, skip_serializing)]
    pub tenants: BTreeMap<String, String>,
}

impl ReporterConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            usage_path: default_usage_path(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
            tenants: BTreeMap::new(),
        }
    }
}

fn default_usage_path() -> String {
    DEFAULT_USAGE_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_json_fills_defaults() {
        let config: ReporterConfig =
            serde_json::from_str(r#"{ "base_url": "https://billing.example.com" }"#).unwrap();

        assert_eq!(config.base_url, "https://billing.example.com");
        assert_eq!(config.usage_path, DEFAULT_USAGE_PATH);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert!(config.user_agent.starts_with("meterlink/"));
        assert!(config.tenants.is_empty());
    }

    #[test]
    fn tenant_secrets_are_not_serialized() {
        let mut config = ReporterConfig::new("https://billing.example.com");
        config.tenants.insert("tenant".into(), "s3cret".into());

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("s3cret"));
    }
}
