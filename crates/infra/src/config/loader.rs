//! Configuration loader
//!
//! Loads reporter configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `METERLINK_BASE_URL` is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `METERLINK_BASE_URL`: Usage API base URL (required)
//! - `METERLINK_USAGE_PATH`: Path of the usage endpoint under the base URL
//! - `METERLINK_TIMEOUT_SECS`: Total request timeout in seconds
//! - `METERLINK_CONNECT_TIMEOUT_SECS`: Connect timeout in seconds
//! - `METERLINK_USER_AGENT`: `User-Agent` header value
//!
//! Tenant secrets are not read here; see
//! [`EnvCredentialsSupplier`](crate::usage::EnvCredentialsSupplier).
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./meterlink.{toml,json}`, then `./config.{toml,json}`
//! 2. The same names in the parent and grandparent directory
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use meterlink_domain::{ReporterConfig, Result, UsageError};

const FILE_NAMES: [&str; 4] = ["meterlink.toml", "meterlink.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the base URL is
/// not set there, falls back to loading from a config file.
///
/// # Errors
/// Returns `UsageError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<ReporterConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `METERLINK_BASE_URL` is required; the rest fall back to
/// [`ReporterConfig::default`].
///
/// # Errors
/// Returns `UsageError::Config` if the base URL is missing or a numeric
/// variable does not parse.
pub fn load_from_env() -> Result<ReporterConfig> {
    let mut config = ReporterConfig::new(env_var("METERLINK_BASE_URL")?);

    if let Some(path) = env_opt("METERLINK_USAGE_PATH") {
        config.usage_path = path;
    }
    if let Some(secs) = env_secs("METERLINK_TIMEOUT_SECS")? {
        config.timeout_secs = secs;
    }
    if let Some(secs) = env_secs("METERLINK_CONNECT_TIMEOUT_SECS")? {
        config.connect_timeout_secs = secs;
    }
    if let Some(agent) = env_opt("METERLINK_USER_AGENT") {
        config.user_agent = agent;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `UsageError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<ReporterConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(UsageError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            UsageError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| UsageError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ReporterConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| UsageError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| UsageError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(UsageError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `UsageError::Config` if the variable is not set or empty.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        UsageError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable; empty counts as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_secs(key: &str) -> Result<Option<u64>> {
    env_opt(key)
        .map(|s| {
            s.trim()
                .parse::<u64>()
                .map_err(|e| UsageError::Config(format!("Invalid value for {}: {}", key, e)))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;
    use std::time::Duration;

    use meterlink_domain::constants::DEFAULT_USAGE_PATH;
    use once_cell::sync::Lazy;
    use tempfile::Builder;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ENV_KEYS: [&str; 5] = [
        "METERLINK_BASE_URL",
        "METERLINK_USAGE_PATH",
        "METERLINK_TIMEOUT_SECS",
        "METERLINK_CONNECT_TIMEOUT_SECS",
        "METERLINK_USER_AGENT",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    fn write_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("METERLINK_BASE_URL", "https://billing.example.com");
        std::env::set_var("METERLINK_USAGE_PATH", "/v2/usage");
        std::env::set_var("METERLINK_TIMEOUT_SECS", "5");
        std::env::set_var("METERLINK_CONNECT_TIMEOUT_SECS", "2");
        std::env::set_var("METERLINK_USER_AGENT", "billing-cron/1.0");

        let result = load_from_env();
        assert!(result.is_ok(), "Should load config from env vars, error: {:?}", result.err());

        let config = result.unwrap();
        assert_eq!(config.base_url, "https://billing.example.com");
        assert_eq!(config.usage_path, "/v2/usage");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.connect_timeout(), Duration::from_secs(2));
        assert_eq!(config.user_agent, "billing-cron/1.0");

        clear_env();
    }

    #[test]
    fn test_load_from_env_defaults_optional_vars() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("METERLINK_BASE_URL", "https://billing.example.com");

        let config = load_from_env().unwrap();
        assert_eq!(config.usage_path, DEFAULT_USAGE_PATH);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.connect_timeout_secs, 10);

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, UsageError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("METERLINK_BASE_URL", "https://billing.example.com");
        std::env::set_var("METERLINK_TIMEOUT_SECS", "soon");

        let err = load_from_env().unwrap_err();
        match err {
            UsageError::Config(msg) => assert!(msg.contains("METERLINK_TIMEOUT_SECS")),
            other => panic!("expected config error, got {:?}", other),
        }

        clear_env();
    }

    #[test]
    fn test_load_from_file_json() {
        let file = write_config(
            ".json",
            r#"{
                "base_url": "https://billing.example.com",
                "timeout_secs": 12,
                "tenants": { "acme": "acme-secret" }
            }"#,
        );

        let config = load_from_file(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.base_url, "https://billing.example.com");
        assert_eq!(config.timeout_secs, 12);
        assert_eq!(config.tenants.get("acme").map(String::as_str), Some("acme-secret"));
    }

    #[test]
    fn test_load_from_file_toml() {
        let file = write_config(
            ".toml",
            r#"
base_url = "https://billing.example.com"
usage_path = "/custom/usage"

[tenants]
acme = "acme-secret"
globex = "globex-secret"
"#,
        );

        let config = load_from_file(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.usage_path, "/custom/usage");
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.tenants.len(), 2);
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/meterlink.toml")));
        assert!(matches!(result, Err(UsageError::Config(_))), "Should be a Config error");
    }

    #[test]
    fn test_load_from_file_missing_base_url() {
        let file = write_config(".json", r#"{ "timeout_secs": 12 }"#);

        let result = load_from_file(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(UsageError::Config(_))));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("base_url: x", &PathBuf::from("meterlink.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }

    #[test]
    fn test_parse_config_invalid_json() {
        let result = parse_config(r#"{ "base_url": "x" "#, &PathBuf::from("meterlink.json"));
        match result {
            Err(UsageError::Config(msg)) => assert!(msg.starts_with("Invalid JSON format")),
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
