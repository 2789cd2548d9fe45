//! Domain constants
//!
//! Centralized location for defaults and fixed protocol strings used by the
//! reporting pipeline.

// Reporter defaults
pub const DEFAULT_USAGE_PATH: &str = "/api/integration/v1/billing/usage";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("meterlink/", env!("CARGO_PKG_VERSION"));

/// Marker the billing endpoint puts in its error body when an idempotency key
/// has already been consumed by an earlier submission.
///
/// Detection is a free-text substring match. It breaks if the upstream
/// wording changes; the service exposes no structured code for this case.
pub const IDEMPOTENCY_KEY_ALREADY_SHARED: &str = "Entry ALREADY exists with idempotencyKey";

// Precondition messages
pub const BASE_URL_REQUIRED: &str = "Base URL must not be empty";
pub const SECRET_KEY_REQUIRED: &str = "Secret Key must not be empty";
pub const IDEMPOTENCY_KEY_REQUIRED: &str = "IdempotentKey must not be empty";
pub const USAGES_REQUIRED: &str = "Usage data to report must not be empty";
