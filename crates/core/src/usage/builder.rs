//! Request assembly
//!
//! Pure data: no network or credential access happens here.

use meterlink_domain::{UsageItem, UsageRequest};
use uuid::Uuid;

/// Fresh random (v4) idempotency key. Never reused across calls.
pub fn generate_idempotency_key() -> String {
    Uuid::new_v4().to_string()
}

/// Build the canonical request.
///
/// A missing idempotency key is generated; a missing source type becomes the
/// empty string. A caller-supplied key is kept as-is, even when empty, so the
/// dispatcher can reject it.
pub fn build_request(
    idempotency_key: Option<String>,
    items: Vec<UsageItem>,
    billable: bool,
    source_type: Option<String>,
) -> UsageRequest {
    UsageRequest {
        idempotency_key: idempotency_key.unwrap_or_else(generate_idempotency_key),
        billable,
        usages: items,
        source_type: source_type.unwrap_or_default(),
    }
}

/// Single-item form; wraps the item and delegates to [`build_request`].
pub fn build_single_request(
    idempotency_key: Option<String>,
    item: UsageItem,
    billable: bool,
    source_type: Option<String>,
) -> UsageRequest {
    build_request(idempotency_key, vec![item], billable, source_type)
}
