//! Usage payloads and the canonical request sent to the billing endpoint

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One measured event, supplied by the caller and forwarded verbatim.
///
/// `unit`, `quantity`, `timestamp` and `metadata` are the common fields; any
/// other caller-defined keys (account id, subscription id, ...) ride along in
/// `attributes` and are flattened into the same JSON object on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageItem {
    pub unit: String,
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl UsageItem {
    pub fn new(unit: impl Into<String>, quantity: f64) -> Self {
        Self {
            unit: unit.into(),
            quantity,
            timestamp: None,
            metadata: Map::new(),
            attributes: Map::new(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Attach an extra top-level field to the item's JSON object.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Canonical usage submission.
///
/// Built fresh for every call and discarded afterwards. Serializes to
/// `{"idempotencyKey", "billable", "usages", "sourceType"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRequest {
    pub idempotency_key: String,
    pub billable: bool,
    pub usages: Vec<UsageItem>,
    #[serde(default)]
    pub source_type: String,
}
