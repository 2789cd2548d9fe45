//! Call options for [`MeteredUsageService::report_usage`]
//!
//! [`MeteredUsageService::report_usage`]: super::service::MeteredUsageService::report_usage

use meterlink_domain::UsageItem;

/// Everything one usage report needs.
///
/// Optional fields fall back as follows: `idempotency_key` is generated,
/// `secret` is resolved through the credentials supplier, `source_type`
/// becomes the empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub base_url: String,
    pub secret_key: String,
    pub items: Vec<UsageItem>,
    pub billable: bool,
    pub idempotency_key: Option<String>,
    pub secret: Option<String>,
    pub source_type: Option<String>,
}

impl ReportOptions {
    /// Report a list of items.
    pub fn batch(
        base_url: impl Into<String>,
        secret_key: impl Into<String>,
        items: Vec<UsageItem>,
        billable: bool,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            secret_key: secret_key.into(),
            items,
            billable,
            idempotency_key: None,
            secret: None,
            source_type: None,
        }
    }

    /// Report one item; wraps it into a one-element list.
    pub fn single(
        base_url: impl Into<String>,
        secret_key: impl Into<String>,
        item: UsageItem,
        billable: bool,
    ) -> Self {
        Self::batch(base_url, secret_key, vec![item], billable)
    }

    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Sign with this consumer secret instead of looking it up.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn with_source_type(mut self, source_type: impl Into<String>) -> Self {
        self.source_type = Some(source_type.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_wraps_item() {
        let options = ReportOptions::single("https://b", "key", UsageItem::new("GB", 1.0), true);
        assert_eq!(options.items.len(), 1);
        assert!(options.idempotency_key.is_none());
        assert!(options.secret.is_none());
        assert!(options.source_type.is_none());
    }

    #[test]
    fn builders_set_optional_fields() {
        let options = ReportOptions::batch("https://b", "key", vec![], false)
            .with_idempotency_key("idem")
            .with_secret("shh")
            .with_source_type("CRON");

        assert_eq!(options.idempotency_key.as_deref(), Some("idem"));
        assert_eq!(options.secret.as_deref(), Some("shh"));
        assert_eq!(options.source_type.as_deref(), Some("CRON"));
    }
}
