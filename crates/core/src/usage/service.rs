//! Metered usage service - core reporting pipeline
//!
//! build -> dispatch -> classify, plus the retryable wrapper that turns failed
//! outcomes into typed errors.

use std::sync::Arc;

use meterlink_domain::constants::{
    BASE_URL_REQUIRED, IDEMPOTENCY_KEY_REQUIRED, SECRET_KEY_REQUIRED, USAGES_REQUIRED,
};
use meterlink_domain::{
    ApiResult, Credentials, RawResponse, Result, UsageError, UsageItem, UsageRequest,
};
use tracing::{debug, error, field, instrument, warn, Span};

use super::builder::build_request;
use super::classifier::classify;
use super::options::ReportOptions;
use super::policy::enforce_success;
use super::ports::{CredentialsSupplier, SignedTransport};

/// Reports metered usage on behalf of many tenants.
///
/// Holds no per-call state: every call resolves its own credentials and the
/// transport signs each request independently, so one service can be shared
/// across tasks.
pub struct MeteredUsageService {
    credentials: Arc<dyn CredentialsSupplier>,
    transport: Arc<dyn SignedTransport>,
}

impl MeteredUsageService {
    /// Create a new usage service
    pub fn new(
        credentials: Arc<dyn CredentialsSupplier>,
        transport: Arc<dyn SignedTransport>,
    ) -> Self {
        Self { credentials, transport }
    }

    /// Canonical entry point: build, dispatch and classify one report.
    ///
    /// A non-2xx response is returned as `Ok(ApiResult { success: false, .. })`.
    ///
    /// # Errors
    ///
    /// - `PreconditionFailed` for empty base URL, secret key, idempotency key
    ///   or item list (no network call is made)
    /// - `UnknownTenant` if the secret has to be resolved and is not registered
    /// - `Transport` if no response could be obtained or read
    #[instrument(
        skip(self, options),
        fields(
            billable = options.billable,
            items = options.items.len(),
            idempotency_key = field::Empty
        )
    )]
    pub async fn report_usage(&self, options: ReportOptions) -> Result<ApiResult> {
        let ReportOptions {
            base_url,
            secret_key,
            items,
            billable,
            idempotency_key,
            secret,
            source_type,
        } = options;

        let request = build_request(idempotency_key, items, billable, source_type);
        Span::current().record("idempotency_key", request.idempotency_key.as_str());

        let response = self.dispatch(&base_url, &secret_key, secret.as_deref(), &request).await?;
        classify(response)
    }

    /// Report once and raise failed outcomes as typed errors.
    ///
    /// # Errors
    ///
    /// Everything [`report_usage`](Self::report_usage) raises, plus
    /// `DuplicateSubmission` when the idempotency key was already consumed
    /// upstream and `ServiceFailure` for any other non-2xx response.
    pub async fn retryable_report_usage(&self, options: ReportOptions) -> Result<ApiResult> {
        let billable = options.billable;
        let requested_key = options.idempotency_key.clone();

        let result = self.report_usage(options).await?;
        if !result.success {
            warn!(
                idempotency_key = ?requested_key,
                billable,
                response_code = result.response_code,
                message = %result.message,
                "Failed to inform usage"
            );
        }

        enforce_success(result).inspect_err(|err| {
            if let UsageError::DuplicateSubmission { .. } = err {
                error!(
                    idempotency_key = ?requested_key,
                    "Usage already shared upstream with this idempotency key"
                );
            }
        })
    }

    /// Check preconditions, resolve the signing secret and send `request`.
    ///
    /// `secret` is used as the consumer secret when given; otherwise it is
    /// looked up by `secret_key`.
    ///
    /// # Errors
    ///
    /// `PreconditionFailed`, `UnknownTenant` or `Transport`.
    pub async fn dispatch(
        &self,
        base_url: &str,
        secret_key: &str,
        secret: Option<&str>,
        request: &UsageRequest,
    ) -> Result<RawResponse> {
        check_preconditions(base_url, secret_key, request)?;

        let consumer_secret = match secret {
            Some(secret) => secret.to_string(),
            None => self.credentials.resolve(secret_key).await?.consumer_secret,
        };
        let credentials = Credentials::new(secret_key, consumer_secret);

        debug!(
            base_url,
            usages = request.usages.len(),
            source_type = %request.source_type,
            "Dispatching metered usage"
        );

        self.transport.send(base_url, &credentials, request).await.inspect_err(|err| {
            error!(error = %err, "Metered usage client failed");
        })
    }

    /// Report one item under a generated idempotency key.
    pub async fn report_item(
        &self,
        base_url: &str,
        secret_key: &str,
        item: UsageItem,
        billable: bool,
    ) -> Result<ApiResult> {
        self.report_usage(ReportOptions::single(base_url, secret_key, item, billable)).await
    }

    /// Report a list of items under a generated idempotency key.
    pub async fn report_items(
        &self,
        base_url: &str,
        secret_key: &str,
        items: Vec<UsageItem>,
        billable: bool,
    ) -> Result<ApiResult> {
        self.report_usage(ReportOptions::batch(base_url, secret_key, items, billable)).await
    }

    /// Report one item, signing with an explicit consumer secret.
    pub async fn report_item_with_secret(
        &self,
        base_url: &str,
        item: UsageItem,
        billable: bool,
        secret_key: &str,
        secret: &str,
    ) -> Result<ApiResult> {
        self.report_usage(
            ReportOptions::single(base_url, secret_key, item, billable).with_secret(secret),
        )
        .await
    }

    /// Report a list of items, signing with an explicit consumer secret.
    pub async fn report_items_with_secret(
        &self,
        base_url: &str,
        items: Vec<UsageItem>,
        billable: bool,
        secret_key: &str,
        secret: &str,
    ) -> Result<ApiResult> {
        self.report_usage(
            ReportOptions::batch(base_url, secret_key, items, billable).with_secret(secret),
        )
        .await
    }
}

fn check_preconditions(base_url: &str, secret_key: &str, request: &UsageRequest) -> Result<()> {
    if base_url.is_empty() {
        return Err(UsageError::PreconditionFailed(BASE_URL_REQUIRED));
    }
    if secret_key.is_empty() {
        return Err(UsageError::PreconditionFailed(SECRET_KEY_REQUIRED));
    }
    if request.idempotency_key.is_empty() {
        return Err(UsageError::PreconditionFailed(IDEMPOTENCY_KEY_REQUIRED));
    }
    if request.usages.is_empty() {
        return Err(UsageError::PreconditionFailed(USAGES_REQUIRED));
    }
    Ok(())
}
