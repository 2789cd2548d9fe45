//! Conversions from external infrastructure errors into domain errors.

use std::error::Error as StdError;

use meterlink_domain::UsageError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and is
/// converted into the domain error at the crate boundary.
#[derive(Debug)]
pub struct InfraError(pub UsageError);

impl From<InfraError> for UsageError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoUsageError {
    fn into_usage_error(self) -> UsageError;
}

/// Render an error together with its source chain, `outer: inner: root`.
pub fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → UsageError */
/* -------------------------------------------------------------------------- */

impl IntoUsageError for HttpError {
    fn into_usage_error(self) -> UsageError {
        let detail = describe(&self);

        // Request could not be assembled (bad URL, bad header value).
        if self.is_builder() {
            return UsageError::Config(format!("Invalid HTTP request: {detail}"));
        }

        if self.is_timeout() {
            return UsageError::transport(format!("HTTP request timed out: {detail}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return UsageError::transport(format!("HTTP connection failure: {detail}"));
        }

        if self.is_body() || self.is_decode() {
            return UsageError::transport(format!("Failed to read HTTP response: {detail}"));
        }

        UsageError::transport(detail)
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_usage_error())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
