//! Failure policy for the retryable entry point
//!
//! Turns a failed [`ApiResult`] into a typed error. No retry loop or backoff
//! lives here; callers decide what to do with the error kind.

use meterlink_domain::constants::IDEMPOTENCY_KEY_ALREADY_SHARED;
use meterlink_domain::{ApiResult, Result, UsageError};

/// Whether a failure message reports an already-consumed idempotency key.
///
/// Case-sensitive substring match on [`IDEMPOTENCY_KEY_ALREADY_SHARED`].
pub fn is_duplicate_submission(message: &str) -> bool {
    message.contains(IDEMPOTENCY_KEY_ALREADY_SHARED)
}

/// Pass successes through; raise failures as `DuplicateSubmission` or
/// `ServiceFailure`.
pub fn enforce_success(result: ApiResult) -> Result<ApiResult> {
    if result.success {
        return Ok(result);
    }

    let ApiResult { response_code, message, .. } = result;
    if is_duplicate_submission(&message) {
        Err(UsageError::DuplicateSubmission { response_code, message })
    } else {
        Err(UsageError::ServiceFailure { response_code, message })
    }
}
