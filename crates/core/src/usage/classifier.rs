//! Outcome classification
//!
//! Maps a raw HTTP response to an [`ApiResult`]. Non-2xx responses are data,
//! not errors; only an unreadable body escalates to a transport error.

use meterlink_domain::{ApiResult, RawResponse, ResponseBody, Result, UsageError};
use tracing::error;

/// Classify a raw response.
///
/// # Errors
///
/// Returns `UsageError::Transport` if the response body could not be read.
pub fn classify(response: RawResponse) -> Result<ApiResult> {
    let success = response.is_success();
    let RawResponse { status, status_line, body } = response;

    if success {
        let message = match body {
            ResponseBody::Empty => String::new(),
            ResponseBody::Text(text) => text,
            ResponseBody::Unreadable(reason) => return Err(UsageError::transport(reason)),
        };
        return Ok(ApiResult::success(status, message));
    }

    let error_body = match body {
        ResponseBody::Empty => None,
        ResponseBody::Text(text) => Some(text.trim().to_string()).filter(|t| !t.is_empty()),
        ResponseBody::Unreadable(reason) => {
            error!(response_code = status, error = %reason, "Failed to read usage error body");
            return Err(UsageError::transport(reason));
        }
    };

    let message = match error_body {
        Some(text) if status_line.is_empty() => text,
        Some(text) => format!("{status_line} {text}"),
        None => status_line,
    };

    error!(response_code = status, error = %message, "Metered usage call failed");
    Ok(ApiResult::failure(status, message))
}

#[cfg(test)]
mod tests {
    use meterlink_domain::ErrorCode;

    use super::*;

    #[test]
    fn success_carries_body() {
        let raw = RawResponse::new(200, "OK", ResponseBody::Text(r#"{"status":"ok"}"#.into()));
        let result = classify(raw).unwrap();

        assert!(result.success);
        assert_eq!(result.response_code, 200);
        assert!(result.message.contains(r#"{"status":"ok"}"#));
    }

    #[test]
    fn success_without_body_has_empty_message() {
        let result = classify(RawResponse::new(204, "No Content", ResponseBody::Empty)).unwrap();
        assert!(result.success);
        assert_eq!(result.response_code, 204);
        assert_eq!(result.message, "");
    }

    #[test]
    fn failure_without_body_is_status_line() {
        let raw = RawResponse::new(500, "Internal Server Error", ResponseBody::Empty);
        let result = classify(raw).unwrap();

        assert!(!result.success);
        assert_eq!(result.response_code, 500);
        assert_eq!(result.message, "Internal Server Error");
    }

    #[test]
    fn failure_appends_trimmed_body() {
        let raw = RawResponse::new(
            409,
            "Conflict",
            ResponseBody::Text("  Entry ALREADY exists with idempotencyKey=abc\n".into()),
        );
        let result = classify(raw).unwrap();

        assert_eq!(result.message, "Conflict Entry ALREADY exists with idempotencyKey=abc");
    }

    #[test]
    fn blank_error_body_is_ignored() {
        let raw = RawResponse::new(502, "Bad Gateway", ResponseBody::Text("   ".into()));
        assert_eq!(classify(raw).unwrap().message, "Bad Gateway");
    }

    #[test]
    fn missing_status_line_uses_body_alone() {
        let raw = RawResponse::new(418, "", ResponseBody::Text("teapot".into()));
        assert_eq!(classify(raw).unwrap().message, "teapot");
    }

    #[test]
    fn unreadable_error_body_is_transport_error() {
        let raw = RawResponse::new(
            503,
            "Service Unavailable",
            ResponseBody::Unreadable("connection reset".into()),
        );

        match classify(raw) {
            Err(UsageError::Transport { code, message }) => {
                assert_eq!(code, ErrorCode::UnknownError);
                assert_eq!(message, "connection reset");
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}
