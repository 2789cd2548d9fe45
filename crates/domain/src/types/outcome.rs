//! Call outcomes: what the transport hands back and what callers receive

use serde::{Deserialize, Serialize};

/// Body of an HTTP response as read by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// No body, or a zero-length one.
    Empty,
    Text(String),
    /// The body stream failed mid-read; carries the I/O reason.
    Unreadable(String),
}

/// Raw HTTP response, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Reason phrase of the status line, e.g. `Internal Server Error`.
    pub status_line: String,
    pub body: ResponseBody,
}

impl RawResponse {
    pub fn new(status: u16, status_line: impl Into<String>, body: ResponseBody) -> Self {
        Self { status, status_line: status_line.into(), body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Classified outcome of one usage call.
///
/// On success `message` holds the response body; on failure it holds the
/// status line, followed by the error body text when there is one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult {
    pub success: bool,
    pub response_code: u16,
    pub message: String,
}

impl ApiResult {
    pub fn success(response_code: u16, message: impl Into<String>) -> Self {
        Self { success: true, response_code, message: message.into() }
    }

    pub fn failure(response_code: u16, message: impl Into<String>) -> Self {
        Self { success: false, response_code, message: message.into() }
    }
}
