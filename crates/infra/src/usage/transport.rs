//! OAuth-signed HTTP transport for usage reports

use async_trait::async_trait;
use meterlink_core::SignedTransport;
use meterlink_domain::{
    Credentials, RawResponse, ReporterConfig, ResponseBody, Result, UsageError, UsageRequest,
};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use tracing::{debug, field, instrument, Span};
use url::Url;

use crate::errors::describe;
use crate::http::HttpClient;
use crate::signing::OAuth1Signer;

/// [`SignedTransport`] that POSTs the JSON usage request to
/// `base_url + usage_path`, signed with OAuth 1.0a.
///
/// The underlying connection pool is shared; signing state is not. A new
/// [`OAuth1Signer`] is built for every call.
#[derive(Clone)]
pub struct OAuthSignedTransport {
    http: HttpClient,
    usage_path: String,
}

impl OAuthSignedTransport {
    pub fn new(http: HttpClient, usage_path: impl Into<String>) -> Self {
        Self { http, usage_path: usage_path.into() }
    }

    /// Transport with the configured timeouts, user agent and usage path.
    pub fn from_config(config: &ReporterConfig) -> Result<Self> {
        Ok(Self::new(HttpClient::from_config(config)?, config.usage_path.clone()))
    }
}

#[async_trait]
impl SignedTransport for OAuthSignedTransport {
    #[instrument(
        skip(self, credentials, request),
        fields(url = field::Empty, idempotency_key = %request.idempotency_key)
    )]
    async fn send(
        &self,
        base_url: &str,
        credentials: &Credentials,
        request: &UsageRequest,
    ) -> Result<RawResponse> {
        let url = usage_endpoint(base_url, &self.usage_path)?;
        Span::current().record("url", url.as_str());

        let body = serde_json::to_vec(request)?;
        let authorization =
            OAuth1Signer::new(credentials).authorization_header(&Method::POST, &url)?;

        let builder = self
            .http
            .request(Method::POST, url)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body);

        let response = self.http.send(builder).await?;

        let status = response.status();
        let status_line = status_line(status);
        let body = match response.text().await {
            Ok(text) if text.is_empty() => ResponseBody::Empty,
            Ok(text) => ResponseBody::Text(text),
            Err(err) => ResponseBody::Unreadable(describe(&err)),
        };

        debug!(status = status.as_u16(), "Usage endpoint responded");
        Ok(RawResponse::new(status.as_u16(), status_line, body))
    }
}

/// Reason phrase for `status`, or `HTTP <code>` for codes without one.
fn status_line(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

/// Join `base_url` and `usage_path` with exactly one `/` between them.
pub fn usage_endpoint(base_url: &str, usage_path: &str) -> Result<Url> {
    let joined =
        format!("{}/{}", base_url.trim_end_matches('/'), usage_path.trim_start_matches('/'));
    Url::parse(&joined)
        .map_err(|err| UsageError::Config(format!("Invalid usage endpoint {joined}: {err}")))
}
