//! OAuth 1.0a one-legged request signing
//!
//! Consumer key and secret only: no `oauth_token`, signature key is
//! `percent(consumer_secret) + "&"`. The signature covers the method, the
//! normalized base URI and the query plus `oauth_*` parameters (RFC 5849
//! §3.4.1). Request bodies are JSON and therefore not signed.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use meterlink_domain::{Credentials, Result, UsageError};
use rand::RngCore;
use reqwest::Method;
use sha1::Sha1;
use url::Url;

type HmacSha1 = Hmac<Sha1>;

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";

/// Signs requests for one tenant.
///
/// Construct one per dispatch; the signer keeps no state between calls.
pub struct OAuth1Signer {
    consumer_key: String,
    consumer_secret: String,
}

impl OAuth1Signer {
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            consumer_key: credentials.consumer_key.clone(),
            consumer_secret: credentials.consumer_secret.clone(),
        }
    }

    /// `Authorization` header value with a fresh nonce and the current time.
    pub fn authorization_header(&self, method: &Method, url: &Url) -> Result<String> {
        self.authorization_header_with(method, url, &generate_nonce(), Utc::now().timestamp())
    }

    /// `Authorization` header value for a fixed nonce and timestamp.
    pub fn authorization_header_with(
        &self,
        method: &Method,
        url: &Url,
        nonce: &str,
        timestamp: i64,
    ) -> Result<String> {
        let timestamp = timestamp.to_string();
        let mut params = vec![
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_version", OAUTH_VERSION),
        ];

        let base_string = signature_base_string(method, url, &params)?;
        let signature = self.sign(&base_string)?;
        params.push(("oauth_signature", signature.as_str()));
        params.sort_unstable();

        let fields = params
            .iter()
            .map(|(key, value)| format!("{key}=\"{}\"", encode(value)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth realm=\"\", {fields}"))
    }

    /// Base64 HMAC-SHA1 of `base_string`.
    pub fn sign(&self, base_string: &str) -> Result<String> {
        let key = format!("{}&", encode(&self.consumer_secret));
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|err| UsageError::Config(format!("Invalid signing key: {err}")))?;
        mac.update(base_string.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// Signature base string: `METHOD&enc(base_uri)&enc(sorted params)`.
pub fn signature_base_string(
    method: &Method,
    url: &Url,
    oauth_params: &[(&str, &str)],
) -> Result<String> {
    let base_uri = normalized_base_uri(url)?;

    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| (encode(&key), encode(&value)))
        .chain(oauth_params.iter().map(|(key, value)| (encode(key), encode(value))))
        .collect();
    params.sort_unstable();

    let normalized = params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    Ok(format!(
        "{}&{}&{}",
        method.as_str().to_ascii_uppercase(),
        encode(&base_uri),
        encode(&normalized)
    ))
}

// `Url` already lowercases scheme and host and drops default ports.
fn normalized_base_uri(url: &Url) -> Result<String> {
    let host = url
        .host_str()
        .ok_or_else(|| UsageError::Config(format!("Request URL has no host: {url}")))?;

    let mut base = format!("{}://{}", url.scheme(), host);
    if let Some(port) = url.port() {
        base.push(':');
        base.push_str(&port.to_string());
    }
    base.push_str(url.path());
    Ok(base)
}

/// RFC 3986 percent-encoding: everything but `A-Za-z0-9-._~`.
fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// 128 random bits, hex encoded.
fn generate_nonce() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
