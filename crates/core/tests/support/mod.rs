#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use meterlink_core::{CredentialsSupplier, MeteredUsageService, SignedTransport};
use meterlink_domain::{
    Credentials, RawResponse, ResponseBody, Result as DomainResult, UsageError, UsageRequest,
};

/// One recorded `SignedTransport::send` invocation.
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub base_url: String,
    pub credentials: Credentials,
    pub request: UsageRequest,
}

/// In-memory transport that records every call and replays a scripted reply.
#[derive(Clone)]
pub struct RecordingTransport {
    reply: Arc<Mutex<Result<RawResponse, UsageError>>>,
    sent: Arc<Mutex<Vec<SentRequest>>>,
}

impl RecordingTransport {
    pub fn responding(response: RawResponse) -> Self {
        Self { reply: Arc::new(Mutex::new(Ok(response))), sent: Arc::default() }
    }

    pub fn ok(body: &str) -> Self {
        Self::responding(RawResponse::new(200, "OK", ResponseBody::Text(body.to_string())))
    }

    pub fn failing(error: UsageError) -> Self {
        Self { reply: Arc::new(Mutex::new(Err(error))), sent: Arc::default() }
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> SentRequest {
        self.sent.lock().unwrap().last().cloned().expect("at least one request sent")
    }
}

#[async_trait]
impl SignedTransport for RecordingTransport {
    async fn send(
        &self,
        base_url: &str,
        credentials: &Credentials,
        request: &UsageRequest,
    ) -> DomainResult<RawResponse> {
        self.sent.lock().unwrap().push(SentRequest {
            base_url: base_url.to_string(),
            credentials: credentials.clone(),
            request: request.clone(),
        });
        self.reply.lock().unwrap().clone()
    }
}

/// Map-backed credentials supplier that counts lookups.
#[derive(Default, Clone)]
pub struct MapCredentials {
    secrets: Arc<Mutex<HashMap<String, String>>>,
    lookups: Arc<Mutex<usize>>,
}

impl MapCredentials {
    pub fn with_tenant(self, secret_key: &str, secret: &str) -> Self {
        self.secrets.lock().unwrap().insert(secret_key.to_string(), secret.to_string());
        self
    }

    pub fn lookups(&self) -> usize {
        *self.lookups.lock().unwrap()
    }
}

#[async_trait]
impl CredentialsSupplier for MapCredentials {
    async fn resolve(&self, secret_key: &str) -> DomainResult<Credentials> {
        *self.lookups.lock().unwrap() += 1;
        self.secrets
            .lock()
            .unwrap()
            .get(secret_key)
            .map(|secret| Credentials::new(secret_key, secret.clone()))
            .ok_or_else(|| UsageError::UnknownTenant(secret_key.to_string()))
    }
}

pub const BASE_URL: &str = "https://billing.example.com";
pub const TENANT: &str = "tenant-key";
pub const TENANT_SECRET: &str = "tenant-secret";

/// Service wired to a fresh supplier (with one known tenant) and `transport`.
pub fn service_with(transport: &RecordingTransport) -> (MeteredUsageService, MapCredentials) {
    let credentials = MapCredentials::default().with_tenant(TENANT, TENANT_SECRET);
    let service =
        MeteredUsageService::new(Arc::new(credentials.clone()), Arc::new(transport.clone()));
    (service, credentials)
}
