//! Google Cloud Secret Manager resolver.
//!
//! Fetches secret versions through the Secret Manager REST API
//! (`GET {endpoint}/{name}:access`) using a bearer token supplied by
//! configuration. Payload bytes arrive base64-encoded in the JSON response.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::canonical::CanonicalAddress;
use super::types::{ResolveError, SecretResolver};
use crate::config::BackendConfig;
use crate::error::{Error, Result};

/// Resolves references against Secret Manager.
///
/// The HTTP client is built once and reused for every reference in a run.
pub struct GcpSecretManager {
    client: Client,
    endpoint: String,
    access_token: Option<String>,
}

impl GcpSecretManager {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    fn access_url(&self, address: &CanonicalAddress) -> String {
        format!("{}/{}:access", self.endpoint, address)
    }
}

#[derive(Debug, Deserialize)]
struct AccessSecretVersionResponse {
    #[serde(default)]
    payload: Option<SecretPayload>,
}

#[derive(Debug, Deserialize)]
struct SecretPayload {
    #[serde(default)]
    data: Option<String>,
}

#[async_trait]
impl SecretResolver for GcpSecretManager {
    fn name(&self) -> &str {
        "gcp-secret-manager"
    }

    async fn access(
        &self,
        address: &CanonicalAddress,
    ) -> std::result::Result<Vec<u8>, ResolveError> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(ResolveError::MissingCredentials)?;

        let url = self.access_url(address);
        debug!("GET {url}");

        let resp = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ResolveError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::NOT_FOUND => ResolveError::NotFound {
                    address: address.to_string(),
                },
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ResolveError::PermissionDenied {
                        address: address.to_string(),
                        detail: body.trim().to_string(),
                    }
                }
                _ => ResolveError::Backend {
                    status: status.as_u16(),
                    body: body.trim().to_string(),
                },
            });
        }

        let parsed: AccessSecretVersionResponse = resp
            .json()
            .await
            .map_err(|e| ResolveError::InvalidPayload(format!("malformed access response: {e}")))?;

        // An empty secret comes back without `data`.
        let data = parsed
            .payload
            .and_then(|payload| payload.data)
            .unwrap_or_default();

        STANDARD
            .decode(data.as_bytes())
            .map_err(|e| ResolveError::InvalidPayload(format!("base64 decode failed: {e}")))
    }
}
