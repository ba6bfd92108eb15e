//! Session token acquisition

use crate::error::{PlatformError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.facetec.com/api/v3.1/biometrics";
pub const DEFAULT_TOKEN_PATH: &str = "/session-token";

/// Identity sent along with a token request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRequest {
    pub device_key_identifier: String,
    pub user_agent: String,
}

/// Source of short-lived session tokens
#[async_trait]
pub trait SessionTokenProvider: Send + Sync {
    async fn fetch_token(&self, request: &TokenRequest) -> Result<String>;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    session_token: Option<serde_json::Value>,
}

/// Fetches tokens with `GET {base_url}{path}`
#[derive(Clone, Debug)]
pub struct HttpTokenProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTokenProvider {
    /// Provider with the transport's own timeout behavior
    pub fn new(base_url: &str, path: &str) -> Result<Self> {
        Self::with_timeout(base_url, path, None)
    }

    pub fn with_timeout(base_url: &str, path: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| PlatformError::Client(e.to_string()))?;

        Ok(Self::from_client(client, base_url, path))
    }

    /// Provider over a preconfigured client
    pub fn from_client(client: reqwest::Client, base_url: &str, path: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), path),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SessionTokenProvider for HttpTokenProvider {
    async fn fetch_token(&self, request: &TokenRequest) -> Result<String> {
        debug!(endpoint = %self.endpoint, "requesting session token");

        let response = self
            .client
            .get(&self.endpoint)
            .header("X-Device-Key", &request.device_key_identifier)
            .header("User-Agent", &request.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlatformError::TokenRequest(format!(
                "server answered {status}"
            )));
        }

        let body = response.text().await?;
        parse_token_response(&body)
    }
}

/// Extract `sessionToken` from a response body
pub fn parse_token_response(body: &str) -> Result<String> {
    let parsed: TokenResponse =
        serde_json::from_str(body).map_err(|e| PlatformError::TokenResponse(e.to_string()))?;

    match parsed.session_token {
        Some(serde_json::Value::String(token)) if !token.trim().is_empty() => Ok(token),
        Some(_) => Err(PlatformError::TokenResponse(
            "sessionToken is not a non-empty string".to_string(),
        )),
        None => Err(PlatformError::TokenResponse(
            "response has no sessionToken".to_string(),
        )),
    }
}
