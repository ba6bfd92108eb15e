//! Caller credentials and engine initialization mode

use crate::engine::InitializationRequest;
use crate::error::{PlatformError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Public face scan encryption key used when the caller supplies none
pub const DEV_FACE_SCAN_ENCRYPTION_KEY: &str = "-----BEGIN PUBLIC KEY-----\n\
MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEA5PxZ3DLj+zP6T6HFgzzk\n\
M77LdzP3fojBoLasw7EfzvLMnJNUlyRb5m8e5QyyJxI+wRjsALHvFgLzGwxM8ehz\n\
DqqBZed+f4w33GgQXFZOS4AOvyPbALgCYoLehigLAbbCNTkeY5RDcmmSI/sbp+s6\n\
mAiAKKvCdIqe17bltZ/rfEoL3gPKEfLXeN549LTj3XBp0hvG4loQ6eC1E1tRzSkf\n\
GJD4GIVvR+j12gXAaftj3ahfYxioBH7F7HQxzmWkwDyn3bqU54eaiB7f0ftsPpWM\n\
ceUaqkL2DZUvgN0efEJjnWy5y1/Gkq5GGWCROI9XG/SwXJ30BbVUehTbVcD70+ZF\n\
8QIDAQAB\n\
-----END PUBLIC KEY-----";

/// How the capture engine is initialized
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InitializationMode {
    #[default]
    Development,
    Production,
}

/// Credentials supplied with a mount
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub device_key_identifier: String,
    #[serde(default)]
    pub production_key_text: Option<String>,
    #[serde(default)]
    pub face_scan_encryption_key: Option<String>,
    #[serde(default)]
    pub session_token: Option<String>,
}

impl Credentials {
    pub fn new(device_key_identifier: impl Into<String>) -> Self {
        Self {
            device_key_identifier: device_key_identifier.into(),
            ..Self::default()
        }
    }

    pub fn with_production_key(mut self, key_text: impl Into<String>) -> Self {
        self.production_key_text = Some(key_text.into());
        self
    }

    pub fn with_encryption_key(mut self, key: impl Into<String>) -> Self {
        self.face_scan_encryption_key = Some(key.into());
        self
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Production when a non-blank production key is present
    pub fn initialization_mode(&self) -> InitializationMode {
        match non_blank(&self.production_key_text) {
            Some(_) => InitializationMode::Production,
            None => InitializationMode::Development,
        }
    }

    pub fn encryption_key(&self) -> &str {
        non_blank(&self.face_scan_encryption_key).unwrap_or(DEV_FACE_SCAN_ENCRYPTION_KEY)
    }

    /// A caller-provided token; blank tokens count as absent
    pub fn session_token(&self) -> Option<&str> {
        non_blank(&self.session_token)
    }

    /// Build the engine initialization request
    pub fn initialization_request(&self) -> Result<InitializationRequest> {
        let device_key = self.device_key_identifier.trim();
        if device_key.is_empty() {
            return Err(PlatformError::Credentials(
                "device key identifier is blank".to_string(),
            ));
        }

        Ok(InitializationRequest {
            device_key_identifier: device_key.to_string(),
            mode: self.initialization_mode(),
            production_key_text: non_blank(&self.production_key_text).map(str::to_string),
            face_scan_encryption_key: self.encryption_key().to_string(),
        })
    }
}

// Keys and tokens stay out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("device_key_identifier", &self.device_key_identifier)
            .field("mode", &self.initialization_mode())
            .field("custom_encryption_key", &self.face_scan_encryption_key.is_some())
            .field("session_token", &self.session_token().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
