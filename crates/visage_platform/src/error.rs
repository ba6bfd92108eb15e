//! Platform error types

use thiserror::Error;
use visage_core::SessionError;

/// Errors raised by platform collaborators
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Credentials are missing or malformed
    #[error("Invalid credentials: {0}")]
    Credentials(String),

    /// The capture engine refused to initialize
    #[error("Engine initialization failed: {0}")]
    InitFailed(String),

    /// Session token request could not be sent or was rejected
    #[error("Session token request failed: {0}")]
    TokenRequest(String),

    /// Session token response had no usable token
    #[error("Session token response invalid: {0}")]
    TokenResponse(String),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl From<reqwest::Error> for PlatformError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PlatformError::TokenResponse(err.to_string())
        } else if err.is_builder() {
            PlatformError::Client(err.to_string())
        } else {
            PlatformError::TokenRequest(err.to_string())
        }
    }
}

impl From<PlatformError> for SessionError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::Credentials(detail) | PlatformError::InitFailed(detail) => {
                SessionError::EngineInitialization(detail)
            }
            PlatformError::TokenRequest(_)
            | PlatformError::TokenResponse(_)
            | PlatformError::Client(_) => SessionError::token_acquisition(err.to_string()),
        }
    }
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
