//! Session error types
//!
//! Every variant is terminal for the session attempt it occurs in and
//! resolves to a [`SessionState`] through [`SessionError::into_state`].

use crate::session::{SessionState, SessionStatus};
use thiserror::Error;

/// Message reported for any failure while acquiring a session token
pub const TOKEN_ACQUISITION_MESSAGE: &str =
    "Session could not be started due to an unexpected issue during the network request.";

/// Message reported when the engine rejects its configuration
pub const ENGINE_INITIALIZATION_MESSAGE: &str =
    "Initialization failed, check your configuration properties";

/// Message reported when the engine ends a session without success
pub const EARLY_EXIT_MESSAGE: &str = "Early exit encountered";

/// Session-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Network or parse failure while fetching a session token
    ///
    /// The detail is kept for logging; callers only ever see the fixed message.
    #[error("{}", TOKEN_ACQUISITION_MESSAGE)]
    TokenAcquisition { detail: String },

    /// The native engine failed to initialize
    #[error("Initialization failed, check your configuration properties: {0}")]
    EngineInitialization(String),

    /// Timeout, user cancellation or a mid-session engine error
    #[error("{0}")]
    Aborted(String),

    /// The engine reported success without every required load field
    #[error("Native engine error: session completed without {}", .missing.join(", "))]
    LoadAssembly { missing: Vec<&'static str> },

    /// A boundary event could not be decoded
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

impl SessionError {
    pub fn token_acquisition(detail: impl Into<String>) -> Self {
        Self::TokenAcquisition {
            detail: detail.into(),
        }
    }

    /// Status this error resolves to
    ///
    /// Aborted sessions are `Cancelled` so the caller can tell a user who
    /// walked away from a system that broke; everything else is `Failed`.
    pub fn status(&self) -> SessionStatus {
        match self {
            Self::Aborted(_) => SessionStatus::Cancelled,
            _ => SessionStatus::Failed,
        }
    }

    /// Resolve into the terminal state delivered to the caller
    pub fn into_state(self) -> SessionState {
        SessionState {
            status: self.status(),
            message: Some(self.to_string()),
            load: None,
        }
    }
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
