//! Capture engine boundary
//!
//! The vendor engine is opaque. Hosts implement [`CaptureEngine`] over it;
//! the bridge runtime only sees initialization, a user-agent string and the
//! outcome of one session.

use crate::credentials::InitializationMode;
use crate::error::Result;
use async_trait::async_trait;
use visage_core::RawSessionResult;
use visage_theme::NativeTheme;

/// Everything the engine needs to initialize
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitializationRequest {
    pub device_key_identifier: String,
    pub mode: InitializationMode,
    pub production_key_text: Option<String>,
    pub face_scan_encryption_key: String,
}

/// How a session ended, as reported by the engine
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineOutcome {
    /// The engine reports success; fields may still be missing
    Completed(RawSessionResult),
    /// User cancel, timeout, engine error or any other non-success status
    NotCompleted { reason: Option<String> },
}

impl EngineOutcome {
    pub fn cancelled(reason: impl Into<String>) -> Self {
        EngineOutcome::NotCompleted {
            reason: Some(reason.into()),
        }
    }
}

/// The native capture and liveness engine
#[async_trait]
pub trait CaptureEngine: Send + Sync {
    /// Initialize once per session attempt
    async fn initialize(&self, request: &InitializationRequest) -> Result<()>;

    /// User-agent string sent with every server request of the session
    fn user_agent(&self, session_id: &str) -> String;

    /// Run one session on the mounted surface with a frozen theme
    ///
    /// The future is dropped when the surface unmounts mid-session.
    async fn run_session(&self, session_token: &str, theme: &NativeTheme) -> EngineOutcome;
}
