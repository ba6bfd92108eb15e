//! Bridge runtime error types

use thiserror::Error;
use visage_platform::PlatformError;

/// Errors raised to the host integrating the bridge
///
/// Session failures never surface here; they arrive as terminal states.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Mounting requires a Tokio runtime on the calling thread
    #[error("No async runtime available: {0}")]
    NoRuntime(String),

    /// The surface id is stale or was never issued
    #[error("Unknown capture surface")]
    UnknownSurface,

    /// A collaborator could not be constructed
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
