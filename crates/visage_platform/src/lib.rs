//! Visage Platform Boundary
//!
//! The collaborators the bridge runtime drives but does not implement:
//!
//! - [`Credentials`]: device key, optional production key, encryption key and session token
//! - [`CaptureEngine`]: the opaque native capture engine
//! - [`SessionTokenProvider`]: session token acquisition, with an HTTP implementation

pub mod credentials;
pub mod engine;
pub mod error;
pub mod token;

pub use credentials::{Credentials, InitializationMode, DEV_FACE_SCAN_ENCRYPTION_KEY};
pub use engine::{CaptureEngine, EngineOutcome, InitializationRequest};
pub use error::{PlatformError, Result};
pub use token::{HttpTokenProvider, SessionTokenProvider, TokenRequest};
