//! Visage Bridge Runtime
//!
//! Mounts capture surfaces, runs one session context per mount and delivers
//! normalized session states to the caller.
//!
//! # Example
//!
//! ```ignore
//! use visage_app::prelude::*;
//!
//! let config = BridgeConfig::load(Path::new("."))?;
//! visage_app::init_logging(&config.logging.filter);
//!
//! let bridge = VisageBridge::new(config, engine)?;
//! let (mut surface, mut states) = bridge.create_surface(
//!     SurfaceConfig::new(Credentials::new("device-key"))
//!         .with_customization_json(r#"{"faceTecFrameCustomization":{"borderWidth":4}}"#),
//! );
//!
//! surface.set_visible(true)?;
//! while let Some(state) = states.recv().await {
//!     if state.is_terminal() {
//!         break;
//!     }
//! }
//! ```

mod bridge;
pub mod config;
mod context;
mod error;
mod events;
mod logging;
mod registry;
mod surface;

pub use bridge::VisageBridge;
pub use config::BridgeConfig;
pub use context::{Collaborators, SessionContext, SURFACE_CLOSED_MESSAGE};
pub use error::{BridgeError, Result};
pub use events::{spawn_normalizer, EventPublisher};
pub use logging::init_logging;
pub use registry::{SurfaceId, SurfaceRegistry};
pub use surface::{CaptureSurface, SurfaceConfig};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::bridge::VisageBridge;
    pub use crate::config::BridgeConfig;
    pub use crate::error::{BridgeError, Result};
    pub use crate::registry::{SurfaceId, SurfaceRegistry};
    pub use crate::surface::{CaptureSurface, SurfaceConfig};

    pub use visage_core::{SessionLoad, SessionState, SessionStatus};
    pub use visage_platform::{CaptureEngine, Credentials, EngineOutcome, SessionTokenProvider};
    pub use visage_theme::{ConfigurationDocument, NativeTheme, VocalGuidanceMode};
}
