//! Bridge entry point

use crate::config::BridgeConfig;
use crate::error::Result;
use crate::surface::{CaptureSurface, SurfaceConfig};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;
use visage_core::SessionState;
use visage_platform::{CaptureEngine, HttpTokenProvider, SessionTokenProvider};

/// Shared collaborators and configuration for every surface of a host
#[derive(Clone)]
pub struct VisageBridge {
    config: BridgeConfig,
    engine: Arc<dyn CaptureEngine>,
    tokens: Arc<dyn SessionTokenProvider>,
}

impl VisageBridge {
    /// Bridge fetching session tokens over HTTP as configured
    pub fn new(config: BridgeConfig, engine: Arc<dyn CaptureEngine>) -> Result<Self> {
        let provider = HttpTokenProvider::with_timeout(
            &config.token.base_url,
            &config.token.path,
            config.token.timeout(),
        )?;
        debug!(endpoint = provider.endpoint(), "session token endpoint");

        Ok(Self::with_token_provider(config, engine, Arc::new(provider)))
    }

    pub fn with_token_provider(
        config: BridgeConfig,
        engine: Arc<dyn CaptureEngine>,
        tokens: Arc<dyn SessionTokenProvider>,
    ) -> Self {
        Self {
            config,
            engine,
            tokens,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Create an unmounted surface and its state receiver
    pub fn create_surface(
        &self,
        surface: SurfaceConfig,
    ) -> (CaptureSurface, mpsc::Receiver<SessionState>) {
        CaptureSurface::new(
            Arc::clone(&self.engine),
            Arc::clone(&self.tokens),
            surface,
            &self.config,
        )
    }
}
