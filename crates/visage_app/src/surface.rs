//! Capture surface
//!
//! Bridges a declarative visibility flag to the imperative session
//! lifecycle. Showing the surface starts a fresh [`SessionContext`] on the
//! current Tokio runtime; hiding it cancels whatever that attempt is doing.
//!
//! The theme is translated once, when the surface is created, and shared
//! read-only with every attempt.

use crate::config::BridgeConfig;
use crate::context::{Collaborators, SessionContext};
use crate::error::{BridgeError, Result};
use crate::events::spawn_normalizer;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use visage_core::SessionState;
use visage_platform::{CaptureEngine, Credentials, SessionTokenProvider};
use visage_theme::{ConfigurationDocument, NativeTheme, Translator, VocalGuidanceMode};

/// Properties supplied when a surface is created
#[derive(Clone, Debug, Default)]
pub struct SurfaceConfig {
    pub credentials: Credentials,
    pub customization: ConfigurationDocument,
    pub vocal_guidance: VocalGuidanceMode,
}

impl SurfaceConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            ..Self::default()
        }
    }

    pub fn with_customization(mut self, customization: ConfigurationDocument) -> Self {
        self.customization = customization;
        self
    }

    /// Customization from a JSON string
    ///
    /// An unparsable document is logged and replaced by an empty one, so the
    /// surface still mounts with the default theme.
    pub fn with_customization_json(mut self, text: &str) -> Self {
        self.customization = match ConfigurationDocument::from_json_str(text) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(error = %err, "ignoring customization document");
                ConfigurationDocument::new()
            }
        };
        self
    }

    pub fn with_vocal_guidance(mut self, mode: VocalGuidanceMode) -> Self {
        self.vocal_guidance = mode;
        self
    }

    /// Freeze the theme for every attempt of this surface
    fn build_theme(&self) -> Arc<NativeTheme> {
        let (theme, report) = Translator::standard()
            .translate_with_report(NativeTheme::default(), &self.customization);
        debug!(
            applied = report.applied,
            skipped = report.skipped,
            unsupported = report.unsupported,
            unknown = report.unknown,
            "customization translated"
        );
        Arc::new(theme.with_vocal_guidance(self.vocal_guidance))
    }
}

/// Tasks of one attempt; the attempt is over once both have finished
struct AttemptTasks {
    session: JoinHandle<()>,
    normalizer: JoinHandle<()>,
}

impl AttemptTasks {
    /// Wait until every state of the attempt has reached the caller channel
    async fn settle(self) {
        for task in [self.session, self.normalizer] {
            if let Err(err) = task.await {
                debug!(error = %err, "previous attempt ended abnormally");
            }
        }
    }
}

struct ActiveAttempt {
    cancel: watch::Sender<bool>,
    tasks: AttemptTasks,
}

/// A mountable capture surface with one session per mount
pub struct CaptureSurface {
    credentials: Credentials,
    theme: Arc<NativeTheme>,
    collaborators: Collaborators,
    channel_capacity: usize,
    events: mpsc::Sender<SessionState>,
    active: Option<ActiveAttempt>,
    /// Unmounted attempt that may still be delivering its last state
    draining: Option<AttemptTasks>,
    attempts: u64,
}

impl CaptureSurface {
    /// Create an unmounted surface and the receiver its states arrive on
    pub fn new(
        engine: Arc<dyn CaptureEngine>,
        tokens: Arc<dyn SessionTokenProvider>,
        config: SurfaceConfig,
        bridge: &BridgeConfig,
    ) -> (Self, mpsc::Receiver<SessionState>) {
        let capacity = bridge.events.channel_capacity.max(1);
        let (events, receiver) = mpsc::channel(capacity);

        let surface = Self {
            theme: config.build_theme(),
            credentials: config.credentials,
            collaborators: Collaborators { engine, tokens },
            channel_capacity: capacity,
            events,
            active: None,
            draining: None,
            attempts: 0,
        };
        (surface, receiver)
    }

    pub fn is_mounted(&self) -> bool {
        self.active.is_some()
    }

    /// Number of session attempts started so far
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn theme(&self) -> &NativeTheme {
        &self.theme
    }

    /// Whether the current attempt has finished, if one is mounted
    pub fn is_session_finished(&self) -> Option<bool> {
        self.active
            .as_ref()
            .map(|active| active.tasks.session.is_finished())
    }

    /// Apply the visibility flag
    ///
    /// Showing an already mounted surface does nothing. Mounting needs a
    /// Tokio runtime on the calling thread. A new attempt publishes nothing
    /// until the previous one has delivered its final state.
    pub fn set_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            self.mount()
        } else {
            self.unmount();
            Ok(())
        }
    }

    fn mount(&mut self) -> Result<()> {
        if self.active.is_some() {
            debug!("surface already mounted");
            return Ok(());
        }

        let handle = Handle::try_current().map_err(|e| BridgeError::NoRuntime(e.to_string()))?;

        self.attempts += 1;
        let label = format!("attempt-{}", self.attempts);
        let (publisher, normalizer) = spawn_normalizer(self.channel_capacity, self.events.clone());
        let context = SessionContext::new(
            label.clone(),
            self.credentials.clone(),
            Arc::clone(&self.theme),
            publisher,
        );

        let (cancel, cancelled) = watch::channel(false);
        let previous = self.draining.take();
        let collaborators = self.collaborators.clone();
        let session = handle.spawn(async move {
            if let Some(previous) = previous {
                previous.settle().await;
            }
            if *cancelled.borrow() {
                return;
            }
            context.run(collaborators, cancelled).await;
        });

        info!(session = %label, "capture surface mounted");
        self.active = Some(ActiveAttempt {
            cancel,
            tasks: AttemptTasks {
                session,
                normalizer,
            },
        });
        Ok(())
    }

    /// Cancel the mounted attempt, if any
    pub fn unmount(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel.send_replace(true);
            self.draining = Some(active.tasks);
            info!(attempt = self.attempts, "capture surface unmounted");
        }
    }
}

impl Drop for CaptureSurface {
    fn drop(&mut self) {
        self.unmount();
    }
}
