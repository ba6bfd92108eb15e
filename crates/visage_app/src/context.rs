//! Session-scoped context
//!
//! Everything one capture attempt needs is owned by a [`SessionContext`]
//! built fresh at mount and dropped when the attempt ends, so no state leaks
//! from one attempt into the next.

use crate::events::EventPublisher;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use visage_core::{SessionError, SessionMachine, SessionState};
use visage_platform::{
    CaptureEngine, Credentials, EngineOutcome, SessionTokenProvider, TokenRequest,
};
use visage_theme::NativeTheme;

/// Reason attached to sessions ended by unmounting the surface
pub const SURFACE_CLOSED_MESSAGE: &str = "Capture surface was closed before the session finished";

/// Collaborators shared by every attempt of a surface
#[derive(Clone)]
pub struct Collaborators {
    pub engine: Arc<dyn CaptureEngine>,
    pub tokens: Arc<dyn SessionTokenProvider>,
}

/// State of one capture attempt
pub struct SessionContext {
    credentials: Credentials,
    theme: Arc<NativeTheme>,
    machine: SessionMachine,
    publisher: EventPublisher,
}

impl SessionContext {
    pub fn new(
        label: impl Into<String>,
        credentials: Credentials,
        theme: Arc<NativeTheme>,
        publisher: EventPublisher,
    ) -> Self {
        Self {
            credentials,
            theme,
            machine: SessionMachine::with_label(label),
            publisher,
        }
    }

    pub fn theme(&self) -> &NativeTheme {
        &self.theme
    }

    pub fn machine(&self) -> &SessionMachine {
        &self.machine
    }

    /// Drive the attempt to completion or cancellation
    ///
    /// Cancellation before `Ready` ends the attempt silently; cancellation
    /// of a running session reports `Cancelled`.
    pub async fn run(mut self, collaborators: Collaborators, mut cancel: watch::Receiver<bool>) {
        let Some(token) = self.prepare(&collaborators, &mut cancel).await else {
            return;
        };

        if let Some(state) = self.machine.mark_ready() {
            self.emit(state).await;
        }
        if !self.machine.begin() {
            return;
        }

        let outcome = tokio::select! {
            outcome = collaborators.engine.run_session(&token, &self.theme) => Some(outcome),
            _ = cancelled(&mut cancel) => None,
        };

        let state = match outcome {
            Some(EngineOutcome::Completed(raw)) => self.machine.complete(raw),
            Some(EngineOutcome::NotCompleted { reason }) => self.machine.abort(reason),
            None => {
                info!(session = self.machine.label(), "surface closed mid-session");
                self.machine.abort(Some(SURFACE_CLOSED_MESSAGE.to_string()))
            }
        };
        if let Some(state) = state {
            self.emit(state).await;
        }
    }

    /// Initialize the engine and obtain a session token
    ///
    /// Returns `None` when the attempt ended, either with a reported failure
    /// or silently because the surface was closed.
    async fn prepare(
        &mut self,
        collaborators: &Collaborators,
        cancel: &mut watch::Receiver<bool>,
    ) -> Option<String> {
        let request = match self.credentials.initialization_request() {
            Ok(request) => request,
            Err(err) => {
                warn!(session = self.machine.label(), error = %err, "invalid credentials");
                self.fail(err.into()).await;
                return None;
            }
        };

        let initialized = tokio::select! {
            result = collaborators.engine.initialize(&request) => result,
            _ = cancelled(cancel) => {
                debug!(session = self.machine.label(), "closed during engine initialization");
                return None;
            }
        };
        if let Err(err) = initialized {
            warn!(session = self.machine.label(), error = %err, "engine initialization failed");
            self.fail(err.into()).await;
            return None;
        }

        if let Some(token) = self.credentials.session_token() {
            debug!(session = self.machine.label(), "using caller-provided session token");
            return Some(token.to_string());
        }

        let token_request = TokenRequest {
            device_key_identifier: request.device_key_identifier.clone(),
            user_agent: collaborators.engine.user_agent(""),
        };
        let fetched = tokio::select! {
            result = collaborators.tokens.fetch_token(&token_request) => result,
            _ = cancelled(cancel) => {
                // A fetch abandoned by unmounting is not a failure
                debug!(session = self.machine.label(), "closed during token fetch, suppressing result");
                return None;
            }
        };

        match fetched {
            Ok(token) => Some(token),
            Err(err) => {
                warn!(session = self.machine.label(), error = %err, "session token acquisition failed");
                self.fail(err.into()).await;
                None
            }
        }
    }

    async fn fail(&mut self, error: SessionError) {
        if let Some(state) = self.machine.resolve(error) {
            self.emit(state).await;
        }
    }

    async fn emit(&mut self, state: SessionState) {
        if !self.publisher.publish(state).await {
            debug!(session = self.machine.label(), "no listener for session state");
        }
    }
}

/// Resolves once cancellation is requested or the surface is gone
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    let _ = cancel.wait_for(|closed| *closed).await;
}
