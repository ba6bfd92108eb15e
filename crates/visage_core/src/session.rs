//! Session lifecycle
//!
//! One [`SessionMachine`] models one capture attempt:
//!
//! ```text
//! NotReady ──ready──▶ Ready ──begin──▶ InProgress ──succeed──▶ Succeeded
//!     │                 │                  ├──────abort──────▶ Cancelled
//!     └─────fail────────┴──────fail────────┴──────fail───────▶ Failed
//! ```
//!
//! `Ready` may also be aborted when the surface goes away before capture
//! starts. Terminal states are final; a retry builds a fresh machine.
//!
//! Only `Ready` and the terminal states are reported to the caller. The
//! methods that drive the machine return the [`SessionState`] to publish for
//! those transitions and `None` for everything else.

use crate::error::{SessionError, EARLY_EXIT_MESSAGE};
use crate::fsm::StateMachine;
use crate::load::{RawSessionResult, SessionLoad};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Message carried by a successful terminal state
pub const SUCCESS_MESSAGE: &str = "Ready for the next steps";

// ========== Caller Vocabulary ==========

/// Status reported to the caller
///
/// The string forms are fixed; anything unrecognized becomes `Unknown`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    #[serde(rename = "Not ready")]
    NotReady,
    Ready,
    Succeeded,
    Failed,
    Cancelled,
    Unknown,
}

impl SessionStatus {
    pub const ALL: [SessionStatus; 6] = [
        SessionStatus::NotReady,
        SessionStatus::Ready,
        SessionStatus::Succeeded,
        SessionStatus::Failed,
        SessionStatus::Cancelled,
        SessionStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::NotReady => "Not ready",
            SessionStatus::Ready => "Ready",
            SessionStatus::Succeeded => "Succeeded",
            SessionStatus::Failed => "Failed",
            SessionStatus::Cancelled => "Cancelled",
            SessionStatus::Unknown => "Unknown",
        }
    }

    /// Parse a boundary status string, exact match only
    pub fn from_wire(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .unwrap_or(SessionStatus::Unknown)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionStatus::Succeeded | SessionStatus::Failed | SessionStatus::Cancelled
        )
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized state delivered to the caller
///
/// `load` is present if and only if `status` is `Succeeded`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<SessionLoad>,
}

impl SessionState {
    pub fn new(status: SessionStatus) -> Self {
        Self {
            status,
            message: None,
            load: None,
        }
    }

    pub fn not_ready() -> Self {
        Self::new(SessionStatus::NotReady)
    }

    pub fn ready() -> Self {
        Self::new(SessionStatus::Ready)
    }

    pub fn succeeded(load: SessionLoad) -> Self {
        Self {
            status: SessionStatus::Succeeded,
            message: Some(SUCCESS_MESSAGE.to_string()),
            load: Some(load),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::not_ready()
    }
}

// ========== Lifecycle ==========

/// Internal lifecycle phase
///
/// Superset of the caller vocabulary: `InProgress` is tracked but never
/// reported on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    NotReady,
    Ready,
    InProgress,
    Succeeded,
    Failed,
    Cancelled,
}

impl SessionPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionPhase::Succeeded | SessionPhase::Failed | SessionPhase::Cancelled
        )
    }

    /// Whether entering this phase is reported to the caller
    pub fn is_reported(&self) -> bool {
        *self == SessionPhase::Ready || self.is_terminal()
    }

    /// Caller-facing status; a running session still reads as `Ready`
    pub fn status(&self) -> SessionStatus {
        match self {
            SessionPhase::NotReady => SessionStatus::NotReady,
            SessionPhase::Ready | SessionPhase::InProgress => SessionStatus::Ready,
            SessionPhase::Succeeded => SessionStatus::Succeeded,
            SessionPhase::Failed => SessionStatus::Failed,
            SessionPhase::Cancelled => SessionStatus::Cancelled,
        }
    }
}

/// Events driving the lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionTrigger {
    /// Token available and engine initialized
    EngineReady,
    /// Capture surface mounted and session started
    Begin,
    /// Engine completed and the load assembled
    Succeed,
    /// Timeout, user cancellation, engine error or unmount
    Abort,
    /// Token, initialization or load assembly failure
    Fail,
}

/// State machine for one capture attempt
pub struct SessionMachine {
    label: String,
    fsm: StateMachine<SessionPhase, SessionTrigger>,
    message: Option<String>,
    load: Option<SessionLoad>,
}

impl SessionMachine {
    pub fn new() -> Self {
        Self::with_label("session")
    }

    /// Create a machine whose log lines carry `label`
    pub fn with_label(label: impl Into<String>) -> Self {
        use SessionPhase::*;
        use SessionTrigger::*;

        let label = label.into();
        let mut builder = StateMachine::builder(NotReady)
            .on(NotReady, EngineReady, Ready)
            .on(Ready, Begin, InProgress)
            .on(InProgress, Succeed, Succeeded)
            .on(InProgress, Abort, Cancelled)
            .on(Ready, Abort, Cancelled)
            .on(NotReady, Fail, Failed)
            .on(Ready, Fail, Failed)
            .on(InProgress, Fail, Failed);

        for phase in [Ready, InProgress, Succeeded, Failed, Cancelled] {
            let label = label.clone();
            builder = builder.on_enter(phase, move || {
                debug!(session = %label, ?phase, "session phase entered");
            });
        }

        Self {
            label,
            fsm: builder.build(),
            message: None,
            load: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn phase(&self) -> SessionPhase {
        self.fsm.current_state()
    }

    pub fn is_terminal(&self) -> bool {
        self.phase().is_terminal()
    }

    /// Transitions taken so far
    pub fn history(&self) -> &[(SessionPhase, SessionTrigger, SessionPhase)] {
        self.fsm.history()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        SessionState {
            status: self.phase().status(),
            message: self.message.clone(),
            load: self.load.clone(),
        }
    }

    /// Token acquired and engine initialized
    pub fn mark_ready(&mut self) -> Option<SessionState> {
        self.fire(SessionTrigger::EngineReady, None, None)
    }

    /// Capture surface is active; returns whether the session started
    pub fn begin(&mut self) -> bool {
        self.fire(SessionTrigger::Begin, None, None);
        self.phase() == SessionPhase::InProgress
    }

    /// Engine reported a successful completion
    ///
    /// Succeeds only with a fully assembled load, otherwise fails with the
    /// list of missing fields.
    pub fn complete(&mut self, raw: RawSessionResult) -> Option<SessionState> {
        if !self.fsm.can_send(SessionTrigger::Succeed) {
            debug!(session = %self.label, phase = ?self.phase(), "completion ignored");
            return None;
        }

        match raw.assemble() {
            Ok(load) => self.fire(
                SessionTrigger::Succeed,
                Some(SUCCESS_MESSAGE.to_string()),
                Some(load),
            ),
            Err(err) => self.resolve(err),
        }
    }

    /// Engine ended the session without success
    pub fn abort(&mut self, reason: Option<String>) -> Option<SessionState> {
        let reason = reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| EARLY_EXIT_MESSAGE.to_string());
        self.resolve(SessionError::Aborted(reason))
    }

    /// Drive the machine to the terminal state an error resolves to
    pub fn resolve(&mut self, error: SessionError) -> Option<SessionState> {
        let trigger = match error {
            SessionError::Aborted(_) => SessionTrigger::Abort,
            _ => SessionTrigger::Fail,
        };
        let state = self.fire(trigger, Some(error.to_string()), None)?;
        info!(session = %self.label, status = %state.status, message = ?state.message, "session finished");
        Some(state)
    }

    fn fire(
        &mut self,
        trigger: SessionTrigger,
        message: Option<String>,
        load: Option<SessionLoad>,
    ) -> Option<SessionState> {
        let from = self.phase();
        let Some(to) = self.fsm.try_send(trigger) else {
            debug!(session = %self.label, ?from, ?trigger, "transition not allowed");
            return None;
        };

        self.message = message;
        self.load = load;

        if to == SessionPhase::Succeeded {
            info!(session = %self.label, "session succeeded");
        }

        to.is_reported().then(|| self.state())
    }
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_result() -> RawSessionResult {
        RawSessionResult {
            face_scan_base64: Some("ZmFjZQ==".into()),
            session_id: Some("s-1".into()),
            audit_images_base64: Some(vec!["YQ==".into()]),
            low_quality_audit_images_base64: Some(vec!["Yg==".into()]),
            user_agent: Some("agent".into()),
            external_database_ref_id: None,
        }
    }

    #[test]
    fn test_status_strings() {
        let strings: Vec<_> = SessionStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            strings,
            vec!["Not ready", "Ready", "Succeeded", "Failed", "Cancelled", "Unknown"]
        );
        for status in SessionStatus::ALL {
            assert_eq!(SessionStatus::from_wire(status.as_str()), status);
        }
        assert_eq!(SessionStatus::from_wire("INITIALIZED"), SessionStatus::Unknown);
        assert_eq!(SessionStatus::from_wire("ready"), SessionStatus::Unknown);
        assert_eq!(SessionStatus::from_wire(""), SessionStatus::Unknown);
    }

    #[test]
    fn test_status_serde_uses_vocabulary() {
        let json = serde_json::to_string(&SessionStatus::NotReady).unwrap();
        assert_eq!(json, "\"Not ready\"");
    }

    #[test]
    fn test_happy_path() {
        let mut machine = SessionMachine::new();
        assert_eq!(machine.state(), SessionState::not_ready());

        assert_eq!(machine.mark_ready(), Some(SessionState::ready()));
        assert!(machine.begin());

        let state = machine.complete(raw_result()).unwrap();
        assert_eq!(state.status, SessionStatus::Succeeded);
        assert_eq!(state.message.as_deref(), Some(SUCCESS_MESSAGE));
        assert_eq!(state.load.unwrap().session_id, "s-1");
        assert!(machine.is_terminal());
    }

    #[test]
    fn test_begin_is_not_reported() {
        let mut machine = SessionMachine::new();
        machine.mark_ready();
        assert!(machine.begin());
        assert_eq!(machine.phase(), SessionPhase::InProgress);
        assert_eq!(machine.state().status, SessionStatus::Ready);
    }

    #[test]
    fn test_partial_load_fails() {
        let mut machine = SessionMachine::new();
        machine.mark_ready();
        machine.begin();

        let state = machine
            .complete(RawSessionResult {
                low_quality_audit_images_base64: None,
                ..raw_result()
            })
            .unwrap();
        assert_eq!(state.status, SessionStatus::Failed);
        assert!(state.load.is_none());
        assert!(state.message.unwrap().contains("lowQualityAuditTrailImagesBase64"));
    }

    #[test]
    fn test_abort_defaults_message() {
        let mut machine = SessionMachine::new();
        machine.mark_ready();
        machine.begin();

        let state = machine.abort(None).unwrap();
        assert_eq!(state.status, SessionStatus::Cancelled);
        assert_eq!(state.message.as_deref(), Some(EARLY_EXIT_MESSAGE));
    }

    #[test]
    fn test_failure_before_ready() {
        let mut machine = SessionMachine::new();
        let state = machine
            .resolve(SessionError::token_acquisition("timeout"))
            .unwrap();
        assert_eq!(state.status, SessionStatus::Failed);
        assert!(machine.is_terminal());
    }

    #[test]
    fn test_terminal_is_final() {
        let mut machine = SessionMachine::new();
        machine.mark_ready();
        machine.begin();
        machine.abort(Some("timeout".into()));

        assert_eq!(machine.complete(raw_result()), None);
        assert_eq!(machine.mark_ready(), None);
        assert_eq!(machine.resolve(SessionError::MalformedPayload("x".into())), None);
        assert_eq!(machine.phase(), SessionPhase::Cancelled);
        assert_eq!(machine.history().len(), 3);
    }

    #[test]
    fn test_complete_requires_in_progress() {
        let mut machine = SessionMachine::new();
        machine.mark_ready();
        assert_eq!(machine.complete(raw_result()), None);
        assert_eq!(machine.phase(), SessionPhase::Ready);
    }
}
