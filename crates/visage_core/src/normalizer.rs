//! Event normalization
//!
//! Turns whatever shape a host bridge delivers into one [`SessionState`].
//! Normalization is total: malformed input becomes a `Failed` state with a
//! "Malformed payload" diagnostic instead of an error.

use crate::error::SessionError;
use crate::load::SessionLoad;
use crate::session::{SessionState, SessionStatus};
use crate::wire::WireState;
use serde_json::{Map, Value};
use tracing::{trace, warn};

/// An event as received from the host side
#[derive(Clone, Debug, PartialEq)]
pub enum RawEvent {
    /// The whole event encoded as a JSON string
    Json(String),
    /// Mapping with string-valued `status`, `message` and `load`
    Map(Map<String, Value>),
    /// Already-decoded string fields
    Wire(WireState),
    /// Already-structured state
    Structured(SessionState),
}

impl From<WireState> for RawEvent {
    fn from(wire: WireState) -> Self {
        RawEvent::Wire(wire)
    }
}

impl From<SessionState> for RawEvent {
    fn from(state: SessionState) -> Self {
        RawEvent::Structured(state)
    }
}

/// Normalize any raw event into the caller-facing state
pub fn normalize(event: RawEvent) -> SessionState {
    match event {
        RawEvent::Json(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => normalize_map(map),
            Ok(_) => malformed("event is not a JSON object"),
            Err(err) => malformed(err),
        },
        RawEvent::Map(map) => normalize_map(map),
        RawEvent::Wire(wire) => normalize_wire(wire),
        RawEvent::Structured(state) => normalize_structured(state),
    }
}

fn normalize_map(mut map: Map<String, Value>) -> SessionState {
    // Non-string values are treated as absent
    let mut take = |key: &str| match map.remove(key) {
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            trace!(key, value = %other, "ignoring non-string event field");
            None
        }
        None => None,
    };

    normalize_wire(WireState {
        status: take("status").unwrap_or_default(),
        message: take("message"),
        load: take("load"),
    })
}

fn normalize_wire(wire: WireState) -> SessionState {
    let status = SessionStatus::from_wire(&wire.status);
    if status == SessionStatus::Unknown && wire.status != SessionStatus::Unknown.as_str() {
        warn!(status = %wire.status, "unrecognized session status");
    }

    let load = match (status, wire.load) {
        (SessionStatus::Succeeded, Some(text)) => {
            match SessionLoad::from_embedded(&text).and_then(checked) {
                Ok(load) => Some(load),
                Err(err) => return err.into_state(),
            }
        }
        (SessionStatus::Succeeded, None) => return missing_load(),
        (_, Some(_)) => {
            warn!(%status, "dropping load attached to non-success status");
            None
        }
        (_, None) => None,
    };

    SessionState {
        status,
        message: wire.message,
        load,
    }
}

fn normalize_structured(mut state: SessionState) -> SessionState {
    match (state.status, state.load.is_some()) {
        (SessionStatus::Succeeded, false) => missing_load(),
        (SessionStatus::Succeeded, true) => match state.load.take().map(checked) {
            Some(Ok(load)) => SessionState {
                load: Some(load),
                ..state
            },
            Some(Err(err)) => err.into_state(),
            None => missing_load(),
        },
        (status, true) => {
            warn!(%status, "dropping load attached to non-success status");
            state.load = None;
            state
        }
        (_, false) => state,
    }
}

/// A delivered load must be as complete as one the engine side assembles
fn checked(load: SessionLoad) -> crate::error::Result<SessionLoad> {
    load.validate().map_err(|err| match err {
        SessionError::LoadAssembly { missing } => {
            SessionError::MalformedPayload(format!("load without {}", missing.join(", ")))
        }
        other => other,
    })
}

fn missing_load() -> SessionState {
    malformed("success reported without a session load")
}

fn malformed(detail: impl ToString) -> SessionState {
    SessionError::MalformedPayload(detail.to_string()).into_state()
}
