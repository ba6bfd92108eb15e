//! Boundary-crossing event shape
//!
//! Every field is a string so the event survives any host bridge. The load
//! travels as an embedded JSON document and needs a second decode pass.

use crate::error::Result;
use crate::session::SessionState;
use serde::{Deserialize, Serialize};

/// Session event as it crosses the bridge
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireState {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<String>,
}

impl WireState {
    /// Encode the whole event as one JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl SessionState {
    /// Encode into the boundary shape
    pub fn to_wire(&self) -> Result<WireState> {
        let load = self.load.as_ref().map(|load| load.to_embedded()).transpose()?;
        Ok(WireState {
            status: self.status.as_str().to_string(),
            message: self.message.clone(),
            load,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStatus;

    #[test]
    fn test_to_wire_without_load() {
        let wire = SessionState::new(SessionStatus::Cancelled)
            .with_message("Early exit encountered")
            .to_wire()
            .unwrap();
        assert_eq!(wire.status, "Cancelled");
        assert_eq!(wire.message.as_deref(), Some("Early exit encountered"));
        assert_eq!(wire.load, None);
        assert_eq!(
            wire.to_json().unwrap(),
            r#"{"status":"Cancelled","message":"Early exit encountered"}"#
        );
    }

    #[test]
    fn test_not_ready_string() {
        let wire = SessionState::not_ready().to_wire().unwrap();
        assert_eq!(wire.status, "Not ready");
    }
}
