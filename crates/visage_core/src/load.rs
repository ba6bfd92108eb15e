//! Session load produced at successful completion
//!
//! The load crosses the bridge as an embedded JSON document using the wire
//! keys below. Blobs stay base64 text; decoding helpers are provided for
//! consumers that need the bytes.

use crate::error::SessionError;
use base64::engine::general_purpose::STANDARD;
use base64::{DecodeError, Engine as _};
use serde::{Deserialize, Serialize};

pub const FACE_SCAN_KEY: &str = "faceScanBase64";
pub const SESSION_ID_KEY: &str = "sessionId";
pub const AUDIT_IMAGES_KEY: &str = "auditImagesBase64";
pub const LOW_QUALITY_AUDIT_IMAGES_KEY: &str = "lowQualityAuditTrailImagesBase64";
pub const USER_AGENT_KEY: &str = "userAgent";

/// Required keys in reporting order
const REQUIRED_KEYS: [&str; 5] = [
    FACE_SCAN_KEY,
    SESSION_ID_KEY,
    AUDIT_IMAGES_KEY,
    LOW_QUALITY_AUDIT_IMAGES_KEY,
    USER_AGENT_KEY,
];

/// Structured result of a successful capture session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLoad {
    #[serde(rename = "faceScanBase64")]
    pub face_scan_data: String,

    #[serde(rename = "sessionId")]
    pub session_id: String,

    #[serde(rename = "auditImagesBase64")]
    pub audit_images: Vec<String>,

    #[serde(rename = "lowQualityAuditTrailImagesBase64")]
    pub low_quality_audit_images: Vec<String>,

    #[serde(rename = "userAgent")]
    pub user_agent_string: String,

    #[serde(
        rename = "externalDatabaseRefID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub external_database_ref_id: Option<String>,
}

impl SessionLoad {
    /// Encode to the string-embedded document carried by wire events
    pub fn to_embedded(&self) -> crate::error::Result<String> {
        serde_json::to_string(self).map_err(|e| SessionError::MalformedPayload(e.to_string()))
    }

    /// Decode an embedded load document
    pub fn from_embedded(text: &str) -> crate::error::Result<Self> {
        serde_json::from_str(text).map_err(|e| SessionError::MalformedPayload(e.to_string()))
    }

    /// Required text fields that are empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            (FACE_SCAN_KEY, &self.face_scan_data),
            (SESSION_ID_KEY, &self.session_id),
            (USER_AGENT_KEY, &self.user_agent_string),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key)
        .collect()
    }

    /// Reject a load that [`RawSessionResult::assemble`] would not produce
    pub fn validate(self) -> crate::error::Result<Self> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(self)
        } else {
            Err(SessionError::LoadAssembly { missing })
        }
    }

    pub fn face_scan_bytes(&self) -> Result<Vec<u8>, DecodeError> {
        STANDARD.decode(&self.face_scan_data)
    }

    pub fn audit_image_bytes(&self) -> Result<Vec<Vec<u8>>, DecodeError> {
        self.audit_images.iter().map(|img| STANDARD.decode(img)).collect()
    }

    pub fn low_quality_audit_image_bytes(&self) -> Result<Vec<Vec<u8>>, DecodeError> {
        self.low_quality_audit_images
            .iter()
            .map(|img| STANDARD.decode(img))
            .collect()
    }
}

/// Session result as handed over by the engine, before validation
///
/// Engines may omit any field; [`RawSessionResult::assemble`] is the only way
/// to obtain a [`SessionLoad`] from it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawSessionResult {
    pub face_scan_base64: Option<String>,
    pub session_id: Option<String>,
    pub audit_images_base64: Option<Vec<String>>,
    pub low_quality_audit_images_base64: Option<Vec<String>>,
    pub user_agent: Option<String>,
    pub external_database_ref_id: Option<String>,
}

impl RawSessionResult {
    /// Build a complete load, or report every missing required field
    ///
    /// Empty strings count as missing. Image lists only need to be present.
    pub fn assemble(self) -> crate::error::Result<SessionLoad> {
        let mut missing = Vec::new();
        if self.audit_images_base64.is_none() {
            missing.push(AUDIT_IMAGES_KEY);
        }
        if self.low_quality_audit_images_base64.is_none() {
            missing.push(LOW_QUALITY_AUDIT_IMAGES_KEY);
        }

        let load = SessionLoad {
            face_scan_data: self.face_scan_base64.unwrap_or_default(),
            session_id: self.session_id.unwrap_or_default(),
            audit_images: self.audit_images_base64.unwrap_or_default(),
            low_quality_audit_images: self.low_quality_audit_images_base64.unwrap_or_default(),
            user_agent_string: self.user_agent.unwrap_or_default(),
            external_database_ref_id: self.external_database_ref_id.filter(|s| !s.is_empty()),
        };

        missing.extend(load.missing_fields());
        if missing.is_empty() {
            return Ok(load);
        }
        missing.sort_by_key(|key| REQUIRED_KEYS.iter().position(|k| k == key));
        Err(SessionError::LoadAssembly { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn complete() -> RawSessionResult {
        RawSessionResult {
            face_scan_base64: Some("ZmFjZQ==".into()),
            session_id: Some("session-1".into()),
            audit_images_base64: Some(vec!["YQ==".into(), "Yg==".into()]),
            low_quality_audit_images_base64: Some(vec![]),
            user_agent: Some("agent/1.0".into()),
            external_database_ref_id: None,
        }
    }

    #[test]
    fn test_assemble_complete() {
        let load = complete().assemble().unwrap();
        assert_eq!(load.session_id, "session-1");
        assert_eq!(load.face_scan_bytes().unwrap(), b"face".to_vec());
        assert_eq!(load.audit_image_bytes().unwrap(), vec![b"a".to_vec(), b"b".to_vec()]);
        assert!(load.low_quality_audit_images.is_empty());
    }

    #[test]
    fn test_assemble_reports_every_missing_field() {
        let raw = RawSessionResult {
            session_id: Some(String::new()),
            low_quality_audit_images_base64: None,
            ..complete()
        };
        assert_eq!(
            raw.assemble(),
            Err(SessionError::LoadAssembly {
                missing: vec![SESSION_ID_KEY, LOW_QUALITY_AUDIT_IMAGES_KEY]
            })
        );
    }

    #[test]
    fn test_embedded_keys() {
        let load = complete().assemble().unwrap();
        let text = load.to_embedded().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        for key in [
            FACE_SCAN_KEY,
            SESSION_ID_KEY,
            AUDIT_IMAGES_KEY,
            LOW_QUALITY_AUDIT_IMAGES_KEY,
            USER_AGENT_KEY,
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert!(value.get("externalDatabaseRefID").is_none());
    }

    #[test]
    fn test_from_embedded_requires_low_quality_images() {
        let text = r#"{"faceScanBase64":"a","sessionId":"s","auditImagesBase64":[],"userAgent":"u"}"#;
        assert!(matches!(
            SessionLoad::from_embedded(text),
            Err(SessionError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_text_fields() {
        let hollow = SessionLoad {
            face_scan_data: String::new(),
            user_agent_string: String::new(),
            ..complete().assemble().unwrap()
        };
        assert_eq!(
            hollow.validate(),
            Err(SessionError::LoadAssembly {
                missing: vec![FACE_SCAN_KEY, USER_AGENT_KEY]
            })
        );

        let load = complete().assemble().unwrap();
        assert_eq!(load.clone().validate(), Ok(load));
    }

    #[test]
    fn test_bad_base64() {
        let load = SessionLoad {
            face_scan_data: "not base64!".into(),
            ..complete().assemble().unwrap()
        };
        assert!(load.face_scan_bytes().is_err());
    }
}
