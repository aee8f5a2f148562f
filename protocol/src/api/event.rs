//! Event request DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use crate::common::Event;

/// Create event request
///
/// Used for POST /events/. Only `name` is required; unset optional fields are
/// left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventBase {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl EventBase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Partial event update
///
/// Used for PUT /events/{id}. Only the fields that are set are serialized;
/// unset fields are absent from the body, never `null`. Contrast with
/// [`crate::api::StudioSettingsBase`], which is always sent whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl EventUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_update_omits_unset_fields() {
        let update = EventUpdate {
            status: Some("published".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"status": "published"}));
    }

    #[test]
    fn test_create_body_keeps_only_name_when_bare() {
        let body = serde_json::to_value(EventBase::new("Launch party")).unwrap();
        assert_eq!(body, json!({"name": "Launch party"}));
    }

    #[test]
    fn test_empty_update() {
        assert!(EventUpdate::default().is_empty());
        let update = EventUpdate {
            location: Some("Central Park".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
