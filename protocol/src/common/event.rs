//! Event records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Event as returned by `/events/`
///
/// `id`, `created_at` and `updated_at` are assigned by the backend.
/// Timestamps are kept in the backend's string form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub event_type: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub template_id: Option<String>,
    pub status: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_count: Option<u64>,
}

impl Event {
    pub fn is_published(&self) -> bool {
        self.status.as_deref() == Some("published")
    }
}
