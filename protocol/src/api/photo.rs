//! Photo request DTOs

use serde::{Deserialize, Serialize};

pub use crate::common::Photo;

/// Register an uploaded photo against an event
///
/// Used for POST /events/{event_id}/photos. The binary itself is stored
/// elsewhere; this only records its URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoCreate {
    pub title: String,
    pub url: String,
    pub event_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}
