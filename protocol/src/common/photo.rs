//! Photo records

use serde::{Deserialize, Serialize};

/// Photo as returned by `/photos/` and `/events/{id}/photos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub event_id: i64,
    pub file_size: Option<u64>,
    /// Legacy name for `file_size`, still sent by older rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<i64>,
}

impl Photo {
    /// Size in bytes, preferring `file_size` over the legacy `size`
    pub fn byte_size(&self) -> Option<u64> {
        self.file_size.or(self.size)
    }
}
