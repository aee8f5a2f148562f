//! Collection request DTOs

use serde::{Deserialize, Serialize};

pub use crate::common::Collection;

/// Create collection request
///
/// Used for POST /collections/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionCreate {
    pub name: String,
    pub event_id: i64,
}

/// Partial collection update
///
/// Used for PUT /collections/{id}; unset fields are absent from the body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<i64>,
}

impl CollectionUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
