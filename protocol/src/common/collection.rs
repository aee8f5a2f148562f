use serde::{Deserialize, Serialize};

/// Collection of photos inside one event
///
/// `event_id` is not checked against existing events on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: i64,
    pub name: String,
    pub event_id: i64,
    pub created_at: String,
    pub updated_at: String,
}
