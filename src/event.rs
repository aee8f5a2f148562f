//! Event resource client

use snapvault_protocol::api::{EventBase, EventUpdate, PhotoCreate};
use snapvault_protocol::common::{Event, Photo};
use tokio_util::sync::CancellationToken;

use crate::client::ApiClient;
use crate::error::Result;

/// Operations on `/events/`
pub struct EventService<'a, C> {
    client: &'a C,
}

impl<'a, C: ApiClient> EventService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// All events, in the order the backend returns them
    pub async fn get_all(&self, cancel: &CancellationToken) -> Result<Vec<Event>> {
        self.client.get("/events/", cancel).await
    }

    pub async fn get_by_id(&self, id: i64, cancel: &CancellationToken) -> Result<Event> {
        self.client.get(&format!("/events/{}", id), cancel).await
    }

    pub async fn create(&self, data: &EventBase, cancel: &CancellationToken) -> Result<Event> {
        self.client.post("/events/", data, cancel).await
    }

    /// Partial update: only the fields set on `data` are sent
    pub async fn update(&self, id: i64, data: &EventUpdate, cancel: &CancellationToken) -> Result<Event> {
        self.client.put(&format!("/events/{}", id), data, cancel).await
    }

    pub async fn delete(&self, id: i64, cancel: &CancellationToken) -> Result<Option<serde_json::Value>> {
        self.client.delete(&format!("/events/{}", id), cancel).await
    }

    pub async fn get_photos(&self, event_id: i64, cancel: &CancellationToken) -> Result<Vec<Photo>> {
        self.client
            .get(&format!("/events/{}/photos", event_id), cancel)
            .await
    }

    pub async fn upload_photo(
        &self,
        event_id: i64,
        data: &PhotoCreate,
        cancel: &CancellationToken,
    ) -> Result<Photo> {
        self.client
            .post(&format!("/events/{}/photos", event_id), data, cancel)
            .await
    }
}
