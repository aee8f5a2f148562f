//! Collection resource client

use snapvault_protocol::api::{CollectionCreate, CollectionUpdate};
use snapvault_protocol::common::Collection;
use tokio_util::sync::CancellationToken;

use crate::client::ApiClient;
use crate::error::Result;

/// Path for listing collections; filtering happens on the backend.
/// Event id `0` is never assigned and means no filter.
pub fn collections_path(event_id: Option<i64>) -> String {
    match event_id {
        Some(id) if id != 0 => format!("/collections/?event_id={}", id),
        _ => "/collections/".to_string(),
    }
}

/// Operations on `/collections/`
pub struct CollectionService<'a, C> {
    client: &'a C,
}

impl<'a, C: ApiClient> CollectionService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn get_all(&self, event_id: Option<i64>, cancel: &CancellationToken) -> Result<Vec<Collection>> {
        self.client.get(&collections_path(event_id), cancel).await
    }

    pub async fn get_by_id(&self, id: i64, cancel: &CancellationToken) -> Result<Collection> {
        self.client.get(&format!("/collections/{}", id), cancel).await
    }

    pub async fn create(&self, data: &CollectionCreate, cancel: &CancellationToken) -> Result<Collection> {
        self.client.post("/collections/", data, cancel).await
    }

    /// Partial update: only the fields set on `data` are sent
    pub async fn update(
        &self,
        id: i64,
        data: &CollectionUpdate,
        cancel: &CancellationToken,
    ) -> Result<Collection> {
        self.client
            .put(&format!("/collections/{}", id), data, cancel)
            .await
    }

    pub async fn delete(&self, id: i64, cancel: &CancellationToken) -> Result<Option<serde_json::Value>> {
        self.client
            .delete(&format!("/collections/{}", id), cancel)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::mocks::MockApiClient;
    use crate::tests::utils::test_helpers::collection_json;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_collections_path() {
        assert_eq!(collections_path(Some(5)), "/collections/?event_id=5");
        assert_eq!(collections_path(None), "/collections/");
        assert_eq!(collections_path(Some(0)), "/collections/");
    }

    #[tokio::test]
    async fn test_get_all_filtered_and_unfiltered() {
        let client = MockApiClient::new();
        client.add_response(
            Method::GET,
            "/collections/?event_id=5",
            200,
            json!([collection_json(1, "Ceremony", 5)]),
        );
        client.add_response(
            Method::GET,
            "/collections/",
            200,
            json!([collection_json(1, "Ceremony", 5), collection_json(2, "Party", 6)]),
        );
        let service = CollectionService::new(&client);
        let cancel = CancellationToken::new();

        assert_eq!(service.get_all(Some(5), &cancel).await.unwrap().len(), 1);
        assert_eq!(service.get_all(None, &cancel).await.unwrap().len(), 2);
        assert_eq!(
            client.request_lines(),
            vec!["GET /collections/?event_id=5", "GET /collections/"]
        );
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let client = MockApiClient::new();
        client.add_response(Method::POST, "/collections/", 200, collection_json(3, "Portraits", 5));
        client.add_response(Method::PUT, "/collections/3", 200, collection_json(3, "Family", 5));
        client.add_raw_response(Method::DELETE, "/collections/3", 200, "");
        let service = CollectionService::new(&client);
        let cancel = CancellationToken::new();

        let created = service
            .create(
                &CollectionCreate {
                    name: "Portraits".to_string(),
                    event_id: 5,
                },
                &cancel,
            )
            .await
            .unwrap();
        assert_eq!(created.event_id, 5);

        let renamed = service
            .update(
                3,
                &CollectionUpdate {
                    name: Some("Family".to_string()),
                    ..Default::default()
                },
                &cancel,
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "Family");

        assert_eq!(service.delete(3, &cancel).await.unwrap(), None);

        let requests = client.requests();
        assert_eq!(requests[0].body, Some(json!({"name": "Portraits", "event_id": 5})));
        assert_eq!(requests[1].body, Some(json!({"name": "Family"})));
        assert_eq!(requests[2].method, Method::DELETE);
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let client = MockApiClient::new();
        let err = CollectionService::new(&client)
            .get_by_id(99, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(client.request_lines(), vec!["GET /collections/99"]);
    }
}
