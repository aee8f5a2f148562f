//! Studio settings resource client

use snapvault_protocol::api::StudioSettingsBase;
use snapvault_protocol::common::StudioSettings;
use tokio_util::sync::CancellationToken;

use crate::client::ApiClient;
use crate::error::Result;

/// Outcome of [`StudioSettingsService::save_profile`]
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileSave {
    Created(StudioSettings),
    Updated(StudioSettings),
}

impl ProfileSave {
    pub fn settings(&self) -> &StudioSettings {
        match self {
            Self::Created(settings) | Self::Updated(settings) => settings,
        }
    }
}

/// Operations on `/studio-settings/`
///
/// Writes always carry the full [`StudioSettingsBase`], unlike the partial
/// updates used for events and collections.
pub struct StudioSettingsService<'a, C> {
    client: &'a C,
}

impl<'a, C: ApiClient> StudioSettingsService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn create(&self, data: &StudioSettingsBase, cancel: &CancellationToken) -> Result<StudioSettings> {
        self.client.post("/studio-settings/", data, cancel).await
    }

    pub async fn get_all(&self, cancel: &CancellationToken) -> Result<Vec<StudioSettings>> {
        self.client.get("/studio-settings/", cancel).await
    }

    /// Settings of the calling identity. Uses the fixed `current/me` path so
    /// it cannot be mistaken for a numeric id.
    pub async fn get_current(&self, cancel: &CancellationToken) -> Result<StudioSettings> {
        self.client.get("/studio-settings/current/me", cancel).await
    }

    pub async fn get_by_id(&self, id: i64, cancel: &CancellationToken) -> Result<StudioSettings> {
        self.client
            .get(&format!("/studio-settings/{}", id), cancel)
            .await
    }

    pub async fn update(
        &self,
        id: i64,
        data: &StudioSettingsBase,
        cancel: &CancellationToken,
    ) -> Result<StudioSettings> {
        self.client
            .put(&format!("/studio-settings/{}", id), data, cancel)
            .await
    }

    pub async fn delete(&self, id: i64, cancel: &CancellationToken) -> Result<Option<serde_json::Value>> {
        self.client
            .delete(&format!("/studio-settings/{}", id), cancel)
            .await
    }

    /// Edit the caller's profile, creating it if none exists yet.
    ///
    /// `edit` receives the stored profile (or an empty one on 404) and
    /// returns the full object to send, so fields it leaves alone keep their
    /// stored values.
    pub async fn save_profile<F>(&self, edit: F, cancel: &CancellationToken) -> Result<ProfileSave>
    where
        F: FnOnce(StudioSettingsBase) -> StudioSettingsBase,
    {
        match self.get_current(cancel).await {
            Ok(current) => {
                tracing::debug!(id = current.id, "updating existing studio profile");
                let profile = edit(StudioSettingsBase::from(&current));
                self.update(current.id, &profile, cancel)
                    .await
                    .map(ProfileSave::Updated)
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!("no studio profile yet, creating one");
                let profile = edit(StudioSettingsBase::default());
                self.create(&profile, cancel).await.map(ProfileSave::Created)
            }
            Err(e) => Err(e),
        }
    }
}
