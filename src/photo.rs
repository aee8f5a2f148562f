//! Photo resource client
//!
//! Read-only. Photos are registered through the event-scoped upload on
//! [`crate::event::EventService::upload_photo`].

use snapvault_protocol::common::Photo;
use tokio_util::sync::CancellationToken;

use crate::client::ApiClient;
use crate::error::Result;

pub struct PhotoService<'a, C> {
    client: &'a C,
}

impl<'a, C: ApiClient> PhotoService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn get_all(&self, cancel: &CancellationToken) -> Result<Vec<Photo>> {
        self.client.get("/photos/", cancel).await
    }
}

/// Count and total bytes of a set of photos
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhotoStats {
    pub count: usize,
    pub total_bytes: u64,
    /// Photos with neither `file_size` nor `size`
    pub without_size: usize,
}

impl PhotoStats {
    pub fn from_photos<'p>(photos: impl IntoIterator<Item = &'p Photo>) -> Self {
        photos.into_iter().fold(Self::default(), |mut stats, photo| {
            stats.count += 1;
            match photo.byte_size() {
                Some(bytes) => stats.total_bytes += bytes,
                None => stats.without_size += 1,
            }
            stats
        })
    }
}
