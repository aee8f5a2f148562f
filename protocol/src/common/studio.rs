use serde::{Deserialize, Serialize};

/// Studio settings record, one per studio user
///
/// The backend answers with `id` and the profile fields. Ownership and
/// timestamps are only present on some deployments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudioSettings {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub full_name: Option<String>,
    pub mobile_number: Option<String>,
    pub email_id: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub area: Option<String>,
    pub avg_events_per_year: Option<String>,
    pub billing_company_name: Option<String>,
    pub gst_vat_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl StudioSettings {
    /// Name shown in studio listings
    pub fn display_name(&self) -> &str {
        self.company_name
            .as_deref()
            .or(self.full_name.as_deref())
            .unwrap_or("(unnamed studio)")
    }
}
