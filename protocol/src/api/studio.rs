//! Studio settings request DTOs

use serde::{Deserialize, Serialize};

pub use crate::common::StudioSettings;

/// Studio profile payload
///
/// Used for both POST /studio-settings/ and PUT /studio-settings/{id}.
/// Unlike event and collection updates this is always sent as a full object:
/// every key is present and unset fields are `null`. The backend replaces the
/// stored record with what it receives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudioSettingsBase {
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
}

impl From<&StudioSettings> for StudioSettingsBase {
    fn from(settings: &StudioSettings) -> Self {
        Self {
            full_name: settings.full_name.clone(),
            mobile_number: settings.mobile_number.clone(),
            email_id: settings.email_id.clone(),
            country: settings.country.clone(),
            state: settings.state.clone(),
            city: settings.city.clone(),
            company_name: settings.company_name.clone(),
            industry: settings.industry.clone(),
            area: settings.area.clone(),
            avg_events_per_year: settings.avg_events_per_year.clone(),
            billing_company_name: settings.billing_company_name.clone(),
            gst_vat_number: settings.gst_vat_number.clone(),
        }
    }
}
