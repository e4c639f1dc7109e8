use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Open/close window for a single weekday.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkingDay {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub closed: bool,
}

/// Per-weekday opening hours stored as a JSON column on the profile.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkingHours {
    pub monday: Option<WorkingDay>,
    pub tuesday: Option<WorkingDay>,
    pub wednesday: Option<WorkingDay>,
    pub thursday: Option<WorkingDay>,
    pub friday: Option<WorkingDay>,
    pub saturday: Option<WorkingDay>,
    pub sunday: Option<WorkingDay>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CompanyProfile {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: Option<String>,
    pub country: String,
    pub tax_number: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub working_hours: Option<WorkingHours>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCompanyProfile {
    pub name: String,
    pub description: Option<String>,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: Option<String>,
    pub country: String,
    pub tax_number: Option<String>,
    pub website: Option<String>,
    pub working_hours: Option<WorkingHours>,
}

impl NewCompanyProfile {
    #[must_use]
    pub fn new(
        name: String,
        email: String,
        phone: String,
        address: String,
        city: String,
        country: String,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            description: None,
            email: email.to_lowercase().trim().to_string(),
            phone: phone.trim().to_string(),
            address: address.trim().to_string(),
            city: city.trim().to_string(),
            postal_code: None,
            country: country.trim().to_string(),
            tax_number: None,
            website: None,
            working_hours: None,
        }
    }
}
