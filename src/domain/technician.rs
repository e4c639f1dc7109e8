use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::EmailAddress;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Technician {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewTechnician {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub is_active: bool,
}

impl NewTechnician {
    #[must_use]
    pub fn new(
        name: String,
        email: Option<String>,
        phone: Option<String>,
        specialty: Option<String>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email
                .and_then(|s| EmailAddress::new(s).ok())
                .map(EmailAddress::into_inner),
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            specialty: specialty
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            is_active: true,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateTechnician {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub is_active: bool,
}
