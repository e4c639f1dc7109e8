use serde::Deserialize;
use validator::Validate;

use crate::domain::technician::{NewTechnician, UpdateTechnician};

#[derive(Deserialize, Validate)]
/// Form data for adding a technician.
pub struct AddTechnicianForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
}

impl From<AddTechnicianForm> for NewTechnician {
    fn from(form: AddTechnicianForm) -> Self {
        NewTechnician::new(form.name, form.email, form.phone, form.specialty)
    }
}

#[derive(Deserialize, Validate)]
/// Form data for updating a technician.
pub struct SaveTechnicianForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl From<&SaveTechnicianForm> for UpdateTechnician {
    fn from(form: &SaveTechnicianForm) -> Self {
        UpdateTechnician {
            name: form.name.trim().to_string(),
            email: form
                .email
                .clone()
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: form
                .phone
                .clone()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            specialty: form
                .specialty
                .clone()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            is_active: form.is_active,
        }
    }
}
