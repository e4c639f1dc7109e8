use serde::Deserialize;
use validator::Validate;

use crate::domain::vehicle::{NewVehicle, UpdateVehicle};

#[derive(Deserialize, Validate)]
/// Form data for adding a vehicle to a customer.
pub struct AddVehicleForm {
    pub customer_id: i32,
    #[validate(length(min = 1))]
    pub brand: String,
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    #[validate(length(min = 1))]
    pub plate: String,
    pub vin: Option<String>,
    pub notes: Option<String>,
}

impl From<AddVehicleForm> for NewVehicle {
    fn from(form: AddVehicleForm) -> Self {
        NewVehicle::new(
            form.customer_id,
            form.brand,
            form.model,
            form.year,
            form.plate,
            form.vin,
            form.notes,
        )
    }
}

#[derive(Deserialize, Validate)]
/// Form data for updating an existing vehicle.
pub struct SaveVehicleForm {
    pub id: i32,
    /// Owning customer, used for the post-save redirect.
    pub customer_id: i32,
    #[validate(length(min = 1))]
    pub brand: String,
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    #[validate(length(min = 1))]
    pub plate: String,
    pub vin: Option<String>,
    pub notes: Option<String>,
}

impl From<&SaveVehicleForm> for UpdateVehicle {
    fn from(form: &SaveVehicleForm) -> Self {
        UpdateVehicle::new(
            form.brand.clone(),
            form.model.clone(),
            form.year,
            form.plate.clone(),
            form.vin.clone(),
            form.notes.clone(),
        )
    }
}
