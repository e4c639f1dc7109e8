use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Vehicle {
    pub id: i32,
    pub customer_id: i32,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
    pub vin: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewVehicle {
    pub customer_id: i32,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
    pub vin: Option<String>,
    pub notes: Option<String>,
}

impl NewVehicle {
    /// Plates and VINs are stored upper-cased without surrounding whitespace.
    #[must_use]
    pub fn new(
        customer_id: i32,
        brand: String,
        model: String,
        year: i32,
        plate: String,
        vin: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            customer_id,
            brand: brand.trim().to_string(),
            model: model.trim().to_string(),
            year,
            plate: plate.trim().to_uppercase(),
            vin: vin
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty()),
            notes: notes
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateVehicle {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
    pub vin: Option<String>,
    pub notes: Option<String>,
}

impl UpdateVehicle {
    #[must_use]
    pub fn new(
        brand: String,
        model: String,
        year: i32,
        plate: String,
        vin: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            brand: brand.trim().to_string(),
            model: model.trim().to_string(),
            year,
            plate: plate.trim().to_uppercase(),
            vin: vin
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty()),
            notes: notes
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}
