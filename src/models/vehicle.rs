use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::vehicle::{
    NewVehicle as DomainNewVehicle, UpdateVehicle as DomainUpdateVehicle,
    Vehicle as DomainVehicle,
};
use crate::models::customer::Customer;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::vehicles)]
#[diesel(belongs_to(Customer, foreign_key = customer_id))]
/// Diesel model for [`crate::domain::vehicle::Vehicle`].
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

#[derive(Insertable)]
#[diesel(table_name = crate::schema::vehicles)]
/// Insertable form of [`Vehicle`].
pub struct NewVehicle<'a> {
    pub customer_id: i32,
    pub brand: &'a str,
    pub model: &'a str,
    pub year: i32,
    pub plate: &'a str,
    pub vin: Option<&'a str>,
    pub notes: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::vehicles)]
/// Data used when updating a [`Vehicle`] record.
pub struct UpdateVehicle<'a> {
    pub brand: &'a str,
    pub model: &'a str,
    pub year: i32,
    pub plate: &'a str,
    pub vin: Option<&'a str>,
    pub notes: Option<&'a str>,
}

impl From<Vehicle> for DomainVehicle {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            customer_id: vehicle.customer_id,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            plate: vehicle.plate,
            vin: vehicle.vin,
            notes: vehicle.notes,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewVehicle> for NewVehicle<'a> {
    fn from(vehicle: &'a DomainNewVehicle) -> Self {
        Self {
            customer_id: vehicle.customer_id,
            brand: vehicle.brand.as_str(),
            model: vehicle.model.as_str(),
            year: vehicle.year,
            plate: vehicle.plate.as_str(),
            vin: vehicle.vin.as_deref(),
            notes: vehicle.notes.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateVehicle> for UpdateVehicle<'a> {
    fn from(vehicle: &'a DomainUpdateVehicle) -> Self {
        Self {
            brand: vehicle.brand.as_str(),
            model: vehicle.model.as_str(),
            year: vehicle.year,
            plate: vehicle.plate.as_str(),
            vin: vehicle.vin.as_deref(),
            notes: vehicle.notes.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plate_and_vin_are_uppercased() {
        let domain = DomainNewVehicle::new(
            1,
            "Renault".to_string(),
            "Clio".to_string(),
            2019,
            " 34 abc 123 ".to_string(),
            Some("vf1rfb00x12345678".to_string()),
            None,
        );
        let new: NewVehicle = (&domain).into();
        assert_eq!(new.plate, "34 ABC 123");
        assert_eq!(new.vin, Some("VF1RFB00X12345678"));
    }
}
