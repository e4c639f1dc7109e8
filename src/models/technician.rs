use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::technician::{
    NewTechnician as DomainNewTechnician, Technician as DomainTechnician,
    UpdateTechnician as DomainUpdateTechnician,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::technicians)]
/// Diesel model for [`crate::domain::technician::Technician`].
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

#[derive(Insertable)]
#[diesel(table_name = crate::schema::technicians)]
/// Insertable form of [`Technician`].
pub struct NewTechnician<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub specialty: Option<&'a str>,
    pub is_active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::technicians)]
/// Data used when updating a [`Technician`] record.
pub struct UpdateTechnician<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub specialty: Option<&'a str>,
    pub is_active: bool,
}

impl From<Technician> for DomainTechnician {
    fn from(technician: Technician) -> Self {
        Self {
            id: technician.id,
            name: technician.name,
            email: technician.email,
            phone: technician.phone,
            specialty: technician.specialty,
            is_active: technician.is_active,
            created_at: technician.created_at,
            updated_at: technician.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewTechnician> for NewTechnician<'a> {
    fn from(technician: &'a DomainNewTechnician) -> Self {
        Self {
            name: technician.name.as_str(),
            email: technician.email.as_deref(),
            phone: technician.phone.as_deref(),
            specialty: technician.specialty.as_deref(),
            is_active: technician.is_active,
        }
    }
}

impl<'a> From<&'a DomainUpdateTechnician> for UpdateTechnician<'a> {
    fn from(technician: &'a DomainUpdateTechnician) -> Self {
        Self {
            name: technician.name.as_str(),
            email: technician.email.as_deref(),
            phone: technician.phone.as_deref(),
            specialty: technician.specialty.as_deref(),
            is_active: technician.is_active,
        }
    }
}
