use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::appointment::{
    Appointment as DomainAppointment, NewAppointment as DomainNewAppointment,
    UpdateAppointment as DomainUpdateAppointment,
};
use crate::models::customer::Customer;
use crate::models::vehicle::Vehicle;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::appointments)]
#[diesel(belongs_to(Customer, foreign_key = customer_id))]
#[diesel(belongs_to(Vehicle, foreign_key = vehicle_id))]
/// Diesel model for [`crate::domain::appointment::Appointment`].
pub struct Appointment {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub appointment_date: NaiveDateTime,
    pub status: String,
    pub service_type: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::appointments)]
/// Insertable form of [`Appointment`]. Status enums are stored as text.
pub struct NewAppointment<'a> {
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub appointment_date: NaiveDateTime,
    pub status: String,
    pub service_type: String,
    pub notes: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::appointments)]
/// Data used when updating an [`Appointment`] record.
pub struct UpdateAppointment<'a> {
    pub appointment_date: NaiveDateTime,
    pub status: String,
    pub service_type: String,
    pub notes: Option<&'a str>,
}

impl From<Appointment> for DomainAppointment {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            customer_id: appointment.customer_id,
            vehicle_id: appointment.vehicle_id,
            appointment_date: appointment.appointment_date,
            status: appointment.status.into(),
            service_type: appointment.service_type.into(),
            notes: appointment.notes,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewAppointment> for NewAppointment<'a> {
    fn from(appointment: &'a DomainNewAppointment) -> Self {
        Self {
            customer_id: appointment.customer_id,
            vehicle_id: appointment.vehicle_id,
            appointment_date: appointment.appointment_date,
            status: appointment.status.to_string(),
            service_type: appointment.service_type.to_string(),
            notes: appointment.notes.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateAppointment> for UpdateAppointment<'a> {
    fn from(appointment: &'a DomainUpdateAppointment) -> Self {
        Self {
            appointment_date: appointment.appointment_date,
            status: appointment.status.to_string(),
            service_type: appointment.service_type.to_string(),
            notes: appointment.notes.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::appointment::{AppointmentStatus, ServiceType};

    #[test]
    fn status_round_trips_through_text() {
        for status in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::InProgress,
            AppointmentStatus::Completed,
            AppointmentStatus::Delivered,
            AppointmentStatus::Cancelled,
        ] {
            let text = status.to_string();
            assert_eq!(AppointmentStatus::from(text.as_str()), status);
        }
        assert_eq!(
            AppointmentStatus::from("NoShow"),
            AppointmentStatus::Other("NoShow".to_string())
        );
    }

    #[test]
    fn service_type_round_trips_through_text() {
        for service_type in [
            ServiceType::Periodic,
            ServiceType::Repair,
            ServiceType::Inspection,
        ] {
            let text = service_type.to_string();
            assert_eq!(ServiceType::from(text.as_str()), service_type);
        }
    }
}
