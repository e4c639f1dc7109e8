use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::appointment::{NewAppointment, UpdateAppointment};
use crate::domain::types::NotesText;
use crate::forms::FormError;

/// Format produced by `<input type="datetime-local">`.
const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

fn parse_datetime_local(value: &str) -> Result<NaiveDateTime, FormError> {
    NaiveDateTime::parse_from_str(value.trim(), DATETIME_LOCAL_FORMAT)
        .map_err(|_| FormError::InvalidDate)
}

/// Markup is stripped from free text; empty results become `None`.
pub(crate) fn sanitize_notes(notes: Option<&str>) -> Option<String> {
    notes
        .and_then(|s| NotesText::new(s).ok())
        .map(NotesText::into_inner)
}

#[derive(Deserialize, Validate)]
/// Form data for booking an appointment.
pub struct AddAppointmentForm {
    pub customer_id: i32,
    pub vehicle_id: i32,
    #[validate(length(min = 1))]
    pub appointment_date: String,
    pub service_type: String,
    pub notes: Option<String>,
}

impl AddAppointmentForm {
    pub fn to_new_appointment(&self) -> Result<NewAppointment, FormError> {
        Ok(NewAppointment {
            customer_id: self.customer_id,
            vehicle_id: self.vehicle_id,
            appointment_date: parse_datetime_local(&self.appointment_date)?,
            status: crate::domain::appointment::AppointmentStatus::Pending,
            service_type: self.service_type.as_str().into(),
            notes: sanitize_notes(self.notes.as_deref()),
        })
    }
}

#[derive(Deserialize, Validate)]
/// Form data for rescheduling or changing the status of an appointment.
pub struct SaveAppointmentForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub appointment_date: String,
    pub status: String,
    pub service_type: String,
    pub notes: Option<String>,
}

impl SaveAppointmentForm {
    pub fn to_update_appointment(&self) -> Result<UpdateAppointment, FormError> {
        Ok(UpdateAppointment {
            appointment_date: parse_datetime_local(&self.appointment_date)?,
            status: self.status.as_str().into(),
            service_type: self.service_type.as_str().into(),
            notes: sanitize_notes(self.notes.as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_datetime_local_inputs() {
        let parsed = parse_datetime_local("2025-08-07T14:30").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2025-08-07 14:30");
        assert!(parse_datetime_local("07/08/2025").is_err());
    }
}
