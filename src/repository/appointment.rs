//! Repository implementation for appointments.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::appointment::{Appointment, NewAppointment, UpdateAppointment};
use crate::models::appointment::{
    Appointment as DbAppointment, NewAppointment as DbNewAppointment,
    UpdateAppointment as DbUpdateAppointment,
};
use crate::repository::{
    AppointmentListQuery, AppointmentReader, AppointmentWriter, DieselRepository,
    errors::RepositoryResult,
};

impl AppointmentReader for DieselRepository {
    fn get_appointment_by_id(&self, id: i32) -> RepositoryResult<Option<Appointment>> {
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        let appointment = appointments::table
            .find(id)
            .first::<DbAppointment>(&mut conn)
            .optional()?;

        Ok(appointment.map(Into::into))
    }

    fn list_appointments(
        &self,
        query: AppointmentListQuery,
    ) -> RepositoryResult<(usize, Vec<Appointment>)> {
        use crate::schema::appointments;

        let mut conn = self.conn()?;

        let build = || {
            let mut items = appointments::table.into_boxed();
            if let Some(customer_id) = query.customer_id {
                items = items.filter(appointments::customer_id.eq(customer_id));
            }
            if let Some(status) = &query.status {
                items = items.filter(appointments::status.eq(status.to_string()));
            }
            if let Some((start, end)) = query.between {
                items = items
                    .filter(appointments::appointment_date.ge(start))
                    .filter(appointments::appointment_date.le(end));
            }
            items
        };

        let total: i64 = build().count().get_result(&mut conn)?;

        let mut items = build().order(appointments::appointment_date.asc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            items = items.limit(per_page).offset((page - 1) * per_page);
        }

        let appointments = items
            .load::<DbAppointment>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total as usize, appointments))
    }
}

impl AppointmentWriter for DieselRepository {
    fn create_appointment(
        &self,
        new_appointment: &NewAppointment,
    ) -> RepositoryResult<Appointment> {
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        let insertable: DbNewAppointment = new_appointment.into();
        let created = diesel::insert_into(appointments::table)
            .values(&insertable)
            .get_result::<DbAppointment>(&mut conn)?;

        Ok(created.into())
    }

    fn update_appointment(
        &self,
        appointment_id: i32,
        updates: &UpdateAppointment,
    ) -> RepositoryResult<Appointment> {
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateAppointment = updates.into();

        let updated = diesel::update(appointments::table.find(appointment_id))
            .set((
                &db_updates,
                appointments::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbAppointment>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_appointment(&self, appointment_id: i32) -> RepositoryResult<()> {
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        diesel::delete(appointments::table.find(appointment_id)).execute(&mut conn)?;
        Ok(())
    }
}
