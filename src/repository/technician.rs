//! Repository implementation for technicians.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::technician::{NewTechnician, Technician, UpdateTechnician};
use crate::models::technician::{
    NewTechnician as DbNewTechnician, Technician as DbTechnician,
    UpdateTechnician as DbUpdateTechnician,
};
use crate::repository::{
    DieselRepository, TechnicianReader, TechnicianWriter, errors::RepositoryResult,
};

impl TechnicianReader for DieselRepository {
    fn get_technician_by_id(&self, id: i32) -> RepositoryResult<Option<Technician>> {
        use crate::schema::technicians;

        let mut conn = self.conn()?;
        let technician = technicians::table
            .find(id)
            .first::<DbTechnician>(&mut conn)
            .optional()?;

        Ok(technician.map(Into::into))
    }

    fn list_technicians(&self, active_only: bool) -> RepositoryResult<Vec<Technician>> {
        use crate::schema::technicians;

        let mut conn = self.conn()?;
        let mut query = technicians::table.into_boxed();
        if active_only {
            query = query.filter(technicians::is_active.eq(true));
        }

        let technicians = query
            .order(technicians::name.asc())
            .load::<DbTechnician>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(technicians)
    }
}

impl TechnicianWriter for DieselRepository {
    fn create_technician(&self, new_technician: &NewTechnician) -> RepositoryResult<Technician> {
        use crate::schema::technicians;

        let mut conn = self.conn()?;
        let insertable: DbNewTechnician = new_technician.into();
        let created = diesel::insert_into(technicians::table)
            .values(&insertable)
            .get_result::<DbTechnician>(&mut conn)?;

        Ok(created.into())
    }

    fn update_technician(
        &self,
        technician_id: i32,
        updates: &UpdateTechnician,
    ) -> RepositoryResult<Technician> {
        use crate::schema::technicians;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateTechnician = updates.into();

        let updated = diesel::update(technicians::table.find(technician_id))
            .set((
                &db_updates,
                technicians::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbTechnician>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_technician(&self, technician_id: i32) -> RepositoryResult<()> {
        use crate::schema::technicians;

        let mut conn = self.conn()?;
        diesel::delete(technicians::table.find(technician_id)).execute(&mut conn)?;
        Ok(())
    }
}
