//! Repository implementation for vehicles.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle};
use crate::models::vehicle::{
    NewVehicle as DbNewVehicle, UpdateVehicle as DbUpdateVehicle, Vehicle as DbVehicle,
};
use crate::repository::{
    DieselRepository, VehicleListQuery, VehicleReader, VehicleWriter, errors::RepositoryResult,
};

impl VehicleReader for DieselRepository {
    fn get_vehicle_by_id(&self, id: i32) -> RepositoryResult<Option<Vehicle>> {
        use crate::schema::vehicles;

        let mut conn = self.conn()?;
        let vehicle = vehicles::table
            .find(id)
            .first::<DbVehicle>(&mut conn)
            .optional()?;

        Ok(vehicle.map(Into::into))
    }

    fn list_vehicles(&self, query: VehicleListQuery) -> RepositoryResult<(usize, Vec<Vehicle>)> {
        use crate::schema::vehicles;

        let mut conn = self.conn()?;

        let build = || {
            let mut items = vehicles::table.into_boxed();
            if let Some(customer_id) = query.customer_id {
                items = items.filter(vehicles::customer_id.eq(customer_id));
            }
            if let Some(term) = &query.search {
                let pattern = format!("%{term}%");
                items = items.filter(
                    vehicles::plate
                        .like(pattern.clone())
                        .or(vehicles::brand.like(pattern.clone()))
                        .or(vehicles::model.like(pattern.clone()))
                        .or(vehicles::vin.like(pattern)),
                );
            }
            items
        };

        let total: i64 = build().count().get_result(&mut conn)?;

        let mut items = build().order(vehicles::id.asc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            items = items.limit(per_page).offset((page - 1) * per_page);
        }

        let vehicles = items
            .load::<DbVehicle>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total as usize, vehicles))
    }
}

impl VehicleWriter for DieselRepository {
    fn create_vehicle(&self, new_vehicle: &NewVehicle) -> RepositoryResult<Vehicle> {
        use crate::schema::vehicles;

        let mut conn = self.conn()?;
        let insertable: DbNewVehicle = new_vehicle.into();
        let created = diesel::insert_into(vehicles::table)
            .values(&insertable)
            .get_result::<DbVehicle>(&mut conn)?;

        Ok(created.into())
    }

    fn update_vehicle(
        &self,
        vehicle_id: i32,
        updates: &UpdateVehicle,
    ) -> RepositoryResult<Vehicle> {
        use crate::schema::vehicles;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateVehicle = updates.into();

        let updated = diesel::update(vehicles::table.find(vehicle_id))
            .set((&db_updates, vehicles::updated_at.eq(Utc::now().naive_utc())))
            .get_result::<DbVehicle>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_vehicle(&self, vehicle_id: i32) -> RepositoryResult<()> {
        use crate::schema::vehicles;

        let mut conn = self.conn()?;
        diesel::delete(vehicles::table.find(vehicle_id)).execute(&mut conn)?;
        Ok(())
    }
}
