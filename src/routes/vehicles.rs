use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;
use validator::Validate;

use crate::domain::vehicle::{NewVehicle, UpdateVehicle};
use crate::forms::vehicle::{AddVehicleForm, SaveVehicleForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::{
    CustomerReader, DieselRepository, JobListQuery, JobReader, VehicleReader, VehicleWriter,
};
use crate::routes::{
    SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE, base_context, ensure_role, redirect, render_template,
};

#[get("/vehicle/{vehicle_id}")]
pub async fn show_vehicle(
    vehicle_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    let vehicle_id = vehicle_id.into_inner();

    let vehicle = match repo.get_vehicle_by_id(vehicle_id) {
        Ok(Some(vehicle)) => vehicle,
        Err(e) => {
            log::error!("Failed to get vehicle: {e}");
            return HttpResponse::InternalServerError().finish();
        }
        _ => {
            FlashMessage::error("Vehicle not found.").send();
            return redirect("/customers");
        }
    };

    let owner = match repo.get_customer_by_id(vehicle.customer_id) {
        Ok(owner) => owner,
        Err(e) => {
            log::error!("Failed to get vehicle owner: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    // Service history: every job recorded against this vehicle, newest first.
    let history = match repo.list_job_balances(JobListQuery::new().vehicle(vehicle_id)) {
        Ok(history) => history,
        Err(e) => {
            log::error!("Failed to list vehicle history: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "customers",
        &server_config.auth_service_url,
    );
    context.insert("vehicle", &vehicle);
    context.insert("owner", &owner);
    context.insert("history", &history);

    render_template(&tera, "vehicles/detail.html", &context)
}

#[post("/vehicle/add")]
pub async fn add_vehicle(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddVehicleForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    let customer_id = form.customer_id;

    if let Err(e) = form.validate() {
        log::error!("Failed to validate form: {e}");
        FlashMessage::error("Form validation failed").send();
        return redirect(&format!("/customer/{customer_id}"));
    }

    let new_vehicle: NewVehicle = form.into();

    match repo.create_vehicle(&new_vehicle) {
        Ok(_) => {
            FlashMessage::success("Vehicle added.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to add vehicle: {e}");
            FlashMessage::error(format!("Failed to add vehicle: {e}")).send();
        }
    }
    redirect(&format!("/customer/{customer_id}"))
}

#[post("/vehicle/save")]
pub async fn save_vehicle(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveVehicleForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    if let Err(e) = form.validate() {
        log::error!("Failed to validate form: {e}");
        FlashMessage::error("Form validation failed").send();
        return redirect(&format!("/vehicle/{}", form.id));
    }

    let updates: UpdateVehicle = (&form).into();

    match repo.update_vehicle(form.id, &updates) {
        Ok(_) => {
            FlashMessage::success("Vehicle updated.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to update vehicle: {e}");
            FlashMessage::error("Failed to update vehicle").send();
        }
    }

    redirect(&format!("/vehicle/{}", form.id))
}

#[derive(Deserialize)]
struct DeleteVehicleForm {
    id: i32,
    customer_id: i32,
}

#[post("/vehicle/delete")]
pub async fn delete_vehicle(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteVehicleForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    match repo.delete_vehicle(form.id) {
        Ok(()) => {
            FlashMessage::success("Vehicle deleted.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to delete vehicle: {e}");
            FlashMessage::error("Failed to delete vehicle").send();
        }
    }
    redirect(&format!("/customer/{}", form.customer_id))
}
