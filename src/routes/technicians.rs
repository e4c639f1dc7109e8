use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;
use validator::Validate;

use crate::domain::technician::{NewTechnician, UpdateTechnician};
use crate::forms::technician::{AddTechnicianForm, SaveTechnicianForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, TechnicianReader, TechnicianWriter};
use crate::routes::{
    SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE, base_context, ensure_role, redirect, render_template,
};

#[get("/technicians")]
pub async fn show_technicians(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    let technicians = match repo.list_technicians(false) {
        Ok(technicians) => technicians,
        Err(e) => {
            log::error!("Failed to list technicians: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "technicians",
        &server_config.auth_service_url,
    );
    context.insert("technicians", &technicians);

    render_template(&tera, "technicians/index.html", &context)
}

#[post("/technician/add")]
pub async fn add_technician(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddTechnicianForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    if let Err(e) = form.validate() {
        log::error!("Failed to validate form: {e}");
        FlashMessage::error("Form validation failed").send();
        return redirect("/technicians");
    }

    let new_technician: NewTechnician = form.into();

    match repo.create_technician(&new_technician) {
        Ok(_) => {
            FlashMessage::success("Technician added.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to add technician: {e}");
            FlashMessage::error("Failed to add technician").send();
        }
    }
    redirect("/technicians")
}

#[post("/technician/save")]
pub async fn save_technician(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveTechnicianForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    if let Err(e) = form.validate() {
        log::error!("Failed to validate form: {e}");
        FlashMessage::error("Form validation failed").send();
        return redirect("/technicians");
    }

    let updates: UpdateTechnician = (&form).into();

    match repo.update_technician(form.id, &updates) {
        Ok(_) => {
            FlashMessage::success("Technician updated.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to update technician: {e}");
            FlashMessage::error("Failed to update technician").send();
        }
    }
    redirect("/technicians")
}

#[derive(Deserialize)]
struct DeleteTechnicianForm {
    id: i32,
}

#[post("/technician/delete")]
pub async fn delete_technician(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteTechnicianForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    match repo.delete_technician(form.id) {
        Ok(()) => {
            FlashMessage::success("Technician deleted.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to delete technician: {e}");
            FlashMessage::error("Failed to delete technician").send();
        }
    }
    redirect("/technicians")
}
