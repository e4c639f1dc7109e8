use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tera::Tera;
use validator::Validate;

use crate::forms::appointment::{AddAppointmentForm, SaveAppointmentForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    AppointmentListQuery, AppointmentReader, AppointmentWriter, DieselRepository,
};
use crate::routes::{
    SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE, base_context, ensure_role, redirect, render_template,
};
use crate::services::calendar;

#[derive(Deserialize)]
struct AppointmentsQueryParams {
    /// Month shown by the calendar, anchored at any date inside it.
    month: Option<String>,
    status: Option<String>,
    customer_id: Option<i32>,
    page: Option<usize>,
}

#[get("/appointments")]
pub async fn show_appointments(
    params: web::Query<AppointmentsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    let anchor = params
        .month
        .as_deref()
        .and_then(|m| NaiveDate::parse_from_str(m, "%Y-%m-%d").ok())
        .unwrap_or_else(|| Utc::now().date_naive());
    let month = calendar::month_range(anchor);
    let (start, end) = calendar::datetime_bounds(month);

    let page = params.page.unwrap_or(1);
    let mut query = AppointmentListQuery::new()
        .between(start, end)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(status) = params.status.as_deref().filter(|s| !s.is_empty()) {
        query = query.status(status.into());
    }
    if let Some(customer_id) = params.customer_id {
        query = query.customer(customer_id);
    }

    let appointments = match repo.list_appointments(query) {
        Ok((total, appointments)) => {
            Paginated::new(appointments, page, total.div_ceil(DEFAULT_ITEMS_PER_PAGE))
        }
        Err(e) => {
            log::error!("Failed to list appointments: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "appointments",
        &server_config.auth_service_url,
    );
    context.insert("appointments", &appointments);
    context.insert("month_start", &month.start);
    context.insert("month_end", &month.end);
    context.insert("status_filter", params.status.as_deref().unwrap_or(""));

    render_template(&tera, "appointments/index.html", &context)
}

#[post("/appointment/add")]
pub async fn add_appointment(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddAppointmentForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    if let Err(e) = form.validate() {
        log::error!("Failed to validate form: {e}");
        FlashMessage::error("Form validation failed").send();
        return redirect("/appointments");
    }

    let new_appointment = match form.to_new_appointment() {
        Ok(new_appointment) => new_appointment,
        Err(e) => {
            log::error!("Failed to parse appointment form: {e}");
            FlashMessage::error("Invalid appointment date").send();
            return redirect("/appointments");
        }
    };

    match repo.create_appointment(&new_appointment) {
        Ok(_) => {
            FlashMessage::success("Appointment booked.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to book appointment: {e}");
            FlashMessage::error(format!("Failed to book appointment: {e}")).send();
        }
    }
    redirect("/appointments")
}

#[post("/appointment/save")]
pub async fn save_appointment(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveAppointmentForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    if let Err(e) = form.validate() {
        log::error!("Failed to validate form: {e}");
        FlashMessage::error("Form validation failed").send();
        return redirect("/appointments");
    }

    let updates = match form.to_update_appointment() {
        Ok(updates) => updates,
        Err(e) => {
            log::error!("Failed to parse appointment form: {e}");
            FlashMessage::error("Invalid appointment date").send();
            return redirect("/appointments");
        }
    };

    match repo.update_appointment(form.id, &updates) {
        Ok(_) => {
            FlashMessage::success("Appointment updated.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to update appointment: {e}");
            FlashMessage::error("Failed to update appointment").send();
        }
    }
    redirect("/appointments")
}

#[derive(Deserialize)]
struct DeleteAppointmentForm {
    id: i32,
}

#[post("/appointment/delete")]
pub async fn delete_appointment(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteAppointmentForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    match repo.delete_appointment(form.id) {
        Ok(()) => {
            FlashMessage::success("Appointment deleted.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to delete appointment: {e}");
            FlashMessage::error("Failed to delete appointment").send();
        }
    }
    redirect("/appointments")
}
