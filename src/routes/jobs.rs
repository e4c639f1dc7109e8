use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;
use validator::Validate;

use crate::domain::job::UpdateJob;
use crate::forms::job::{AddJobForm, SaveJobForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::{
    CustomerReader, DieselRepository, JobReader, JobWriter, TechnicianReader,
    TransactionListQuery, TransactionReader,
};
use crate::routes::{
    SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE, base_context, ensure_role, redirect, render_template,
};

#[get("/job/{job_id}")]
pub async fn show_job(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    let job_id = job_id.into_inner();

    let balance = match repo.get_job_balance(job_id) {
        Ok(Some(balance)) => balance,
        Err(e) => {
            log::error!("Failed to get job: {e}");
            return HttpResponse::InternalServerError().finish();
        }
        _ => {
            FlashMessage::error("Job not found.").send();
            return redirect("/customers");
        }
    };

    let customer = match repo.get_customer_by_id(balance.job.customer_id) {
        Ok(customer) => customer,
        Err(e) => {
            log::error!("Failed to get job customer: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let transactions = match repo.list_transactions(TransactionListQuery::new().job(job_id)) {
        Ok(transactions) => transactions,
        Err(e) => {
            log::error!("Failed to list job transactions: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let technicians = match repo.list_technicians(true) {
        Ok(technicians) => technicians,
        Err(e) => {
            log::error!("Failed to list technicians: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "customers",
        &server_config.auth_service_url,
    );
    context.insert("balance", &balance);
    context.insert("job", &balance.job);
    context.insert("customer", &customer);
    context.insert("transactions", &transactions);
    context.insert("technicians", &technicians);

    render_template(&tera, "jobs/detail.html", &context)
}

#[post("/job/add")]
pub async fn add_job(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddJobForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    if let Err(e) = form.validate() {
        log::error!("Failed to validate form: {e}");
        FlashMessage::error("Form validation failed").send();
        return redirect(&format!("/customer/{}", form.customer_id));
    }

    let initial_transactions = match form.initial_transactions() {
        Ok(transactions) => transactions,
        Err(e) => {
            log::error!("Failed to parse initial transactions: {e}");
            FlashMessage::error("Invalid initial amounts").send();
            return redirect(&format!("/customer/{}", form.customer_id));
        }
    };

    match repo.create_job(&form.to_new_job(), &initial_transactions) {
        Ok(job) => {
            FlashMessage::success("Job created.".to_string()).send();
            return redirect(&format!("/job/{}", job.id));
        }
        Err(e) => {
            log::error!("Failed to create job: {e}");
            FlashMessage::error(format!("Failed to create job: {e}")).send();
        }
    }
    redirect(&format!("/customer/{}", form.customer_id))
}

#[post("/job/save")]
pub async fn save_job(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveJobForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    if let Err(e) = form.validate() {
        log::error!("Failed to validate form: {e}");
        FlashMessage::error("Form validation failed").send();
        return redirect(&format!("/job/{}", form.id));
    }

    let updates: UpdateJob = (&form).into();

    match repo.update_job(form.id, &updates) {
        Ok(_) => {
            FlashMessage::success("Job updated.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to update job: {e}");
            FlashMessage::error("Failed to update job").send();
        }
    }
    redirect(&format!("/job/{}", form.id))
}

#[derive(Deserialize)]
struct DeleteJobForm {
    id: i32,
    customer_id: i32,
}

#[post("/job/delete")]
pub async fn delete_job(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteJobForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    match repo.delete_job(form.id) {
        Ok(()) => {
            FlashMessage::success("Job deleted.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to delete job: {e}");
            FlashMessage::error("Failed to delete job").send();
        }
    }
    redirect(&format!("/customer/{}", form.customer_id))
}
