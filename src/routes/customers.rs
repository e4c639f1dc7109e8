use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;
use validator::Validate;

use crate::domain::customer::{NewCustomer, UpdateCustomer};
use crate::forms::customer::{AddCustomerForm, SaveCustomerForm, UploadCustomersForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    CustomerListQuery, CustomerReader, CustomerWriter, DieselRepository, JobListQuery, JobReader,
    TransactionListQuery, TransactionReader, VehicleListQuery, VehicleReader,
};
use crate::routes::{
    SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE, base_context, ensure_role, redirect, render_template,
};
use crate::services::import;

#[derive(Deserialize)]
struct CustomersQueryParams {
    q: Option<String>,
    page: Option<usize>,
    /// Show only customers with unpaid balances.
    debtors: Option<bool>,
}

#[get("/customers")]
pub async fn show_customers(
    params: web::Query<CustomersQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    let mut context = base_context(
        &flash_messages,
        &user,
        "customers",
        &server_config.auth_service_url,
    );

    if params.debtors.unwrap_or(false) {
        let debtors = match repo.list_customers_with_debt() {
            Ok(debtors) => debtors,
            Err(e) => {
                log::error!("Failed to list debtors: {e}");
                return HttpResponse::InternalServerError().finish();
            }
        };
        context.insert("debtors", &debtors);
        return render_template(&tera, "customers/index.html", &context);
    }

    let page = params.page.unwrap_or(1);
    let q = params.q.as_deref().unwrap_or("").trim();

    let mut query = CustomerListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if !q.is_empty() {
        query = query.search(q);
        context.insert("search_query", q);
    }

    let customers = match repo.list_customers(query) {
        Ok((total, customers)) => {
            Paginated::new(customers, page, total.div_ceil(DEFAULT_ITEMS_PER_PAGE))
        }
        Err(e) => {
            log::error!("Failed to list customers: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    context.insert("customers", &customers);

    render_template(&tera, "customers/index.html", &context)
}

#[get("/customer/{customer_id}")]
pub async fn show_customer(
    customer_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    let customer_id = customer_id.into_inner();

    let customer = match repo.get_customer_by_id(customer_id) {
        Ok(Some(customer)) => customer,
        Err(e) => {
            log::error!("Failed to get customer: {e}");
            return HttpResponse::InternalServerError().finish();
        }
        _ => {
            FlashMessage::error("Customer not found.").send();
            return redirect("/customers");
        }
    };

    let vehicles = match repo.list_vehicles(VehicleListQuery::new().customer(customer_id)) {
        Ok((_, vehicles)) => vehicles,
        Err(e) => {
            log::error!("Failed to list vehicles: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let jobs = match repo.list_job_balances(JobListQuery::new().customer(customer_id)) {
        Ok(jobs) => jobs,
        Err(e) => {
            log::error!("Failed to list jobs: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };
    let outstanding: f64 = jobs.iter().map(|b| b.remaining).sum();

    let transactions =
        match repo.list_transactions(TransactionListQuery::new().customer(customer_id)) {
            Ok(transactions) => transactions,
            Err(e) => {
                log::error!("Failed to list transactions: {e}");
                return HttpResponse::InternalServerError().finish();
            }
        };

    let mut context = base_context(
        &flash_messages,
        &user,
        "customers",
        &server_config.auth_service_url,
    );
    context.insert("customer", &customer);
    context.insert("vehicles", &vehicles);
    context.insert("jobs", &jobs);
    context.insert("outstanding", &outstanding);
    context.insert("transactions", &transactions);

    render_template(&tera, "customers/detail.html", &context)
}

#[post("/customer/add")]
pub async fn add_customer(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCustomerForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    if let Err(e) = form.validate() {
        log::error!("Failed to validate form: {e}");
        FlashMessage::error("Form validation failed").send();
        return redirect("/customers");
    }

    let new_customer: NewCustomer = form.into();

    match repo.create_customers(&[new_customer]) {
        Ok(_) => {
            FlashMessage::success("Customer added.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to add a customer: {e}");
            FlashMessage::error(format!("Failed to add customer: {e}")).send();
        }
    }
    redirect("/customers")
}

#[post("/customers/upload")]
pub async fn upload_customers(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadCustomersForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    // Reopen by path: the upload handle's cursor sits at the end of the file.
    let csv_file = match std::fs::File::open(form.csv.file.path()) {
        Ok(file) => file,
        Err(e) => {
            log::error!("Failed to open uploaded CSV: {e}");
            FlashMessage::error("CSV import failed").send();
            return redirect("/customers");
        }
    };

    let customers = match import::parse_customers_csv(csv_file) {
        Ok(customers) => customers,
        Err(e) => {
            log::error!("Failed to parse customers CSV: {e}");
            FlashMessage::error(format!("CSV import failed: {e}")).send();
            return redirect("/customers");
        }
    };

    match repo.create_customers(&customers) {
        Ok(count) => {
            FlashMessage::success(format!("Imported {count} customers.")).send();
        }
        Err(e) => {
            log::error!("Failed to import customers: {e}");
            FlashMessage::error("Failed to import customers").send();
        }
    }
    redirect("/customers")
}

#[post("/customer/save")]
pub async fn save_customer(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveCustomerForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    if let Err(e) = form.validate() {
        log::error!("Failed to validate form: {e}");
        FlashMessage::error("Form validation failed").send();
        return redirect(&format!("/customer/{}", form.id));
    }

    let updates: UpdateCustomer = (&form).into();

    match repo.update_customer(form.id, &updates) {
        Ok(_) => {
            FlashMessage::success("Customer updated.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to update customer: {e}");
            FlashMessage::error("Failed to update customer").send();
        }
    }

    redirect(&format!("/customer/{}", form.id))
}

#[derive(Deserialize)]
struct DeleteCustomerForm {
    id: i32,
}

#[post("/customer/delete")]
pub async fn delete_customer(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteCustomerForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    match repo.delete_customer(form.id) {
        Ok(()) => {
            FlashMessage::success("Customer deleted.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to delete customer: {e}");
            FlashMessage::error("Failed to delete customer").send();
        }
    }
    redirect("/customers")
}
