use actix_web::http::header;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::{NaiveDate, Utc};
use tera::Tera;

use crate::domain::report::{ReportKind, ReportRange};
use crate::dto::reports::ReportQuery;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::{CustomerReader, DieselRepository};
use crate::routes::{SERVICE_ACCESS_ROLE, base_context, ensure_role, redirect, render_template};
use crate::services::export::ExportFormat;
use crate::services::{calendar, error_log, export, reports};

fn parse_query(params: &ReportQuery, today: NaiveDate) -> (ReportKind, ReportRange, Option<i32>) {
    let kind = params
        .kind
        .as_deref()
        .and_then(|k| ReportKind::try_from(k).ok())
        .unwrap_or(ReportKind::Financial);

    let default_range = calendar::default_report_range(today);
    let start = params
        .start
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .unwrap_or(default_range.start);
    let end = params
        .end
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .unwrap_or(default_range.end);

    (kind, ReportRange::new(start, end), params.customer_id)
}

#[get("/reports")]
pub async fn show_reports(
    params: web::Query<ReportQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    let today = Utc::now().date_naive();
    let (kind, range, customer_id) = parse_query(&params, today);

    let mut context = base_context(
        &flash_messages,
        &user,
        "reports",
        &server_config.auth_service_url,
    );
    context.insert("report_kind", &kind.to_string());
    context.insert("range", &range);

    if let Some(customer_id) = customer_id {
        match repo.get_customer_by_id(customer_id) {
            Ok(Some(customer)) => context.insert("customer", &customer),
            Ok(None) => {
                FlashMessage::error("Customer not found.").send();
                return redirect("/reports");
            }
            Err(e) => {
                log::error!("Failed to get report customer: {e}");
                return HttpResponse::InternalServerError().finish();
            }
        }
    }

    let repo = repo.as_ref();
    let result = match kind {
        ReportKind::Financial => reports::financial_report(repo, range, customer_id)
            .map(|report| context.insert("financial", &report)),
        ReportKind::Customer => reports::customer_report(repo, range, customer_id)
            .map(|report| context.insert("customers", &report)),
        ReportKind::Service => reports::service_report(repo, range, customer_id)
            .map(|report| context.insert("services", &report)),
        ReportKind::Technician => reports::technician_report(repo, range)
            .map(|report| context.insert("technicians", &report)),
    };

    if let Err(e) = result {
        log::error!("Failed to build {kind} report: {e}");
        error_log::log_service_error(repo, "reports", &e);
        FlashMessage::error("Failed to build report").send();
        return redirect("/");
    }

    match reports::revenue_chart_data(repo, range, customer_id) {
        Ok(chart) => context.insert("chart", &chart),
        Err(e) => {
            log::error!("Failed to build revenue chart: {e}");
            error_log::log_service_error(repo, "reports/chart", &e);
            FlashMessage::error("Failed to build report").send();
            return redirect("/");
        }
    }

    if let Some(customer_id) = customer_id {
        match reports::customer_jobs_data(repo, customer_id, range) {
            Ok(rows) => context.insert("customer_jobs", &rows),
            Err(e) => {
                log::error!("Failed to build customer job rows: {e}");
                error_log::log_service_error(repo, "reports/customer_jobs", &e);
                FlashMessage::error("Failed to build report").send();
                return redirect("/");
            }
        }
    }

    render_template(&tera, "reports/index.html", &context)
}

#[get("/reports/export")]
pub async fn export_report(
    params: web::Query<ReportQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    let today = Utc::now().date_naive();
    let (kind, range, customer_id) = parse_query(&params, today);

    let format = match params
        .format
        .as_deref()
        .map(ExportFormat::try_from)
        .unwrap_or(Ok(ExportFormat::Csv))
    {
        Ok(format) => format,
        Err(e) => {
            log::error!("Invalid export format: {e}");
            FlashMessage::error("Invalid export format").send();
            return redirect("/reports");
        }
    };

    match export::export_report(repo.as_ref(), kind, format, range, customer_id, today) {
        Ok(file) => HttpResponse::Ok()
            .content_type(file.content_type)
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ))
            .body(file.bytes),
        Err(e) => {
            log::error!("Failed to export report: {e}");
            error_log::log_service_error(repo.as_ref(), "reports/export", &e);
            FlashMessage::error("Failed to export report").send();
            redirect("/reports")
        }
    }
}
