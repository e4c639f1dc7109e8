use actix_identity::Identity;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::{NaiveDate, Utc};
use tera::Tera;

use crate::domain::report::RevenuePeriod;
use crate::dto::main::DashboardQuery;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{SERVICE_ACCESS_ROLE, base_context, ensure_role, redirect, render_template};
use crate::services::{calendar, dashboard, error_log, reports};

#[get("/")]
pub async fn show_index(
    params: web::Query<DashboardQuery>,
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
    let period = params
        .period
        .as_deref()
        .and_then(|p| RevenuePeriod::try_from(p).ok())
        .unwrap_or(RevenuePeriod::Monthly);
    let anchor = params
        .date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .unwrap_or(today);

    let summary = match dashboard::summary(repo.as_ref(), today) {
        Ok(summary) => summary,
        Err(e) => {
            log::error!("Failed to load dashboard summary: {e}");
            error_log::log_service_error(repo.as_ref(), "dashboard/summary", &e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    let revenue_total = match dashboard::total_revenue(repo.as_ref(), Some((period, anchor))) {
        Ok(total) => total,
        Err(e) => {
            log::error!("Failed to load revenue total: {e}");
            error_log::log_service_error(repo.as_ref(), "dashboard/revenue", &e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    let chart_range = calendar::default_report_range(today);
    let chart = match reports::revenue_chart_data(repo.as_ref(), chart_range, None) {
        Ok(chart) => chart,
        Err(e) => {
            log::error!("Failed to load revenue chart: {e}");
            error_log::log_service_error(repo.as_ref(), "dashboard/chart", &e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "index",
        &server_config.auth_service_url,
    );
    context.insert("summary", &summary);
    context.insert("revenue_total", &revenue_total);
    context.insert("revenue_period", &period.to_string());
    context.insert("revenue_anchor", &anchor.to_string());
    context.insert("chart", &chart);
    context.insert("chart_range", &chart_range);

    render_template(&tera, "main/index.html", &context)
}

#[get("/na")]
pub async fn not_assigned(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(
        &flash_messages,
        &user,
        "na",
        &server_config.auth_service_url,
    );
    render_template(&tera, "main/not_assigned.html", &context)
}

#[post("/logout")]
pub async fn logout(user: Identity) -> impl Responder {
    user.logout();
    redirect("/")
}
