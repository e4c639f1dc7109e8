use actix_web::{HttpResponse, Responder, get, web};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::dto::api::{CustomersResponse, RevenueSeriesResponse};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{CustomerListQuery, CustomerReader, DieselRepository};
use crate::routes::{SERVICE_ACCESS_ROLE, check_role};
use crate::services::{calendar, reports};

#[derive(Deserialize)]
struct ApiCustomersQueryParams {
    query: String,
    page: Option<usize>,
}

#[get("/v1/customers")]
pub async fn api_v1_customers(
    params: web::Query<ApiCustomersQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return HttpResponse::Unauthorized().finish();
    }

    let page = params.page.unwrap_or(1);
    let mut query = CustomerListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    let term = params.query.trim();
    if !term.is_empty() {
        query = query.search(term);
    }

    match repo.list_customers(query) {
        Ok((total, customers)) => HttpResponse::Ok().json(CustomersResponse { total, customers }),
        Err(e) => {
            log::error!("Failed to list customers: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Deserialize)]
struct ApiRevenueQueryParams {
    start: Option<String>,
    end: Option<String>,
    customer_id: Option<i32>,
}

#[get("/v1/reports/revenue")]
pub async fn api_v1_revenue(
    params: web::Query<ApiRevenueQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return HttpResponse::Unauthorized().finish();
    }

    let today = Utc::now().date_naive();
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
    let range = crate::domain::report::ReportRange::new(start, end);

    match reports::revenue_chart_data(repo.as_ref(), range, params.customer_id) {
        Ok(chart) => HttpResponse::Ok().json(RevenueSeriesResponse {
            daily: chart.daily,
            weekly: chart.weekly,
            monthly: chart.monthly,
            yearly: chart.yearly,
        }),
        Err(e) => {
            log::error!("Failed to build revenue series: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
