//! DTOs exposed by the JSON API endpoints.

use serde::Serialize;

use crate::domain::customer::Customer;
use crate::domain::report::ChartPoint;

/// Result payload returned by `GET /api/v1/customers`.
#[derive(Debug, Serialize)]
pub struct CustomersResponse {
    /// Total number of customers matching the filter.
    pub total: usize,
    /// Page of customers requested by the caller.
    pub customers: Vec<Customer>,
}

/// Result payload returned by `GET /api/v1/reports/revenue`.
#[derive(Debug, Serialize)]
pub struct RevenueSeriesResponse {
    pub daily: Vec<ChartPoint>,
    pub weekly: Vec<ChartPoint>,
    pub monthly: Vec<ChartPoint>,
    pub yearly: Vec<ChartPoint>,
}
