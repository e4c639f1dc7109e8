//! Derived, read-only aggregations over stored business records.

use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive date window a report is computed over.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportRange {
    /// Swaps the bounds when given in reverse order.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Number of days covered, counting both endpoints.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Period granularity accepted by the dashboard revenue filter.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RevenuePeriod {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Display for RevenuePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RevenuePeriod::Daily => write!(f, "daily"),
            RevenuePeriod::Weekly => write!(f, "weekly"),
            RevenuePeriod::Monthly => write!(f, "monthly"),
            RevenuePeriod::Yearly => write!(f, "yearly"),
        }
    }
}

impl TryFrom<&str> for RevenuePeriod {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "daily" => Ok(RevenuePeriod::Daily),
            "weekly" => Ok(RevenuePeriod::Weekly),
            "monthly" => Ok(RevenuePeriod::Monthly),
            "yearly" => Ok(RevenuePeriod::Yearly),
            other => Err(format!("unknown revenue period: {other}")),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct FinancialReport {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub paid_amount: f64,
    pub pending_amount: f64,
    pub refund_amount: f64,
    pub revenue_growth: f64,
    pub profit_margin: f64,
    pub previous_period_revenue: f64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TopCustomer {
    pub id: i32,
    pub name: String,
    pub total_spent: f64,
    pub job_count: usize,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct CustomerReport {
    pub total_customers: usize,
    pub new_customers: usize,
    pub returning_customers: usize,
    pub customer_retention_rate: f64,
    pub average_customer_value: f64,
    pub top_customers: Vec<TopCustomer>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PopularService {
    pub service: String,
    pub count: usize,
    pub revenue: f64,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct ServiceReport {
    pub total_jobs: usize,
    pub completed_jobs: usize,
    pub pending_jobs: usize,
    pub cancelled_jobs: usize,
    pub average_job_value: f64,
    pub popular_services: Vec<PopularService>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TechnicianWorkload {
    pub technician_id: i32,
    pub name: String,
    pub completed_jobs: usize,
    pub total_revenue: f64,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct TechnicianReport {
    pub total_technicians: usize,
    pub active_technicians: usize,
    pub workload: Vec<TechnicianWorkload>,
    pub average_jobs_per_technician: f64,
    pub average_revenue_per_technician: f64,
}

/// Single point of a revenue series.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct RevenueChartData {
    pub daily: Vec<ChartPoint>,
    pub weekly: Vec<ChartPoint>,
    pub monthly: Vec<ChartPoint>,
    pub yearly: Vec<ChartPoint>,
}

/// Per-job payment row shown on the customer report drill-down.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CustomerJobRow {
    pub job_id: i32,
    pub job_description: String,
    pub job_date: NaiveDate,
    pub total_cost: f64,
    pub paid_amount: f64,
    pub remaining_balance: f64,
}

/// Headline counters rendered on the dashboard.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub todays_appointments: usize,
    pub open_jobs: usize,
    pub total_customers: usize,
    pub outstanding_total: f64,
}

/// Report families available for rendering and export.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReportKind {
    Financial,
    Customer,
    Service,
    Technician,
}

impl Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Financial => write!(f, "financial"),
            ReportKind::Customer => write!(f, "customer"),
            ReportKind::Service => write!(f, "service"),
            ReportKind::Technician => write!(f, "technician"),
        }
    }
}

impl TryFrom<&str> for ReportKind {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "financial" => Ok(ReportKind::Financial),
            "customer" => Ok(ReportKind::Customer),
            "service" => Ok(ReportKind::Service),
            "technician" => Ok(ReportKind::Technician),
            other => Err(format!("unknown report kind: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_swaps_reversed_bounds() {
        let a = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let range = ReportRange::new(a, b);
        assert_eq!(range.start, b);
        assert_eq!(range.end, a);
        assert_eq!(range.days(), 10);
    }

    #[test]
    fn report_kind_round_trips() {
        for kind in [
            ReportKind::Financial,
            ReportKind::Customer,
            ReportKind::Service,
            ReportKind::Technician,
        ] {
            let parsed = ReportKind::try_from(kind.to_string().as_str()).unwrap();
            assert_eq!(parsed, kind);
        }
        assert!(ReportKind::try_from("weekly").is_err());
    }
}
