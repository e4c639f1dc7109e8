//! Dashboard figures: revenue for a period filter plus headline counters.

use chrono::NaiveDate;

use crate::domain::job::JobStatus;
use crate::domain::report::{DashboardSummary, ReportRange, RevenuePeriod};
use crate::domain::transaction::TransactionType;
use crate::repository::{
    AppointmentListQuery, AppointmentReader, CustomerReader, JobListQuery, JobReader,
    TransactionListQuery, TransactionReader,
};
use crate::services::ServiceResult;
use crate::services::calendar;

/// Sum of payments recorded inside the period window, or over all time when
/// no filter is given.
pub fn total_revenue<R>(
    repo: &R,
    filter: Option<(RevenuePeriod, NaiveDate)>,
) -> ServiceResult<f64>
where
    R: TransactionReader + ?Sized,
{
    let mut query = TransactionListQuery::new().transaction_type(TransactionType::Payment);
    if let Some((period, date)) = filter {
        query = query.range(calendar::period_range(period, date));
    }

    let payments = repo.list_transactions(query)?;
    Ok(payments.iter().map(|p| p.amount).sum())
}

/// Counters shown at the top of the dashboard.
pub fn summary<R>(repo: &R, today: NaiveDate) -> ServiceResult<DashboardSummary>
where
    R: AppointmentReader + JobReader + CustomerReader + ?Sized,
{
    let (start, end) = calendar::datetime_bounds(ReportRange::new(today, today));
    let (todays_appointments, _) =
        repo.list_appointments(AppointmentListQuery::new().between(start, end).paginate(1, 1))?;

    let (open_jobs, _) =
        repo.list_jobs(JobListQuery::new().status(JobStatus::Open).paginate(1, 1))?;

    let total_customers = repo.count_customers(None)?;

    let outstanding_total = repo
        .list_customers_with_debt()?
        .iter()
        .map(|b| b.outstanding)
        .sum();

    Ok(DashboardSummary {
        todays_appointments,
        open_jobs,
        total_customers,
        outstanding_total,
    })
}
