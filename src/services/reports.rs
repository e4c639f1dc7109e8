//! Report aggregation over stored business records.
//!
//! Each report pulls filtered row sets through the repository traits and
//! reduces them in memory, so the same figures are produced no matter which
//! backing store implements the traits.

use std::collections::HashMap;

use crate::domain::job::{Job, JobStatus};
use crate::domain::report::{
    ChartPoint, CustomerJobRow, CustomerReport, FinancialReport, PopularService, ReportRange,
    RevenueChartData, ServiceReport, TechnicianReport, TechnicianWorkload, TopCustomer,
};
use crate::domain::transaction::TransactionType;
use crate::repository::{
    CustomerReader, JobListQuery, JobReader, TechnicianReader, TransactionListQuery,
    TransactionReader,
};
use crate::services::calendar;
use crate::services::{ServiceError, ServiceResult};

const TOP_LIST_LIMIT: usize = 10;

fn job_query(range: ReportRange, customer_id: Option<i32>) -> JobListQuery {
    let mut query = JobListQuery::new().range(range);
    if let Some(customer_id) = customer_id {
        query = query.customer(customer_id);
    }
    query
}

fn transaction_query(
    transaction_type: TransactionType,
    range: ReportRange,
    customer_id: Option<i32>,
) -> TransactionListQuery {
    let mut query = TransactionListQuery::new()
        .transaction_type(transaction_type)
        .range(range);
    if let Some(customer_id) = customer_id {
        query = query.customer(customer_id);
    }
    query
}

/// Revenue, pending and refund totals for the window, with a comparison
/// against the immediately preceding window of equal length.
pub fn financial_report<R>(
    repo: &R,
    range: ReportRange,
    customer_id: Option<i32>,
) -> ServiceResult<FinancialReport>
where
    R: JobReader + TransactionReader + ?Sized,
{
    let (_, jobs) = repo.list_jobs(job_query(range, customer_id))?;
    let payments = repo.list_transactions(transaction_query(
        TransactionType::Payment,
        range,
        customer_id,
    ))?;

    let total_revenue: f64 = payments.iter().map(|p| p.amount).sum();

    // Pending is measured against payments recorded in the same window.
    let mut paid_by_job: HashMap<i32, f64> = HashMap::new();
    for payment in &payments {
        if let Some(job_id) = payment.job_id {
            *paid_by_job.entry(job_id).or_default() += payment.amount;
        }
    }
    let pending_amount: f64 = jobs
        .iter()
        .map(|job| {
            let paid = paid_by_job.get(&job.id).copied().unwrap_or(0.0);
            (job.total_cost - paid).max(0.0)
        })
        .sum();

    let refunds = repo.list_transactions(transaction_query(
        TransactionType::Refund,
        range,
        customer_id,
    ))?;
    let refund_amount: f64 = refunds.iter().map(|r| r.amount).sum();

    let previous = calendar::previous_range(range);
    let previous_payments = repo.list_transactions(transaction_query(
        TransactionType::Payment,
        previous,
        customer_id,
    ))?;
    let previous_period_revenue: f64 = previous_payments.iter().map(|p| p.amount).sum();

    let revenue_growth = if previous_period_revenue > 0.0 {
        (total_revenue - previous_period_revenue) / previous_period_revenue * 100.0
    } else {
        0.0
    };

    let net_profit = total_revenue - refund_amount;
    let profit_margin = if total_revenue > 0.0 {
        net_profit / total_revenue * 100.0
    } else {
        0.0
    };

    Ok(FinancialReport {
        total_revenue,
        total_expenses: refund_amount,
        net_profit,
        paid_amount: total_revenue,
        pending_amount,
        refund_amount,
        revenue_growth,
        profit_margin,
        previous_period_revenue,
    })
}

/// Customer base totals plus the top spenders for the window.
pub fn customer_report<R>(
    repo: &R,
    range: ReportRange,
    customer_id: Option<i32>,
) -> ServiceResult<CustomerReport>
where
    R: CustomerReader + JobReader + ?Sized,
{
    if let Some(customer_id) = customer_id {
        let customer = repo
            .get_customer_by_id(customer_id)?
            .ok_or(ServiceError::NotFound)?;

        let (job_count, jobs) = repo.list_jobs(job_query(range, Some(customer_id)))?;
        let total_spent: f64 = jobs.iter().map(|j| j.total_cost).sum();

        return Ok(CustomerReport {
            total_customers: 1,
            new_customers: 0,
            returning_customers: 1,
            customer_retention_rate: 100.0,
            average_customer_value: total_spent,
            top_customers: vec![TopCustomer {
                id: customer.id,
                name: customer.full_name,
                total_spent,
                job_count,
            }],
        });
    }

    let total_customers = repo.count_customers(None)?;
    let new_customers = repo.count_customers(Some(range))?;
    let returning_customers = total_customers.saturating_sub(new_customers);
    let customer_retention_rate = if total_customers > 0 {
        returning_customers as f64 / total_customers as f64 * 100.0
    } else {
        0.0
    };

    let jobs_with_customers = repo.list_jobs_with_customers(job_query(range, None))?;

    struct Spending {
        name: String,
        total_spent: f64,
        job_count: usize,
    }

    let mut spending_by_customer: HashMap<i32, Spending> = HashMap::new();
    for (job, customer) in &jobs_with_customers {
        let entry = spending_by_customer
            .entry(customer.id)
            .or_insert_with(|| Spending {
                name: customer.full_name.clone(),
                total_spent: 0.0,
                job_count: 0,
            });
        entry.total_spent += job.total_cost;
        entry.job_count += 1;
    }

    let mut top_customers: Vec<TopCustomer> = spending_by_customer
        .into_iter()
        .map(|(id, spending)| TopCustomer {
            id,
            name: spending.name,
            total_spent: spending.total_spent,
            job_count: spending.job_count,
        })
        .collect();
    top_customers.sort_by(|a, b| {
        b.total_spent
            .partial_cmp(&a.total_spent)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    top_customers.truncate(TOP_LIST_LIMIT);

    let average_customer_value = if top_customers.is_empty() {
        0.0
    } else {
        top_customers.iter().map(|c| c.total_spent).sum::<f64>() / top_customers.len() as f64
    };

    Ok(CustomerReport {
        total_customers,
        new_customers,
        returning_customers,
        customer_retention_rate,
        average_customer_value,
        top_customers,
    })
}

/// Job status counts and the most requested services for the window.
pub fn service_report<R>(
    repo: &R,
    range: ReportRange,
    customer_id: Option<i32>,
) -> ServiceResult<ServiceReport>
where
    R: JobReader + ?Sized,
{
    let (_, jobs) = repo.list_jobs(job_query(range, customer_id))?;

    let total_jobs = jobs.len();
    let completed_jobs = jobs.iter().filter(|j| j.status == JobStatus::Paid).count();
    let pending_jobs = jobs
        .iter()
        .filter(|j| matches!(j.status, JobStatus::Open | JobStatus::AwaitingPayment))
        .count();
    let cancelled_jobs = jobs
        .iter()
        .filter(|j| j.status == JobStatus::Cancelled)
        .count();

    let average_job_value = if total_jobs > 0 {
        jobs.iter().map(|j| j.total_cost).sum::<f64>() / total_jobs as f64
    } else {
        0.0
    };

    let mut service_totals: HashMap<String, (usize, f64)> = HashMap::new();
    for job in &jobs {
        let entry = service_totals
            .entry(job.job_description.clone())
            .or_default();
        entry.0 += 1;
        entry.1 += job.total_cost;
    }

    let mut popular_services: Vec<PopularService> = service_totals
        .into_iter()
        .map(|(service, (count, revenue))| PopularService {
            service,
            count,
            revenue,
        })
        .collect();
    popular_services.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.service.cmp(&b.service))
    });
    popular_services.truncate(TOP_LIST_LIMIT);

    Ok(ServiceReport {
        total_jobs,
        completed_jobs,
        pending_jobs,
        cancelled_jobs,
        average_job_value,
        popular_services,
    })
}

/// Per-technician workload computed from the jobs actually assigned to them.
pub fn technician_report<R>(repo: &R, range: ReportRange) -> ServiceResult<TechnicianReport>
where
    R: TechnicianReader + JobReader + ?Sized,
{
    let technicians = repo.list_technicians(false)?;
    let (_, jobs) = repo.list_jobs(JobListQuery::new().range(range))?;

    let total_technicians = technicians.len();
    let active_technicians = technicians.iter().filter(|t| t.is_active).count();

    let mut jobs_by_technician: HashMap<i32, Vec<&Job>> = HashMap::new();
    for job in &jobs {
        if let Some(technician_id) = job.technician_id {
            jobs_by_technician.entry(technician_id).or_default().push(job);
        }
    }

    let workload: Vec<TechnicianWorkload> = technicians
        .iter()
        .map(|technician| {
            let assigned = jobs_by_technician
                .get(&technician.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let completed: Vec<&&Job> = assigned
                .iter()
                .filter(|j| j.status == JobStatus::Paid)
                .collect();
            TechnicianWorkload {
                technician_id: technician.id,
                name: technician.name.clone(),
                completed_jobs: completed.len(),
                total_revenue: completed.iter().map(|j| j.total_cost).sum(),
            }
        })
        .collect();

    let (average_jobs_per_technician, average_revenue_per_technician) = if active_technicians > 0 {
        let completed: usize = workload.iter().map(|w| w.completed_jobs).sum();
        let revenue: f64 = workload.iter().map(|w| w.total_revenue).sum();
        (
            completed as f64 / active_technicians as f64,
            revenue / active_technicians as f64,
        )
    } else {
        (0.0, 0.0)
    };

    Ok(TechnicianReport {
        total_technicians,
        active_technicians,
        workload,
        average_jobs_per_technician,
        average_revenue_per_technician,
    })
}

/// Groups in-range job totals by day, ISO week, month and year.
pub fn revenue_chart_data<R>(
    repo: &R,
    range: ReportRange,
    customer_id: Option<i32>,
) -> ServiceResult<RevenueChartData>
where
    R: JobReader + ?Sized,
{
    let (_, jobs) = repo.list_jobs(job_query(range, customer_id))?;

    let mut daily: HashMap<chrono::NaiveDate, f64> = HashMap::new();
    let mut weekly: HashMap<chrono::NaiveDate, f64> = HashMap::new();
    let mut monthly: HashMap<chrono::NaiveDate, f64> = HashMap::new();
    let mut yearly: HashMap<chrono::NaiveDate, f64> = HashMap::new();

    for job in &jobs {
        *daily.entry(job.job_date).or_default() += job.total_cost;
        *weekly
            .entry(calendar::iso_week_range(job.job_date).start)
            .or_default() += job.total_cost;
        *monthly
            .entry(calendar::month_range(job.job_date).start)
            .or_default() += job.total_cost;
        *yearly
            .entry(calendar::year_range(job.job_date).start)
            .or_default() += job.total_cost;
    }

    fn to_series(
        totals: HashMap<chrono::NaiveDate, f64>,
        label: impl Fn(chrono::NaiveDate) -> String,
    ) -> Vec<ChartPoint> {
        let mut series: Vec<ChartPoint> = totals
            .into_iter()
            .map(|(date, value)| ChartPoint {
                label: label(date),
                date,
                value,
            })
            .collect();
        series.sort_by_key(|p| p.date);
        series
    }

    Ok(RevenueChartData {
        daily: to_series(daily, |d| d.to_string()),
        weekly: to_series(weekly, calendar::week_label),
        monthly: to_series(monthly, calendar::month_label),
        yearly: to_series(yearly, |d| d.format("%Y").to_string()),
    })
}

/// Per-job cost/paid/remaining rows for one customer, oldest first.
pub fn customer_jobs_data<R>(
    repo: &R,
    customer_id: i32,
    range: ReportRange,
) -> ServiceResult<Vec<CustomerJobRow>>
where
    R: JobReader + ?Sized,
{
    let balances = repo.list_job_balances(job_query(range, Some(customer_id)))?;

    let mut rows: Vec<CustomerJobRow> = balances
        .into_iter()
        .map(|balance| CustomerJobRow {
            job_id: balance.job.id,
            job_description: balance.job.job_description,
            job_date: balance.job.job_date,
            total_cost: balance.job.total_cost,
            paid_amount: balance.total_paid,
            remaining_balance: balance.remaining,
        })
        .collect();
    rows.sort_by_key(|r| (r.job_date, r.job_id));

    Ok(rows)
}
