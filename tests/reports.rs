use chrono::NaiveDate;

use servicetracker::domain::customer::NewCustomer;
use servicetracker::domain::job::{JobStatus, NewJob};
use servicetracker::domain::report::{ReportKind, ReportRange, RevenuePeriod};
use servicetracker::domain::technician::NewTechnician;
use servicetracker::domain::transaction::{NewFinancialTransaction, TransactionType};
use servicetracker::repository::{
    CustomerListQuery, CustomerReader, CustomerWriter, DieselRepository, JobWriter,
    TechnicianWriter, TransactionWriter,
};
use servicetracker::services::export::{ExportFormat, export_report};
use servicetracker::services::{dashboard, reports};

mod common;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seed_customer(repo: &DieselRepository, name: &str, phone: &str) -> i32 {
    repo.create_customers(&[NewCustomer::new(
        name.to_string(),
        None,
        phone.to_string(),
        None,
    )])
    .unwrap();
    let (_, customers) = repo.list_customers(CustomerListQuery::new().search(name)).unwrap();
    customers[0].id
}

fn seed_job(
    repo: &DieselRepository,
    customer_id: i32,
    description: &str,
    day: NaiveDate,
    cost: f64,
    status: JobStatus,
    technician_id: Option<i32>,
) -> i32 {
    repo.create_job(
        &NewJob {
            customer_id,
            vehicle_id: None,
            technician_id,
            job_description: description.to_string(),
            job_date: day,
            total_cost: cost,
            status,
            notes: None,
        },
        &[],
    )
    .unwrap()
    .id
}

fn seed_payment(repo: &DieselRepository, customer_id: i32, job_id: i32, amount: f64, day: NaiveDate) {
    repo.create_transaction(
        &NewFinancialTransaction::new(customer_id, TransactionType::Payment, amount, day)
            .job(job_id),
    )
    .unwrap();
}

#[test]
fn test_financial_report_totals_and_growth() {
    let test_db = common::TestDb::new("test_financial_report.db");
    let repo = test_db.repo();

    let customer = seed_customer(&repo, "Finance Customer", "+905551110001");
    let range = ReportRange::new(date(2025, 3, 11), date(2025, 3, 20));

    let job1 = seed_job(&repo, customer, "Timing belt", date(2025, 3, 12), 500.0, JobStatus::Open, None);
    let job2 = seed_job(&repo, customer, "Oil change", date(2025, 3, 15), 300.0, JobStatus::Open, None);

    seed_payment(&repo, customer, job1, 200.0, date(2025, 3, 13));
    seed_payment(&repo, customer, job2, 300.0, date(2025, 3, 16));

    // Refund inside the window.
    repo.create_transaction(&NewFinancialTransaction::new(
        customer,
        TransactionType::Refund,
        50.0,
        date(2025, 3, 18),
    ))
    .unwrap();

    // Payment in the previous ten-day window (2025-03-01..2025-03-10).
    let previous_job =
        seed_job(&repo, customer, "Battery", date(2025, 3, 2), 250.0, JobStatus::Paid, None);
    seed_payment(&repo, customer, previous_job, 250.0, date(2025, 3, 5));

    let report = reports::financial_report(&repo, range, None).unwrap();

    assert_eq!(report.total_revenue, 500.0);
    // job1 has 300 unpaid; job2 is settled.
    assert_eq!(report.pending_amount, 300.0);
    assert_eq!(report.refund_amount, 50.0);
    assert_eq!(report.net_profit, 450.0);
    assert_eq!(report.previous_period_revenue, 250.0);
    assert_eq!(report.revenue_growth, 100.0);
    assert_eq!(report.profit_margin, 90.0);
}

#[test]
fn test_financial_report_empty_range_is_zeroed() {
    let test_db = common::TestDb::new("test_financial_report_empty.db");
    let repo = test_db.repo();

    let range = ReportRange::new(date(2025, 1, 1), date(2025, 1, 31));
    let report = reports::financial_report(&repo, range, None).unwrap();
    assert_eq!(report.total_revenue, 0.0);
    assert_eq!(report.revenue_growth, 0.0);
    assert_eq!(report.profit_margin, 0.0);
}

#[test]
fn test_customer_report_top_spenders() {
    let test_db = common::TestDb::new("test_customer_report.db");
    let repo = test_db.repo();

    let a = seed_customer(&repo, "Alpha", "+905551110001");
    let b = seed_customer(&repo, "Beta", "+905551110002");
    let range = ReportRange::new(date(2025, 4, 1), date(2025, 4, 30));

    seed_job(&repo, a, "Job A1", date(2025, 4, 2), 100.0, JobStatus::Paid, None);
    seed_job(&repo, a, "Job A2", date(2025, 4, 3), 150.0, JobStatus::Paid, None);
    seed_job(&repo, b, "Job B1", date(2025, 4, 4), 900.0, JobStatus::Paid, None);

    let report = reports::customer_report(&repo, range, None).unwrap();
    assert_eq!(report.total_customers, 2);
    assert_eq!(report.top_customers.len(), 2);
    assert_eq!(report.top_customers[0].name, "Beta");
    assert_eq!(report.top_customers[0].total_spent, 900.0);
    assert_eq!(report.top_customers[1].job_count, 2);
    assert_eq!(report.average_customer_value, (900.0 + 250.0) / 2.0);

    // Single-customer variant.
    let single = reports::customer_report(&repo, range, Some(a)).unwrap();
    assert_eq!(single.total_customers, 1);
    assert_eq!(single.top_customers[0].total_spent, 250.0);
    assert_eq!(single.top_customers[0].job_count, 2);

    assert!(reports::customer_report(&repo, range, Some(9999)).is_err());
}

#[test]
fn test_service_report_counts_and_popular_services() {
    let test_db = common::TestDb::new("test_service_report.db");
    let repo = test_db.repo();

    let customer = seed_customer(&repo, "Service Customer", "+905551110001");
    let range = ReportRange::new(date(2025, 5, 1), date(2025, 5, 31));

    for day in [1, 2, 3] {
        seed_job(&repo, customer, "Oil change", date(2025, 5, day), 100.0, JobStatus::Paid, None);
    }
    seed_job(&repo, customer, "Brake overhaul", date(2025, 5, 4), 500.0, JobStatus::Open, None);
    seed_job(&repo, customer, "Inspection", date(2025, 5, 5), 200.0, JobStatus::Cancelled, None);

    let report = reports::service_report(&repo, range, None).unwrap();
    assert_eq!(report.total_jobs, 5);
    assert_eq!(report.completed_jobs, 3);
    assert_eq!(report.pending_jobs, 1);
    assert_eq!(report.cancelled_jobs, 1);
    assert_eq!(report.average_job_value, 1100.0 / 5.0);

    assert_eq!(report.popular_services[0].service, "Oil change");
    assert_eq!(report.popular_services[0].count, 3);
    assert_eq!(report.popular_services[0].revenue, 300.0);
}

#[test]
fn test_technician_report_uses_real_assignments() {
    let test_db = common::TestDb::new("test_technician_report.db");
    let repo = test_db.repo();

    let customer = seed_customer(&repo, "Workshop Customer", "+905551110001");
    let active = repo
        .create_technician(&NewTechnician::new("Active Tech".to_string(), None, None, None))
        .unwrap();
    let idle = repo
        .create_technician(&NewTechnician::new("Idle Tech".to_string(), None, None, None))
        .unwrap();

    let range = ReportRange::new(date(2025, 6, 1), date(2025, 6, 30));
    seed_job(&repo, customer, "Job 1", date(2025, 6, 2), 400.0, JobStatus::Paid, Some(active.id));
    seed_job(&repo, customer, "Job 2", date(2025, 6, 3), 600.0, JobStatus::Paid, Some(active.id));
    // Open jobs do not count as completed workload.
    seed_job(&repo, customer, "Job 3", date(2025, 6, 4), 100.0, JobStatus::Open, Some(active.id));

    let report = reports::technician_report(&repo, range).unwrap();
    assert_eq!(report.total_technicians, 2);
    assert_eq!(report.active_technicians, 2);

    let active_row = report
        .workload
        .iter()
        .find(|w| w.technician_id == active.id)
        .unwrap();
    assert_eq!(active_row.completed_jobs, 2);
    assert_eq!(active_row.total_revenue, 1000.0);

    let idle_row = report
        .workload
        .iter()
        .find(|w| w.technician_id == idle.id)
        .unwrap();
    assert_eq!(idle_row.completed_jobs, 0);

    assert_eq!(report.average_jobs_per_technician, 1.0);
    assert_eq!(report.average_revenue_per_technician, 500.0);
}

#[test]
fn test_revenue_chart_groups_by_week_and_month() {
    let test_db = common::TestDb::new("test_revenue_chart.db");
    let repo = test_db.repo();

    let customer = seed_customer(&repo, "Chart Customer", "+905551110001");
    // Two jobs in the same ISO week spanning a month boundary:
    // 2025-06-30 (Monday) and 2025-07-01 share week 2025-W27.
    seed_job(&repo, customer, "A", date(2025, 6, 30), 100.0, JobStatus::Paid, None);
    seed_job(&repo, customer, "B", date(2025, 7, 1), 200.0, JobStatus::Paid, None);
    seed_job(&repo, customer, "C", date(2025, 7, 1), 50.0, JobStatus::Open, None);

    let range = ReportRange::new(date(2025, 6, 1), date(2025, 7, 31));
    let chart = reports::revenue_chart_data(&repo, range, None).unwrap();

    assert_eq!(chart.daily.len(), 2);
    assert_eq!(chart.daily[0].value, 100.0);
    assert_eq!(chart.daily[1].value, 250.0);

    assert_eq!(chart.weekly.len(), 1);
    assert_eq!(chart.weekly[0].label, "2025-W27");
    assert_eq!(chart.weekly[0].value, 350.0);

    assert_eq!(chart.monthly.len(), 2);
    assert_eq!(chart.monthly[0].label, "2025-06");
    assert_eq!(chart.monthly[0].value, 100.0);
    assert_eq!(chart.monthly[1].value, 250.0);

    assert_eq!(chart.yearly.len(), 1);
    assert_eq!(chart.yearly[0].value, 350.0);
}

#[test]
fn test_dashboard_revenue_period_filters() {
    let test_db = common::TestDb::new("test_dashboard_revenue.db");
    let repo = test_db.repo();

    let customer = seed_customer(&repo, "Dashboard Customer", "+905551110001");
    let job = seed_job(&repo, customer, "Job", date(2025, 8, 4), 1000.0, JobStatus::Open, None);

    // Monday and Thursday of ISO week 2025-W32, plus one payment the week before.
    seed_payment(&repo, customer, job, 100.0, date(2025, 8, 4));
    seed_payment(&repo, customer, job, 200.0, date(2025, 8, 7));
    seed_payment(&repo, customer, job, 400.0, date(2025, 8, 1));

    let weekly = dashboard::total_revenue(&repo, Some((RevenuePeriod::Weekly, date(2025, 8, 7))))
        .unwrap();
    assert_eq!(weekly, 300.0);

    let daily = dashboard::total_revenue(&repo, Some((RevenuePeriod::Daily, date(2025, 8, 7))))
        .unwrap();
    assert_eq!(daily, 200.0);

    let monthly = dashboard::total_revenue(&repo, Some((RevenuePeriod::Monthly, date(2025, 8, 15))))
        .unwrap();
    assert_eq!(monthly, 700.0);

    let yearly = dashboard::total_revenue(&repo, Some((RevenuePeriod::Yearly, date(2025, 1, 1))))
        .unwrap();
    assert_eq!(yearly, 700.0);

    let all_time = dashboard::total_revenue(&repo, None).unwrap();
    assert_eq!(all_time, 700.0);
}

#[test]
fn test_customer_jobs_rows() {
    let test_db = common::TestDb::new("test_customer_jobs_rows.db");
    let repo = test_db.repo();

    let customer = seed_customer(&repo, "Rows Customer", "+905551110001");
    let range = ReportRange::new(date(2025, 2, 1), date(2025, 2, 28));

    let early = seed_job(&repo, customer, "Early", date(2025, 2, 5), 100.0, JobStatus::Open, None);
    let late = seed_job(&repo, customer, "Late", date(2025, 2, 20), 300.0, JobStatus::Open, None);
    seed_payment(&repo, customer, late, 120.0, date(2025, 2, 21));

    let rows = reports::customer_jobs_data(&repo, customer, range).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].job_id, early);
    assert_eq!(rows[1].paid_amount, 120.0);
    assert_eq!(rows[1].remaining_balance, 180.0);
}

#[test]
fn test_export_csv_and_pdf() {
    let test_db = common::TestDb::new("test_export_csv_pdf.db");
    let repo = test_db.repo();

    let customer = seed_customer(&repo, "Export Customer", "+905551110001");
    let job = seed_job(&repo, customer, "Export job", date(2025, 3, 10), 500.0, JobStatus::Paid, None);
    seed_payment(&repo, customer, job, 500.0, date(2025, 3, 11));

    let range = ReportRange::new(date(2025, 3, 1), date(2025, 3, 31));
    let today = date(2025, 8, 7);

    let csv = export_report(&repo, ReportKind::Financial, ExportFormat::Csv, range, None, today)
        .unwrap();
    assert_eq!(csv.filename, "servicetracker-financial-2025-08-07.csv");
    let text = String::from_utf8(csv.bytes).unwrap();
    assert!(text.starts_with("Total Revenue,"));
    assert!(text.contains("500.00"));

    let csv = export_report(&repo, ReportKind::Customer, ExportFormat::Csv, range, None, today)
        .unwrap();
    let text = String::from_utf8(csv.bytes).unwrap();
    assert!(text.contains("Top Customers"));
    assert!(text.contains("Export Customer"));

    let pdf = export_report(&repo, ReportKind::Service, ExportFormat::Pdf, range, None, today)
        .unwrap();
    assert_eq!(pdf.content_type, "application/pdf");
    assert!(pdf.bytes.starts_with(b"%PDF"));
}
