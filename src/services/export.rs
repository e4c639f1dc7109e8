//! CSV and PDF rendering of the four report families.

use std::io::BufWriter;

use chrono::NaiveDate;
use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::domain::report::{ReportKind, ReportRange};
use crate::repository::{CustomerReader, JobReader, TechnicianReader, TransactionReader};
use crate::services::reports;
use crate::services::{ServiceError, ServiceResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl TryFrom<&str> for ExportFormat {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// Rendered export ready to be sent as a download.
#[derive(Debug)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Flat intermediate shared by both renderers: scalar metrics plus an
/// optional list section.
struct ReportSheet {
    title: String,
    metrics: Vec<(String, String)>,
    table: Option<SheetTable>,
}

struct SheetTable {
    title: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

fn sheet_for<R>(
    repo: &R,
    kind: ReportKind,
    range: ReportRange,
    customer_id: Option<i32>,
) -> ServiceResult<ReportSheet>
where
    R: JobReader + TransactionReader + CustomerReader + TechnicianReader + ?Sized,
{
    match kind {
        ReportKind::Financial => {
            let report = reports::financial_report(repo, range, customer_id)?;
            Ok(ReportSheet {
                title: "Financial Report".to_string(),
                metrics: vec![
                    ("Total Revenue".to_string(), money(report.total_revenue)),
                    ("Total Expenses".to_string(), money(report.total_expenses)),
                    ("Net Profit".to_string(), money(report.net_profit)),
                    ("Paid Amount".to_string(), money(report.paid_amount)),
                    ("Pending Amount".to_string(), money(report.pending_amount)),
                    ("Refund Amount".to_string(), money(report.refund_amount)),
                    ("Profit Margin".to_string(), percent(report.profit_margin)),
                    ("Revenue Growth".to_string(), percent(report.revenue_growth)),
                    (
                        "Previous Period Revenue".to_string(),
                        money(report.previous_period_revenue),
                    ),
                ],
                table: None,
            })
        }
        ReportKind::Customer => {
            let report = reports::customer_report(repo, range, customer_id)?;
            Ok(ReportSheet {
                title: "Customer Report".to_string(),
                metrics: vec![
                    (
                        "Total Customers".to_string(),
                        report.total_customers.to_string(),
                    ),
                    ("New Customers".to_string(), report.new_customers.to_string()),
                    (
                        "Returning Customers".to_string(),
                        report.returning_customers.to_string(),
                    ),
                    (
                        "Retention Rate".to_string(),
                        percent(report.customer_retention_rate),
                    ),
                    (
                        "Average Customer Value".to_string(),
                        money(report.average_customer_value),
                    ),
                ],
                table: Some(SheetTable {
                    title: "Top Customers".to_string(),
                    headers: vec![
                        "Name".to_string(),
                        "Total Spent".to_string(),
                        "Job Count".to_string(),
                    ],
                    rows: report
                        .top_customers
                        .into_iter()
                        .map(|c| vec![c.name, money(c.total_spent), c.job_count.to_string()])
                        .collect(),
                }),
            })
        }
        ReportKind::Service => {
            let report = reports::service_report(repo, range, customer_id)?;
            Ok(ReportSheet {
                title: "Service Report".to_string(),
                metrics: vec![
                    ("Total Jobs".to_string(), report.total_jobs.to_string()),
                    (
                        "Completed Jobs".to_string(),
                        report.completed_jobs.to_string(),
                    ),
                    ("Pending Jobs".to_string(), report.pending_jobs.to_string()),
                    (
                        "Cancelled Jobs".to_string(),
                        report.cancelled_jobs.to_string(),
                    ),
                    (
                        "Average Job Value".to_string(),
                        money(report.average_job_value),
                    ),
                ],
                table: Some(SheetTable {
                    title: "Popular Services".to_string(),
                    headers: vec![
                        "Service".to_string(),
                        "Count".to_string(),
                        "Revenue".to_string(),
                    ],
                    rows: report
                        .popular_services
                        .into_iter()
                        .map(|s| vec![s.service, s.count.to_string(), money(s.revenue)])
                        .collect(),
                }),
            })
        }
        ReportKind::Technician => {
            let report = reports::technician_report(repo, range)?;
            Ok(ReportSheet {
                title: "Technician Report".to_string(),
                metrics: vec![
                    (
                        "Total Technicians".to_string(),
                        report.total_technicians.to_string(),
                    ),
                    (
                        "Active Technicians".to_string(),
                        report.active_technicians.to_string(),
                    ),
                    (
                        "Average Jobs per Technician".to_string(),
                        format!("{:.2}", report.average_jobs_per_technician),
                    ),
                    (
                        "Average Revenue per Technician".to_string(),
                        money(report.average_revenue_per_technician),
                    ),
                ],
                table: Some(SheetTable {
                    title: "Workload".to_string(),
                    headers: vec![
                        "Technician".to_string(),
                        "Completed Jobs".to_string(),
                        "Revenue".to_string(),
                    ],
                    rows: report
                        .workload
                        .into_iter()
                        .map(|w| {
                            vec![
                                w.name,
                                w.completed_jobs.to_string(),
                                money(w.total_revenue),
                            ]
                        })
                        .collect(),
                }),
            })
        }
    }
}

fn render_csv(sheet: &ReportSheet) -> ServiceResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    let (headers, values): (Vec<_>, Vec<_>) = sheet
        .metrics
        .iter()
        .map(|(label, value)| (label.clone(), value.clone()))
        .unzip();
    writer
        .write_record(&headers)
        .map_err(|e| ServiceError::Internal(format!("CSV write error: {e}")))?;
    writer
        .write_record(&values)
        .map_err(|e| ServiceError::Internal(format!("CSV write error: {e}")))?;

    if let Some(table) = &sheet.table {
        writer
            .write_record([table.title.as_str()])
            .map_err(|e| ServiceError::Internal(format!("CSV write error: {e}")))?;
        writer
            .write_record(&table.headers)
            .map_err(|e| ServiceError::Internal(format!("CSV write error: {e}")))?;
        for row in &table.rows {
            writer
                .write_record(row)
                .map_err(|e| ServiceError::Internal(format!("CSV write error: {e}")))?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| ServiceError::Internal(format!("CSV flush error: {e}")))
}

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 7.0;

fn render_pdf(sheet: &ReportSheet, generated_on: NaiveDate) -> ServiceResult<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        sheet.title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let current_layer = doc.get_page(page).get_layer(layer);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ServiceError::Internal(format!("PDF font error: {e:?}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ServiceError::Internal(format!("PDF font error: {e:?}")))?;

    let mut y = PAGE_HEIGHT_MM - 25.0;
    current_layer.use_text("ServiceTracker", 20.0, Mm(MARGIN_MM), Mm(y), &bold);
    y -= 12.0;
    current_layer.use_text(&sheet.title, 16.0, Mm(MARGIN_MM), Mm(y), &regular);
    y -= 8.0;
    current_layer.use_text(
        format!("Report Date: {generated_on}"),
        10.0,
        Mm(MARGIN_MM),
        Mm(y),
        &regular,
    );
    y -= 12.0;

    for (label, value) in &sheet.metrics {
        current_layer.use_text(label.as_str(), 11.0, Mm(MARGIN_MM), Mm(y), &regular);
        current_layer.use_text(value.as_str(), 11.0, Mm(MARGIN_MM + 90.0), Mm(y), &regular);
        y -= LINE_HEIGHT_MM;
    }

    if let Some(table) = &sheet.table {
        y -= 6.0;
        current_layer.use_text(table.title.as_str(), 13.0, Mm(MARGIN_MM), Mm(y), &bold);
        y -= LINE_HEIGHT_MM;

        let column_width = (PAGE_WIDTH_MM - 2.0 * MARGIN_MM) / table.headers.len() as f32;
        for (i, header) in table.headers.iter().enumerate() {
            current_layer.use_text(
                header.as_str(),
                11.0,
                Mm(MARGIN_MM + column_width * i as f32),
                Mm(y),
                &bold,
            );
        }
        y -= LINE_HEIGHT_MM;

        for row in &table.rows {
            for (i, cell) in row.iter().enumerate() {
                current_layer.use_text(
                    cell.as_str(),
                    10.0,
                    Mm(MARGIN_MM + column_width * i as f32),
                    Mm(y),
                    &regular,
                );
            }
            y -= LINE_HEIGHT_MM;
        }
    }

    current_layer.use_text(
        "ServiceTracker - Automotive Service Management",
        8.0,
        Mm(MARGIN_MM),
        Mm(12.0),
        &regular,
    );

    let mut bytes = Vec::new();
    doc.save(&mut BufWriter::new(&mut bytes))
        .map_err(|e| ServiceError::Internal(format!("PDF save error: {e:?}")))?;

    Ok(bytes)
}

/// Builds the requested report and renders it to a downloadable file.
pub fn export_report<R>(
    repo: &R,
    kind: ReportKind,
    format: ExportFormat,
    range: ReportRange,
    customer_id: Option<i32>,
    generated_on: NaiveDate,
) -> ServiceResult<ExportFile>
where
    R: JobReader + TransactionReader + CustomerReader + TechnicianReader + ?Sized,
{
    let sheet = sheet_for(repo, kind, range, customer_id)?;

    let (bytes, content_type, extension) = match format {
        ExportFormat::Csv => (render_csv(&sheet)?, "text/csv; charset=utf-8", "csv"),
        ExportFormat::Pdf => (
            render_pdf(&sheet, generated_on)?,
            "application/pdf",
            "pdf",
        ),
    };

    Ok(ExportFile {
        filename: format!("servicetracker-{kind}-{generated_on}.{extension}"),
        content_type,
        bytes,
    })
}
