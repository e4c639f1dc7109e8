use serde::Deserialize;

/// Query parameters shared by the reports page and the export endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// `financial`, `customer`, `service` or `technician`.
    pub kind: Option<String>,
    /// Range start (YYYY-MM-DD); defaults to January 1st of the current year.
    pub start: Option<String>,
    /// Range end (YYYY-MM-DD); defaults to today.
    pub end: Option<String>,
    pub customer_id: Option<i32>,
    /// Export only: `csv` or `pdf`.
    pub format: Option<String>,
}
