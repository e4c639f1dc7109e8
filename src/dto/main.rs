use serde::Deserialize;

/// Query parameters accepted by the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// `daily`, `weekly`, `monthly` or `yearly`.
    pub period: Option<String>,
    /// Anchor date for the period filter (YYYY-MM-DD).
    pub date: Option<String>,
}
