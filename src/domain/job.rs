use std::fmt::Display;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Lifecycle of a service order from intake to settlement.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum JobStatus {
    Open,
    AwaitingPayment,
    PartiallyPaid,
    Paid,
    Cancelled,
    Other(String),
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Open => write!(f, "Open"),
            JobStatus::AwaitingPayment => write!(f, "AwaitingPayment"),
            JobStatus::PartiallyPaid => write!(f, "PartiallyPaid"),
            JobStatus::Paid => write!(f, "Paid"),
            JobStatus::Cancelled => write!(f, "Cancelled"),
            JobStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        match s {
            "Open" => JobStatus::Open,
            "AwaitingPayment" => JobStatus::AwaitingPayment,
            "PartiallyPaid" => JobStatus::PartiallyPaid,
            "Paid" => JobStatus::Paid,
            "Cancelled" => JobStatus::Cancelled,
            _ => JobStatus::Other(s.to_string()),
        }
    }
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: Option<i32>,
    pub technician_id: Option<i32>,
    pub job_description: String,
    pub job_date: NaiveDate,
    pub total_cost: f64,
    pub status: JobStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewJob {
    pub customer_id: i32,
    pub vehicle_id: Option<i32>,
    pub technician_id: Option<i32>,
    pub job_description: String,
    pub job_date: NaiveDate,
    pub total_cost: f64,
    pub status: JobStatus,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateJob {
    pub technician_id: Option<i32>,
    pub job_description: String,
    pub job_date: NaiveDate,
    pub total_cost: f64,
    pub status: JobStatus,
    pub notes: Option<String>,
}

/// A job together with the payment totals derived from its transactions.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JobBalance {
    pub job: Job,
    pub total_paid: f64,
    pub total_refunded: f64,
    pub remaining: f64,
}

impl JobBalance {
    /// Remaining balance never goes below zero; overpaid jobs settle at 0.
    #[must_use]
    pub fn new(job: Job, total_paid: f64, total_refunded: f64) -> Self {
        let remaining = (job.total_cost - total_paid).max(0.0);
        Self {
            job,
            total_paid,
            total_refunded,
            remaining,
        }
    }
}
