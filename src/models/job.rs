use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::job::{Job as DomainJob, NewJob as DomainNewJob, UpdateJob as DomainUpdateJob};
use crate::models::customer::Customer;
use crate::models::technician::Technician;
use crate::models::vehicle::Vehicle;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::jobs)]
#[diesel(belongs_to(Customer, foreign_key = customer_id))]
#[diesel(belongs_to(Vehicle, foreign_key = vehicle_id))]
#[diesel(belongs_to(Technician, foreign_key = technician_id))]
/// Diesel model for [`crate::domain::job::Job`].
pub struct Job {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: Option<i32>,
    pub technician_id: Option<i32>,
    pub job_description: String,
    pub job_date: NaiveDate,
    pub total_cost: f64,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::jobs)]
/// Insertable form of [`Job`].
pub struct NewJob<'a> {
    pub customer_id: i32,
    pub vehicle_id: Option<i32>,
    pub technician_id: Option<i32>,
    pub job_description: &'a str,
    pub job_date: NaiveDate,
    pub total_cost: f64,
    pub status: String,
    pub notes: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::jobs)]
/// Data used when updating a [`Job`] record. Customer and vehicle links are
/// fixed at creation time.
pub struct UpdateJob<'a> {
    pub technician_id: Option<i32>,
    pub job_description: &'a str,
    pub job_date: NaiveDate,
    pub total_cost: f64,
    pub status: String,
    pub notes: Option<&'a str>,
}

impl From<Job> for DomainJob {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            customer_id: job.customer_id,
            vehicle_id: job.vehicle_id,
            technician_id: job.technician_id,
            job_description: job.job_description,
            job_date: job.job_date,
            total_cost: job.total_cost,
            status: job.status.into(),
            notes: job.notes,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewJob> for NewJob<'a> {
    fn from(job: &'a DomainNewJob) -> Self {
        Self {
            customer_id: job.customer_id,
            vehicle_id: job.vehicle_id,
            technician_id: job.technician_id,
            job_description: job.job_description.as_str(),
            job_date: job.job_date,
            total_cost: job.total_cost,
            status: job.status.to_string(),
            notes: job.notes.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateJob> for UpdateJob<'a> {
    fn from(job: &'a DomainUpdateJob) -> Self {
        Self {
            technician_id: job.technician_id,
            job_description: job.job_description.as_str(),
            job_date: job.job_date,
            total_cost: job.total_cost,
            status: job.status.to_string(),
            notes: job.notes.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::JobStatus;

    #[test]
    fn job_status_round_trips_through_text() {
        for status in [
            JobStatus::Open,
            JobStatus::AwaitingPayment,
            JobStatus::PartiallyPaid,
            JobStatus::Paid,
            JobStatus::Cancelled,
        ] {
            let text = status.to_string();
            assert_eq!(JobStatus::from(text.as_str()), status);
        }
    }
}
