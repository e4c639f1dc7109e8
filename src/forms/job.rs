use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::job::{JobStatus, NewJob, UpdateJob};
use crate::domain::transaction::{NewFinancialTransaction, TransactionType};
use crate::forms::FormError;
use crate::forms::appointment::sanitize_notes;

#[derive(Deserialize, Validate)]
/// Form data for opening a service order. An initial fee and first payment
/// can be recorded in the same submission.
pub struct AddJobForm {
    pub customer_id: i32,
    pub vehicle_id: Option<i32>,
    pub technician_id: Option<i32>,
    #[validate(length(min = 1))]
    pub job_description: String,
    pub job_date: NaiveDate,
    #[validate(range(min = 0.0))]
    pub total_cost: f64,
    pub notes: Option<String>,
    pub initial_service_fee: Option<f64>,
    pub initial_service_description: Option<String>,
    pub payment_received: Option<f64>,
    pub payment_description: Option<String>,
}

impl AddJobForm {
    pub fn to_new_job(&self) -> NewJob {
        NewJob {
            customer_id: self.customer_id,
            vehicle_id: self.vehicle_id,
            technician_id: self.technician_id,
            job_description: self.job_description.trim().to_string(),
            job_date: self.job_date,
            total_cost: self.total_cost,
            status: JobStatus::Open,
            notes: sanitize_notes(self.notes.as_deref()),
        }
    }

    /// Transactions to record alongside the job. Amounts must be positive;
    /// zero or negative entries are rejected.
    pub fn initial_transactions(&self) -> Result<Vec<NewFinancialTransaction>, FormError> {
        let mut transactions = Vec::new();

        if let Some(fee) = self.initial_service_fee {
            if fee <= 0.0 {
                return Err(FormError::InvalidAmount);
            }
            let mut transaction = NewFinancialTransaction::new(
                self.customer_id,
                TransactionType::ServiceFee,
                fee,
                self.job_date,
            );
            if let Some(description) = &self.initial_service_description {
                transaction = transaction.description(description.clone());
            }
            transactions.push(transaction);
        }

        if let Some(payment) = self.payment_received {
            if payment <= 0.0 {
                return Err(FormError::InvalidAmount);
            }
            let mut transaction = NewFinancialTransaction::new(
                self.customer_id,
                TransactionType::Payment,
                payment,
                self.job_date,
            );
            if let Some(description) = &self.payment_description {
                transaction = transaction.description(description.clone());
            }
            transactions.push(transaction);
        }

        Ok(transactions)
    }
}

#[derive(Deserialize, Validate)]
/// Form data for editing a service order.
pub struct SaveJobForm {
    pub id: i32,
    /// Owning customer, used for the post-save redirect.
    pub customer_id: i32,
    pub technician_id: Option<i32>,
    #[validate(length(min = 1))]
    pub job_description: String,
    pub job_date: NaiveDate,
    #[validate(range(min = 0.0))]
    pub total_cost: f64,
    pub status: String,
    pub notes: Option<String>,
}

impl From<&SaveJobForm> for UpdateJob {
    fn from(form: &SaveJobForm) -> Self {
        UpdateJob {
            technician_id: form.technician_id,
            job_description: form.job_description.trim().to_string(),
            job_date: form.job_date,
            total_cost: form.total_cost,
            status: form.status.as_str().into(),
            notes: sanitize_notes(form.notes.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> AddJobForm {
        AddJobForm {
            customer_id: 1,
            vehicle_id: None,
            technician_id: None,
            job_description: "Brake service".to_string(),
            job_date: NaiveDate::from_ymd_opt(2025, 8, 7).unwrap(),
            total_cost: 1500.0,
            notes: None,
            initial_service_fee: None,
            initial_service_description: None,
            payment_received: None,
            payment_description: None,
        }
    }

    #[test]
    fn no_initial_amounts_yields_no_transactions() {
        assert!(base_form().initial_transactions().unwrap().is_empty());
    }

    #[test]
    fn fee_and_payment_become_two_transactions() {
        let mut form = base_form();
        form.initial_service_fee = Some(1500.0);
        form.payment_received = Some(500.0);
        let transactions = form.initial_transactions().unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].transaction_type, TransactionType::ServiceFee);
        assert_eq!(transactions[1].transaction_type, TransactionType::Payment);
        assert_eq!(transactions[1].amount, 500.0);
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let mut form = base_form();
        form.payment_received = Some(0.0);
        assert!(form.initial_transactions().is_err());
    }
}
