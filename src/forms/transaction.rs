use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::transaction::{
    NewFinancialTransaction, TransactionType, UpdateFinancialTransaction,
};
use crate::domain::types::Amount;
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
/// Form data for recording a financial transaction.
pub struct AddTransactionForm {
    pub customer_id: i32,
    pub vehicle_id: Option<i32>,
    pub job_id: Option<i32>,
    pub transaction_type: String,
    pub amount: f64,
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
}

impl AddTransactionForm {
    pub fn to_new_transaction(&self) -> Result<NewFinancialTransaction, FormError> {
        let transaction_type = TransactionType::try_from(self.transaction_type.as_str())
            .map_err(|_| FormError::InvalidTransactionType)?;
        let amount = Amount::new(self.amount).map_err(|_| FormError::InvalidAmount)?;

        let mut transaction = NewFinancialTransaction::new(
            self.customer_id,
            transaction_type,
            amount.get(),
            self.transaction_date,
        );
        if let Some(vehicle_id) = self.vehicle_id {
            transaction = transaction.vehicle(vehicle_id);
        }
        if let Some(job_id) = self.job_id {
            transaction = transaction.job(job_id);
        }
        if let Some(description) = &self.description {
            transaction = transaction.description(description.clone());
        }

        Ok(transaction)
    }
}

#[derive(Deserialize, Validate)]
/// Form data for correcting a recorded transaction.
pub struct SaveTransactionForm {
    pub id: i32,
    /// Owning customer, used for the post-save redirect.
    pub customer_id: i32,
    pub transaction_type: String,
    pub amount: f64,
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
}

impl SaveTransactionForm {
    pub fn to_update_transaction(&self) -> Result<UpdateFinancialTransaction, FormError> {
        let transaction_type = TransactionType::try_from(self.transaction_type.as_str())
            .map_err(|_| FormError::InvalidTransactionType)?;
        let amount = Amount::new(self.amount).map_err(|_| FormError::InvalidAmount)?;

        Ok(UpdateFinancialTransaction {
            transaction_type,
            amount: amount.get(),
            description: self
                .description
                .clone()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            transaction_date: self.transaction_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_type_and_bad_amount() {
        let form = AddTransactionForm {
            customer_id: 1,
            vehicle_id: None,
            job_id: None,
            transaction_type: "GIFT".to_string(),
            amount: 100.0,
            description: None,
            transaction_date: NaiveDate::from_ymd_opt(2025, 8, 7).unwrap(),
        };
        assert!(form.to_new_transaction().is_err());

        let form = AddTransactionForm {
            transaction_type: "PAYMENT".to_string(),
            amount: -5.0,
            ..form
        };
        assert!(form.to_new_transaction().is_err());
    }
}
