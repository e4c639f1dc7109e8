use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::transaction::{
    FinancialTransaction as DomainTransaction, NewFinancialTransaction as DomainNewTransaction,
    TransactionType, UpdateFinancialTransaction as DomainUpdateTransaction,
};
use crate::domain::types::TypeConstraintError;
use crate::models::customer::Customer;
use crate::models::job::Job;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::financial_transactions)]
#[diesel(belongs_to(Customer, foreign_key = customer_id))]
#[diesel(belongs_to(Job, foreign_key = job_id))]
/// Diesel model for [`crate::domain::transaction::FinancialTransaction`].
pub struct FinancialTransaction {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: Option<i32>,
    pub appointment_id: Option<i32>,
    pub job_id: Option<i32>,
    pub transaction_type: String,
    pub amount: f64,
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::financial_transactions)]
/// Insertable form of [`FinancialTransaction`].
pub struct NewFinancialTransaction<'a> {
    pub customer_id: i32,
    pub vehicle_id: Option<i32>,
    pub appointment_id: Option<i32>,
    pub job_id: Option<i32>,
    pub transaction_type: String,
    pub amount: f64,
    pub description: Option<&'a str>,
    pub transaction_date: NaiveDate,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::financial_transactions)]
/// Data used when updating a [`FinancialTransaction`] record.
pub struct UpdateFinancialTransaction<'a> {
    pub transaction_type: String,
    pub amount: f64,
    pub description: Option<&'a str>,
    pub transaction_date: NaiveDate,
}

impl<'a> From<&'a DomainUpdateTransaction> for UpdateFinancialTransaction<'a> {
    fn from(transaction: &'a DomainUpdateTransaction) -> Self {
        Self {
            transaction_type: transaction.transaction_type.to_string(),
            amount: transaction.amount,
            description: transaction.description.as_deref(),
            transaction_date: transaction.transaction_date,
        }
    }
}

impl TryFrom<FinancialTransaction> for DomainTransaction {
    type Error = TypeConstraintError;

    fn try_from(transaction: FinancialTransaction) -> Result<Self, Self::Error> {
        let transaction_type = TransactionType::try_from(transaction.transaction_type.as_str())
            .map_err(TypeConstraintError::InvalidValue)?;

        Ok(Self {
            id: transaction.id,
            customer_id: transaction.customer_id,
            vehicle_id: transaction.vehicle_id,
            appointment_id: transaction.appointment_id,
            job_id: transaction.job_id,
            transaction_type,
            amount: transaction.amount,
            description: transaction.description,
            transaction_date: transaction.transaction_date,
            created_at: transaction.created_at,
            updated_at: transaction.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewTransaction> for NewFinancialTransaction<'a> {
    fn from(transaction: &'a DomainNewTransaction) -> Self {
        Self {
            customer_id: transaction.customer_id,
            vehicle_id: transaction.vehicle_id,
            appointment_id: transaction.appointment_id,
            job_id: transaction.job_id,
            transaction_type: transaction.transaction_type.to_string(),
            amount: transaction.amount,
            description: transaction.description.as_deref(),
            transaction_date: transaction.transaction_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn transaction_type_wire_strings() {
        assert_eq!(TransactionType::Payment.to_string(), "PAYMENT");
        assert_eq!(TransactionType::ServiceFee.to_string(), "SERVICE_FEE");
        assert_eq!(
            TransactionType::try_from("REFUND").unwrap(),
            TransactionType::Refund
        );
        assert!(TransactionType::try_from("payment").is_err());
    }

    #[test]
    fn unknown_type_fails_domain_conversion() {
        let now = Utc::now().naive_utc();
        let row = FinancialTransaction {
            id: 1,
            customer_id: 1,
            vehicle_id: None,
            appointment_id: None,
            job_id: None,
            transaction_type: "GIFT".to_string(),
            amount: 10.0,
            description: None,
            transaction_date: now.date(),
            created_at: now,
            updated_at: now,
        };
        assert!(DomainTransaction::try_from(row).is_err());
    }
}
