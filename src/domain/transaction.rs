use std::fmt::Display;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Ledger direction of a financial transaction. The wire strings match the
/// column values recorded by earlier deployments.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    ServiceFee,
    Payment,
    Refund,
    OtherDebit,
    OtherCredit,
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::ServiceFee => write!(f, "SERVICE_FEE"),
            TransactionType::Payment => write!(f, "PAYMENT"),
            TransactionType::Refund => write!(f, "REFUND"),
            TransactionType::OtherDebit => write!(f, "OTHER_DEBIT"),
            TransactionType::OtherCredit => write!(f, "OTHER_CREDIT"),
        }
    }
}

impl TryFrom<&str> for TransactionType {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "SERVICE_FEE" => Ok(TransactionType::ServiceFee),
            "PAYMENT" => Ok(TransactionType::Payment),
            "REFUND" => Ok(TransactionType::Refund),
            "OTHER_DEBIT" => Ok(TransactionType::OtherDebit),
            "OTHER_CREDIT" => Ok(TransactionType::OtherCredit),
            other => Err(format!("unknown transaction type: {other}")),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FinancialTransaction {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: Option<i32>,
    pub appointment_id: Option<i32>,
    pub job_id: Option<i32>,
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewFinancialTransaction {
    pub customer_id: i32,
    pub vehicle_id: Option<i32>,
    pub appointment_id: Option<i32>,
    pub job_id: Option<i32>,
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
}

/// Editable portion of a transaction; customer and job links are fixed.
#[derive(Clone, Debug, Deserialize)]
pub struct UpdateFinancialTransaction {
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
}

impl NewFinancialTransaction {
    #[must_use]
    pub fn new(
        customer_id: i32,
        transaction_type: TransactionType,
        amount: f64,
        transaction_date: NaiveDate,
    ) -> Self {
        Self {
            customer_id,
            vehicle_id: None,
            appointment_id: None,
            job_id: None,
            transaction_type,
            amount,
            description: None,
            transaction_date,
        }
    }

    pub fn job(mut self, job_id: i32) -> Self {
        self.job_id = Some(job_id);
        self
    }

    pub fn vehicle(mut self, vehicle_id: i32) -> Self {
        self.vehicle_id = Some(vehicle_id);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        let description = description.into().trim().to_string();
        self.description = (!description.is_empty()).then_some(description);
        self
    }
}
