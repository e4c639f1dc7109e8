//! Form definitions backing the HTTP routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod appointment;
pub mod company;
pub mod customer;
pub mod job;
pub mod technician;
pub mod transaction;
pub mod vehicle;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid date or time")]
    InvalidDate,

    #[error("invalid amount")]
    InvalidAmount,

    #[error("invalid transaction type")]
    InvalidTransactionType,

    #[error("invalid working hours")]
    InvalidWorkingHours,
}
