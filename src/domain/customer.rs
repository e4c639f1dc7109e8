use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{EmailAddress, PhoneNumber};

/// Valid emails are normalized, anything else is dropped.
fn normalize_email(email: Option<String>) -> Option<String> {
    email
        .and_then(|s| EmailAddress::new(s).ok())
        .map(EmailAddress::into_inner)
}

/// Parseable numbers are stored in E.164; legacy free-form values are kept
/// trimmed as typed.
fn normalize_phone(phone: String) -> String {
    match PhoneNumber::new(phone.as_str()) {
        Ok(normalized) => normalized.into_inner(),
        Err(_) => phone.trim().to_string(),
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Customer {
    pub id: i32,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCustomer {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
}

impl NewCustomer {
    #[must_use]
    pub fn new(
        full_name: String,
        email: Option<String>,
        phone: String,
        address: Option<String>,
    ) -> Self {
        Self {
            full_name: full_name.trim().to_string(),
            email: normalize_email(email),
            phone: normalize_phone(phone),
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateCustomer {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
}

impl UpdateCustomer {
    #[must_use]
    pub fn new(
        full_name: String,
        email: Option<String>,
        phone: String,
        address: Option<String>,
    ) -> Self {
        Self {
            full_name: full_name.trim().to_string(),
            email: normalize_email(email),
            phone: normalize_phone(phone),
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_customer_normalizes_contact_fields() {
        let customer = NewCustomer::new(
            " Ali Veli ".to_string(),
            Some("ALI@Example.COM".to_string()),
            "+90 555 111 22 33".to_string(),
            None,
        );
        assert_eq!(customer.full_name, "Ali Veli");
        assert_eq!(customer.email.as_deref(), Some("ali@example.com"));
        assert_eq!(customer.phone, "+905551112233");
    }

    #[test]
    fn invalid_email_is_dropped_and_odd_phone_kept() {
        let customer = NewCustomer::new(
            "Ali".to_string(),
            Some("not-an-email".to_string()),
            " dahili 42 ".to_string(),
            None,
        );
        assert_eq!(customer.email, None);
        assert_eq!(customer.phone, "dahili 42");
    }
}

/// Customer together with the unpaid remainder across their jobs.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CustomerBalance {
    pub customer: Customer,
    pub outstanding: f64,
}
