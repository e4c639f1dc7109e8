use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::{
    Customer as DomainCustomer, NewCustomer as DomainNewCustomer,
    UpdateCustomer as DomainUpdateCustomer,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customers)]
/// Diesel model for [`crate::domain::customer::Customer`].
pub struct Customer {
    pub id: i32,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
/// Insertable form of [`Customer`].
pub struct NewCustomer<'a> {
    pub full_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: &'a str,
    pub address: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
/// Data used when updating a [`Customer`] record.
pub struct UpdateCustomer<'a> {
    pub full_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: &'a str,
    pub address: Option<&'a str>,
}

impl From<Customer> for DomainCustomer {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            full_name: customer.full_name,
            email: customer.email,
            phone: customer.phone,
            address: customer.address,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewCustomer> for NewCustomer<'a> {
    fn from(customer: &'a DomainNewCustomer) -> Self {
        Self {
            full_name: customer.full_name.as_str(),
            email: customer.email.as_deref(),
            phone: customer.phone.as_str(),
            address: customer.address.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateCustomer> for UpdateCustomer<'a> {
    fn from(customer: &'a DomainUpdateCustomer) -> Self {
        Self {
            full_name: customer.full_name.as_str(),
            email: customer.email.as_deref(),
            phone: customer.phone.as_str(),
            address: customer.address.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn from_domain_new_creates_insertable() {
        let domain = DomainNewCustomer::new(
            " Ayşe Yıldız ".to_string(),
            Some("Ayse@Example.com".to_string()),
            "+905551112233".to_string(),
            Some("".to_string()),
        );
        let new: NewCustomer = (&domain).into();
        assert_eq!(new.full_name, "Ayşe Yıldız");
        assert_eq!(new.email, Some("ayse@example.com"));
        assert_eq!(new.address, None);
    }

    #[test]
    fn customer_into_domain() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let db_customer = Customer {
            id: 7,
            full_name: "n".to_string(),
            email: None,
            phone: "p".to_string(),
            address: Some("a".to_string()),
            created_at: now,
            updated_at: now,
        };
        let domain: DomainCustomer = db_customer.into();
        assert_eq!(domain.id, 7);
        assert_eq!(domain.email, None);
        assert_eq!(domain.address, Some("a".to_string()));
    }
}
