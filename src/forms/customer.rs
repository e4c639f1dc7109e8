use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::domain::customer::{NewCustomer, UpdateCustomer};

#[derive(Deserialize, Validate)]
/// Form data for adding a customer.
pub struct AddCustomerForm {
    #[validate(length(min = 1))]
    pub full_name: String,
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub phone: String,
    pub address: Option<String>,
}

impl From<AddCustomerForm> for NewCustomer {
    fn from(form: AddCustomerForm) -> Self {
        NewCustomer::new(form.full_name, form.email, form.phone, form.address)
    }
}

#[derive(Deserialize, Validate)]
/// Form data for updating an existing customer.
pub struct SaveCustomerForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub full_name: String,
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub phone: String,
    pub address: Option<String>,
}

impl From<&SaveCustomerForm> for UpdateCustomer {
    fn from(form: &SaveCustomerForm) -> Self {
        UpdateCustomer::new(
            form.full_name.clone(),
            form.email.clone(),
            form.phone.clone(),
            form.address.clone(),
        )
    }
}

#[derive(MultipartForm)]
/// CSV upload with one customer per row.
pub struct UploadCustomersForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}
