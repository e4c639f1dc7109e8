//! CSV import of customer records.

use std::io::Read;

use crate::domain::customer::NewCustomer;
use crate::services::{ServiceError, ServiceResult};

/// Parses an uploaded CSV into customer payloads.
///
/// Expected headers: `full_name`, `phone` and optionally `email`, `address`.
/// Unknown columns are ignored; rows without a name or phone are rejected
/// with their line number so the uploader can fix the file.
pub fn parse_customers_csv<R: Read>(reader: R) -> ServiceResult<Vec<NewCustomer>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| ServiceError::Form(format!("CSV header error: {e}")))?
        .clone();

    let mut customers = Vec::new();

    for (index, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| ServiceError::Form(format!("CSV parse error: {e}")))?;
        let line = index + 2;

        let mut full_name = String::new();
        let mut email = None;
        let mut phone = String::new();
        let mut address = None;

        for (i, field) in record.iter().enumerate() {
            match headers.get(i) {
                Some("full_name") => full_name = field.to_string(),
                Some("email") => email = Some(field.to_string()),
                Some("phone") => phone = field.to_string(),
                Some("address") => address = Some(field.to_string()),
                _ => continue,
            }
        }

        if full_name.trim().is_empty() {
            return Err(ServiceError::Form(format!("line {line}: missing full_name")));
        }
        if phone.trim().is_empty() {
            return Err(ServiceError::Form(format!("line {line}: missing phone")));
        }

        customers.push(NewCustomer::new(full_name, email, phone, address));
    }

    Ok(customers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_rows() {
        let csv = "full_name,email,phone,address\n\
                   Ali Veli,ali@example.com,+905551112233,Ankara\n\
                   Ayşe Yıldız,,+905554445566,\n";
        let customers = parse_customers_csv(csv.as_bytes()).unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].full_name, "Ali Veli");
        assert_eq!(customers[1].email, None);
        assert_eq!(customers[1].address, None);
    }

    #[test]
    fn rejects_rows_missing_required_fields() {
        let csv = "full_name,phone\nAli Veli,\n";
        let err = parse_customers_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn ignores_unknown_columns() {
        let csv = "full_name,phone,loyalty_tier\nAli Veli,+905551112233,gold\n";
        let customers = parse_customers_csv(csv.as_bytes()).unwrap();
        assert_eq!(customers.len(), 1);
    }
}
