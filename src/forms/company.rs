use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::domain::company::{NewCompanyProfile, WorkingDay, WorkingHours};
use crate::forms::FormError;

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

#[derive(Deserialize, Validate)]
/// Company profile form. The working-hours rows arrive as three parallel
/// `day`/`open`/`close` lists plus a `closed` list holding the checked days,
/// so the body is parsed with `serde_html_form` rather than `web::Form`.
pub struct SaveCompanyForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub city: String,
    pub postal_code: Option<String>,
    #[validate(length(min = 1))]
    pub country: String,
    pub tax_number: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[serde(default)]
    pub day: Vec<String>,
    #[serde(default)]
    pub open: Vec<String>,
    #[serde(default)]
    pub close: Vec<String>,
    #[serde(default)]
    pub closed: Vec<String>,
}

impl SaveCompanyForm {
    fn working_hours(&self) -> Result<Option<WorkingHours>, FormError> {
        if self.day.is_empty() {
            return Ok(None);
        }
        if self.day.len() != self.open.len() || self.day.len() != self.close.len() {
            return Err(FormError::InvalidWorkingHours);
        }

        let mut hours = WorkingHours::default();
        for (i, day) in self.day.iter().enumerate() {
            let name = day.to_lowercase();
            if !WEEKDAYS.contains(&name.as_str()) {
                return Err(FormError::InvalidWorkingHours);
            }
            let entry = WorkingDay {
                start: self.open[i].trim().to_string(),
                end: self.close[i].trim().to_string(),
                closed: self.closed.iter().any(|c| c.eq_ignore_ascii_case(&name)),
            };
            match name.as_str() {
                "monday" => hours.monday = Some(entry),
                "tuesday" => hours.tuesday = Some(entry),
                "wednesday" => hours.wednesday = Some(entry),
                "thursday" => hours.thursday = Some(entry),
                "friday" => hours.friday = Some(entry),
                "saturday" => hours.saturday = Some(entry),
                "sunday" => hours.sunday = Some(entry),
                _ => unreachable!(),
            }
        }

        Ok(Some(hours))
    }

    pub fn to_new_company_profile(&self) -> Result<NewCompanyProfile, FormError> {
        let mut profile = NewCompanyProfile::new(
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.address.clone(),
            self.city.clone(),
            self.country.clone(),
        );
        profile.description = self
            .description
            .clone()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        profile.postal_code = self
            .postal_code
            .clone()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        profile.tax_number = self
            .tax_number
            .clone()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        profile.website = self
            .website
            .clone()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        profile.working_hours = self.working_hours()?;

        Ok(profile)
    }
}

#[derive(MultipartForm)]
/// Logo image upload.
pub struct UploadLogoForm {
    #[multipart(limit = "5MB")]
    pub logo: TempFile,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> SaveCompanyForm {
        SaveCompanyForm {
            name: "Atlas Oto".to_string(),
            description: None,
            email: "info@atlasoto.example".to_string(),
            phone: "+902121234567".to_string(),
            address: "Sanayi Cd. 12".to_string(),
            city: "Istanbul".to_string(),
            postal_code: None,
            country: "TR".to_string(),
            tax_number: None,
            website: None,
            day: vec![],
            open: vec![],
            close: vec![],
            closed: vec![],
        }
    }

    #[test]
    fn parses_working_hour_rows() {
        let mut form = base_form();
        form.day = vec!["monday".to_string(), "sunday".to_string()];
        form.open = vec!["09:00".to_string(), "".to_string()];
        form.close = vec!["18:00".to_string(), "".to_string()];
        form.closed = vec!["sunday".to_string()];

        let profile = form.to_new_company_profile().unwrap();
        let hours = profile.working_hours.unwrap();
        let monday = hours.monday.unwrap();
        assert_eq!(monday.start, "09:00");
        assert!(!monday.closed);
        assert!(hours.sunday.unwrap().closed);
        assert!(hours.wednesday.is_none());
    }

    #[test]
    fn mismatched_rows_are_rejected() {
        let mut form = base_form();
        form.day = vec!["monday".to_string()];
        form.open = vec![];
        form.close = vec!["18:00".to_string()];
        assert!(form.to_new_company_profile().is_err());
    }

    #[test]
    fn form_parses_from_repeated_keys() {
        let body = "name=Atlas+Oto&email=info%40atlasoto.example&phone=%2B902121234567\
                    &address=Sanayi+Cd.+12&city=Istanbul&country=TR\
                    &day=monday&open=09%3A00&close=18%3A00&day=tuesday&open=09%3A00&close=18%3A00";
        let form: SaveCompanyForm = serde_html_form::from_str(body).unwrap();
        assert_eq!(form.day.len(), 2);
        assert_eq!(form.open.len(), 2);
        assert!(form.to_new_company_profile().is_ok());
    }
}
