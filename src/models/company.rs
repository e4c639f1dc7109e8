use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::company::{
    CompanyProfile as DomainCompanyProfile, NewCompanyProfile as DomainNewCompanyProfile,
    WorkingHours,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::company_profiles)]
/// Diesel model for [`crate::domain::company::CompanyProfile`]. Working hours
/// are persisted as a JSON text column.
pub struct CompanyProfile {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: Option<String>,
    pub country: String,
    pub tax_number: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub working_hours: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::company_profiles)]
#[diesel(treat_none_as_null = true)]
/// Insertable/changeset form of [`CompanyProfile`]. The serialized working
/// hours are owned because they are produced at conversion time.
pub struct NewCompanyProfile<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub email: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub city: &'a str,
    pub postal_code: Option<&'a str>,
    pub country: &'a str,
    pub tax_number: Option<&'a str>,
    pub website: Option<&'a str>,
    pub working_hours: Option<String>,
}

impl TryFrom<CompanyProfile> for DomainCompanyProfile {
    type Error = TypeConstraintError;

    fn try_from(profile: CompanyProfile) -> Result<Self, Self::Error> {
        let working_hours = profile
            .working_hours
            .as_deref()
            .map(serde_json::from_str::<WorkingHours>)
            .transpose()
            .map_err(|e| TypeConstraintError::InvalidValue(format!("working hours: {e}")))?;

        Ok(Self {
            id: profile.id,
            name: profile.name,
            description: profile.description,
            email: profile.email,
            phone: profile.phone,
            address: profile.address,
            city: profile.city,
            postal_code: profile.postal_code,
            country: profile.country,
            tax_number: profile.tax_number,
            website: profile.website,
            logo_url: profile.logo_url,
            working_hours,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        })
    }
}

impl<'a> TryFrom<&'a DomainNewCompanyProfile> for NewCompanyProfile<'a> {
    type Error = TypeConstraintError;

    fn try_from(profile: &'a DomainNewCompanyProfile) -> Result<Self, Self::Error> {
        let working_hours = profile
            .working_hours
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| TypeConstraintError::InvalidValue(format!("working hours: {e}")))?;

        Ok(Self {
            name: profile.name.as_str(),
            description: profile.description.as_deref(),
            email: profile.email.as_str(),
            phone: profile.phone.as_str(),
            address: profile.address.as_str(),
            city: profile.city.as_str(),
            postal_code: profile.postal_code.as_deref(),
            country: profile.country.as_str(),
            tax_number: profile.tax_number.as_deref(),
            website: profile.website.as_deref(),
            working_hours,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::company::WorkingDay;
    use chrono::Utc;

    #[test]
    fn working_hours_round_trip_through_json() {
        let mut domain = DomainNewCompanyProfile::new(
            "Atlas Oto".to_string(),
            "info@atlasoto.example".to_string(),
            "+902121234567".to_string(),
            "Sanayi Cd. 12".to_string(),
            "Istanbul".to_string(),
            "TR".to_string(),
        );
        domain.working_hours = Some(WorkingHours {
            monday: Some(WorkingDay {
                start: "09:00".to_string(),
                end: "18:00".to_string(),
                closed: false,
            }),
            sunday: Some(WorkingDay {
                start: String::new(),
                end: String::new(),
                closed: true,
            }),
            ..WorkingHours::default()
        });

        let row = NewCompanyProfile::try_from(&domain).unwrap();
        let json = row.working_hours.clone().unwrap();

        let now = Utc::now().naive_utc();
        let stored = CompanyProfile {
            id: 1,
            name: domain.name.clone(),
            description: None,
            email: domain.email.clone(),
            phone: domain.phone.clone(),
            address: domain.address.clone(),
            city: domain.city.clone(),
            postal_code: None,
            country: domain.country.clone(),
            tax_number: None,
            website: None,
            logo_url: None,
            working_hours: Some(json),
            created_at: now,
            updated_at: now,
        };
        let parsed = DomainCompanyProfile::try_from(stored).unwrap();
        assert_eq!(parsed.working_hours, domain.working_hours);
    }

    #[test]
    fn malformed_working_hours_fail_conversion() {
        let now = Utc::now().naive_utc();
        let stored = CompanyProfile {
            id: 1,
            name: "n".to_string(),
            description: None,
            email: "e@example.com".to_string(),
            phone: "p".to_string(),
            address: "a".to_string(),
            city: "c".to_string(),
            postal_code: None,
            country: "TR".to_string(),
            tax_number: None,
            website: None,
            logo_url: None,
            working_hours: Some("{not json".to_string()),
            created_at: now,
            updated_at: now,
        };
        assert!(DomainCompanyProfile::try_from(stored).is_err());
    }
}
