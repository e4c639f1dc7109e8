//! Repository implementation for the single company profile row.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::company::{CompanyProfile, NewCompanyProfile};
use crate::models::company::{
    CompanyProfile as DbCompanyProfile, NewCompanyProfile as DbNewCompanyProfile,
};
use crate::repository::{
    CompanyReader, CompanyWriter, DieselRepository,
    errors::{RepositoryError, RepositoryResult},
};

impl CompanyReader for DieselRepository {
    fn get_company_profile(&self) -> RepositoryResult<Option<CompanyProfile>> {
        use crate::schema::company_profiles;

        let mut conn = self.conn()?;
        let profile = company_profiles::table
            .order(company_profiles::id.asc())
            .first::<DbCompanyProfile>(&mut conn)
            .optional()?;

        profile
            .map(|p| CompanyProfile::try_from(p).map_err(RepositoryError::from))
            .transpose()
    }
}

impl CompanyWriter for DieselRepository {
    fn upsert_company_profile(
        &self,
        profile: &NewCompanyProfile,
    ) -> RepositoryResult<CompanyProfile> {
        use crate::schema::company_profiles;

        let mut conn = self.conn()?;
        let row = DbNewCompanyProfile::try_from(profile)?;

        let existing_id: Option<i32> = company_profiles::table
            .order(company_profiles::id.asc())
            .select(company_profiles::id)
            .first(&mut conn)
            .optional()?;

        let saved = match existing_id {
            Some(id) => diesel::update(company_profiles::table.find(id))
                .set((
                    &row,
                    company_profiles::updated_at.eq(Utc::now().naive_utc()),
                ))
                .get_result::<DbCompanyProfile>(&mut conn)?,
            None => diesel::insert_into(company_profiles::table)
                .values(&row)
                .get_result::<DbCompanyProfile>(&mut conn)?,
        };

        CompanyProfile::try_from(saved).map_err(RepositoryError::from)
    }

    fn update_company_logo(&self, logo_url: Option<&str>) -> RepositoryResult<CompanyProfile> {
        use crate::schema::company_profiles;

        let mut conn = self.conn()?;
        let existing_id: Option<i32> = company_profiles::table
            .order(company_profiles::id.asc())
            .select(company_profiles::id)
            .first(&mut conn)
            .optional()?;

        let Some(id) = existing_id else {
            return Err(RepositoryError::NotFound);
        };

        let updated = diesel::update(company_profiles::table.find(id))
            .set((
                company_profiles::logo_url.eq(logo_url),
                company_profiles::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbCompanyProfile>(&mut conn)?;

        CompanyProfile::try_from(updated).map_err(RepositoryError::from)
    }
}
