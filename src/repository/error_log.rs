//! Repository implementation for the error log table.

use diesel::prelude::*;

use crate::domain::error_log::{ErrorLogEntry, NewErrorLogEntry};
use crate::models::error_log::{ErrorLog as DbErrorLog, NewErrorLog as DbNewErrorLog};
use crate::repository::{
    DieselRepository, ErrorLogReader, ErrorLogWriter,
    errors::{RepositoryError, RepositoryResult},
};

impl ErrorLogReader for DieselRepository {
    fn list_error_logs(&self, limit: i64) -> RepositoryResult<Vec<ErrorLogEntry>> {
        use crate::schema::error_logs;

        let mut conn = self.conn()?;
        let rows = error_logs::table
            .order(error_logs::id.desc())
            .limit(limit)
            .load::<DbErrorLog>(&mut conn)?;

        rows.into_iter()
            .map(|row| ErrorLogEntry::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl ErrorLogWriter for DieselRepository {
    fn create_error_log(&self, entry: &NewErrorLogEntry) -> RepositoryResult<()> {
        use crate::schema::error_logs;

        let mut conn = self.conn()?;
        let row: DbNewErrorLog = entry.into();
        diesel::insert_into(error_logs::table)
            .values(&row)
            .execute(&mut conn)?;

        Ok(())
    }
}
