use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::error_log::{ErrorLogEntry as DomainErrorLogEntry, NewErrorLogEntry};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::error_logs)]
/// Diesel model for [`crate::domain::error_log::ErrorLogEntry`].
pub struct ErrorLog {
    pub id: i32,
    pub error_type: String,
    pub message: String,
    pub stack_trace: Option<String>,
    pub metadata: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::error_logs)]
/// Insertable form of [`ErrorLog`]. Metadata is serialized at conversion time.
pub struct NewErrorLog<'a> {
    pub error_type: &'a str,
    pub message: &'a str,
    pub stack_trace: Option<&'a str>,
    pub metadata: Option<String>,
}

impl TryFrom<ErrorLog> for DomainErrorLogEntry {
    type Error = TypeConstraintError;

    fn try_from(log: ErrorLog) -> Result<Self, Self::Error> {
        let metadata = log
            .metadata
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| TypeConstraintError::InvalidValue(format!("metadata: {e}")))?;

        Ok(Self {
            id: log.id,
            error_type: log.error_type,
            message: log.message,
            stack_trace: log.stack_trace,
            metadata,
            created_at: log.created_at,
        })
    }
}

impl<'a> From<&'a NewErrorLogEntry> for NewErrorLog<'a> {
    fn from(entry: &'a NewErrorLogEntry) -> Self {
        Self {
            error_type: entry.error_type.as_str(),
            message: entry.message.as_str(),
            stack_trace: entry.stack_trace.as_deref(),
            metadata: entry.metadata.as_ref().map(|m| m.to_string()),
        }
    }
}
