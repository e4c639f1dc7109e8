//! Best-effort error logging into the database.
//!
//! Recording a failure must never mask it: every path here swallows its own
//! errors after emitting them to the process log.

use serde_json::Value;

use crate::domain::error_log::NewErrorLogEntry;
use crate::repository::ErrorLogWriter;

/// Records an application error. Failures end up in the process log only.
pub fn log_error<R>(repo: &R, error_type: &str, message: &str, metadata: Option<Value>)
where
    R: ErrorLogWriter + ?Sized,
{
    let mut entry = NewErrorLogEntry::new(error_type, message);
    if let Some(metadata) = metadata {
        entry = entry.metadata(metadata);
    }

    if let Err(e) = repo.create_error_log(&entry) {
        log::error!("Failed to record error log: {e}");
    }
}

/// Records a failed service call with its endpoint context.
pub fn log_service_error<R>(repo: &R, endpoint: &str, error: &dyn std::fmt::Display)
where
    R: ErrorLogWriter + ?Sized,
{
    log_error(
        repo,
        "ServiceError",
        &error.to_string(),
        Some(serde_json::json!({ "endpoint": endpoint })),
    );
}
