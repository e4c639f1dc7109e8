use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Row recorded by the best-effort error logger.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorLogEntry {
    pub id: i32,
    pub error_type: String,
    pub message: String,
    pub stack_trace: Option<String>,
    pub metadata: Option<Value>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewErrorLogEntry {
    pub error_type: String,
    pub message: String,
    pub stack_trace: Option<String>,
    pub metadata: Option<Value>,
}

impl NewErrorLogEntry {
    #[must_use]
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
            stack_trace: None,
            metadata: None,
        }
    }

    pub fn metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
