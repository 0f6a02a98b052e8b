//! JSON bodies for error and status responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned by every failing endpoint.
///
/// Carries either a single `errorMessage` or a list of per-field `errors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub date_time: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub field_name: String,
    pub invalid_value: serde_json::Value,
    pub constraint: String,
}

impl ErrorResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            date_time: Utc::now(),
            errors: None,
            error_message: Some(message.into()),
        }
    }

    pub fn fields(errors: Vec<ErrorDetail>) -> Self {
        Self {
            date_time: Utc::now(),
            errors: Some(errors),
            error_message: None,
        }
    }

    pub fn not_found(detail: impl std::fmt::Display) -> Self {
        Self::message(format!("An error occurred: {detail}"))
    }

    pub fn bad_request(detail: impl std::fmt::Display) -> Self {
        Self::message(format!("Invalid argument: {detail}"))
    }

    pub fn internal_error() -> Self {
        Self::message("An error occurred: internal server error")
    }
}

/// Plain confirmation body, e.g. after a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
