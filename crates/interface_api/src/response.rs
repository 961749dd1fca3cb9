//! Uniform response envelope
//!
//! Every response body, success or failure, is an [`HttpResult`]:
//!
//! ```json
//! { "flag": true, "message": "...", "dateTime": "...", "data": ... }
//! ```
//!
//! `flag` mirrors success, `dateTime` is the server-side timestamp of the
//! response, and `data` carries the payload (or the failure details).

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Response envelope shared by all endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResult {
    pub flag: bool,
    pub message: String,
    pub date_time: DateTime<Utc>,
    pub data: Value,
}

impl HttpResult {
    /// Builds a success envelope
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            flag: true,
            message: message.into(),
            date_time: Utc::now(),
            data,
        }
    }

    /// Builds a failure envelope
    pub fn failure(message: impl Into<String>, data: Value) -> Self {
        Self {
            flag: false,
            message: message.into(),
            date_time: Utc::now(),
            data,
        }
    }
}
