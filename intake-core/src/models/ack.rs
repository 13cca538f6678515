use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Message carried by every successful acknowledgement.
const SAVED: &str = "Data saved successfully";

/// The acknowledgement returned for a submission.
///
/// Success carries `message` and `row`; failure carries `error`, plus `row`
/// when the record was already appended before a later step failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Ack {
    /// Whether every step of the submission succeeded
    pub success: bool,

    /// Human-readable confirmation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// 1-based index of the appended row (the header is row 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<u64>,

    /// Description of the failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Ack {
    /// The record was appended at `row` and every notification went out.
    pub fn saved(row: u64) -> Self {
        Self {
            success: true,
            message: Some(SAVED.to_owned()),
            row: Some(row),
            error: None,
        }
    }

    /// Some step failed.
    pub fn failed(error: impl Into<String>, row: Option<u64>) -> Self {
        Self {
            success: false,
            message: None,
            row,
            error: Some(error.into()),
        }
    }
}

/// Liveness answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct HealthStatus {
    /// Always `OK`
    pub status: String,
    /// Names the running service
    pub message: String,
    /// Current server time, RFC 3339 in UTC
    #[serde(with = "time::serde::rfc3339")]
    #[cfg_attr(feature = "schemars", schemars(schema_with = "time_schema"))]
    pub timestamp: OffsetDateTime,
}

#[cfg(feature = "schemars")]
fn time_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": "string",
        "format": "date-time",
    })
}
