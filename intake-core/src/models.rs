mod ack;
mod datetime;
mod payload;
mod record;
mod sheet;

pub use ack::{Ack, HealthStatus};
pub use datetime::{
    ParseError, format_korean_minutes, format_minutes, format_seconds, parse_datetime,
};
pub use payload::SubmissionPayload;
pub use record::{PLACEHOLDER, PreferredTime, SubmissionRecord};
pub use sheet::{HEADER, HEADER_BACKGROUND, Row, RowStyle, StoredRow};
