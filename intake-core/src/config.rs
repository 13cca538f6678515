//! Configuration of the submission handler.
//!
//! Every option has a default, so an empty `[form]` section yields a working
//! handler that writes to the `Consultations` sheet in Asia/Seoul time and
//! mails the placeholder recipient.

use serde::{Deserialize, Serialize};
use time::{UtcOffset, macros::offset};

/// Recipient address shipped in the default configuration. The setup
/// self-test refuses to send mail while it is still in place.
pub const PLACEHOLDER_RECIPIENT: &str = "your-email@example.com";

/// Options recognized by the submission handler.
///
/// # Examples
///
/// ```
/// use intake_core::config::FormConfig;
///
/// let config = FormConfig {
///     recipient_email: "desk@example.kr".into(),
///     notifications_enabled: false,
///     ..Default::default()
/// };
/// assert_eq!(config.store_name, "Consultations");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormConfig {
    /// Address that receives the notification email
    #[serde(default = "default_recipient_email")]
    pub recipient_email: String,

    /// Name of the sheet that submissions are appended to
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// Whether an email is sent for every submission
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,

    /// Subject line of the notification email. Rendered as a template with
    /// the record fields (`name`, `grade`, `phone`, ...) in scope.
    #[serde(default = "default_subject_template")]
    pub subject_template: String,

    /// Offset used for every rendered timestamp, written like `+09:00`
    #[serde(default = "default_utc_offset", with = "offset_text")]
    pub utc_offset: UtcOffset,

    /// Name reported by the health check
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_recipient_email() -> String {
    PLACEHOLDER_RECIPIENT.to_owned()
}

fn default_store_name() -> String {
    "Consultations".to_owned()
}

fn default_true() -> bool {
    true
}

fn default_subject_template() -> String {
    "[화명 현대 공부방] 새로운 상담 신청".to_owned()
}

fn default_utc_offset() -> UtcOffset {
    // Asia/Seoul has not observed daylight saving since 1988
    offset!(+9)
}

fn default_service_name() -> String {
    "화명 현대 공부방".to_owned()
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            recipient_email: default_recipient_email(),
            store_name: default_store_name(),
            notifications_enabled: default_true(),
            subject_template: default_subject_template(),
            utc_offset: default_utc_offset(),
            service_name: default_service_name(),
        }
    }
}

mod offset_text {
    use serde::{Deserialize as _, Deserializer, Serializer, de::Error as _};
    use time::{UtcOffset, macros::format_description};

    pub fn serialize<S: Serializer>(value: &UtcOffset, serializer: S) -> Result<S::Ok, S::Error> {
        let (hours, minutes, _) = value.as_hms();
        let sign = if value.is_negative() { '-' } else { '+' };
        serializer.serialize_str(&format!(
            "{sign}{:02}:{:02}",
            hours.unsigned_abs(),
            minutes.unsigned_abs()
        ))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<UtcOffset, D::Error> {
        let text = String::deserialize(deserializer)?;
        match text.trim() {
            "Z" | "UTC" => Ok(UtcOffset::UTC),
            text => UtcOffset::parse(
                text,
                format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
            )
            .map_err(|err| D::Error::custom(format!("invalid utc offset `{text}`: {err}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::offset;

    #[test]
    fn empty_section_uses_defaults() {
        let config: FormConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(config, FormConfig::default());
        assert_eq!(config.utc_offset, offset!(+9));
        assert!(config.notifications_enabled);
    }

    #[test]
    fn offset_round_trips_as_text() {
        let config = FormConfig {
            utc_offset: offset!(-3:30),
            ..Default::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["utc_offset"], json!("-03:30"));
        assert_eq!(serde_json::from_value::<FormConfig>(value).unwrap(), config);
    }

    #[test]
    fn rejects_garbage_offset() {
        let result = serde_json::from_value::<FormConfig>(json!({ "utc_offset": "Seoul" }));
        assert!(result.is_err());
    }
}
