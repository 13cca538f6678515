use super::{SubmissionPayload, format_minutes, format_seconds, parse_datetime};
use time::{OffsetDateTime, UtcOffset};

/// Stands in for any field the caller left out.
pub const PLACEHOLDER: &str = "-";

/// The caller's preferred consultation time after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferredTime {
    /// No `datetime` was submitted
    Unspecified,
    /// The submitted text parsed; held in the service's offset
    At(OffsetDateTime),
    /// The submitted text did not parse and is kept as-is
    Verbatim(String),
}

impl PreferredTime {
    /// Normalize the submitted text. Parse failures fall back to the raw text.
    pub fn resolve(raw: Option<String>, offset: UtcOffset) -> Self {
        match raw {
            None => Self::Unspecified,
            Some(raw) => match parse_datetime(&raw, offset) {
                Ok(at) => Self::At(at),
                Err(_) => Self::Verbatim(raw),
            },
        }
    }

    /// The text stored in the sheet cell.
    pub fn cell(&self) -> String {
        match self {
            Self::Unspecified => PLACEHOLDER.to_owned(),
            Self::At(at) => format_minutes(*at, at.offset()),
            Self::Verbatim(raw) => raw.clone(),
        }
    }
}

/// One consultation request, ready to be appended to the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    /// Server time of receipt, in the service's offset
    pub received_at: OffsetDateTime,
    /// Name, or the placeholder
    pub name: String,
    /// Grade, or the placeholder
    pub grade: String,
    /// Phone number, or the placeholder
    pub phone: String,
    /// Preferred consultation time
    pub preferred_time: PreferredTime,
    /// Inquiry, or the placeholder
    pub message: String,
}

impl SubmissionRecord {
    /// Build a record from a decoded payload, substituting the placeholder
    /// for every absent field.
    pub fn from_payload(
        payload: SubmissionPayload,
        received_at: OffsetDateTime,
        offset: UtcOffset,
    ) -> Self {
        let or_placeholder = |value: Option<String>| value.unwrap_or_else(|| PLACEHOLDER.to_owned());
        Self {
            received_at: received_at.checked_to_offset(offset).unwrap_or(received_at),
            name: or_placeholder(payload.name),
            grade: or_placeholder(payload.grade),
            phone: or_placeholder(payload.phone),
            preferred_time: PreferredTime::resolve(payload.datetime, offset),
            message: or_placeholder(payload.message),
        }
    }

    /// The six cells of the sheet row, in header order.
    pub fn to_row(&self) -> [String; 6] {
        [
            format_seconds(self.received_at, self.received_at.offset()),
            self.name.clone(),
            self.grade.clone(),
            self.phone.clone(),
            self.preferred_time.cell(),
            self.message.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, offset};

    const SEOUL: UtcOffset = offset!(+9);

    #[test]
    fn full_payload_becomes_row() {
        let payload = SubmissionPayload {
            name: Some("테스트".into()),
            grade: Some("초등 저학년".into()),
            phone: Some("010-1234-5678".into()),
            datetime: Some("2024-05-01T10:00:00Z".into()),
            message: Some("문의".into()),
        };
        let record =
            SubmissionRecord::from_payload(payload, datetime!(2024-04-30 23:59:59 UTC), SEOUL);

        assert_eq!(
            record.to_row(),
            [
                "2024-05-01 08:59:59",
                "테스트",
                "초등 저학년",
                "010-1234-5678",
                "2024-05-01 19:00",
                "문의",
            ]
        );
    }

    #[test]
    fn empty_payload_is_all_placeholders() {
        let record = SubmissionRecord::from_payload(
            SubmissionPayload::default(),
            datetime!(2024-05-01 00:00 UTC),
            SEOUL,
        );
        assert_eq!(record.preferred_time, PreferredTime::Unspecified);
        assert_eq!(&record.to_row()[1..], ["-", "-", "-", "-", "-"]);
    }

    #[test]
    fn unparseable_datetime_is_kept_verbatim() {
        let preferred = PreferredTime::resolve(Some("평일 오후".into()), SEOUL);
        assert_eq!(preferred, PreferredTime::Verbatim("평일 오후".into()));
        assert_eq!(preferred.cell(), "평일 오후");
    }
}
