use serde_json::Value;

/// The decoded body of a form submission.
///
/// Every field is optional. Values are read leniently: a field that is
/// missing, `null`, `false`, `0`, or an empty string counts as absent, and any
/// other non-string value is kept as its JSON text. A body that decodes to
/// something other than an object simply carries no fields, except `null`,
/// which is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct SubmissionPayload {
    /// Name of the person asking for a consultation
    pub name: Option<String>,
    /// School grade of the student
    pub grade: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Preferred consultation date-time, as typed by the caller
    pub datetime: Option<String>,
    /// Free-form inquiry
    pub message: Option<String>,
}

impl SubmissionPayload {
    /// Decode a raw request body.
    ///
    /// A body that is not valid JSON, or is the JSON `null`, is rejected.
    pub fn decode(raw: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<Value>(raw)? {
            Value::Null => Err(serde::de::Error::custom("submission body is null")),
            value => Ok(Self::from_value(&value)),
        }
    }

    /// Extract the known fields from an already-decoded JSON value.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(present);
        Self {
            name: field("name"),
            grade: field("grade"),
            phone: field("phone"),
            datetime: field("datetime"),
            message: field("message"),
        }
    }
}

fn present(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_all_fields() {
        let payload = SubmissionPayload::decode(
            json!({
                "name": "테스트",
                "grade": "초등 저학년",
                "phone": "010-1234-5678",
                "datetime": "2024-05-01T10:00:00Z",
                "message": "문의",
                "ignored": true,
            })
            .to_string()
            .as_bytes(),
        )
        .unwrap();

        assert_eq!(payload.name.as_deref(), Some("테스트"));
        assert_eq!(payload.grade.as_deref(), Some("초등 저학년"));
        assert_eq!(payload.phone.as_deref(), Some("010-1234-5678"));
        assert_eq!(payload.datetime.as_deref(), Some("2024-05-01T10:00:00Z"));
        assert_eq!(payload.message.as_deref(), Some("문의"));
    }

    #[test]
    fn falsy_values_count_as_absent() {
        let payload = SubmissionPayload::from_value(&json!({
            "name": "",
            "grade": null,
            "phone": 0,
            "message": false,
        }));
        assert_eq!(payload, SubmissionPayload::default());
    }

    #[test]
    fn mismatched_types_are_kept_as_text() {
        let payload = SubmissionPayload::from_value(&json!({
            "phone": 1012345678,
            "grade": 3,
            "message": true,
        }));
        assert_eq!(payload.phone.as_deref(), Some("1012345678"));
        assert_eq!(payload.grade.as_deref(), Some("3"));
        assert_eq!(payload.message.as_deref(), Some("true"));
    }

    #[test]
    fn non_objects_carry_no_fields() {
        assert_eq!(
            SubmissionPayload::decode(b"[1, 2, 3]").unwrap(),
            SubmissionPayload::default()
        );
        assert_eq!(
            SubmissionPayload::decode(b"\"hello\"").unwrap(),
            SubmissionPayload::default()
        );
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(SubmissionPayload::decode(b"name=test&phone=010").is_err());
        assert!(SubmissionPayload::decode(b"").is_err());
        assert!(SubmissionPayload::decode(b"null").is_err());
    }
}
