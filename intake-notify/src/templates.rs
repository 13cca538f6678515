//! Rendering of notification bodies.
//!
//! The templates live next to the crate under `templates/` and are compiled
//! into the binary. Templates whose name ends in `.html` are auto-escaped.

use crate::NotifyError;
use intake_core::models::{PreferredTime, SubmissionRecord, format_korean_minutes};
use minijinja::Environment;
use serde::Serialize;
use std::sync::Arc;

const HTML: &str = "notification.html";
const TEXT: &str = "notification.txt";
const SMS: &str = "sms.txt";

/// Shown in the email when no preferred time was given.
const UNSPECIFIED: &str = "미지정";

/// A fully rendered notification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    /// Subject line
    pub subject: String,
    /// `text/plain` body
    pub plain: String,
    /// `text/html` body
    pub html: String,
}

#[derive(Serialize)]
struct Fields<'a> {
    brand: &'a str,
    timestamp: String,
    name: &'a str,
    grade: &'a str,
    phone: &'a str,
    preferred_time: String,
    message: &'a str,
}

impl<'a> Fields<'a> {
    fn new(brand: &'a str, record: &'a SubmissionRecord) -> Self {
        let offset = record.received_at.offset();
        let preferred_time = match &record.preferred_time {
            PreferredTime::Unspecified => UNSPECIFIED.to_owned(),
            PreferredTime::At(at) => format_korean_minutes(*at, offset),
            PreferredTime::Verbatim(raw) => raw.clone(),
        };
        Self {
            brand,
            timestamp: format_korean_minutes(record.received_at, offset),
            name: &record.name,
            grade: &record.grade,
            phone: &record.phone,
            preferred_time,
            message: &record.message,
        }
    }
}

/// The compiled notification templates. Clones share one environment.
#[derive(Clone)]
pub struct Templates {
    env: Arc<Environment<'static>>,
}

impl Templates {
    /// Compile the bundled templates.
    pub fn new() -> Result<Self, NotifyError> {
        let mut env = Environment::new();
        env.add_template(HTML, include_str!("../templates/notification.html.j2"))?;
        env.add_template(TEXT, include_str!("../templates/notification.txt.j2"))?;
        env.add_template(SMS, include_str!("../templates/sms.txt.j2"))?;
        Ok(Self { env: Arc::new(env) })
    }

    /// Render the subject and both bodies of the notification email.
    pub fn email(
        &self,
        brand: &str,
        subject_template: &str,
        record: &SubmissionRecord,
    ) -> Result<RenderedEmail, NotifyError> {
        let fields = Fields::new(brand, record);
        Ok(RenderedEmail {
            subject: self.env.render_str(subject_template, &fields)?,
            plain: self.env.get_template(TEXT)?.render(&fields)?,
            html: self.env.get_template(HTML)?.render(&fields)?,
        })
    }

    /// Render the short message text.
    pub fn sms(&self, brand: &str, record: &SubmissionRecord) -> Result<String, NotifyError> {
        Ok(self
            .env
            .get_template(SMS)?
            .render(Fields::new(brand, record))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::models::SubmissionPayload;
    use time::macros::{datetime, offset};

    fn record(payload: SubmissionPayload) -> SubmissionRecord {
        SubmissionRecord::from_payload(payload, datetime!(2024-05-01 01:30 UTC), offset!(+9))
    }

    #[test]
    fn renders_korean_timestamps() {
        let record = record(SubmissionPayload {
            name: Some("테스트".into()),
            datetime: Some("2024-05-01T10:00:00Z".into()),
            ..Default::default()
        });
        let email = Templates::new()
            .unwrap()
            .email("brand", "새 신청", &record)
            .unwrap();

        assert_eq!(email.subject, "새 신청");
        assert!(email.plain.contains("접수 시간: 2024년 05월 01일 10:30"));
        assert!(email.plain.contains("희망 시간: 2024년 05월 01일 19:00"));
        assert!(email.plain.contains("이름: 테스트"));
        assert!(email.plain.contains("학년: -"));
        assert!(email.html.contains("2024년 05월 01일 19:00"));
        assert!(email.html.contains(">brand<"));
    }

    #[test]
    fn missing_preferred_time_is_unspecified() {
        let email = Templates::new()
            .unwrap()
            .email("brand", "s", &record(SubmissionPayload::default()))
            .unwrap();
        assert!(email.plain.contains("희망 시간: 미지정"));
    }

    #[test]
    fn html_body_is_escaped() {
        let record = record(SubmissionPayload {
            message: Some("<script>alert(1)</script>".into()),
            ..Default::default()
        });
        let email = Templates::new()
            .unwrap()
            .email("brand", "s", &record)
            .unwrap();
        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("&lt;script&gt;"));
        assert!(email.plain.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn subject_can_use_fields() {
        let record = record(SubmissionPayload {
            name: Some("김민지".into()),
            ..Default::default()
        });
        let email = Templates::new()
            .unwrap()
            .email("brand", "[상담] {{ name }} / {{ grade }}", &record)
            .unwrap();
        assert_eq!(email.subject, "[상담] 김민지 / -");
    }

    #[test]
    fn sms_text() {
        let record = record(SubmissionPayload {
            name: Some("테스트".into()),
            grade: Some("중1".into()),
            phone: Some("010-1234-5678".into()),
            ..Default::default()
        });
        assert_eq!(
            Templates::new().unwrap().sms("화명현대공부방", &record).unwrap(),
            "[화명현대공부방] 새 상담신청\n이름: 테스트\n학년: 중1\n연락처: 010-1234-5678"
        );
    }
}
