//! Parsing and rendering of the date-times that appear in the sheet and in
//! notifications.
//!
//! Rendering is always done in an explicit `UtcOffset` (the service runs in
//! Asia/Seoul by default) so the server's own clock zone never leaks into the
//! stored rows.

use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

/// The caller-supplied text could not be understood as a date-time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized date-time `{0}`")]
pub struct ParseError(pub String);

/// Parse a caller-supplied date-time, expressed in `local`.
///
/// Accepted, in order:
/// - RFC 3339 with an explicit offset (`2024-05-01T10:00:00Z`)
/// - a local date-time without offset, separated by `T` or a space, with
///   optional seconds and fractional seconds; these are read in `local`
/// - a bare calendar date, read as midnight UTC
///
/// A value that cannot be shown in `local` (it would leave the supported year
/// range) is rejected like any other unrecognized text.
pub fn parse_datetime(raw: &str, local: UtcOffset) -> Result<OffsetDateTime, ParseError> {
    let text = raw.trim();
    let rejected = || ParseError(raw.to_owned());

    if let Ok(value) = OffsetDateTime::parse(text, &Rfc3339) {
        return value.checked_to_offset(local).ok_or_else(rejected);
    }

    let text = text.replacen(' ', "T", 1);
    let naive = PrimitiveDateTime::parse(
        &text,
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(
            &text,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        )
    })
    .or_else(|_| {
        PrimitiveDateTime::parse(
            &text,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        )
    });
    if let Ok(naive) = naive {
        return Ok(naive.assume_offset(local));
    }

    Date::parse(&text, format_description!("[year]-[month]-[day]"))
        .ok()
        .and_then(|date| date.midnight().assume_utc().checked_to_offset(local))
        .ok_or_else(rejected)
}

/// Shift `value` into `offset` if it fits there, then format it.
fn render(value: OffsetDateTime, offset: UtcOffset, layout: &[BorrowedFormatItem<'_>]) -> String {
    let value = value.checked_to_offset(offset).unwrap_or(value);
    // an OffsetDateTime carries every component the layouts ask for
    value.format(layout).unwrap_or_default()
}

/// `yyyy-MM-dd HH:mm:ss` in the given offset.
pub fn format_seconds(value: OffsetDateTime, offset: UtcOffset) -> String {
    render(
        value,
        offset,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
}

/// `yyyy-MM-dd HH:mm` in the given offset.
pub fn format_minutes(value: OffsetDateTime, offset: UtcOffset) -> String {
    render(
        value,
        offset,
        format_description!("[year]-[month]-[day] [hour]:[minute]"),
    )
}

/// `yyyy년 MM월 dd일 HH:mm` in the given offset, as used in notification bodies.
pub fn format_korean_minutes(value: OffsetDateTime, offset: UtcOffset) -> String {
    render(
        value,
        offset,
        format_description!("[year]년 [month]월 [day]일 [hour]:[minute]"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::macros::{datetime, offset};

    const SEOUL: UtcOffset = offset!(+9);

    #[rstest]
    #[case("2024-05-01T10:00:00Z", datetime!(2024-05-01 10:00 UTC))]
    #[case("2024-05-01T10:00:00.000Z", datetime!(2024-05-01 10:00 UTC))]
    #[case("2024-05-01T19:00:00+09:00", datetime!(2024-05-01 10:00 UTC))]
    #[case("2024-05-01T19:00", datetime!(2024-05-01 10:00 UTC))]
    #[case("2024-05-01 19:00:30", datetime!(2024-05-01 10:00:30 UTC))]
    #[case("2024-05-01T19:00:30.250", datetime!(2024-05-01 10:00:30.25 UTC))]
    #[case("2024-05-01", datetime!(2024-05-01 00:00 UTC))]
    fn parses_supported_forms(#[case] raw: &str, #[case] expected: OffsetDateTime) {
        assert_eq!(parse_datetime(raw, SEOUL), Ok(expected));
    }

    #[rstest]
    #[case("next tuesday afternoon")]
    #[case("2024-13-01T10:00")]
    #[case("")]
    #[case("10:00")]
    #[case::beyond_the_last_year("9999-12-31T23:00:00Z")]
    fn rejects_everything_else(#[case] raw: &str) {
        assert_eq!(parse_datetime(raw, SEOUL), Err(ParseError(raw.to_owned())));
    }

    #[test]
    fn renders_in_requested_offset() {
        let at = datetime!(2024-05-01 10:00:05 UTC);
        assert_eq!(format_seconds(at, SEOUL), "2024-05-01 19:00:05");
        assert_eq!(format_minutes(at, SEOUL), "2024-05-01 19:00");
        assert_eq!(format_korean_minutes(at, SEOUL), "2024년 05월 01일 19:00");
    }

    #[test]
    fn parsed_values_are_shifted_into_the_local_offset() {
        let at = parse_datetime("2024-05-01T10:00:00Z", SEOUL).unwrap();
        assert_eq!(at.offset(), SEOUL);
        assert_eq!(at.hour(), 19);
    }

    #[test]
    fn values_outside_the_offset_range_keep_their_own_offset() {
        let at = datetime!(9999-12-31 23:00 UTC);
        assert_eq!(format_minutes(at, SEOUL), "9999-12-31 23:00");
    }

    #[test]
    fn crossing_midnight_moves_the_date() {
        let at = datetime!(2024-12-31 20:30 UTC);
        assert_eq!(format_minutes(at, SEOUL), "2025-01-01 05:30");
    }
}
