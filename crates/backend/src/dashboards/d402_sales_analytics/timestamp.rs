use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use contracts::dashboards::d402_sales_analytics::RawTimestamp;

/// Naive datetime layouts accepted for strings without an offset
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Resolve a raw API timestamp into wall-clock time of the reporting offset.
///
/// Strings carrying an offset (RFC 3339) and epoch milliseconds are converted
/// into `offset`; naive strings and plain dates are taken as already local.
pub fn to_local(raw: &RawTimestamp, offset: FixedOffset) -> Result<NaiveDateTime, String> {
    match raw {
        RawTimestamp::EpochMillis(ms) => DateTime::from_timestamp_millis(*ms)
            .map(|utc| utc.with_timezone(&offset).naive_local())
            .ok_or_else(|| "epoch milliseconds out of range".to_string()),
        RawTimestamp::Text(text) => parse_text(text.trim(), offset),
    }
}

fn parse_text(text: &str, offset: FixedOffset) -> Result<NaiveDateTime, String> {
    if text.is_empty() {
        return Err("empty timestamp".to_string());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&offset).naive_local());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|e| format!("unsupported timestamp format: {e}"))
}

/// Reporting offset from whole hours east of UTC
pub fn reporting_offset(hours: i32) -> Option<FixedOffset> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn utc() -> FixedOffset {
        reporting_offset(0).unwrap()
    }

    #[test]
    fn test_epoch_millis() {
        // 2024-11-05T10:00:00Z
        let dt = to_local(&RawTimestamp::EpochMillis(1_730_800_800_000), utc()).unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2024, 11, 5, 10));
    }

    #[test]
    fn test_rfc3339_is_shifted_into_reporting_offset() {
        let raw = RawTimestamp::Text("2024-12-31T23:30:00Z".to_string());
        let moscow = reporting_offset(3).unwrap();
        let dt = to_local(&raw, moscow).unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2025, 1, 1));
    }

    #[test]
    fn test_naive_and_date_only() {
        let naive = to_local(&RawTimestamp::Text("2024-03-15T14:02:26.123".to_string()), utc()).unwrap();
        assert_eq!((naive.month(), naive.day(), naive.hour()), (3, 15, 14));

        let date = to_local(&RawTimestamp::Text("2024-03-15".to_string()), utc()).unwrap();
        assert_eq!((date.month(), date.day(), date.hour()), (3, 15, 0));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(to_local(&RawTimestamp::Text("".to_string()), utc()).is_err());
        assert!(to_local(&RawTimestamp::Text("not a date".to_string()), utc()).is_err());
        assert!(to_local(&RawTimestamp::Text("2024-13-45".to_string()), utc()).is_err());
        assert!(to_local(&RawTimestamp::EpochMillis(i64::MAX), utc()).is_err());
    }

    #[test]
    fn test_reporting_offset_bounds() {
        assert!(reporting_offset(3).is_some());
        assert!(reporting_offset(-12).is_some());
        assert!(reporting_offset(25).is_none());
    }
}
