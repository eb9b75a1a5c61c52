//! Timetable time parsing.
//!
//! RTT reports times as bare clock strings with no date: `"HHMM"` for
//! public and most working times, `"HHMMSS"` where the working timetable
//! carries half-minutes. Every time is anchored to the service's nominal
//! run date here; overnight correction happens later, once the whole
//! calling pattern is known.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// `strftime` pattern for dates in request paths.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// `strftime` pattern for times in request paths.
pub const TIME_FORMAT: &str = "%H%M";

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {value:?}: {reason}")]
pub struct TimeError {
    value: String,
    reason: &'static str,
}

impl TimeError {
    fn new(value: &str, reason: &'static str) -> Self {
        Self {
            value: value.to_string(),
            reason,
        }
    }

    /// The string that failed to parse.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Today's calendar date in local time.
///
/// Callers that default a date should call this once and reuse the value.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse an RTT time string on the given date.
///
/// # Examples
///
/// ```
/// use rtt_client::domain::parse_rtt_time;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
///
/// let t = parse_rtt_time("0930", date).unwrap();
/// assert_eq!(t.to_string(), "2024-03-15 09:30:00");
///
/// let t = parse_rtt_time("093030", date).unwrap();
/// assert_eq!(t.to_string(), "2024-03-15 09:30:30");
///
/// assert!(parse_rtt_time("09:30", date).is_err());
/// assert!(parse_rtt_time("2500", date).is_err());
/// ```
pub fn parse_rtt_time(s: &str, date: NaiveDate) -> Result<NaiveDateTime, TimeError> {
    let bytes = s.as_bytes();
    if bytes.len() != 4 && bytes.len() != 6 {
        return Err(TimeError::new(s, "expected HHMM or HHMMSS"));
    }

    let hour =
        parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new(s, "invalid hour digits"))?;
    if hour > 23 {
        return Err(TimeError::new(s, "hour must be 0-23"));
    }

    let minute = parse_two_digits(&bytes[2..4])
        .ok_or_else(|| TimeError::new(s, "invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new(s, "minute must be 0-59"));
    }

    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| TimeError::new(s, "invalid time"))?;
    let mut datetime = date.and_time(time);

    // Seconds are an offset past the minute rather than part of the clock reading.
    if bytes.len() == 6 {
        let seconds = parse_two_digits(&bytes[4..6])
            .ok_or_else(|| TimeError::new(s, "invalid second digits"))?;
        if seconds > 59 {
            return Err(TimeError::new(s, "seconds must be 0-59"));
        }
        datetime += Duration::seconds(i64::from(seconds));
    }

    Ok(datetime)
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn parse_hhmm() {
        let t = parse_rtt_time("1430", date()).unwrap();
        assert_eq!(t.date(), date());
        assert_eq!((t.hour(), t.minute(), t.second()), (14, 30, 0));

        let t = parse_rtt_time("0000", date()).unwrap();
        assert_eq!((t.hour(), t.minute()), (0, 0));

        let t = parse_rtt_time("2359", date()).unwrap();
        assert_eq!((t.hour(), t.minute()), (23, 59));
    }

    #[test]
    fn parse_hhmmss_adds_seconds() {
        let t = parse_rtt_time("143030", date()).unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (14, 30, 30));
    }

    #[test]
    fn seconds_never_roll_the_date() {
        let t = parse_rtt_time("235959", date()).unwrap();
        assert_eq!(t.date(), date());
    }

    #[test]
    fn reject_wrong_length() {
        for s in ["", "1", "143", "14300", "1430300", "14:30"] {
            assert!(parse_rtt_time(s, date()).is_err(), "{s:?} should fail");
        }
    }

    #[test]
    fn reject_out_of_range() {
        assert!(parse_rtt_time("2400", date()).is_err());
        assert!(parse_rtt_time("1260", date()).is_err());
        assert!(parse_rtt_time("123060", date()).is_err());
    }

    #[test]
    fn reject_non_digits() {
        assert!(parse_rtt_time("ab30", date()).is_err());
        assert!(parse_rtt_time("14x0", date()).is_err());
        assert!(parse_rtt_time("1430H ", date()).is_err());
        assert!(parse_rtt_time("-130", date()).is_err());
    }

    #[test]
    fn reject_multibyte() {
        // Four characters but five bytes.
        assert!(parse_rtt_time("14½0", date()).is_err());
    }

    #[test]
    fn error_display_names_value() {
        let err = parse_rtt_time("2500", date()).unwrap_err();
        assert_eq!(err.value(), "2500");
        assert_eq!(err.to_string(), "invalid time \"2500\": hour must be 0-23");
    }
}
