use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};
use tracing::debug;

use crate::ValidationError;

const DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DATE_MINUTE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");
const DATE_SECOND: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const HOUR_MINUTE: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

/// Accepted date/date-time layouts, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DD HH:MM`
    DateMinute,
    /// `YYYY-MM-DD HH:MM:SS`
    DateSecond,
}

impl DateFormat {
    pub const ALL: [Self; 3] = [Self::Date, Self::DateMinute, Self::DateSecond];

    pub const fn pattern(self) -> &'static str {
        match self {
            Self::Date => "YYYY-MM-DD",
            Self::DateMinute => "YYYY-MM-DD HH:MM",
            Self::DateSecond => "YYYY-MM-DD HH:MM:SS",
        }
    }

    /// Parse `value` with this layout; date-only values resolve to midnight.
    pub fn parse(self, value: &str) -> Result<PrimitiveDateTime, ValidationError> {
        let parsed = match self {
            Self::Date => Date::parse(value, DATE).map(|date| date.midnight()),
            Self::DateMinute => PrimitiveDateTime::parse(value, DATE_MINUTE),
            Self::DateSecond => PrimitiveDateTime::parse(value, DATE_SECOND),
        };
        parsed.map_err(|_| ValidationError::InvalidDateFormat {
            value: value.to_owned(),
        })
    }
}

impl Display for DateFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.pattern())
    }
}

/// Return the first layout in [`DateFormat::ALL`] that `value` matches.
pub fn detect_format(value: &str) -> Result<DateFormat, ValidationError> {
    DateFormat::ALL
        .into_iter()
        .find(|format| format.parse(value).is_ok())
        .ok_or_else(|| ValidationError::InvalidDateFormat {
            value: value.to_owned(),
        })
}

/// Fail when `start` (parsed with `start_format`) is later than `end`.
pub fn validate_range(
    start: &str,
    start_format: DateFormat,
    end: &str,
    end_format: DateFormat,
) -> Result<(), ValidationError> {
    let start_at = start_format.parse(start)?;
    let end_at = end_format.parse(end)?;
    if start_at > end_at {
        return Err(ValidationError::StartAfterEnd {
            start: start.to_owned(),
            end: end.to_owned(),
        });
    }
    Ok(())
}

/// Best-effort `HH:MM` check. Never fails; callers get `None` on mismatch.
pub fn validate_time(value: &str) -> Option<Time> {
    match Time::parse(value, HOUR_MINUTE) {
        Ok(time) => Some(time),
        Err(error) => {
            debug!(value, %error, "ignoring time value that is not HH:MM");
            None
        }
    }
}

/// Optional start/end boundaries for a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    start: Option<String>,
    end: Option<String>,
}

impl DateRange {
    /// Validate and build a range.
    ///
    /// An `end` without a `start` is rejected, as is a `start` later than `end`.
    pub fn new(start: Option<&str>, end: Option<&str>) -> Result<Self, ValidationError> {
        match (start, end) {
            (None, Some(_)) => Err(ValidationError::EndWithoutStart),
            (Some(start), Some(end)) => {
                let start_format = detect_format(start)?;
                let end_format = detect_format(end)?;
                validate_range(start, start_format, end, end_format)?;
                Ok(Self {
                    start: Some(start.to_owned()),
                    end: Some(end.to_owned()),
                })
            }
            (Some(start), None) => {
                detect_format(start)?;
                Ok(Self {
                    start: Some(start.to_owned()),
                    end: None,
                })
            }
            (None, None) => Ok(Self::default()),
        }
    }

    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    pub fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_each_layout() {
        assert_eq!(detect_format("2016-01-01"), Ok(DateFormat::Date));
        assert_eq!(detect_format("2016-01-01 10:30"), Ok(DateFormat::DateMinute));
        assert_eq!(
            detect_format("2016-01-01 10:30:15"),
            Ok(DateFormat::DateSecond)
        );
    }

    #[test]
    fn detection_is_stable() {
        let first = detect_format("2020-02-29 23:59");
        let second = detect_format("2020-02-29 23:59");
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_unknown_layouts() {
        for value in ["2016/01/01", "01-01-2016", "2016-01-01T00:00:00", "", "2016-13-01"] {
            let err = detect_format(value).expect_err("must fail");
            assert!(matches!(err, ValidationError::InvalidDateFormat { .. }));
        }
    }

    #[test]
    fn range_compares_across_layouts() {
        validate_range(
            "2016-01-01",
            DateFormat::Date,
            "2016-01-01 00:00",
            DateFormat::DateMinute,
        )
        .expect("equal instants are allowed");

        let err = validate_range(
            "2016-01-02 00:00:01",
            DateFormat::DateSecond,
            "2016-01-02",
            DateFormat::Date,
        )
        .expect_err("start after end");
        assert!(matches!(err, ValidationError::StartAfterEnd { .. }));
    }

    #[test]
    fn range_requires_start_when_end_present() {
        let err = DateRange::new(None, Some("2016-01-03")).expect_err("must fail");
        assert_eq!(err, ValidationError::EndWithoutStart);
    }

    #[test]
    fn range_accepts_open_end() {
        let range = DateRange::new(Some("2016-01-01"), None).expect("valid");
        assert_eq!(range.start(), Some("2016-01-01"));
        assert_eq!(range.end(), None);
        assert!(DateRange::new(None, None).expect("valid").is_empty());
    }

    #[test]
    fn time_check_is_permissive() {
        assert!(validate_time("09:30").is_some());
        assert!(validate_time("9h30").is_none());
        assert!(validate_time("25:00").is_none());
    }
}
