//! Date-time and time span values.
//!
//! Plain dates are [`chrono::NaiveDate`]. Date-times add a time of day with
//! millisecond precision and an optional [`Zone`]; time spans are signed
//! durations with no calendar anchor.

use crate::zone::{StandardZones, ZoneResolver};
use chrono::{Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use std::fmt;

const MILLIS_PER_SECOND: i64 = 1000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// A resolved time zone: the identifier as written plus its UTC offset.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Zone {
    id: String,
    offset: FixedOffset,
}

impl Zone {
    pub fn new(id: impl Into<String>, offset: FixedOffset) -> Self {
        Zone {
            id: id.into(),
            offset,
        }
    }

    /// The identifier exactly as it appeared in the source (or was given).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Writes the `-ZONE` suffix of a date-time literal.
    ///
    /// The id is kept when [`StandardZones`] reads it back as the same
    /// offset. Any other id (a custom resolver's, or one paired with a
    /// different offset) is written as `GMT+hh:mm` so the literal re-reads
    /// as the same instant.
    fn write_suffix(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if StandardZones.resolve(&self.id) == Some(self.offset) {
            return write!(f, "-{}", self.id);
        }
        let seconds = self.offset.local_minus_utc();
        if seconds % 60 != 0 {
            tracing::warn!(zone = %self.id, seconds, "zone offset has seconds, written to the minute");
        }
        let sign = if seconds < 0 { '-' } else { '+' };
        let minutes = seconds.abs() / 60;
        write!(f, "-GMT{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
    }
}

/// A calendar date with a time of day and an optional time zone.
///
/// Without a zone the value is a local, unspecified-zone time. Precision is
/// one millisecond; finer fractions are truncated on construction.
///
/// Two zoned date-times are equal when they denote the same instant, even if
/// written in different zones. Two unzoned date-times are equal when their
/// fields match. A zoned and an unzoned value are never equal.
///
/// # Examples
///
/// ```rust
/// use chrono::{FixedOffset, NaiveDate};
/// use sdlang::{DateTime, Zone};
///
/// let tokyo = Zone::new("JST", FixedOffset::east_opt(9 * 3600).unwrap());
/// let utc = Zone::new("UTC", FixedOffset::east_opt(0).unwrap());
/// let noon = NaiveDate::from_ymd_opt(2005, 12, 31).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let three = NaiveDate::from_ymd_opt(2005, 12, 31).unwrap().and_hms_opt(3, 0, 0).unwrap();
///
/// assert_eq!(DateTime::new(noon, Some(tokyo)), DateTime::new(three, Some(utc)));
/// ```
#[derive(Clone, Debug)]
pub struct DateTime {
    local: NaiveDateTime,
    zone: Option<Zone>,
}

impl DateTime {
    pub fn new(local: NaiveDateTime, zone: Option<Zone>) -> Self {
        let nanos = local.nanosecond() % 1_000_000_000;
        let local = local
            .with_nanosecond(nanos - nanos % 1_000_000)
            .unwrap_or(local);
        DateTime { local, zone }
    }

    /// A date-time with no zone.
    pub fn local(local: NaiveDateTime) -> Self {
        DateTime::new(local, None)
    }

    /// The wall-clock fields as written.
    #[must_use]
    pub const fn naive_local(&self) -> NaiveDateTime {
        self.local
    }

    #[must_use]
    pub fn zone(&self) -> Option<&Zone> {
        self.zone.as_ref()
    }

    #[must_use]
    pub fn millisecond(&self) -> u32 {
        self.local.nanosecond() / 1_000_000
    }

    /// The zone-adjusted instant, if the value carries a zone.
    #[must_use]
    pub fn instant(&self) -> Option<chrono::DateTime<FixedOffset>> {
        let zone = self.zone.as_ref()?;
        zone.offset.from_local_datetime(&self.local).single()
    }
}

impl PartialEq for DateTime {
    fn eq(&self, other: &Self) -> bool {
        match (&self.zone, &other.zone) {
            (None, None) => self.local == other.local,
            (Some(_), Some(_)) => self.instant() == other.instant(),
            _ => false,
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_date(f, &self.local.date())?;
        write!(
            f,
            " {:02}:{:02}:{:02}",
            self.local.hour(),
            self.local.minute(),
            self.local.second()
        )?;
        let millis = self.millisecond();
        if millis != 0 {
            write!(f, ".{:03}", millis)?;
        }
        if let Some(zone) = &self.zone {
            zone.write_suffix(f)?;
        }
        Ok(())
    }
}

/// Writes a date as `yyyy/mm/dd`.
pub(crate) fn write_date(f: &mut impl fmt::Write, date: &NaiveDate) -> fmt::Result {
    write!(f, "{:04}/{:02}/{:02}", date.year(), date.month(), date.day())
}

/// A signed duration of days, hours, minutes, seconds and milliseconds.
///
/// Stored as a total number of milliseconds, so `24:00:00` and `1d:00:00:00`
/// are the same span. The component accessors return normalized values that
/// all share the span's sign.
///
/// # Examples
///
/// ```rust
/// use sdlang::TimeSpan;
///
/// let span = TimeSpan::new(0, -12, -30, -23, -123);
/// assert!(span.is_negative());
/// assert_eq!(span.hours(), -12);
/// assert_eq!(span.to_string(), "-12:30:23.123");
///
/// assert_eq!(TimeSpan::new(0, 24, 0, 0, 0), TimeSpan::new(1, 0, 0, 0, 0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSpan {
    millis: i64,
}

impl TimeSpan {
    /// Sums the components; each one keeps its own sign. Saturates at the
    /// `i64` millisecond range.
    #[must_use]
    pub fn new(days: i64, hours: i64, minutes: i64, seconds: i64, millis: i64) -> Self {
        let total = days
            .saturating_mul(MILLIS_PER_DAY)
            .saturating_add(hours.saturating_mul(MILLIS_PER_HOUR))
            .saturating_add(minutes.saturating_mul(MILLIS_PER_MINUTE))
            .saturating_add(seconds.saturating_mul(MILLIS_PER_SECOND))
            .saturating_add(millis);
        TimeSpan { millis: total }
    }

    /// Like [`TimeSpan::new`] but returns `None` instead of saturating.
    #[must_use]
    pub fn checked_new(
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        millis: i64,
    ) -> Option<Self> {
        let total = days
            .checked_mul(MILLIS_PER_DAY)?
            .checked_add(hours.checked_mul(MILLIS_PER_HOUR)?)?
            .checked_add(minutes.checked_mul(MILLIS_PER_MINUTE)?)?
            .checked_add(seconds.checked_mul(MILLIS_PER_SECOND)?)?
            .checked_add(millis)?;
        Some(TimeSpan { millis: total })
    }

    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        TimeSpan { millis }
    }

    #[must_use]
    pub const fn total_millis(&self) -> i64 {
        self.millis
    }

    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.millis < 0
    }

    #[must_use]
    pub const fn days(&self) -> i64 {
        self.millis / MILLIS_PER_DAY
    }

    #[must_use]
    pub const fn hours(&self) -> i64 {
        self.millis % MILLIS_PER_DAY / MILLIS_PER_HOUR
    }

    #[must_use]
    pub const fn minutes(&self) -> i64 {
        self.millis % MILLIS_PER_HOUR / MILLIS_PER_MINUTE
    }

    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.millis % MILLIS_PER_MINUTE / MILLIS_PER_SECOND
    }

    #[must_use]
    pub const fn milliseconds(&self) -> i64 {
        self.millis % MILLIS_PER_SECOND
    }

    #[must_use]
    pub fn to_duration(&self) -> Duration {
        // Duration's range is symmetric, so i64::MIN is one past its minimum
        Duration::milliseconds(self.millis.max(-i64::MAX))
    }
}

impl From<Duration> for TimeSpan {
    /// Truncates anything finer than a millisecond.
    fn from(value: Duration) -> Self {
        TimeSpan::from_millis(value.num_milliseconds())
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.millis.unsigned_abs();
        let per_day = MILLIS_PER_DAY.unsigned_abs();
        let per_hour = MILLIS_PER_HOUR.unsigned_abs();
        let per_minute = MILLIS_PER_MINUTE.unsigned_abs();
        let per_second = MILLIS_PER_SECOND.unsigned_abs();

        if self.is_negative() {
            f.write_str("-")?;
        }
        let days = abs / per_day;
        if days != 0 {
            write!(f, "{}d:", days)?;
        }
        write!(
            f,
            "{:02}:{:02}:{:02}",
            abs % per_day / per_hour,
            abs % per_hour / per_minute,
            abs % per_minute / per_second
        )?;
        let millis = abs % per_second;
        if millis != 0 {
            write!(f, ".{:03}", millis)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hms(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_time_span_components_share_sign() {
        let span = TimeSpan::new(-5, -12, -30, -23, -123);
        assert_eq!(
            (span.days(), span.hours(), span.minutes(), span.seconds(), span.milliseconds()),
            (-5, -12, -30, -23, -123)
        );
        assert_eq!(span.to_string(), "-5d:12:30:23.123");
    }

    #[test]
    fn test_time_span_display() {
        assert_eq!(TimeSpan::new(0, 12, 30, 0, 0).to_string(), "12:30:00");
        assert_eq!(TimeSpan::new(34, 12, 30, 23, 100).to_string(), "34d:12:30:23.100");
        assert_eq!(TimeSpan::default().to_string(), "00:00:00");
        assert_eq!(TimeSpan::from_millis(i64::MIN).to_string().chars().next(), Some('-'));
    }

    #[test]
    fn test_time_span_checked() {
        assert!(TimeSpan::checked_new(i64::MAX, 0, 0, 0, 0).is_none());
        assert_eq!(
            TimeSpan::checked_new(0, 1, 0, 0, 0),
            Some(TimeSpan::from_millis(3_600_000))
        );
    }

    #[test]
    fn test_duration_conversion() {
        let span = TimeSpan::new(0, 0, 1, 2, 3);
        assert_eq!(TimeSpan::from(span.to_duration()), span);
    }

    #[test]
    fn test_date_time_truncates_to_millis() {
        let local = ymd_hms(2005, 12, 31, 12, 30, 23)
            .with_nanosecond(123_456_789)
            .unwrap();
        let dt = DateTime::local(local);
        assert_eq!(dt.millisecond(), 123);
        assert_eq!(dt.to_string(), "2005/12/31 12:30:23.123");
    }

    #[test]
    fn test_zoned_and_unzoned_differ() {
        let utc = Zone::new("UTC", FixedOffset::east_opt(0).unwrap());
        let local = ymd_hms(1980, 12, 5, 12, 30, 0);
        assert_ne!(DateTime::local(local), DateTime::new(local, Some(utc)));
    }

    #[test]
    fn test_display_with_zone() {
        let pst = Zone::new("PST", FixedOffset::west_opt(8 * 3600).unwrap());
        let dt = DateTime::new(ymd_hms(985, 4, 11, 12, 30, 23), Some(pst));
        assert_eq!(dt.to_string(), "0985/04/11 12:30:23-PST");
    }

    #[test]
    fn test_display_spells_out_offset_for_unresolvable_ids() {
        let at = ymd_hms(2005, 12, 31, 12, 30, 0);
        let mislabelled = Zone::new("JST", FixedOffset::east_opt(0).unwrap());
        let paris = Zone::new("Europe/Paris", FixedOffset::east_opt(3600).unwrap());
        let mars = Zone::new("MARS", FixedOffset::east_opt(2 * 3600 + 39 * 60).unwrap());
        let west = Zone::new("HST10", FixedOffset::west_opt(9 * 3600 + 30 * 60).unwrap());

        assert_eq!(
            DateTime::new(at, Some(mislabelled)).to_string(),
            "2005/12/31 12:30:00-GMT+00:00"
        );
        assert_eq!(
            DateTime::new(at, Some(paris)).to_string(),
            "2005/12/31 12:30:00-GMT+01:00"
        );
        assert_eq!(
            DateTime::new(at, Some(mars)).to_string(),
            "2005/12/31 12:30:00-GMT+02:39"
        );
        assert_eq!(
            DateTime::new(at, Some(west)).to_string(),
            "2005/12/31 12:30:00-GMT-09:30"
        );
    }
}
