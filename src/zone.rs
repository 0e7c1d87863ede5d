//! Time zone resolution for date-time literals.
//!
//! A date-time literal may end in `-ZONE`, e.g. `2005/12/31 12:30-JST`. Turning
//! that identifier into an offset is delegated to a [`ZoneResolver`], so
//! applications with a full zone database can plug it in through
//! [`ParseOptions::with_zone_resolver`](crate::ParseOptions::with_zone_resolver).
//!
//! The built-in [`StandardZones`] understands:
//!
//! - `UTC`, `GMT`, `UT` and `Z`
//! - explicit offsets: `GMT+9`, `GMT-08:00`, `UTC+0530`
//! - common abbreviations such as `JST`, `PST`, `EST` or `CET`
//!
//! Abbreviations resolve to a fixed offset; daylight saving rules are not applied.

use chrono::FixedOffset;
use std::fmt::Debug;

/// Maps a zone identifier to a fixed UTC offset.
///
/// Returning `None` makes the parser fail with
/// [`Error::UnknownTimeZone`](crate::Error::UnknownTimeZone).
///
/// # Examples
///
/// ```rust
/// use chrono::FixedOffset;
/// use sdlang::{from_str_with_options, Error, ParseOptions, ZoneResolver};
///
/// #[derive(Debug)]
/// struct OnlyMars;
///
/// impl ZoneResolver for OnlyMars {
///     fn resolve(&self, id: &str) -> Option<FixedOffset> {
///         (id == "MARS").then(|| FixedOffset::east_opt(3600).unwrap())
///     }
/// }
///
/// let options = ParseOptions::new().with_zone_resolver(OnlyMars);
/// assert!(from_str_with_options("landing 2030/01/01 10:00-MARS", &options).is_ok());
/// assert!(matches!(
///     from_str_with_options("landing 2030/01/01 10:00-UTC", &options),
///     Err(Error::UnknownTimeZone { .. })
/// ));
/// ```
pub trait ZoneResolver: Debug {
    fn resolve(&self, id: &str) -> Option<FixedOffset>;
}

/// The default resolver: UTC, GMT/UTC offsets and a table of abbreviations.
///
/// Region ids such as `Europe/Paris` or `America/New_York` are not known
/// here and resolve to `None`. Their offset depends on the date, so supply a
/// [`ZoneResolver`] of your own if documents use them.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardZones;

const HOUR: i32 = 3600;

/// Abbreviation -> seconds east of UTC.
const ABBREVIATIONS: &[(&str, i32)] = &[
    ("ACST", 9 * HOUR + 1800),
    ("AEDT", 11 * HOUR),
    ("AEST", 10 * HOUR),
    ("AKST", -9 * HOUR),
    ("AKDT", -8 * HOUR),
    ("AWST", 8 * HOUR),
    ("BST", HOUR),
    ("CDT", -5 * HOUR),
    ("CEST", 2 * HOUR),
    ("CET", HOUR),
    ("CST", -6 * HOUR),
    ("EDT", -4 * HOUR),
    ("EEST", 3 * HOUR),
    ("EET", 2 * HOUR),
    ("EST", -5 * HOUR),
    ("HKT", 8 * HOUR),
    ("HST", -10 * HOUR),
    ("IST", 5 * HOUR + 1800),
    ("JST", 9 * HOUR),
    ("KST", 9 * HOUR),
    ("MDT", -6 * HOUR),
    ("MSK", 3 * HOUR),
    ("MST", -7 * HOUR),
    ("NZDT", 13 * HOUR),
    ("NZST", 12 * HOUR),
    ("PDT", -7 * HOUR),
    ("PST", -8 * HOUR),
    ("SGT", 8 * HOUR),
    ("WEST", HOUR),
    ("WET", 0),
];

impl ZoneResolver for StandardZones {
    fn resolve(&self, id: &str) -> Option<FixedOffset> {
        let upper = id.to_ascii_uppercase();
        if matches!(upper.as_str(), "UTC" | "GMT" | "UT" | "Z") {
            return FixedOffset::east_opt(0);
        }
        for prefix in ["GMT", "UTC", "UT"] {
            if let Some(rest) = upper.strip_prefix(prefix) {
                if rest.starts_with('+') || rest.starts_with('-') {
                    return parse_offset(rest);
                }
            }
        }
        ABBREVIATIONS
            .iter()
            .find(|(name, _)| *name == upper)
            .and_then(|(_, secs)| FixedOffset::east_opt(*secs))
    }
}

/// Parses `+H`, `+HH`, `+HH:MM` or `+HHMM` (sign required).
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, body) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }
    let (hours, minutes) = match body.split_once(':') {
        Some((h, m)) if !h.is_empty() && m.len() == 2 => (h, m),
        Some(_) => return None,
        None if body.len() == 4 => body.split_at(2),
        None if body.len() <= 2 => (body, "0"),
        None => return None,
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * HOUR + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(id: &str) -> Option<i32> {
        StandardZones.resolve(id).map(|o| o.local_minus_utc())
    }

    #[test]
    fn test_utc_aliases() {
        assert_eq!(secs("UTC"), Some(0));
        assert_eq!(secs("gmt"), Some(0));
        assert_eq!(secs("Z"), Some(0));
    }

    #[test]
    fn test_explicit_offsets() {
        assert_eq!(secs("GMT+9"), Some(9 * 3600));
        assert_eq!(secs("GMT-08:00"), Some(-8 * 3600));
        assert_eq!(secs("UTC+0530"), Some(5 * 3600 + 1800));
        assert_eq!(secs("GMT+24"), None);
        assert_eq!(secs("GMT+1:5"), None);
    }

    #[test]
    fn test_abbreviations() {
        assert_eq!(secs("JST"), Some(9 * 3600));
        assert_eq!(secs("PST"), Some(-8 * 3600));
        assert_eq!(secs("NOPE"), None);
    }

    #[test]
    fn test_region_ids_need_a_custom_resolver() {
        assert_eq!(secs("Europe/Paris"), None);
        assert_eq!(secs("America/New_York"), None);
    }
}
