//! Arbitrary-precision base-10 numbers.
//!
//! A [`Decimal`] keeps exactly the digits and scale it was written with:
//! `1.50BD` and `1.5BD` are different values, the same way they are for
//! SQL `NUMERIC` columns. This mirrors how `BD` literals are meant to be used,
//! for money and other quantities where the written precision matters.

use num_bigint::{BigInt, Sign};
use std::fmt;
use std::str::FromStr;

/// A signed decimal number stored as an unscaled integer and a scale.
///
/// The numeric value is `unscaled * 10^-scale`. Equality compares both parts,
/// so the scale a literal was written with is never lost.
///
/// # Examples
///
/// ```rust
/// use sdlang::Decimal;
///
/// let d: Decimal = "234535.3453453453454345345341242343".parse().unwrap();
/// assert_eq!(d.scale(), 28);
/// assert_eq!(d.to_string(), "234535.3453453453454345345341242343");
///
/// let a: Decimal = "1.5".parse().unwrap();
/// let b: Decimal = "1.50".parse().unwrap();
/// assert_ne!(a, b);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decimal {
    unscaled: BigInt,
    scale: u32,
}

/// Returned when a string is not a plain decimal numeral.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDecimalError(String);

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid decimal literal `{}`", self.0)
    }
}

impl std::error::Error for ParseDecimalError {}

impl Decimal {
    /// Builds a decimal from its unscaled value and scale.
    #[must_use]
    pub fn new(unscaled: BigInt, scale: u32) -> Self {
        Decimal { unscaled, scale }
    }

    /// The integer holding every digit of the number.
    #[must_use]
    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    /// Number of digits after the decimal point.
    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.unscaled.sign() == Sign::Minus
    }

    /// Lossy conversion to the nearest `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    /// Parses `[+-]digits[.digits]`; either side of the point may be empty
    /// but not both.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseDecimalError(s.to_string());

        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(err());
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(err());
        }

        let mut digits = String::with_capacity(int_part.len() + frac_part.len() + 1);
        if negative {
            digits.push('-');
        }
        digits.push_str(int_part);
        digits.push_str(frac_part);
        let unscaled = BigInt::from_str(&digits).map_err(|_| err())?;
        let scale = u32::try_from(frac_part.len()).map_err(|_| err())?;
        Ok(Decimal { unscaled, scale })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.unscaled.magnitude().to_string();
        let sign = if self.is_negative() { "-" } else { "" };
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{}{}", sign, digits);
        }
        // Pad so at least one digit sits before the point: 5 @ scale 3 -> 0.005
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale - digits.len() + 1), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{}{}.{}", sign, int_part, frac_part)
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Decimal::new(BigInt::from(value), 0)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal::new(BigInt::from(value), 0)
    }
}

impl From<BigInt> for Decimal {
    fn from(value: BigInt) -> Self {
        Decimal::new(value, 0)
    }
}
