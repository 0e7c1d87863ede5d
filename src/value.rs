//! Typed literal values carried by tags.
//!
//! This module provides the [`Value`] enum, the closed set of literal kinds a
//! tag can hold either as an anonymous value or as an attribute.
//!
//! ## Literal Forms
//!
//! | Kind | Example |
//! |------|---------|
//! | Null | `null` |
//! | Bool | `true`, `false`, `on`, `off` |
//! | Char | `'a'`, `'\n'` |
//! | String | `"hello"`, `"""multi-line"""`, `` `raw` `` |
//! | Int32 | `42` |
//! | Int64 | `42L`, or any integer beyond 32 bits |
//! | Float32 | `1.5F` |
//! | Float64 | `1.5`, `1.5D` |
//! | Decimal | `1.50BD` |
//! | Date | `2005/12/31` |
//! | DateTime | `2005/12/31 12:30:00.123-JST` |
//! | TimeSpan | `12:30:00`, `-2d:04:00:00.5` |
//! | Binary | `[aGk=]` |
//!
//! The [`Display`](std::fmt::Display) impl renders a value in exactly this
//! literal syntax, so `value.to_string()` always reads back as an equal value.
//!
//! ## Examples
//!
//! ```rust
//! use sdlang::{Value, ValueKind};
//!
//! let value = Value::from(5_000_000_000i64);
//! assert_eq!(value.kind(), ValueKind::Int64);
//! assert_eq!(value.to_string(), "5000000000L");
//!
//! let text = Value::from("two\nlines");
//! assert_eq!(text.as_str(), Some("two\nlines"));
//! ```

use crate::temporal::{self, DateTime, TimeSpan};
use crate::Decimal;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

/// A dynamically-typed literal value.
///
/// Equality requires the same variant and an equal payload. Decimals compare
/// digits and scale; date-times compare zone-adjusted instants (see
/// [`DateTime`]); floats follow IEEE comparison.
///
/// # Examples
///
/// ```rust
/// use sdlang::Value;
///
/// assert_eq!(Value::from(1), Value::Int32(1));
/// assert_ne!(Value::Int32(1), Value::Int64(1));
/// assert!(Value::Null.is_null());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Char(char),
    String(String),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    Date(NaiveDate),
    DateTime(DateTime),
    TimeSpan(TimeSpan),
    Binary(Vec<u8>),
}

/// Discriminant of a [`Value`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Char,
    String,
    Int32,
    Int64,
    Float32,
    Float64,
    Decimal,
    Date,
    DateTime,
    TimeSpan,
    Binary,
}

impl ValueKind {
    /// Human-readable name used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Char => "character",
            ValueKind::String => "string",
            ValueKind::Int32 => "int32",
            ValueKind::Int64 => "int64",
            ValueKind::Float32 => "float32",
            ValueKind::Float64 => "float64",
            ValueKind::Decimal => "decimal",
            ValueKind::Date => "date",
            ValueKind::DateTime => "date-time",
            ValueKind::TimeSpan => "time span",
            ValueKind::Binary => "binary",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Char(_) => ValueKind::Char,
            Value::String(_) => ValueKind::String,
            Value::Int32(_) => ValueKind::Int32,
            Value::Int64(_) => ValueKind::Int64,
            Value::Float32(_) => ValueKind::Float32,
            Value::Float64(_) => ValueKind::Float64,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::Date(_) => ValueKind::Date,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::TimeSpan(_) => ValueKind::TimeSpan,
            Value::Binary(_) => ValueKind::Binary,
        }
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for any of the integer, float or decimal kinds.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(
            self,
            Value::Int32(_)
                | Value::Int64(_)
                | Value::Float32(_)
                | Value::Float64(_)
                | Value::Decimal(_)
        )
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sdlang::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns either integer kind widened to `i64`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sdlang::Value;
    ///
    /// assert_eq!(Value::Int32(7).as_i64(), Some(7));
    /// assert_eq!(Value::Int64(7).as_i64(), Some(7));
    /// assert_eq!(Value::Float64(7.0).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int32(i) => Some(i64::from(*i)),
            Value::Int64(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float32(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns any numeric kind as the nearest `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int32(i) => Some(f64::from(*i)),
            Value::Int64(i) => Some(*i as f64),
            Value::Float32(f) => Some(f64::from(*f)),
            Value::Float64(f) => Some(*f),
            Value::Decimal(d) => Some(d.to_f64()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Value::Decimal(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_date_time(&self) -> Option<&DateTime> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_time_span(&self) -> Option<TimeSpan> {
        match self {
            Value::TimeSpan(span) => Some(*span),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write_char_literal(f, *c),
            Value::String(s) => write_string_literal(f, s),
            Value::Int32(i) => write!(f, "{}", i),
            Value::Int64(i) => write!(f, "{}L", i),
            Value::Float32(v) if v.is_finite() => write!(f, "{}F", v),
            Value::Float64(v) if v.is_finite() => {
                let text = v.to_string();
                if text.contains('.') {
                    f.write_str(&text)
                } else {
                    write!(f, "{}.0", text)
                }
            }
            Value::Float32(_) | Value::Float64(_) => {
                tracing::warn!("non-finite float has no literal form, writing null");
                f.write_str("null")
            }
            Value::Decimal(d) => write!(f, "{}BD", d),
            Value::Date(d) => temporal::write_date(f, d),
            Value::DateTime(dt) => write!(f, "{}", dt),
            Value::TimeSpan(span) => write!(f, "{}", span),
            Value::Binary(bytes) => write!(f, "[{}]", STANDARD.encode(bytes)),
        }
    }
}

/// Writes a string using the block form when it spans lines, otherwise the
/// escaped double-quoted form.
///
/// The block form is framed by a newline after the opening and before the
/// closing delimiter; the lexer strips exactly those two.
pub(crate) fn write_string_literal(f: &mut impl fmt::Write, s: &str) -> fmt::Result {
    if s.contains('\n') && !s.contains('\r') && !s.contains("\"\"\"") {
        f.write_str("\"\"\"\n")?;
        f.write_str(s)?;
        return f.write_str("\n\"\"\"");
    }
    f.write_char('"')?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            _ => f.write_char(ch)?,
        }
    }
    f.write_char('"')
}

fn write_char_literal(f: &mut impl fmt::Write, c: char) -> fmt::Result {
    f.write_char('\'')?;
    match c {
        '\'' => f.write_str("\\'")?,
        '\\' => f.write_str("\\\\")?,
        '\n' => f.write_str("\\n")?,
        '\r' => f.write_str("\\r")?,
        '\t' => f.write_str("\\t")?,
        _ => f.write_char(c)?,
    }
    f.write_char('\'')
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Char(c) => serializer.serialize_char(*c),
            Value::String(s) => serializer.serialize_str(s),
            Value::Int32(i) => serializer.serialize_i32(*i),
            Value::Int64(i) => serializer.serialize_i64(*i),
            Value::Float32(v) => serializer.serialize_f32(*v),
            Value::Float64(v) => serializer.serialize_f64(*v),
            Value::Decimal(d) => serializer.serialize_str(&d.to_string()),
            Value::Date(_) => serializer.serialize_str(&self.to_string()),
            Value::DateTime(dt) => serializer.serialize_str(&dt.to_string()),
            Value::TimeSpan(span) => serializer.serialize_str(&span.to_string()),
            Value::Binary(bytes) => serializer.serialize_bytes(bytes),
        }
    }
}

// TryFrom implementations for extracting payloads from Value
impl TryFrom<Value> for i64 {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.as_i64().ok_or(value)
    }
}

impl TryFrom<Value> for f64 {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.as_f64().ok_or(value)
    }
}

impl TryFrom<Value> for bool {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.as_bool().ok_or(value)
    }
}

impl TryFrom<Value> for String {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(other),
        }
    }
}

// From implementations for creating Value from Rust types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<DateTime> for Value {
    fn from(value: DateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<TimeSpan> for Value {
    fn from(value: TimeSpan) -> Self {
        Value::TimeSpan(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Binary(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Binary(value.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
