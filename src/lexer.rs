//! Tokenizer for SDL text.
//!
//! The [`Lexer`] turns a document into a flat list of [`Token`]s. Literal
//! classification happens entirely here: by the time the parser sees a
//! token, a number is already an `Int32`, `Float64`, `Decimal` and so on,
//! and a date followed by a time of day is already a single date-time.
//!
//! Comments (`//`, `#`, `--` to end of line and `/* ... */` blocks) and
//! whitespace produce no tokens. Newlines and `;` produce
//! [`TokenKind::Terminator`], except for a newline escaped by a trailing
//! backslash, which joins the two physical lines.
//!
//! ```rust
//! use sdlang::lexer::{Lexer, TokenKind};
//! use sdlang::{StandardZones, Value};
//!
//! let tokens = Lexer::new("size 10L; on", &StandardZones).tokenize().unwrap();
//! let kinds: Vec<TokenKind> = tokens.into_iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Identifier { namespace: String::new(), name: "size".into() },
//!         TokenKind::Literal(Value::Int64(10)),
//!         TokenKind::Terminator,
//!         TokenKind::Literal(Value::Bool(true)),
//!     ]
//! );
//! ```

use crate::error::LexicalErrorKind;
use crate::temporal::{DateTime, TimeSpan, Zone};
use crate::{Decimal, Error, Result, Value, ZoneResolver};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{NaiveDate, NaiveTime};
use std::fmt;

const KEYWORDS: [&str; 5] = ["true", "false", "on", "off", "null"];

/// Unsuffixed fractional literals with more significant digits than this do
/// not survive an `f64` and are read as decimals instead.
const MAX_DOUBLE_DIGITS: usize = 17;

/// A classified piece of source text and where it starts (1-based).
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub col: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// A tag or attribute name; `namespace` is empty when unqualified.
    Identifier { namespace: String, name: String },
    Literal(Value),
    Equals,
    LeftBrace,
    RightBrace,
    /// A newline or `;`.
    Terminator,
}

impl fmt::Display for TokenKind {
    /// Short description used in "expected X, found Y" messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier { namespace, name } if namespace.is_empty() => {
                write!(f, "identifier `{}`", name)
            }
            TokenKind::Identifier { namespace, name } => {
                write!(f, "identifier `{}:{}`", namespace, name)
            }
            TokenKind::Literal(value) => write!(f, "{} literal", value.kind()),
            TokenKind::Equals => f.write_str("`=`"),
            TokenKind::LeftBrace => f.write_str("`{`"),
            TokenKind::RightBrace => f.write_str("`}`"),
            TokenKind::Terminator => f.write_str("end of line"),
        }
    }
}

#[inline]
pub(crate) fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

#[inline]
pub(crate) fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '$')
}

/// Whether `s` can be written as a bare tag, attribute or namespace name.
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(is_identifier_start)
        && chars.all(is_identifier_part)
        && !KEYWORDS.contains(&s)
}

/// Characters that may appear inside a number, date, time or time span.
#[inline]
fn is_literal_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | ':' | '/' | '-' | '+' | '_')
}

/// Splits SDL source text into tokens.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    zones: &'a dyn ZoneResolver,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `input`, resolving date-time zones with `zones`.
    pub fn new(input: &'a str, zones: &'a dyn ZoneResolver) -> Self {
        Lexer {
            input,
            position: 0,
            line: 1,
            column: 1,
            zones,
        }
    }

    /// Consumes the lexer and returns every token in the input.
    ///
    /// # Errors
    ///
    /// Returns the first lexical, decode or unknown-time-zone error found.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        tracing::debug!(count = tokens.len(), "tokenized input");
        Ok(tokens)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Advances to byte offset `target`, keeping line and column in step.
    fn advance_to(&mut self, target: usize) {
        while self.position < target {
            if self.next_char().is_none() {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            let (line, col) = (self.line, self.column);
            let Some(ch) = self.peek_char() else {
                return Ok(None);
            };
            let rest = self.rest();
            let kind = match ch {
                ' ' | '\t' | '\r' | '\u{feff}' => {
                    self.next_char();
                    continue;
                }
                '\n' | ';' => {
                    self.next_char();
                    TokenKind::Terminator
                }
                '=' => {
                    self.next_char();
                    TokenKind::Equals
                }
                '{' => {
                    self.next_char();
                    TokenKind::LeftBrace
                }
                '}' => {
                    self.next_char();
                    TokenKind::RightBrace
                }
                '#' => {
                    self.skip_line();
                    continue;
                }
                '/' if rest.starts_with("//") => {
                    self.skip_line();
                    continue;
                }
                '-' if rest.starts_with("--") => {
                    self.skip_line();
                    continue;
                }
                '/' if rest.starts_with("/*") => {
                    self.skip_block_comment(line, col)?;
                    continue;
                }
                '\\' => {
                    self.line_continuation(line, col)?;
                    continue;
                }
                '"' => TokenKind::Literal(Value::String(self.lex_string(line, col)?)),
                '`' => TokenKind::Literal(Value::String(self.lex_raw_string(line, col)?)),
                '\'' => TokenKind::Literal(Value::Char(self.lex_char(line, col)?)),
                '[' => TokenKind::Literal(Value::Binary(self.lex_binary(line, col)?)),
                c if is_identifier_start(c) => self.lex_word(),
                _ if starts_literal(rest) => TokenKind::Literal(self.lex_literal(line, col)?),
                other => {
                    return Err(Error::lexical(
                        line,
                        col,
                        LexicalErrorKind::InvalidCharacter(other),
                    ))
                }
            };
            return Ok(Some(Token { kind, line, col }));
        }
    }

    /// Stops before the newline so it still terminates the statement.
    fn skip_line(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch == '\n' {
                break;
            }
            self.next_char();
        }
    }

    fn skip_block_comment(&mut self, line: usize, col: usize) -> Result<()> {
        match self.rest()[2..].find("*/") {
            Some(end) => {
                self.advance_to(self.position + 2 + end + 2);
                Ok(())
            }
            None => Err(Error::lexical(
                line,
                col,
                LexicalErrorKind::UnterminatedComment,
            )),
        }
    }

    /// A backslash may only be followed by blanks and then a newline.
    fn line_continuation(&mut self, line: usize, col: usize) -> Result<()> {
        self.next_char();
        while let Some(' ' | '\t' | '\r') = self.peek_char() {
            self.next_char();
        }
        match self.peek_char() {
            Some('\n') => {
                self.next_char();
                Ok(())
            }
            _ => Err(Error::lexical(
                line,
                col,
                LexicalErrorKind::MisplacedBackslash,
            )),
        }
    }

    fn skip_blanks(&mut self) {
        while let Some(' ' | '\t') = self.peek_char() {
            self.next_char();
        }
    }

    fn lex_string(&mut self, line: usize, col: usize) -> Result<String> {
        let unterminated = || Error::lexical(line, col, LexicalErrorKind::UnterminatedString);

        if self.rest().starts_with("\"\"\"") {
            let body_start = self.position + 3;
            let end = self.input[body_start..]
                .find("\"\"\"")
                .ok_or_else(unterminated)?;
            let body = &self.input[body_start..body_start + end];
            let body = body
                .strip_prefix("\r\n")
                .or_else(|| body.strip_prefix('\n'))
                .unwrap_or(body);
            let body = body
                .strip_suffix("\r\n")
                .or_else(|| body.strip_suffix('\n'))
                .unwrap_or(body);
            self.advance_to(body_start + end + 3);
            return Ok(body.to_string());
        }

        self.next_char();
        let mut text = String::new();
        loop {
            let (escape_line, escape_col) = (self.line, self.column);
            match self.next_char().ok_or_else(unterminated)? {
                '"' => return Ok(text),
                '\\' => match self.next_char().ok_or_else(unterminated)? {
                    '\n' => self.skip_blanks(),
                    '\r' if self.peek_char() == Some('\n') => {
                        self.next_char();
                        self.skip_blanks();
                    }
                    c => text.push(unescape(c).ok_or_else(|| {
                        Error::lexical(escape_line, escape_col, LexicalErrorKind::InvalidEscape(c))
                    })?),
                },
                c => text.push(c),
            }
        }
    }

    fn lex_raw_string(&mut self, line: usize, col: usize) -> Result<String> {
        let body_start = self.position + 1;
        let end = self.input[body_start..].find('`').ok_or_else(|| {
            Error::lexical(line, col, LexicalErrorKind::UnterminatedString)
        })?;
        let body = &self.input[body_start..body_start + end];
        self.advance_to(body_start + end + 1);
        Ok(body.to_string())
    }

    fn lex_char(&mut self, line: usize, col: usize) -> Result<char> {
        let fail = |kind| Error::lexical(line, col, kind);
        self.next_char();

        let (escape_line, escape_col) = (self.line, self.column);
        let ch = match self.next_char() {
            None | Some('\n') => return Err(fail(LexicalErrorKind::UnterminatedCharacter)),
            Some('\'') => return Err(fail(LexicalErrorKind::InvalidCharacterLiteral)),
            Some('\\') => {
                let c = self
                    .next_char()
                    .ok_or_else(|| fail(LexicalErrorKind::UnterminatedCharacter))?;
                unescape(c).ok_or_else(|| {
                    Error::lexical(escape_line, escape_col, LexicalErrorKind::InvalidEscape(c))
                })?
            }
            Some(c) => c,
        };
        match self.next_char() {
            Some('\'') => Ok(ch),
            None | Some('\n') => Err(fail(LexicalErrorKind::UnterminatedCharacter)),
            Some(_) => Err(fail(LexicalErrorKind::InvalidCharacterLiteral)),
        }
    }

    fn lex_binary(&mut self, line: usize, col: usize) -> Result<Vec<u8>> {
        let body_start = self.position + 1;
        let end = self.input[body_start..].find(']').ok_or_else(|| {
            Error::lexical(line, col, LexicalErrorKind::UnterminatedBinary)
        })?;
        let payload: String = self.input[body_start..body_start + end]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        self.advance_to(body_start + end + 1);
        STANDARD
            .decode(payload)
            .map_err(|source| Error::Decode { line, col, source })
    }

    fn take_while(&mut self, len: impl Fn(&str) -> usize) -> &'a str {
        let rest = self.rest();
        let word = &rest[..len(rest)];
        self.advance_to(self.position + word.len());
        word
    }

    /// Identifiers, `ns:name` pairs and the keyword literals.
    fn lex_word(&mut self) -> TokenKind {
        let first = self.take_while(identifier_len);
        let rest = self.rest();
        if let Some(after) = rest.strip_prefix(':') {
            if after.chars().next().is_some_and(is_identifier_start) {
                self.next_char();
                let name = self.take_while(identifier_len);
                return TokenKind::Identifier {
                    namespace: first.to_string(),
                    name: name.to_string(),
                };
            }
        }
        match first {
            "true" | "on" => TokenKind::Literal(Value::Bool(true)),
            "false" | "off" => TokenKind::Literal(Value::Bool(false)),
            "null" => TokenKind::Literal(Value::Null),
            _ => TokenKind::Identifier {
                namespace: String::new(),
                name: first.to_string(),
            },
        }
    }

    /// Numbers, dates, date-times and time spans.
    fn lex_literal(&mut self, line: usize, col: usize) -> Result<Value> {
        let word = self.take_while(literal_len);
        if word.contains('/') {
            let date = parse_date(word).ok_or_else(|| {
                Error::lexical(line, col, LexicalErrorKind::InvalidDate(word.to_string()))
            })?;
            return self.lex_date_time(date, line, col);
        }
        if word.contains(':') {
            return parse_time_span(word).map(Value::TimeSpan).ok_or_else(|| {
                Error::lexical(line, col, LexicalErrorKind::InvalidTimeSpan(word.to_string()))
            });
        }
        parse_number(word).map_err(|kind| Error::lexical(line, col, kind))
    }

    /// Joins a date with a time of day later on the same line, if there is one.
    fn lex_date_time(&mut self, date: NaiveDate, line: usize, col: usize) -> Result<Value> {
        let rest = self.rest();
        let gap = rest.len() - rest.trim_start_matches(|c: char| c == ' ' || c == '\t').len();
        let candidate = &rest[gap..][..literal_len(&rest[gap..])];
        if !is_time_of_day(candidate) {
            return Ok(Value::Date(date));
        }
        self.advance_to(self.position + gap + candidate.len());

        let (time_text, zone_id) = match candidate.split_once('-') {
            Some((time, zone)) if !zone.is_empty() => (time, Some(zone)),
            _ => (candidate, None),
        };
        let time = parse_time_of_day(time_text).ok_or_else(|| {
            Error::lexical(line, col, LexicalErrorKind::InvalidTime(candidate.to_string()))
        })?;
        let zone = match zone_id {
            Some(id) => {
                let offset = self
                    .zones
                    .resolve(id)
                    .ok_or_else(|| Error::unknown_time_zone(line, col, id))?;
                Some(Zone::new(id, offset))
            }
            None => None,
        };
        Ok(Value::DateTime(DateTime::new(date.and_time(time), zone)))
    }
}

fn unescape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '\\' | '"' | '\'' => Some(c),
        _ => None,
    }
}

fn identifier_len(s: &str) -> usize {
    s.char_indices()
        .find(|&(_, c)| !is_identifier_part(c))
        .map_or(s.len(), |(i, _)| i)
}

/// Stops at anything that cannot continue a literal, including the start of
/// a `//`, `/*` or `--` comment.
fn literal_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    for (i, c) in s.char_indices() {
        let next = bytes.get(i + 1).copied();
        let comment = (c == '/' && matches!(next, Some(b'/' | b'*')))
            || (c == '-' && next == Some(b'-'));
        if comment || !is_literal_part(c) {
            return i;
        }
    }
    s.len()
}

/// A literal starts with a digit, or a sign or point directly before one.
fn starts_literal(s: &str) -> bool {
    let mut chars = s.chars();
    let is_digit = |c: Option<char>| c.is_some_and(|c| c.is_ascii_digit());
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('-' | '+') => match chars.next() {
            Some('.') => is_digit(chars.next()),
            c => is_digit(c),
        },
        Some('.') => is_digit(chars.next()),
        _ => false,
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn unsigned(s: &str) -> Option<u32> {
    if all_digits(s) {
        s.parse().ok()
    } else {
        None
    }
}

/// `[+-]digits`
fn signed(s: &str) -> Option<i64> {
    let (negative, digits) = split_sign(s);
    if !all_digits(digits) {
        return None;
    }
    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

/// One to three fraction digits as milliseconds: `5` is 500, `05` is 50.
fn fraction_millis(digits: &str) -> Option<u32> {
    if !all_digits(digits) || digits.len() > 3 {
        return None;
    }
    let value: u32 = digits.parse().ok()?;
    Some(value * 10u32.pow(3 - digits.len() as u32))
}

/// `[-]year/month/day`
fn parse_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('/');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let (negative, year_digits) = match year.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, year),
    };
    let year = i32::try_from(unsigned(year_digits)?).ok()?;
    let year = if negative { -year } else { year };
    NaiveDate::from_ymd_opt(year, unsigned(month)?, unsigned(day)?)
}

/// A word that can only be the time half of a date-time: two or three
/// unsigned components before any `-ZONE` suffix. Signed, `0d:` and
/// four-part spans stay separate values.
fn is_time_of_day(s: &str) -> bool {
    let time = s.split_once('-').map_or(s, |(time, _)| time);
    let parts: Vec<&str> = time.split(':').collect();
    (2..=3).contains(&parts.len())
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit() || b == b'.'))
}

/// `hh:mm[:ss[.fff]]`
fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let mut parts = s.split(':');
    let hours = unsigned(parts.next()?)?;
    let minutes = unsigned(parts.next()?)?;
    let (seconds, millis) = match parts.next() {
        None => (0, 0),
        Some(seconds) => match seconds.split_once('.') {
            Some((whole, fraction)) => (unsigned(whole)?, fraction_millis(fraction)?),
            None => (unsigned(seconds)?, 0),
        },
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveTime::from_hms_milli_opt(hours, minutes, seconds, millis)
}

/// `[days(d)?:]hh:mm:ss[.fff]`, where every component may carry a sign and a
/// `-` on the first one negates the whole span.
fn parse_time_span(s: &str) -> Option<TimeSpan> {
    let parts: Vec<&str> = s.split(':').collect();
    let (days, hours, minutes, seconds) = match parts.as_slice() {
        [d, h, m, sec] => {
            let d: &str = d;
            let d = d
                .strip_suffix('d')
                .or_else(|| d.strip_suffix('D'))
                .unwrap_or(d);
            (signed(d)?, *h, *m, *sec)
        }
        [h, m, sec] => (0, *h, *m, *sec),
        _ => return None,
    };
    let (seconds, millis) = match seconds.split_once('.') {
        Some((whole, fraction)) => {
            let (negative, digits) = split_sign(fraction);
            let millis = i64::from(fraction_millis(digits)?);
            (whole, if negative { -millis } else { millis })
        }
        None => (seconds, 0),
    };
    let mut components = [days, signed(hours)?, signed(minutes)?, signed(seconds)?, millis];
    if s.starts_with('-') {
        for component in &mut components {
            *component = -component.abs();
        }
    }
    let [days, hours, minutes, seconds, millis] = components;
    TimeSpan::checked_new(days, hours, minutes, seconds, millis)
}

#[derive(Clone, Copy)]
enum Suffix {
    None,
    Long,
    Float,
    Double,
    Decimal,
}

fn split_suffix(word: &str) -> (&str, Suffix) {
    let len = word.len();
    if len >= 2 && word.is_char_boundary(len - 2) && word[len - 2..].eq_ignore_ascii_case("bd") {
        return (&word[..len - 2], Suffix::Decimal);
    }
    let suffix = match word.as_bytes().last() {
        Some(b'L' | b'l') => Suffix::Long,
        Some(b'F' | b'f') => Suffix::Float,
        Some(b'D' | b'd') => Suffix::Double,
        _ => return (word, Suffix::None),
    };
    (&word[..len - 1], suffix)
}

/// `[+-]digits[.digits]` or `[+-].digits`
fn is_numeral(s: &str) -> bool {
    let (_, body) = split_sign(s);
    match body.split_once('.') {
        Some((whole, fraction)) => {
            (whole.is_empty() || all_digits(whole)) && all_digits(fraction)
        }
        None => all_digits(body),
    }
}

fn significant_digits(s: &str) -> usize {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    digits.trim_start_matches('0').trim_end_matches('0').len()
}

/// Classifies a numeric literal by its suffix and magnitude.
fn parse_number(word: &str) -> std::result::Result<Value, LexicalErrorKind> {
    let invalid = || LexicalErrorKind::InvalidNumber(word.to_string());
    let out_of_range = || LexicalErrorKind::NumberOutOfRange(word.to_string());

    let (body, suffix) = split_suffix(word);
    if !is_numeral(body) {
        return Err(invalid());
    }
    let integral = !body.contains('.');
    match suffix {
        Suffix::Long if integral => body.parse().map(Value::Int64).map_err(|_| out_of_range()),
        Suffix::Long => Err(invalid()),
        Suffix::Float => body.parse().map(Value::Float32).map_err(|_| invalid()),
        Suffix::Double => body.parse().map(Value::Float64).map_err(|_| invalid()),
        Suffix::Decimal => body
            .parse::<Decimal>()
            .map(Value::Decimal)
            .map_err(|_| invalid()),
        Suffix::None if integral => match body.parse::<i32>() {
            Ok(value) => Ok(Value::Int32(value)),
            Err(_) => body.parse().map(Value::Int64).map_err(|_| out_of_range()),
        },
        Suffix::None if significant_digits(body) > MAX_DOUBLE_DIGITS => body
            .parse::<Decimal>()
            .map(Value::Decimal)
            .map_err(|_| invalid()),
        Suffix::None => body.parse().map(Value::Float64).map_err(|_| invalid()),
    }
}
