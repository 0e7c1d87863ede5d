//! SDL Format Reference
//!
//! This module documents the SDL text format as implemented by this library.
//! It contains no code.
//!
//! # Overview
//!
//! An SDL document is a sequence of *statements*, one per line. Each
//! statement creates one [`Tag`](crate::Tag):
//!
//! ```text
//! [namespace:]name  value*  [namespace:]attribute=value*  { statement* }
//! ```
//!
//! ## Design Philosophy
//!
//! - **Typed**: the spelling of a literal decides its type, no schema needed
//! - **Line oriented**: newlines end statements, braces open child blocks
//! - **Deterministic output**: writing a tree always produces the same text
//!
//! # Statements
//!
//! ```text
//! title "Hello"                      # one value
//! size 10 20                         # two values
//! font family="Arial" size=12        # attributes only
//! image "a.png" width=100            # values, then attributes
//! folder "docs" {                    # children
//!     file "a.txt"
//! }
//! empty                              # no values, attributes or children
//! ```
//!
//! **Rules**:
//! - A statement ends at a newline, at `;`, at a `}` or at the end of input
//! - Blank lines and extra `;` are ignored
//! - A `\` as the last thing on a line joins it with the next line
//! - Values and attributes may be interleaved; values keep their order
//! - Repeating an attribute on one line keeps the last value
//! - After a closing `}` only a line ending, another `}` or the end of input may follow
//!
//! ## Anonymous Tags
//!
//! A statement that starts with a value, or with `attribute=value`, creates a
//! tag named `content`:
//!
//! ```text
//! "just a value"           # content "just a value"
//! lang="en"                # content lang="en"
//! matrix {
//!     1 2 3                # content 1 2 3
//!     4 5 6
//! }
//! ```
//!
//! ## Identifiers
//!
//! Tag, attribute and namespace names start with a letter or `_` and continue
//! with letters, digits, `_`, `-`, `.` or `$`. The keywords `true`, `false`,
//! `on`, `off` and `null` are values, not names. A namespace is joined to the
//! name with a single `:` and no spaces: `person:name`.
//!
//! # Literals
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | Null | `null` | `nothing null` |
//! | Bool | `true`, `false`, `on`, `off` | `light-on on` |
//! | Char | `'c'` with escapes | `'\n'` |
//! | String | `"..."`, `"""..."""`, `` `...` `` | `"hello"` |
//! | Int32 | digits in 32-bit range | `-100` |
//! | Int64 | `L` suffix, or digits beyond 32 bits | `5L`, `3000000000` |
//! | Float32 | `F` suffix | `1.5F`, `.23F` |
//! | Float64 | a point, or `D` suffix | `1.5`, `5D` |
//! | Decimal | `BD` suffix, or more than 17 significant digits | `1.50BD` |
//! | Date | `year/month/day` | `2005/12/31`, `-582/09/16` |
//! | DateTime | a date, a space, a time of day | `2005/12/31 12:30:00.123-JST` |
//! | TimeSpan | `[days(d):]hh:mm:ss[.fff]` | `12:30:00`, `2d:00:00:00` |
//! | Binary | base64 in brackets | `[aGk=]` |
//!
//! Suffixes are case-insensitive.
//!
//! ## Strings
//!
//! - `"..."` understands the escapes `\\`, `\"`, `\'`, `\n`, `\t` and `\r`.
//!   A literal newline inside the quotes is kept. A backslash at the end of a
//!   line is a continuation: the newline and the next line's leading blanks
//!   are dropped.
//! - `"""..."""` is taken verbatim, except that one newline right after the
//!   opening quotes and one right before the closing quotes are removed.
//! - `` `...` `` is taken verbatim, newlines and all.
//!
//! ```text
//! string6 "line1\n\
//!          line2"                 # "line1\nline2"
//! string7 `line1
//! line2`                          # "line1\nline2"
//! poem """
//! roses are red
//! """                             # "roses are red"
//! ```
//!
//! ## Date-Times
//!
//! A date followed on the same line by `hh:mm`, `hh:mm:ss` or `hh:mm:ss.f`
//! (one to three fraction digits, `.12` meaning 120 ms) is one date-time.
//! An optional `-ZONE` suffix names a time zone: `UTC`, `GMT+9`,
//! `GMT-08:00`, `JST` and so on, resolved by a
//! [`ZoneResolver`](crate::ZoneResolver). An unknown zone is an error, never
//! a silent fallback. The default [`StandardZones`](crate::StandardZones)
//! does not know region ids such as `Europe/Paris`; a custom resolver can
//! map them.
//!
//! Only a word of two or three unsigned components joins the date. In
//! `2005/12/31 5:12:30:00` the four-part word is a separate time span.
//!
//! The writer keeps a zone id that `StandardZones` reads back as the same
//! offset. Any other zone is written as `GMT+hh:mm`, which names the same
//! instant.
//!
//! Two date-times with zones are equal when they denote the same instant.
//! A date-time without a zone is never equal to one with a zone.
//!
//! ## Time Spans
//!
//! ```text
//! time1 12:30:00                  # 12 h 30 min
//! time2 2d:12:30:00.5             # 2 days ... and 500 ms
//! time3 -12:30:00                 # leading `-` negates every component
//! time4 0:-12:-30:-23.-123        # each component carries its own sign
//! ```
//!
//! A span directly after a date would read as a date-time, so the writer
//! spells it with an explicit day count there: `2005/12/31 0d:12:30:00`.
//!
//! # Comments
//!
//! ```text
//! // to end of line
//! #  to end of line
//! -- to end of line
//! /* across
//!    lines */
//! ```
//!
//! # Output Form
//!
//! The writer produces one statement per line with children indented, values
//! in order, attributes sorted by namespace and then name, and each value in
//! its plainest form: `Int32` without suffix, `Int64` with `L`, `Float32`
//! with `F`, decimals with `BD` and their exact scale. Strings containing a
//! newline use the `"""` form. Floats that are not finite have no literal
//! and are written as `null`.
