//! # sdlang
//!
//! A parser and canonical writer for SDL, a tagged declarative data language.
//!
//! ## What is SDL?
//!
//! SDL describes data as a tree of *tags*. Each tag has a name, a list of
//! typed values, a set of attributes and an optional block of child tags:
//!
//! ```text
//! person "Akiko" "Johnson" dateOfBirth=1986/12/05 {
//!     son "Nouhiro" age=8
//!     daughter "Sabrina" smoker=false
//! }
//! ```
//!
//! Unlike JSON, literals are strongly typed: `5` is a 32-bit integer, `5L` a
//! 64-bit one, `5.0F` a float, `5.0BD` an exact decimal, `2005/12/31` a date,
//! `12:30:00` a time span and `[aGk=]` a byte string.
//!
//! ## Key Features
//!
//! - **Typed literals**: thirteen value kinds, classified while lexing
//! - **Namespaces**: `ns:name` for tags and attributes, with namespace queries
//! - **Round trip**: anything written by [`to_string`] parses back to an equal tree
//! - **Positioned errors**: every parse failure carries a line and column
//! - **No unsafe code**
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! sdlang = "0.1"
//! ```
//!
//! ### Reading and Writing
//!
//! ```rust
//! use sdlang::{from_str, to_string, Value};
//!
//! let doc = from_str("size 10\nname \"widget\" color=\"red\"").unwrap();
//! let size = doc.child("size").and_then(|t| t.value());
//! assert_eq!(size, Some(&Value::Int32(10)));
//!
//! let text = to_string(&doc);
//! assert_eq!(from_str(&text).unwrap(), doc);
//! ```
//!
//! ### Building Trees
//!
//! ```rust
//! use sdlang::{to_string, Tag};
//!
//! let mut root = Tag::root();
//! let mut server = Tag::new("server").unwrap();
//! server.add_value("alpha");
//! server.set_attribute("port", 8080).unwrap();
//! root.add_child(server);
//!
//! assert_eq!(to_string(&root), "server \"alpha\" port=8080\n");
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Nesting depth is bounded by [`ParseOptions::max_depth`]
//! - Proper error propagation with `Result` types
//! - No panics in the public API
//!
//! ## Format Reference
//!
//! The [`syntax`] module documents every literal form and the statement grammar.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Parse a document and read values back
//! - **`build_tree.rs`** - Build a tree in code and query it
//! - **`custom_options.rs`** - Indentation, anonymous tags and zone resolvers
//!
//! Run any example with: `cargo run --example <name>`

pub mod decimal;
pub mod error;
pub mod lexer;
pub mod map;
pub mod options;
pub mod parser;
pub mod ser;
pub mod syntax;
pub mod tag;
pub mod temporal;
pub mod value;
pub mod zone;

pub use decimal::Decimal;
pub use error::{Error, LexicalErrorKind, ParseErrorKind, Result};
pub use lexer::Lexer;
pub use map::{AttributeKey, AttributeMap};
pub use options::{Indent, ParseOptions, WriteOptions};
pub use parser::Parser;
pub use ser::Serializer;
pub use tag::{ChildValue, Node, Tag, Walk};
pub use temporal::{DateTime, TimeSpan, Zone};
pub use value::{Value, ValueKind};
pub use zone::{StandardZones, ZoneResolver};

/// Parses an SDL document into a root tag holding its top-level tags.
///
/// # Examples
///
/// ```rust
/// use sdlang::{from_str, Value};
///
/// let doc = from_str("greeting \"hi\"; count 3").unwrap();
/// assert_eq!(doc.children().len(), 2);
/// assert_eq!(doc.child("count").unwrap().value(), Some(&Value::Int32(3)));
/// ```
///
/// # Errors
///
/// Returns an error if the text is not valid SDL. See [`Error`].
pub fn from_str(s: &str) -> Result<Tag> {
    from_str_with_options(s, &ParseOptions::default())
}

/// Parses an SDL document with custom options.
///
/// # Examples
///
/// ```rust
/// use sdlang::{from_str_with_options, ParseOptions};
///
/// let options = ParseOptions::new().with_root_name("config");
/// let doc = from_str_with_options("debug on", &options).unwrap();
/// assert_eq!(doc.name(), "config");
/// ```
///
/// # Errors
///
/// Returns an error if the text is not valid SDL, nests deeper than
/// `options.max_depth`, or names a zone `options.zones` cannot resolve.
#[tracing::instrument(skip_all, fields(len = s.len()))]
pub fn from_str_with_options(s: &str, options: &ParseOptions) -> Result<Tag> {
    let tokens = Lexer::new(s, options.zones.as_ref()).tokenize()?;
    Parser::new(tokens, options).parse()
}

/// Parses an SDL document from UTF-8 bytes.
///
/// # Examples
///
/// ```rust
/// use sdlang::from_slice;
///
/// let doc = from_slice(b"name \"Alice\"").unwrap();
/// assert_eq!(doc.children().len(), 1);
/// assert!(from_slice(&[0xff, 0xfe]).is_err());
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidUtf8`] for non-UTF-8 input, otherwise as [`from_str`].
pub fn from_slice(v: &[u8]) -> Result<Tag> {
    let s = std::str::from_utf8(v)?;
    from_str(s)
}

/// Writes the children of `root` as an SDL document.
///
/// The root itself is not written, so this is the inverse of [`from_str`].
/// To write a single tag including its own name, use its `Display` impl.
///
/// # Examples
///
/// ```rust
/// use sdlang::{from_str, to_string};
///
/// let doc = from_str("b 2 a=1\nc").unwrap();
/// assert_eq!(to_string(&doc), "b 2 a=1\nc\n");
/// ```
#[must_use]
pub fn to_string(root: &Tag) -> String {
    to_string_with_options(root, &WriteOptions::default())
}

/// Writes the children of `root` with custom formatting options.
///
/// # Examples
///
/// ```rust
/// use sdlang::{from_str, to_string_with_options, WriteOptions};
///
/// let doc = from_str("\"hello\"").unwrap();
/// let options = WriteOptions::new().with_anonymous_content(false);
/// assert_eq!(to_string_with_options(&doc, &options), "content \"hello\"\n");
/// ```
#[must_use]
pub fn to_string_with_options(root: &Tag, options: &WriteOptions) -> String {
    let mut serializer = Serializer::new(options.clone());
    serializer.write_document(root);
    serializer.into_inner()
}
