//! Configuration for reading and writing SDL.
//!
//! - [`ParseOptions`]: root tag name, nesting limit and time zone resolution
//! - [`WriteOptions`]: indentation, line endings and anonymous tag output
//! - [`Indent`]: one indentation step, either spaces or a tab
//!
//! Formatting choices never change what a document means: any output
//! produced with any [`WriteOptions`] parses back to the same tree.
//!
//! ## Examples
//!
//! ```rust
//! use sdlang::{to_string_with_options, Tag, WriteOptions};
//!
//! let mut root = Tag::root();
//! let parent = root.add_child(Tag::new("parent").unwrap());
//! parent.add_child(Tag::new("child").unwrap());
//!
//! let tabs = to_string_with_options(&root, &WriteOptions::new().with_tabs());
//! assert_eq!(tabs, "parent {\n\tchild\n}\n");
//!
//! let flat = to_string_with_options(&root, &WriteOptions::compact());
//! assert_eq!(flat, "parent {\nchild\n}\n");
//! ```

use crate::tag::ROOT_TAG_NAME;
use crate::{StandardZones, ZoneResolver};
use std::sync::Arc;

/// One level of indentation in written output.
///
/// # Examples
///
/// ```rust
/// use sdlang::Indent;
///
/// assert_eq!(Indent::Spaces(2).as_string(), "  ");
/// assert_eq!(Indent::Tab.as_string(), "\t");
/// assert_eq!(Indent::default(), Indent::Spaces(4));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
    Tab,
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(4)
    }
}

impl Indent {
    #[must_use]
    pub fn as_string(&self) -> String {
        match self {
            Indent::Spaces(n) => " ".repeat(*n),
            Indent::Tab => "\t".to_string(),
        }
    }
}

/// Options controlling how the [`Serializer`](crate::Serializer) lays out text.
///
/// # Examples
///
/// ```rust
/// use sdlang::{Indent, WriteOptions};
///
/// let options = WriteOptions::new()
///     .with_indent(2)
///     .with_anonymous_content(false);
/// assert_eq!(options.indent, Indent::Spaces(2));
/// assert!(!options.anonymous_content);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteOptions {
    pub indent: Indent,
    /// Write a `content` tag that holds values as just its values.
    pub anonymous_content: bool,
    pub line_ending: &'static str,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            indent: Indent::default(),
            anonymous_content: true,
            line_ending: "\n",
        }
    }
}

impl WriteOptions {
    /// Creates default options (4-space indent, anonymous `content` tags, `\n`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that write children without any indentation.
    #[must_use]
    pub fn compact() -> Self {
        WriteOptions {
            indent: Indent::Spaces(0),
            ..Default::default()
        }
    }

    /// Sets the indentation to `spaces` spaces per level.
    #[must_use]
    pub fn with_indent(mut self, spaces: usize) -> Self {
        self.indent = Indent::Spaces(spaces);
        self
    }

    /// Indents with one tab per level.
    #[must_use]
    pub fn with_tabs(mut self) -> Self {
        self.indent = Indent::Tab;
        self
    }

    #[must_use]
    pub fn with_anonymous_content(mut self, anonymous_content: bool) -> Self {
        self.anonymous_content = anonymous_content;
        self
    }

    /// Sets the line ending, typically `"\n"` or `"\r\n"`.
    #[must_use]
    pub fn with_line_ending(mut self, line_ending: &'static str) -> Self {
        self.line_ending = line_ending;
        self
    }
}

/// Options controlling how text is turned into a tag tree.
///
/// # Examples
///
/// ```rust
/// use sdlang::{from_str_with_options, Error, ParseErrorKind, ParseOptions};
///
/// let options = ParseOptions::new().with_root_name("document").with_max_depth(1);
/// let doc = from_str_with_options("a {\n  b\n}", &options).unwrap();
/// assert_eq!(doc.name(), "document");
///
/// let err = from_str_with_options("a {\n  b {\n    c\n  }\n}", &options).unwrap_err();
/// assert!(matches!(err, Error::Parse { kind: ParseErrorKind::NestingTooDeep(1), .. }));
/// ```
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Name given to the tag that holds the top-level statements.
    pub root_name: String,
    /// Maximum number of nested children blocks.
    pub max_depth: usize,
    pub zones: Arc<dyn ZoneResolver + Send + Sync>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            root_name: ROOT_TAG_NAME.to_string(),
            max_depth: 128,
            zones: Arc::new(StandardZones),
        }
    }
}

impl ParseOptions {
    /// Creates default options (root named `root`, depth 128, [`StandardZones`]).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = root_name.into();
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replaces the resolver used for date-time zone suffixes.
    #[must_use]
    pub fn with_zone_resolver(mut self, resolver: impl ZoneResolver + Send + Sync + 'static) -> Self {
        self.zones = Arc::new(resolver);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_defaults() {
        let options = WriteOptions::default();
        assert_eq!(options.indent, Indent::Spaces(4));
        assert!(options.anonymous_content);
        assert_eq!(options.line_ending, "\n");
    }

    #[test]
    fn test_write_builders() {
        let options = WriteOptions::compact().with_line_ending("\r\n");
        assert_eq!(options.indent.as_string(), "");
        assert_eq!(options.line_ending, "\r\n");
        assert_eq!(WriteOptions::new().with_tabs().indent, Indent::Tab);
    }

    #[test]
    fn test_parse_defaults() {
        let options = ParseOptions::new();
        assert_eq!(options.root_name, "root");
        assert_eq!(options.max_depth, 128);
        assert!(options.zones.resolve("UTC").is_some());
    }
}
