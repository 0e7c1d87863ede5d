//! Canonical SDL output.
//!
//! This module provides the [`Serializer`] that renders a [`Tag`] tree back
//! into SDL text. Output is deterministic and always parses back to a tree
//! equal to the one written:
//!
//! - **Values** are written in order, each in its plainest literal form
//! - **Attributes** are written in canonical order (namespace, then name)
//! - **Multi-line strings** use the `"""` block form
//! - **Children** go in a braced block, indented per [`WriteOptions`]
//! - **Anonymous tags** (`content` tags with values) are written as bare values
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use sdlang::{from_str, to_string};
//!
//! let doc = from_str("person \"Akiko\" smoker=false age=12").unwrap();
//! assert_eq!(to_string(&doc), "person \"Akiko\" age=12 smoker=false\n");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use sdlang::{Serializer, Tag, WriteOptions};
//!
//! let mut tag = Tag::new("matrix").unwrap();
//! tag.add_child(Tag::new("content").unwrap()).set_values(vec![1.into(), 2.into()]);
//!
//! let mut serializer = Serializer::new(WriteOptions::new().with_indent(2));
//! serializer.write_tag(&tag);
//! assert_eq!(serializer.into_inner(), "matrix {\n  1 2\n}\n");
//! ```

use crate::tag::ANONYMOUS_TAG_NAME;
use crate::{Tag, Value, WriteOptions};
use std::fmt::Write as _;

/// Writes tags as SDL text into an internal buffer.
pub struct Serializer {
    output: String,
    options: WriteOptions,
    indent: String,
    indent_level: usize,
}

impl Serializer {
    pub fn new(options: WriteOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            indent: options.indent.as_string(),
            options,
            indent_level: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes the children of `root`, one statement per line. The root
    /// itself is a container and is not written.
    pub fn write_document(&mut self, root: &Tag) {
        for child in root.children() {
            self.write_tag(child);
        }
        tracing::debug!(bytes = self.output.len(), "wrote document");
    }

    /// Writes one tag, including its children, followed by a line ending.
    pub fn write_tag(&mut self, tag: &Tag) {
        self.write_indent();

        let bare = self.options.anonymous_content
            && tag.namespace().is_empty()
            && tag.name() == ANONYMOUS_TAG_NAME
            && !tag.values().is_empty();
        if !bare {
            self.output.push_str(&tag.qualified_name());
        }

        let mut previous = None;
        for (i, value) in tag.values().iter().enumerate() {
            if !(bare && i == 0) {
                self.output.push(' ');
            }
            self.write_value(value, previous);
            previous = Some(value);
        }

        for (key, value) in tag.attributes().iter() {
            let _ = write!(self.output, " {}=", key);
            self.write_value(value, None);
        }

        if tag.has_children() {
            self.output.push_str(" {");
            self.output.push_str(self.options.line_ending);
            self.indent_level += 1;
            for child in tag.children() {
                self.write_tag(child);
            }
            self.indent_level -= 1;
            self.write_indent();
            self.output.push('}');
        }
        self.output.push_str(self.options.line_ending);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.indent);
        }
    }

    /// A date followed by `hh:mm:ss` would read back as one date-time, so a
    /// span in that position is written with an explicit `0d:` day count.
    fn write_value(&mut self, value: &Value, previous: Option<&Value>) {
        match (previous, value) {
            (Some(Value::Date(_)), Value::TimeSpan(span))
                if !span.is_negative() && span.days() == 0 =>
            {
                let _ = write!(self.output, "0d:{}", span);
            }
            _ => {
                let _ = write!(self.output, "{}", value);
            }
        }
    }
}
