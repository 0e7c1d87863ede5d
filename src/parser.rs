//! Recursive-descent parser from tokens to a tag tree.
//!
//! Each statement has the shape
//!
//! ```text
//! [namespace:]name  value*  [namespace:]attr=value*  { statement* }?
//! ```
//!
//! and ends at a newline, `;`, a closing `}` or the end of input. Values and
//! attributes may be interleaved; values keep their order and attributes are
//! keyed, so a repeated attribute keeps its last value.
//!
//! A statement that starts with a literal, or with `name=value`, is an
//! anonymous tag named [`content`](crate::tag::ANONYMOUS_TAG_NAME).
//!
//! ```rust
//! use sdlang::{ParseOptions, Value};
//! use sdlang::lexer::Lexer;
//! use sdlang::parser::Parser;
//!
//! let options = ParseOptions::new();
//! let tokens = Lexer::new("\"hello\" lang=\"en\"", options.zones.as_ref())
//!     .tokenize()
//!     .unwrap();
//! let root = Parser::new(tokens, &options).parse().unwrap();
//!
//! let content = &root.children()[0];
//! assert_eq!(content.name(), "content");
//! assert_eq!(content.value(), Some(&Value::from("hello")));
//! assert_eq!(content.attribute("lang"), Some(&Value::from("en")));
//! ```

use crate::error::ParseErrorKind;
use crate::lexer::{Token, TokenKind};
use crate::tag::ANONYMOUS_TAG_NAME;
use crate::{Error, ParseOptions, Result, Tag};

/// Builds a [`Tag`] tree from the tokens of one document.
pub struct Parser<'a> {
    /// Remaining tokens, last one first.
    tokens: Vec<Token>,
    options: &'a ParseOptions,
    /// Position of the most recently consumed token, for errors at end of input.
    last: (usize, usize),
}

impl<'a> Parser<'a> {
    pub fn new(mut tokens: Vec<Token>, options: &'a ParseOptions) -> Self {
        tokens.reverse();
        Parser {
            tokens,
            options,
            last: (1, 1),
        }
    }

    /// Parses every statement into children of a new root tag.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::Parse`] encountered; no partial tree is kept.
    pub fn parse(mut self) -> Result<Tag> {
        let mut root = Tag::unchecked(String::new(), self.options.root_name.clone());
        self.parse_statements(&mut root, 0)?;
        if let Some(token) = self.peek() {
            return Err(Error::parse(token.line, token.col, ParseErrorKind::UnmatchedBrace));
        }
        tracing::debug!(tags = root.descendants().count(), "parsed document");
        Ok(root)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.last()
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn peek_second_kind(&self) -> Option<&TokenKind> {
        self.tokens.iter().rev().nth(1).map(|t| &t.kind)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.pop()?;
        self.last = (token.line, token.col);
        Some(token)
    }

    /// "expected X, found <next token>" at the next token, or at the last
    /// consumed one if input has run out.
    fn unexpected(&self, expected: &str) -> Error {
        match self.peek() {
            Some(token) => Error::unexpected(token.line, token.col, expected, &token.kind.to_string()),
            None => Error::unexpected(self.last.0, self.last.1, expected, "end of input"),
        }
    }

    /// Parses statements into `parent` until end of input or a `}`, which is
    /// left for the caller.
    fn parse_statements(&mut self, parent: &mut Tag, depth: usize) -> Result<()> {
        loop {
            match self.peek_kind() {
                None | Some(TokenKind::RightBrace) => return Ok(()),
                Some(TokenKind::Terminator) => {
                    self.next();
                }
                Some(_) => {
                    let tag = self.parse_statement(depth)?;
                    parent.add_child(tag);
                }
            }
        }
    }

    fn parse_statement(&mut self, depth: usize) -> Result<Tag> {
        let anonymous = || Tag::unchecked(String::new(), ANONYMOUS_TAG_NAME.to_string());
        let mut tag = match (self.peek_kind(), self.peek_second_kind()) {
            (Some(TokenKind::Identifier { .. }), Some(TokenKind::Equals)) => anonymous(),
            (Some(TokenKind::Identifier { .. }), _) => match self.next() {
                Some(Token {
                    kind: TokenKind::Identifier { namespace, name },
                    ..
                }) => Tag::unchecked(namespace, name),
                _ => return Err(self.unexpected("a tag name")),
            },
            (Some(TokenKind::Literal(_)), _) => anonymous(),
            (Some(TokenKind::LeftBrace), _) => {
                let (line, col) = self.peek().map_or(self.last, |t| (t.line, t.col));
                return Err(Error::parse(line, col, ParseErrorKind::AnonymousChildrenBlock));
            }
            _ => return Err(self.unexpected("a tag name or value")),
        };
        tracing::trace!(tag = %tag.qualified_name(), depth, "parsing statement");

        loop {
            match self.peek_kind() {
                Some(TokenKind::Literal(_)) => {
                    if let Some(Token {
                        kind: TokenKind::Literal(value),
                        ..
                    }) = self.next()
                    {
                        tag.add_value(value);
                    }
                }
                Some(TokenKind::Identifier { .. }) => self.parse_attribute(&mut tag)?,
                Some(TokenKind::LeftBrace) => {
                    self.parse_children(&mut tag, depth)?;
                    return match self.peek_kind() {
                        Some(TokenKind::Terminator) => {
                            self.next();
                            Ok(tag)
                        }
                        None | Some(TokenKind::RightBrace) => Ok(tag),
                        Some(_) => Err(self.unexpected("end of line after `}`")),
                    };
                }
                Some(TokenKind::Terminator) => {
                    self.next();
                    return Ok(tag);
                }
                None | Some(TokenKind::RightBrace) => return Ok(tag),
                Some(TokenKind::Equals) => return Err(self.unexpected("a value or attribute")),
            }
        }
    }

    /// `[namespace:]name = literal`
    fn parse_attribute(&mut self, tag: &mut Tag) -> Result<()> {
        let Some(Token {
            kind: TokenKind::Identifier { namespace, name },
            ..
        }) = self.next()
        else {
            return Err(self.unexpected("an attribute name"));
        };
        match self.peek_kind() {
            Some(TokenKind::Equals) => {
                self.next();
            }
            _ => return Err(self.unexpected("`=` after attribute name")),
        }
        match self.peek_kind() {
            Some(TokenKind::Literal(_)) => {}
            _ => return Err(self.unexpected("a literal value")),
        }
        if let Some(Token {
            kind: TokenKind::Literal(value),
            ..
        }) = self.next()
        {
            tag.attributes_mut().insert(namespace, name, value);
        }
        Ok(())
    }

    /// `{ statement* }`
    fn parse_children(&mut self, tag: &mut Tag, depth: usize) -> Result<()> {
        let Some(open) = self.next() else {
            return Err(self.unexpected("`{`"));
        };
        if depth >= self.options.max_depth {
            return Err(Error::parse(
                open.line,
                open.col,
                ParseErrorKind::NestingTooDeep(self.options.max_depth),
            ));
        }
        self.parse_statements(tag, depth + 1)?;
        match self.next() {
            Some(Token {
                kind: TokenKind::RightBrace,
                ..
            }) => Ok(()),
            _ => Err(Error::parse(
                open.line,
                open.col,
                ParseErrorKind::UnclosedChildrenBlock,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::{StandardZones, Value};

    fn parse(input: &str) -> Result<Tag> {
        let options = ParseOptions::new();
        let tokens = Lexer::new(input, &StandardZones).tokenize()?;
        Parser::new(tokens, &options).parse()
    }

    fn parse_kind(input: &str) -> ParseErrorKind {
        match parse(input) {
            Err(Error::Parse { kind, .. }) => kind,
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_values_and_attributes_interleave() {
        let root = parse("tag 1 a=2 \"x\" b=3").unwrap();
        let tag = &root.children()[0];
        assert_eq!(tag.values(), &[Value::Int32(1), Value::from("x")]);
        assert_eq!(tag.attribute("a"), Some(&Value::Int32(2)));
        assert_eq!(tag.attribute("b"), Some(&Value::Int32(3)));
    }

    #[test]
    fn test_attribute_collision_last_wins() {
        let root = parse("tag a=1 a=2 ns:a=3").unwrap();
        let tag = &root.children()[0];
        assert_eq!(tag.attributes().len(), 2);
        assert_eq!(tag.attribute("a"), Some(&Value::Int32(2)));
        assert_eq!(tag.attribute_ns("ns", "a"), Some(&Value::Int32(3)));
    }

    #[test]
    fn test_anonymous_tags() {
        let root = parse("\"hi\" 5\nlang=\"en\"").unwrap();
        assert_eq!(root.children().len(), 2);
        assert!(root.children().iter().all(|t| t.name() == "content"));
        assert_eq!(root.children()[1].attribute("lang"), Some(&Value::from("en")));
    }

    #[test]
    fn test_nested_blocks_and_blank_lines() {
        let root = parse("\n\na {\n\n  b 1; c 2\n  d { e }\n}\n\n").unwrap();
        let a = root.child("a").unwrap();
        assert_eq!(a.children().len(), 3);
        assert_eq!(a.descendants().count(), 4);
        assert!(a.descendant("e").is_some());
    }

    #[test]
    fn test_brace_errors() {
        assert_eq!(parse_kind("a\n}"), ParseErrorKind::UnmatchedBrace);
        assert_eq!(parse_kind("{\n  b\n}"), ParseErrorKind::AnonymousChildrenBlock);
        assert_eq!(parse_kind("a {\n  b"), ParseErrorKind::UnclosedChildrenBlock);
    }

    #[test]
    fn test_tokens_after_block_rejected() {
        assert!(matches!(
            parse_kind("a { b } c"),
            ParseErrorKind::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_bad_attribute_shapes() {
        match parse_kind("tag a=") {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                assert_eq!(expected, "a literal value");
                assert_eq!(found, "end of input");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            parse_kind("tag 1 bare 2"),
            ParseErrorKind::UnexpectedToken { .. }
        ));
        assert!(matches!(parse_kind("tag 1 = 2"), ParseErrorKind::UnexpectedToken { .. }));
    }

    #[test]
    fn test_depth_limit() {
        let options = ParseOptions::new().with_max_depth(2);
        let parse_with = |input: &str| {
            let tokens = Lexer::new(input, &StandardZones).tokenize().unwrap();
            Parser::new(tokens, &options).parse()
        };
        assert!(parse_with("a { b { c } }").is_ok());
        assert!(matches!(
            parse_with("a { b { c { d } } }"),
            Err(Error::Parse { kind: ParseErrorKind::NestingTooDeep(2), .. })
        ));
    }

    #[test]
    fn test_error_position() {
        let err = parse("a 1\nb }").unwrap_err();
        assert_eq!(err.position(), Some((2, 3)));
    }
}
