//! Token definitions
//!
//! A token is the unit a [`TokenSource`](crate::tokenizer::TokenSource) hands to the
//! interpreter. The core only ever looks at a token's textual value: terminals match
//! it against their regex. The classification kind and the span are carried along for
//! introspection and diagnostics.
//!
//! The kinds of the default character tokenizer are defined with the logos derive macro,
//! one single-character class per kind. Characters no class recognizes become
//! [`TokenKind::Other`].

use logos::Logos;
use std::fmt;
use std::ops::Range;

/// Classification of a token
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[regex(r"[0-9]")]
    Digit,

    // A few symbols (circled letters) are alphabetic too; they count as letters
    #[regex(r"\p{Alphabetic}", priority = 3)]
    Letter,

    // Line breaks are kept apart from other whitespace so grammars can treat
    // "\r" and "\n" as terminals of their own
    #[regex(r"[\r\n]")]
    LineTerminator,

    #[regex(r"[ \t\x0B\x0C]")]
    Whitespace,

    #[regex(r"[\p{P}\p{S}]")]
    Punctuation,

    /// A character no other class recognizes
    Other,

    /// A token assembled from several tokens of a lower layer
    Composite,
}

/// A token: textual value, classification and source span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    value: String,
    kind: TokenKind,
    span: Range<usize>,
}

impl Token {
    pub fn new(value: impl Into<String>, kind: TokenKind, span: Range<usize>) -> Self {
        Self {
            value: value.into(),
            kind,
            span,
        }
    }

    /// The text terminals are matched against
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Byte range of the token in the tokenized input
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
