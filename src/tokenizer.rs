//! Token sources
//!
//! The interpreter pulls tokens through the [`TokenSource`] trait and never builds a
//! source itself, so tokenization is fully pluggable. A [`TokenizerFactory`] builds
//! sources from raw input.
//!
//! Shipped implementations:
//!
//! - [`VecTokenizer`]: a source over tokens produced elsewhere
//! - [`tokenize_chars`] / [`CharTokenizerFactory`]: one token per character, classified
//!   by the logos lexer in [`crate::token`]
//! - [`ProductionTokenizer`]: a layer that uses a production as the lexer for the
//!   layer above it
//!
//! A source is stateful and is borrowed mutably by exactly one parse at a time.

pub mod buffered;
pub mod chars;
pub mod layered;

pub use buffered::VecTokenizer;
pub use chars::{tokenize_chars, CharTokenizerFactory};
pub use layered::ProductionTokenizer;

use crate::error::TokenizerError;
use crate::token::Token;
use std::io::Read;

/// A stream of tokens with one token of lookahead
pub trait TokenSource {
    /// Whether another token is available, without consuming it
    fn has_next(&self) -> bool;

    /// The next token, without consuming it
    fn peek(&mut self) -> Result<&Token, TokenizerError>;

    /// Consume and return the next token
    fn next(&mut self) -> Result<Token, TokenizerError>;

    /// Release underlying resources; calling it again has no effect
    fn close(&mut self) {}
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    fn has_next(&self) -> bool {
        (**self).has_next()
    }

    fn peek(&mut self) -> Result<&Token, TokenizerError> {
        (**self).peek()
    }

    fn next(&mut self) -> Result<Token, TokenizerError> {
        (**self).next()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

impl<S: TokenSource + ?Sized> TokenSource for Box<S> {
    fn has_next(&self) -> bool {
        (**self).has_next()
    }

    fn peek(&mut self) -> Result<&Token, TokenizerError> {
        (**self).peek()
    }

    fn next(&mut self) -> Result<Token, TokenizerError> {
        (**self).next()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Builds token sources from raw input
pub trait TokenizerFactory {
    type Source: TokenSource;

    fn create_tokenizer<R: Read>(&self, reader: R) -> Result<Self::Source, TokenizerError>;
}
