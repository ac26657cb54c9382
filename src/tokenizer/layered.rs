//! Productions as lexers
//!
//! [`ProductionTokenizer`] runs a production over an inner token source and hands
//! out each parse result, collapsed with [`Symbol::to_token`], as one token. A
//! word grammar over character tokens thus becomes the lexer of a sentence grammar
//! over words.
//!
//! Each token is produced lazily: nothing is parsed until the layer above peeks.
//!
//! [`Symbol::to_token`]: crate::symbol::Symbol::to_token

use super::TokenSource;
use crate::error::TokenizerError;
use crate::production::Production;
use crate::token::Token;
use tracing::trace;

/// A token source whose tokens are parses of `production` over `inner`
pub struct ProductionTokenizer<S: TokenSource> {
    inner: S,
    production: Production,
    buffered: Option<Token>,
}

impl<S: TokenSource> ProductionTokenizer<S> {
    pub fn new(production: Production, inner: S) -> Self {
        Self {
            inner,
            production,
            buffered: None,
        }
    }

    pub fn production(&self) -> &Production {
        &self.production
    }

    /// Parse the next token from the layer below
    ///
    /// A production that matches zero tokens would loop forever on the same input,
    /// so an empty result is an error.
    fn fill(&mut self) -> Result<(), TokenizerError> {
        if self.buffered.is_some() {
            return Ok(());
        }
        if !self.inner.has_next() {
            return Err(TokenizerError::Exhausted);
        }
        let offset = self.inner.peek()?.span().start;
        let symbol = self
            .production
            .parse(&mut self.inner)
            .map_err(|err| TokenizerError::Layer(Box::new(err)))?;
        let token = symbol.to_token();
        if token.value().is_empty() {
            return Err(TokenizerError::EmptyToken { offset });
        }
        trace!(production = %self.production.id(), value = token.value(), "layer token");
        self.buffered = Some(token);
        Ok(())
    }
}

impl<S: TokenSource> TokenSource for ProductionTokenizer<S> {
    fn has_next(&self) -> bool {
        self.buffered.is_some() || self.inner.has_next()
    }

    fn peek(&mut self) -> Result<&Token, TokenizerError> {
        self.fill()?;
        self.buffered.as_ref().ok_or(TokenizerError::Exhausted)
    }

    fn next(&mut self) -> Result<Token, TokenizerError> {
        self.fill()?;
        self.buffered.take().ok_or(TokenizerError::Exhausted)
    }

    fn close(&mut self) {
        self.buffered = None;
        self.inner.close();
    }
}

impl<S: TokenSource> Drop for ProductionTokenizer<S> {
    fn drop(&mut self) {
        self.close();
    }
}
