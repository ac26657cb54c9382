//! A token source over an in-memory token list

use super::{tokenize_chars, TokenSource};
use crate::error::TokenizerError;
use crate::token::Token;
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct VecTokenizer {
    tokens: VecDeque<Token>,
}

impl VecTokenizer {
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    /// One token per character of `source`
    pub fn chars(source: &str) -> Self {
        Self::new(tokenize_chars(source))
    }

    /// Number of tokens not consumed yet
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}

impl TokenSource for VecTokenizer {
    fn has_next(&self) -> bool {
        !self.tokens.is_empty()
    }

    fn peek(&mut self) -> Result<&Token, TokenizerError> {
        self.tokens.front().ok_or(TokenizerError::Exhausted)
    }

    fn next(&mut self) -> Result<Token, TokenizerError> {
        self.tokens.pop_front().ok_or(TokenizerError::Exhausted)
    }

    fn close(&mut self) {
        self.tokens.clear();
    }
}
