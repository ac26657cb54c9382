//! Character tokenizer
//!
//! Splits input into one token per character. Classification comes from the logos
//! lexer derived on [`TokenKind`]; every logos pattern matches exactly one character,
//! and characters it rejects become [`TokenKind::Other`] tokens.

use super::{TokenizerFactory, VecTokenizer};
use crate::error::TokenizerError;
use crate::token::{Token, TokenKind};
use logos::Logos;
use std::io::Read;

/// Tokenize `source` into one token per character, with byte spans
pub fn tokenize_chars(source: &str) -> Vec<Token> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::with_capacity(source.len());

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token::new(lexer.slice(), kind, span)),
            Err(()) => {
                for (offset, ch) in lexer.slice().char_indices() {
                    let start = span.start + offset;
                    tokens.push(Token::new(
                        ch.to_string(),
                        TokenKind::Other,
                        start..start + ch.len_utf8(),
                    ));
                }
            }
        }
    }

    tokens
}

/// Builds [`VecTokenizer`]s of character tokens from readers
#[derive(Debug, Clone, Copy, Default)]
pub struct CharTokenizerFactory;

impl TokenizerFactory for CharTokenizerFactory {
    type Source = VecTokenizer;

    fn create_tokenizer<R: Read>(&self, mut reader: R) -> Result<VecTokenizer, TokenizerError> {
        let mut source = String::new();
        reader
            .read_to_string(&mut source)
            .map_err(|err| TokenizerError::Io(err.to_string()))?;
        Ok(VecTokenizer::new(tokenize_chars(&source)))
    }
}
