//! Error types for grammar construction, tokenization and parsing
//!
//! Parsing is fail-fast: the first [`ParseError`] raised anywhere in the recursion
//! aborts the whole parse and reaches the caller unchanged. There is no recovery,
//! no partial result and no backtracking.

use crate::production::LookaheadSet;
use crate::token::Token;
use std::fmt;

/// Errors raised while building productions or loading grammar documents
#[derive(Debug, Clone, PartialEq)]
pub enum GrammarError {
    /// A terminal expression (or a derived pattern) is not a valid regex
    InvalidPattern { expr: String, message: String },
    /// A grammar document references a rule that is not defined before it
    UnknownRule(String),
    /// A grammar document defines the same rule name twice
    DuplicateRule(String),
    /// A rule node is malformed (e.g. names two combinators at once)
    InvalidRule { name: String, message: String },
    /// The grammar document could not be deserialized
    Format(String),
    /// The grammar document could not be read
    Io(String),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::InvalidPattern { expr, message } => {
                write!(f, "Invalid pattern '{}': {}", expr, message)
            }
            GrammarError::UnknownRule(name) => write!(f, "Unknown rule '{}'", name),
            GrammarError::DuplicateRule(name) => write!(f, "Rule '{}' is defined twice", name),
            GrammarError::InvalidRule { name, message } => {
                write!(f, "Invalid rule '{}': {}", name, message)
            }
            GrammarError::Format(msg) => write!(f, "Invalid grammar document: {}", msg),
            GrammarError::Io(msg) => write!(f, "Failed to read grammar document: {}", msg),
        }
    }
}

impl std::error::Error for GrammarError {}

/// Errors raised by a token source itself
#[derive(Debug, Clone)]
pub enum TokenizerError {
    /// `peek` or `next` was called with no token available
    Exhausted,
    /// The underlying reader failed
    Io(String),
    /// A layered tokenizer produced a token that covers no input
    EmptyToken { offset: usize },
    /// A layered tokenizer failed to parse its next token from the layer below
    Layer(Box<ParseError>),
}

impl fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerError::Exhausted => write!(f, "No more tokens"),
            TokenizerError::Io(msg) => write!(f, "Failed to read input: {}", msg),
            TokenizerError::EmptyToken { offset } => {
                write!(f, "Empty token produced at offset {}", offset)
            }
            TokenizerError::Layer(err) => write!(f, "Tokenizer layer failed: {}", err),
        }
    }
}

impl std::error::Error for TokenizerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TokenizerError::Layer(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// What the interpreter saw where it expected something else
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    Token(Token),
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token(token) => write!(f, "{:?}", token.value()),
            Found::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Errors raised by the parse entry points
#[derive(Debug, Clone)]
pub enum ParseError {
    /// The lookahead is not in the FIRST set of the production being interpreted
    RuleMismatch { expected: LookaheadSet, found: Found },
    /// `parse_remaining` matched completely but input is left over
    TooManyTokens { next: Token },
    /// The token source failed
    Tokenizer(TokenizerError),
}

impl ParseError {
    /// Byte offset of the offending token, when there is one
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::RuleMismatch {
                found: Found::Token(token),
                ..
            } => Some(token.span().start),
            ParseError::RuleMismatch { .. } => None,
            ParseError::TooManyTokens { next } => Some(next.span().start),
            ParseError::Tokenizer(TokenizerError::Layer(err)) => err.position(),
            ParseError::Tokenizer(TokenizerError::EmptyToken { offset }) => Some(*offset),
            ParseError::Tokenizer(_) => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::RuleMismatch { expected, found } => {
                write!(f, "Rule mismatch: expected one of {}, found {}", expected, found)?;
                if let Found::Token(token) = found {
                    write!(f, " at {}", token.span().start)?;
                }
                Ok(())
            }
            ParseError::TooManyTokens { next } => write!(
                f,
                "Too many tokens: input continues with {:?} at {}",
                next.value(),
                next.span().start
            ),
            ParseError::Tokenizer(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Tokenizer(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TokenizerError> for ParseError {
    fn from(err: TokenizerError) -> Self {
        ParseError::Tokenizer(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn test_position_of_too_many_tokens() {
        let err = ParseError::TooManyTokens {
            next: Token::new("0", TokenKind::Digit, 2..3),
        };
        assert_eq!(err.position(), Some(2));
        assert_eq!(err.to_string(), "Too many tokens: input continues with \"0\" at 2");
    }

    #[test]
    fn test_position_through_layer() {
        let inner = ParseError::TooManyTokens {
            next: Token::new("x", TokenKind::Letter, 7..8),
        };
        let err = ParseError::from(TokenizerError::Layer(Box::new(inner)));
        assert_eq!(err.position(), Some(7));
    }

    #[test]
    fn test_exhausted_has_no_position() {
        let err = ParseError::from(TokenizerError::Exhausted);
        assert_eq!(err.position(), None);
        assert_eq!(err.to_string(), "No more tokens");
    }
}
