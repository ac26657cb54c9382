//! # regram
//!
//! Grammar combinators over regex terminals, with two views of every grammar:
//!
//! - a derived regular expression, for validating whole strings, and
//! - a predictive LL(1) interpreter that consumes a token stream and builds a
//!   parse tree of [`Symbol`]s.
//!
//! ```text
//! let bit = Production::one_of(["1", "0"])?;
//! let bits = bit.repeat();
//!
//! assert_eq!(bits.to_string(), "(?:(?:(?:1)|(?:0)))*");
//! assert!(bits.matches("1010")?);
//!
//! let tree = bits.parse_remaining_str("1010")?;
//! assert_eq!(tree.len(), 4);
//! ```
//!
//! ## Modules
//!
//! - [`production`]: the grammar nodes, FIRST sets and the interpreter
//! - [`symbol`]: parse trees, the [`SymbolVisitor`] trait and tree rendering
//! - [`token`] / [`tokenizer`]: tokens and pluggable token sources
//! - [`grammar`]: named rules loaded from YAML or JSON documents
//! - [`error`]: error types
//!
//! Grammars must be LL(1)-safe: alternatives should start with distinct terminals
//! and optional or repeated parts should not start with what may follow them. This
//! is assumed, not checked; see [`production`] for what happens otherwise.

pub mod error;
pub mod grammar;
pub mod production;
pub mod symbol;
pub mod token;
pub mod tokenizer;

pub use error::{Found, GrammarError, ParseError, TokenizerError};
pub use grammar::Grammar;
pub use production::{Element, LookaheadSet, Production, ProductionId, ProductionKind, Terminal};
pub use symbol::{
    NonTerminalSymbol, SingletonSymbol, Symbol, SymbolKind, SymbolVisitor, TerminalSymbol,
};
pub use token::{Token, TokenKind};
pub use tokenizer::{
    CharTokenizerFactory, ProductionTokenizer, TokenSource, TokenizerFactory, VecTokenizer,
};
