//! Parse trees
//!
//! Interpreting a production yields a [`Symbol`] tree:
//!
//! - [`TerminalSymbol`]: a consumed token, produced by a terminal
//! - [`NonTerminalSymbol`]: ordered children, produced by empty, sequence and
//!   repetition nodes (an alternation returns the symbol of the alternative it chose)
//! - [`SingletonSymbol`]: zero or one child, produced by optional nodes
//!
//! Each symbol keeps its `origin`, the production that produced it. The origin is a
//! shared handle to an immutable node and is only meant for introspection;
//! productions never point back at symbols.
//!
//! Trees are built in one pass and never change afterwards. Each parse builds its own
//! tree, owned by the caller.

pub mod treeviz;
pub mod visitor;

pub use treeviz::{to_treeviz_str, to_treeviz_str_with};
pub use visitor::SymbolVisitor;

use crate::production::Production;
use crate::token::{Token, TokenKind};
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Terminal,
    NonTerminal,
    Singleton,
}

/// A parse-tree node
#[derive(Debug, Clone)]
pub enum Symbol {
    Terminal(TerminalSymbol),
    NonTerminal(NonTerminalSymbol),
    Singleton(SingletonSymbol),
}

impl Symbol {
    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Terminal(_) => SymbolKind::Terminal,
            Symbol::NonTerminal(_) => SymbolKind::NonTerminal,
            Symbol::Singleton(_) => SymbolKind::Singleton,
        }
    }

    /// The production this symbol was produced by
    pub fn origin(&self) -> &Production {
        match self {
            Symbol::Terminal(symbol) => symbol.origin(),
            Symbol::NonTerminal(symbol) => symbol.origin(),
            Symbol::Singleton(symbol) => symbol.origin(),
        }
    }

    pub fn children(&self) -> &[Symbol] {
        match self {
            Symbol::Terminal(_) => &[],
            Symbol::NonTerminal(symbol) => symbol.children(),
            Symbol::Singleton(symbol) => symbol.as_non_terminal().children(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.children().get(index)
    }

    /// Number of direct children
    pub fn len(&self) -> usize {
        self.children().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children().is_empty()
    }

    pub fn as_terminal(&self) -> Option<&TerminalSymbol> {
        match self {
            Symbol::Terminal(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// The concatenated values of all terminals below this symbol
    pub fn text(&self) -> String {
        self.to_string()
    }

    /// All terminal leaves, left to right
    pub fn terminals(&self) -> Vec<&TerminalSymbol> {
        let mut terminals = Vec::new();
        self.collect_terminals(&mut terminals);
        terminals
    }

    fn collect_terminals<'a>(&'a self, terminals: &mut Vec<&'a TerminalSymbol>) {
        match self {
            Symbol::Terminal(symbol) => terminals.push(symbol),
            _ => {
                for child in self.children() {
                    child.collect_terminals(terminals);
                }
            }
        }
    }

    /// Source span from the first to the last terminal; `None` if there are none
    pub fn span(&self) -> Option<Range<usize>> {
        let terminals = self.terminals();
        let first = terminals.first()?;
        let last = terminals.last()?;
        Some(first.token().span().start..last.token().span().end)
    }

    /// Collapse this symbol into one token
    ///
    /// A terminal gives back its token. Anything else becomes a
    /// [`TokenKind::Composite`] token holding the symbol's text.
    pub fn to_token(&self) -> Token {
        match self {
            Symbol::Terminal(symbol) => symbol.token().clone(),
            _ => Token::new(
                self.text(),
                TokenKind::Composite,
                self.span().unwrap_or(0..0),
            ),
        }
    }

    /// Dispatch to the visitor method for this symbol's kind
    pub fn accept<V, P>(&self, visitor: &mut V, param: P) -> V::Output
    where
        V: SymbolVisitor<P> + ?Sized,
    {
        match self {
            Symbol::Terminal(symbol) => visitor.visit_terminal(symbol, param),
            Symbol::NonTerminal(symbol) => visitor.visit_non_terminal(symbol, param),
            Symbol::Singleton(symbol) => visitor.visit_singleton(symbol, param),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(symbol) => symbol.fmt(f),
            Symbol::NonTerminal(symbol) => symbol.fmt(f),
            Symbol::Singleton(symbol) => symbol.fmt(f),
        }
    }
}

/// A consumed token
#[derive(Debug, Clone)]
pub struct TerminalSymbol {
    origin: Production,
    token: Token,
}

impl TerminalSymbol {
    pub(crate) fn new(origin: Production, token: Token) -> Self {
        Self { origin, token }
    }

    pub fn origin(&self) -> &Production {
        &self.origin
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn value(&self) -> &str {
        self.token.value()
    }
}

impl fmt::Display for TerminalSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// A node with ordered children
#[derive(Debug, Clone)]
pub struct NonTerminalSymbol {
    origin: Production,
    children: Vec<Symbol>,
}

impl NonTerminalSymbol {
    pub(crate) fn new(origin: Production, children: Vec<Symbol>) -> Self {
        Self { origin, children }
    }

    pub fn origin(&self) -> &Production {
        &self.origin
    }

    pub fn children(&self) -> &[Symbol] {
        &self.children
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.children.iter()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<'a> IntoIterator for &'a NonTerminalSymbol {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for NonTerminalSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in &self.children {
            child.fmt(f)?;
        }
        Ok(())
    }
}

/// The result of an optional node: a non-terminal with at most one child
#[derive(Debug, Clone)]
pub struct SingletonSymbol {
    inner: NonTerminalSymbol,
}

impl SingletonSymbol {
    pub(crate) fn new(origin: Production, symbol: Option<Symbol>) -> Self {
        Self {
            inner: NonTerminalSymbol::new(origin, symbol.into_iter().collect()),
        }
    }

    pub fn origin(&self) -> &Production {
        self.inner.origin()
    }

    /// The child, when the optional part was present
    pub fn get(&self) -> Option<&Symbol> {
        self.inner.children().first()
    }

    pub fn is_present(&self) -> bool {
        !self.inner.is_empty()
    }

    /// This singleton seen as a non-terminal with zero or one child
    pub fn as_non_terminal(&self) -> &NonTerminalSymbol {
        &self.inner
    }
}

impl fmt::Display for SingletonSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}
