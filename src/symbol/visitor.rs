//! Visitor trait for symbol trees
//!
//! Implement [`SymbolVisitor`] and hand it to [`Symbol::accept`](super::Symbol::accept), which dispatches on
//! the symbol kind. Terminal and non-terminal handlers are required. Singletons are
//! non-terminals with at most one child, so by default they are handed to
//! [`SymbolVisitor::visit_non_terminal`]; override [`SymbolVisitor::visit_singleton`]
//! to treat them differently.
//!
//! The visitor drives its own recursion: a non-terminal handler that wants to descend
//! calls `accept` on the children it cares about, with whatever parameter the children
//! need (an indentation level, a path, ...).
//!
//! # Example
//!
//! ```ignore
//! struct Leaves(Vec<String>);
//!
//! impl SymbolVisitor for Leaves {
//!     type Output = ();
//!
//!     fn visit_terminal(&mut self, symbol: &TerminalSymbol, _: ()) {
//!         self.0.push(symbol.value().to_string());
//!     }
//!
//!     fn visit_non_terminal(&mut self, symbol: &NonTerminalSymbol, _: ()) {
//!         for child in symbol {
//!             child.accept(self, ());
//!         }
//!     }
//! }
//! ```

use super::{NonTerminalSymbol, SingletonSymbol, TerminalSymbol};

/// Handlers for the three symbol kinds, parameterized by `P`
pub trait SymbolVisitor<P = ()> {
    type Output;

    fn visit_terminal(&mut self, symbol: &TerminalSymbol, param: P) -> Self::Output;

    fn visit_non_terminal(&mut self, symbol: &NonTerminalSymbol, param: P) -> Self::Output;

    fn visit_singleton(&mut self, symbol: &SingletonSymbol, param: P) -> Self::Output {
        self.visit_non_terminal(symbol.as_non_terminal(), param)
    }
}
