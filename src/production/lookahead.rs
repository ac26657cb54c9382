//! FIRST and follow sets
//!
//! A [`LookaheadSet`] holds terminal productions plus a synthetic end-of-input member.
//! The same type serves as the FIRST set of a production and as the follow set its
//! context threads down to it. Terminals keep insertion order so diagnostics list
//! expected terminals in grammar order.

use super::{Production, ProductionKind};
use crate::error::TokenizerError;
use crate::tokenizer::TokenSource;
use std::fmt;

/// A set of terminals, optionally including end of input
#[derive(Debug, Clone, Default)]
pub struct LookaheadSet {
    terminals: Vec<Production>,
    end_of_input: bool,
}

impl LookaheadSet {
    /// The empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// The set holding only end of input
    pub fn end_of_input() -> Self {
        Self {
            terminals: Vec::new(),
            end_of_input: true,
        }
    }

    pub(crate) fn terminal(terminal: Production) -> Self {
        Self {
            terminals: vec![terminal],
            end_of_input: false,
        }
    }

    /// Add a terminal; returns false when `terminal` is not a terminal production
    /// or is already present
    pub fn insert(&mut self, terminal: &Production) -> bool {
        if !matches!(terminal.kind(), ProductionKind::Terminal(_)) || self.contains(terminal) {
            return false;
        }
        self.terminals.push(terminal.clone());
        true
    }

    /// Union with `other`, in place
    pub fn extend(&mut self, other: &LookaheadSet) {
        for terminal in &other.terminals {
            if !self.contains(terminal) {
                self.terminals.push(terminal.clone());
            }
        }
        self.end_of_input |= other.end_of_input;
    }

    pub fn contains(&self, terminal: &Production) -> bool {
        self.terminals.iter().any(|member| member == terminal)
    }

    pub fn contains_end_of_input(&self) -> bool {
        self.end_of_input
    }

    pub fn terminals(&self) -> &[Production] {
        &self.terminals
    }

    /// Number of members, end of input included
    pub fn len(&self) -> usize {
        self.terminals.len() + usize::from(self.end_of_input)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the next token of `tokens` (or end of input) is in the set
    pub(crate) fn admits(&self, tokens: &mut dyn TokenSource) -> Result<bool, TokenizerError> {
        if !tokens.has_next() {
            return Ok(self.end_of_input);
        }
        let token = tokens.peek()?;
        Ok(self
            .terminals
            .iter()
            .any(|terminal| terminal.matches_token(token)))
    }
}

/// Equal when both hold the same members, regardless of order
impl PartialEq for LookaheadSet {
    fn eq(&self, other: &Self) -> bool {
        self.end_of_input == other.end_of_input
            && self.terminals.len() == other.terminals.len()
            && self.terminals.iter().all(|terminal| other.contains(terminal))
    }
}

impl Eq for LookaheadSet {}

impl fmt::Display for LookaheadSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut members: Vec<String> = self
            .terminals
            .iter()
            .map(|terminal| terminal.pattern().to_string())
            .collect();
        if self.end_of_input {
            members.push("<end of input>".to_string());
        }
        write!(f, "{{{}}}", members.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_deduplicates_and_keeps_order() {
        let one = Production::terminal("1").unwrap();
        let zero = Production::terminal("0").unwrap();

        let mut set = LookaheadSet::terminal(one.clone());
        let mut other = LookaheadSet::end_of_input();
        other.insert(&zero);
        other.insert(&one);
        set.extend(&other);

        assert_eq!(set.terminals(), &[one, zero][..]);
        assert!(set.contains_end_of_input());
        assert_eq!(set.len(), 3);
        assert_eq!(set.to_string(), "{1, 0, <end of input>}");
    }

    #[test]
    fn test_only_terminals_are_inserted() {
        let one = Production::terminal("1").unwrap();
        let mut set = LookaheadSet::new();
        assert!(!set.insert(&one.opt()));
        assert!(set.insert(&one));
        assert!(!set.insert(&one));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_equality_ignores_order() {
        let one = Production::terminal("1").unwrap();
        let zero = Production::terminal("0").unwrap();
        let mut a = LookaheadSet::new();
        a.insert(&one);
        a.insert(&zero);
        let mut b = LookaheadSet::new();
        b.insert(&zero);
        b.insert(&one);
        assert_eq!(a, b);
        assert_ne!(a, LookaheadSet::end_of_input());
    }
}
