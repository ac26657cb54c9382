//! Predictive interpretation
//!
//! FIRST-set computation and the recursive-descent interpreter shared by all
//! production kinds. Both take the follow set of the node being visited, i.e. what the
//! surrounding context allows right after it:
//!
//! - a sequence hands child *i* the FIRST set of children *i+1..n* under its own
//!   follow set, so an optional child sees what may legally come after it;
//! - optional and alternation nodes decide with one token of lookahead against their
//!   children's FIRST sets under that follow set;
//! - a repetition keeps going while the lookahead can start another iteration.
//!
//! Nothing is retried: the first mismatch is returned to the caller as is.

use super::{LookaheadSet, Production, ProductionKind};
use crate::error::{Found, ParseError, TokenizerError};
use crate::symbol::{NonTerminalSymbol, SingletonSymbol, Symbol, TerminalSymbol};
use crate::tokenizer::TokenSource;
use tracing::trace;

impl Production {
    /// FIRST set of this production when `follow` may come right after it
    ///
    /// The result contains members of `follow` exactly when this production can
    /// match zero tokens.
    pub fn first_set_following(&self, follow: &LookaheadSet) -> LookaheadSet {
        match self.kind() {
            ProductionKind::Terminal(_) => LookaheadSet::terminal(self.clone()),
            ProductionKind::Empty => follow.clone(),
            ProductionKind::Sequence(children) => first_of_sequence(children, follow),
            ProductionKind::Alternation(alternatives) => {
                let mut first = LookaheadSet::new();
                for alternative in alternatives {
                    first.extend(&alternative.first_set_following(follow));
                }
                first
            }
            ProductionKind::Optional(child) | ProductionKind::Repetition(child) => {
                let mut first = child.first_set_following(follow);
                first.extend(follow);
                first
            }
        }
    }

    pub(crate) fn interpret(
        &self,
        tokens: &mut dyn TokenSource,
        follow: &LookaheadSet,
    ) -> Result<Symbol, ParseError> {
        match self.kind() {
            ProductionKind::Terminal(terminal) => {
                if tokens.has_next() && terminal.matches(tokens.peek()?.value()) {
                    let token = tokens.next()?;
                    trace!(
                        production = %self.id(),
                        lookahead = ?token.value(),
                        "terminal matched"
                    );
                    return Ok(Symbol::Terminal(TerminalSymbol::new(self.clone(), token)));
                }
                Err(mismatch(LookaheadSet::terminal(self.clone()), tokens))
            }
            ProductionKind::Empty => Ok(Symbol::NonTerminal(NonTerminalSymbol::new(
                self.clone(),
                Vec::new(),
            ))),
            ProductionKind::Sequence(children) => {
                let mut symbols = Vec::with_capacity(children.len());
                for (index, child) in children.iter().enumerate() {
                    let child_follow = first_of_sequence(&children[index + 1..], follow);
                    symbols.push(child.interpret(tokens, &child_follow)?);
                }
                Ok(Symbol::NonTerminal(NonTerminalSymbol::new(
                    self.clone(),
                    symbols,
                )))
            }
            ProductionKind::Alternation(alternatives) => {
                // Declaration order decides when several alternatives admit the lookahead
                for (index, alternative) in alternatives.iter().enumerate() {
                    if alternative.first_set_following(follow).admits(tokens)? {
                        trace!(
                            production = %self.id(),
                            lookahead = %lookahead(tokens).unwrap_or(Found::EndOfInput),
                            alternative = index,
                            "alternative selected"
                        );
                        return alternative.interpret(tokens, follow);
                    }
                }
                Err(mismatch(self.first_set_following(follow), tokens))
            }
            ProductionKind::Optional(child) => {
                let present = child.first_set_following(follow).admits(tokens)?;
                trace!(
                    production = %self.id(),
                    lookahead = %lookahead(tokens).unwrap_or(Found::EndOfInput),
                    present,
                    "optional decided"
                );
                let symbol = if present {
                    Some(child.interpret(tokens, follow)?)
                } else {
                    None
                };
                Ok(Symbol::Singleton(SingletonSymbol::new(self.clone(), symbol)))
            }
            ProductionKind::Repetition(child) => {
                // Only tokens that start the child itself open another iteration;
                // anything admitted through the follow set ends the loop
                let gate = child.first_set();
                let mut iteration_follow = gate.clone();
                iteration_follow.extend(follow);

                let mut symbols = Vec::new();
                while gate.admits(tokens)? {
                    trace!(
                        production = %self.id(),
                        lookahead = %lookahead(tokens).unwrap_or(Found::EndOfInput),
                        iteration = symbols.len(),
                        "repetition continues"
                    );
                    symbols.push(child.interpret(tokens, &iteration_follow)?);
                }
                Ok(Symbol::NonTerminal(NonTerminalSymbol::new(
                    self.clone(),
                    symbols,
                )))
            }
        }
    }
}

/// FIRST set of `children` matched in order, followed by `follow`
pub(super) fn first_of_sequence(children: &[Production], follow: &LookaheadSet) -> LookaheadSet {
    match children.split_first() {
        None => follow.clone(),
        Some((head, rest)) if head.is_option() => {
            head.first_set_following(&first_of_sequence(rest, follow))
        }
        Some((head, _)) => head.first_set(),
    }
}

/// The next token, without consuming it
fn lookahead(tokens: &mut dyn TokenSource) -> Result<Found, TokenizerError> {
    if !tokens.has_next() {
        return Ok(Found::EndOfInput);
    }
    Ok(Found::Token(tokens.peek()?.clone()))
}

fn mismatch(expected: LookaheadSet, tokens: &mut dyn TokenSource) -> ParseError {
    match lookahead(tokens) {
        Ok(found) => {
            trace!(%expected, lookahead = %found, "rule mismatch");
            ParseError::RuleMismatch { expected, found }
        }
        Err(err) => err.into(),
    }
}
