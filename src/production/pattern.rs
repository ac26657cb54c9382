//! Regex derivation
//!
//! Every production has a pattern in the `regex` crate dialect that accepts the same
//! language as its interpreter. Composite nodes wrap each child in a non-capturing
//! group so precedence and inline flags stay local to the child:
//!
//! | kind        | pattern                |
//! |-------------|------------------------|
//! | terminal    | `expr`                 |
//! | empty       | (empty string)         |
//! | sequence    | `(?:a)(?:b)`           |
//! | alternation | `(?:(?:a)\|(?:b))`     |
//! | optional    | `(?:a)?`               |
//! | repetition  | `(?:a)*`               |

use super::{Production, ProductionKind};
use crate::error::GrammarError;
use regex::Regex;

pub(super) fn derive(production: &Production) -> String {
    match production.kind() {
        ProductionKind::Terminal(terminal) => terminal.expr().to_string(),
        ProductionKind::Empty => String::new(),
        ProductionKind::Sequence(children) => children.iter().map(group).collect(),
        ProductionKind::Alternation(alternatives) => {
            let union: Vec<String> = alternatives.iter().map(group).collect();
            format!("(?:{})", union.join("|"))
        }
        ProductionKind::Optional(child) => format!("{}?", group(child)),
        ProductionKind::Repetition(child) => format!("{}*", group(child)),
    }
}

fn group(production: &Production) -> String {
    format!("(?:{})", production.pattern())
}

/// Compile a terminal expression for full matches against token values
///
/// The expression is checked on its own first: a fragment such as `a)|(b` only
/// parses once it is wrapped, and would change meaning inside derived patterns.
pub(super) fn compile_terminal(expr: &str) -> Result<Regex, GrammarError> {
    Regex::new(expr).map_err(|err| invalid(expr, err))?;
    compile_anchored(expr)
}

pub(super) fn compile_anchored(pattern: &str) -> Result<Regex, GrammarError> {
    Regex::new(&format!(r"\A(?:{})\z", pattern)).map_err(|err| invalid(pattern, err))
}

fn invalid(expr: &str, err: regex::Error) -> GrammarError {
    GrammarError::InvalidPattern {
        expr: expr.to_string(),
        message: err.to_string(),
    }
}
