//! Productions - regex-backed grammar rules
//!
//! A [`Production`] is an immutable node of a grammar tree. It is built from regex
//! terminals with four combinators (sequence, alternation, optional, repetition) plus
//! the empty production, and it offers two views of the same language:
//!
//! - a derived regular expression ([`Production::pattern`], [`Production::matches`])
//!   for validating a whole string at once, and
//! - a predictive interpreter ([`Production::parse`], [`Production::parse_remaining`])
//!   that consumes a [`TokenSource`] and builds a [`Symbol`] tree.
//!
//! The interpreter never backtracks. Every choice (take an optional child or not, pick
//! an alternative, run another repetition) is made from one token of lookahead against
//! FIRST sets computed from the grammar, with the set of terminals that may follow the
//! current node threaded down from its context.
//!
//! ## Building
//!
//! ```text
//! let bit = Production::one_of(["1", "0"])?;      // (?:(?:1)|(?:0))
//! let word = Production::of([&bit, &bit])?;        // (?:(?:(?:1)|(?:0)))(?:...)
//! let bits = seq![&word, bit.repeat()]?;           // heterogeneous elements
//! ```
//!
//! ## Hazards
//!
//! The engine assumes an LL(1)-safe grammar and does not check it. When two
//! alternatives can start with the same token the first declared one wins, and a
//! repetition whose child can be entered yet consume nothing does not make progress.

mod interpret;
mod lookahead;
mod pattern;

pub use lookahead::LookaheadSet;

use crate::error::{GrammarError, ParseError};
use crate::symbol::Symbol;
use crate::token::Token;
use crate::tokenizer::{TokenSource, VecTokenizer};
use once_cell::sync::OnceCell;
use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a production node
///
/// Every constructed node gets a fresh id; cloning a [`Production`] handle keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductionId(u64);

impl ProductionId {
    fn fresh() -> Self {
        ProductionId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ProductionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The six kinds of grammar node
#[derive(Debug)]
pub enum ProductionKind {
    /// Matches exactly one token whose value fully matches a regex
    Terminal(Terminal),
    /// Matches zero tokens
    Empty,
    /// Matches its children in order (never empty; see [`Production::sequence`])
    Sequence(Vec<Production>),
    /// Matches exactly one of its alternatives (never empty; see [`Production::alternation`])
    Alternation(Vec<Production>),
    /// Matches its child zero or one time
    Optional(Production),
    /// Matches its child zero or more times
    Repetition(Production),
}

/// A regex terminal
#[derive(Debug)]
pub struct Terminal {
    expr: String,
    matcher: Regex,
}

impl Terminal {
    /// The regex expression as written
    pub fn expr(&self) -> &str {
        &self.expr
    }

    /// Whether `value` matches the expression in full
    pub fn matches(&self, value: &str) -> bool {
        self.matcher.is_match(value)
    }
}

struct Node {
    id: ProductionId,
    kind: ProductionKind,
    is_option: bool,
    pattern: OnceCell<String>,
    regex: OnceCell<Regex>,
}

/// A grammar rule
///
/// Cheap to clone: clones share the node (and its identity). Productions are
/// immutable and `Send + Sync`, so one grammar can serve any number of concurrent
/// parses, each against its own token source.
#[derive(Clone)]
pub struct Production(Arc<Node>);

/// One argument of [`Production::of`] / [`Production::one_of`]: a regex that becomes a
/// terminal, or an existing production
#[derive(Debug, Clone)]
pub enum Element {
    Regex(String),
    Production(Production),
}

impl Element {
    fn into_production(self) -> Result<Production, GrammarError> {
        match self {
            Element::Regex(expr) => Production::terminal(expr),
            Element::Production(production) => Ok(production),
        }
    }
}

impl From<&str> for Element {
    fn from(expr: &str) -> Self {
        Element::Regex(expr.to_string())
    }
}

impl From<String> for Element {
    fn from(expr: String) -> Self {
        Element::Regex(expr)
    }
}

impl From<&String> for Element {
    fn from(expr: &String) -> Self {
        Element::Regex(expr.clone())
    }
}

impl From<Production> for Element {
    fn from(production: Production) -> Self {
        Element::Production(production)
    }
}

impl From<&Production> for Element {
    fn from(production: &Production) -> Self {
        Element::Production(production.clone())
    }
}

impl Production {
    fn from_kind(kind: ProductionKind) -> Self {
        let is_option = match &kind {
            ProductionKind::Terminal(_) => false,
            ProductionKind::Empty => true,
            ProductionKind::Sequence(children) => children.iter().all(Production::is_option),
            ProductionKind::Alternation(alternatives) => {
                alternatives.iter().any(Production::is_option)
            }
            ProductionKind::Optional(_) | ProductionKind::Repetition(_) => true,
        };
        Production(Arc::new(Node {
            id: ProductionId::fresh(),
            kind,
            is_option,
            pattern: OnceCell::new(),
            regex: OnceCell::new(),
        }))
    }

    /// A terminal matching one token whose value fully matches `expr`
    ///
    /// The expression must be a valid regex on its own. A rule that matches nothing
    /// is written with [`Production::empty`], not with a zero-width terminal.
    pub fn terminal(expr: impl Into<String>) -> Result<Self, GrammarError> {
        let expr = expr.into();
        let matcher = pattern::compile_terminal(&expr)?;
        Ok(Self::from_kind(ProductionKind::Terminal(Terminal {
            expr,
            matcher,
        })))
    }

    /// The production matching zero tokens
    pub fn empty() -> Self {
        Self::from_kind(ProductionKind::Empty)
    }

    /// Children in order; no children gives [`Production::empty`]
    pub fn sequence(children: impl IntoIterator<Item = Production>) -> Self {
        let children: Vec<Production> = children.into_iter().collect();
        if children.is_empty() {
            Self::empty()
        } else {
            Self::from_kind(ProductionKind::Sequence(children))
        }
    }

    /// Exactly one of the alternatives; no alternatives gives [`Production::empty`]
    pub fn alternation(alternatives: impl IntoIterator<Item = Production>) -> Self {
        let alternatives: Vec<Production> = alternatives.into_iter().collect();
        if alternatives.is_empty() {
            Self::empty()
        } else {
            Self::from_kind(ProductionKind::Alternation(alternatives))
        }
    }

    /// A one-child sequence around `production`
    ///
    /// Matches the same language; the parse tree gains a node whose origin is the new
    /// production, which is how named sub-rules show up in a tree.
    pub fn wrap(production: &Production) -> Self {
        Self::from_kind(ProductionKind::Sequence(vec![production.clone()]))
    }

    /// Sequence of elements
    ///
    /// Zero elements give the empty production, a single regex gives that terminal,
    /// a single production is wrapped (see [`Production::wrap`]).
    pub fn of<I, E>(elements: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = E>,
        E: Into<Element>,
    {
        let mut elements: Vec<Element> = elements.into_iter().map(Into::into).collect();
        if elements.len() == 1 {
            return match elements.pop() {
                Some(Element::Regex(expr)) => Self::terminal(expr),
                Some(Element::Production(production)) => Ok(Self::wrap(&production)),
                None => Ok(Self::empty()),
            };
        }
        let children = elements
            .into_iter()
            .map(Element::into_production)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::sequence(children))
    }

    /// Alternation of elements; zero elements give the empty production
    pub fn one_of<I, E>(elements: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = E>,
        E: Into<Element>,
    {
        let alternatives = elements
            .into_iter()
            .map(|element| element.into().into_production())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::alternation(alternatives))
    }

    /// Zero or one occurrence of this production
    pub fn opt(&self) -> Self {
        Self::from_kind(ProductionKind::Optional(self.clone()))
    }

    /// Zero or more occurrences of this production
    pub fn repeat(&self) -> Self {
        Self::from_kind(ProductionKind::Repetition(self.clone()))
    }

    pub fn id(&self) -> ProductionId {
        self.0.id
    }

    pub fn kind(&self) -> &ProductionKind {
        &self.0.kind
    }

    /// Direct children (one for optional and repetition, none for leaves)
    pub fn children(&self) -> &[Production] {
        match &self.0.kind {
            ProductionKind::Terminal(_) | ProductionKind::Empty => &[],
            ProductionKind::Sequence(children) | ProductionKind::Alternation(children) => {
                children
            }
            ProductionKind::Optional(child) | ProductionKind::Repetition(child) => {
                std::slice::from_ref(child)
            }
        }
    }

    /// Whether this production can match zero tokens
    pub fn is_option(&self) -> bool {
        self.0.is_option
    }

    /// The equivalent regular expression, derived once and cached
    pub fn pattern(&self) -> &str {
        self.0.pattern.get_or_init(|| pattern::derive(self))
    }

    /// The derived pattern compiled and anchored at both ends
    pub fn as_regex(&self) -> Result<&Regex, GrammarError> {
        self.0
            .regex
            .get_or_try_init(|| pattern::compile_anchored(self.pattern()))
    }

    /// Whole-string validation against the derived pattern
    pub fn matches(&self, input: &str) -> Result<bool, GrammarError> {
        Ok(self.as_regex()?.is_match(input))
    }

    /// FIRST set with nothing following: the terminals this production can start with
    pub fn first_set(&self) -> LookaheadSet {
        self.first_set_following(&LookaheadSet::new())
    }

    /// Whether `token` is matched by this production when it is a terminal
    pub(crate) fn matches_token(&self, token: &Token) -> bool {
        match &self.0.kind {
            ProductionKind::Terminal(terminal) => terminal.matches(token.value()),
            _ => false,
        }
    }

    /// Interpret this production against `tokens`, as if nothing may follow it
    #[tracing::instrument(level = "debug", skip_all, fields(production = %self.id()))]
    pub fn parse(&self, tokens: &mut dyn TokenSource) -> Result<Symbol, ParseError> {
        self.interpret(tokens, &LookaheadSet::end_of_input())
    }

    /// Like [`Production::parse`], then fail if any token is left
    pub fn parse_remaining(&self, tokens: &mut dyn TokenSource) -> Result<Symbol, ParseError> {
        let symbol = self.parse(tokens)?;
        if tokens.has_next() {
            let next = tokens.peek()?.clone();
            debug!(production = %self.id(), next = next.value(), "input left after match");
            return Err(ParseError::TooManyTokens { next });
        }
        Ok(symbol)
    }

    /// [`Production::parse`] over the character tokens of `input`
    pub fn parse_str(&self, input: &str) -> Result<Symbol, ParseError> {
        let mut tokens = VecTokenizer::chars(input);
        self.parse(&mut tokens)
    }

    /// [`Production::parse_remaining`] over the character tokens of `input`
    pub fn parse_remaining_str(&self, input: &str) -> Result<Symbol, ParseError> {
        let mut tokens = VecTokenizer::chars(input);
        self.parse_remaining(&mut tokens)
    }
}

impl PartialEq for Production {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Production {}

impl Hash for Production {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Production")
            .field("id", &self.id())
            .field("pattern", &self.pattern())
            .finish()
    }
}

/// Renders the derived pattern
impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

/// Sequence of heterogeneous elements, see [`Production::of`]
///
/// ```text
/// let number = seq!["-", digits.opt(), &digit]?;
/// ```
#[macro_export]
macro_rules! seq {
    ($($element:expr),* $(,)?) => {{
        let elements: ::std::vec::Vec<$crate::Element> =
            ::std::vec![$($crate::Element::from($element)),*];
        $crate::Production::of(elements)
    }};
}

/// Alternation of heterogeneous elements, see [`Production::one_of`]
#[macro_export]
macro_rules! one_of {
    ($($element:expr),* $(,)?) => {{
        let elements: ::std::vec::Vec<$crate::Element> =
            ::std::vec![$($crate::Element::from($element)),*];
        $crate::Production::one_of(elements)
    }};
}
