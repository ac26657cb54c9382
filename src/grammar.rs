//! Declarative grammars
//!
//! A grammar document lists named rules in order and optionally names the entry
//! rule. Each rule is a tree of combinators:
//!
//! ```yaml
//! rules:
//!   - name: digit
//!     rule: "[0-9]"              # a plain string is a terminal
//!   - name: number
//!     rule:
//!       seq:
//!         - opt: "-"
//!         - ref: digit
//!         - repeat: { ref: digit }
//! start: number                  # defaults to the last rule
//! ```
//!
//! Node forms: `terminal: regex`, `ref: name`, `seq: [...]`, `one_of: [...]`,
//! `opt: node`, `repeat: node`, and `{}` (or `empty: ~`) for the empty production.
//!
//! A rule may only reference rules defined above it, so documents cannot express
//! recursion. Every rule's top node gets the rule's name; a rule that is a bare
//! `ref` is wrapped (see [`Production::wrap`]) so it still gets a node of its own.
//!
//! Use [`Grammar::from_yaml`] / [`Grammar::from_yaml_file`] for YAML documents and
//! [`Grammar::from_json`] for JSON.

use crate::error::{GrammarError, ParseError};
use crate::production::{Production, ProductionId};
use crate::symbol::{to_treeviz_str_with, Symbol};
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A grammar document as deserialized
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrammarConfig {
    pub rules: Vec<RuleConfig>,
    /// Entry rule; the last rule when absent
    #[serde(default)]
    pub start: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub name: String,
    pub rule: RuleExpr,
}

/// One node of a rule tree
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RuleExpr {
    /// Shorthand for `{ terminal: regex }`
    Terminal(String),
    Node(Box<RuleNode>),
}

/// The long form of a rule node; at most one field may be set
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleNode {
    #[serde(default)]
    pub terminal: Option<String>,
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub seq: Option<Vec<RuleExpr>>,
    #[serde(default)]
    pub one_of: Option<Vec<RuleExpr>>,
    #[serde(default)]
    pub opt: Option<RuleExpr>,
    #[serde(default)]
    pub repeat: Option<RuleExpr>,
    #[serde(default)]
    pub empty: Option<IgnoredAny>,
}

impl RuleNode {
    fn combinators(&self) -> Vec<&'static str> {
        let mut set = Vec::new();
        if self.terminal.is_some() {
            set.push("terminal");
        }
        if self.reference.is_some() {
            set.push("ref");
        }
        if self.seq.is_some() {
            set.push("seq");
        }
        if self.one_of.is_some() {
            set.push("one_of");
        }
        if self.opt.is_some() {
            set.push("opt");
        }
        if self.repeat.is_some() {
            set.push("repeat");
        }
        if self.empty.is_some() {
            set.push("empty");
        }
        set
    }
}

/// Named productions built from a [`GrammarConfig`]
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: Vec<(String, Production)>,
    index: HashMap<String, usize>,
    names: HashMap<ProductionId, usize>,
    start: usize,
}

impl Grammar {
    /// Load a grammar from a YAML string
    pub fn from_yaml(yaml_str: &str) -> Result<Self, GrammarError> {
        let config: GrammarConfig =
            serde_yaml::from_str(yaml_str).map_err(|err| GrammarError::Format(err.to_string()))?;
        Self::from_config(config)
    }

    /// Load a grammar from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, GrammarError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|err| GrammarError::Io(err.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Load a grammar from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, GrammarError> {
        let config: GrammarConfig =
            serde_json::from_str(json_str).map_err(|err| GrammarError::Format(err.to_string()))?;
        Self::from_config(config)
    }

    pub fn from_config(config: GrammarConfig) -> Result<Self, GrammarError> {
        let mut grammar = Grammar {
            rules: Vec::with_capacity(config.rules.len()),
            index: HashMap::new(),
            names: HashMap::new(),
            start: 0,
        };

        for RuleConfig { name, rule } in config.rules {
            if grammar.index.contains_key(&name) {
                return Err(GrammarError::DuplicateRule(name));
            }
            let mut production = grammar.build(&name, &rule)?;
            if grammar.names.contains_key(&production.id()) {
                production = Production::wrap(&production);
            }
            debug!(rule = %name, production = %production.id(), "rule defined");
            let position = grammar.rules.len();
            grammar.index.insert(name.clone(), position);
            grammar.names.insert(production.id(), position);
            grammar.rules.push((name, production));
        }

        grammar.start = match config.start {
            Some(name) => *grammar
                .index
                .get(&name)
                .ok_or(GrammarError::UnknownRule(name))?,
            None => grammar
                .rules
                .len()
                .checked_sub(1)
                .ok_or_else(|| GrammarError::Format("grammar defines no rules".to_string()))?,
        };
        debug!(
            rules = grammar.rules.len(),
            start = %grammar.rules[grammar.start].0,
            "grammar loaded"
        );
        Ok(grammar)
    }

    fn build(&self, name: &str, expr: &RuleExpr) -> Result<Production, GrammarError> {
        match expr {
            RuleExpr::Terminal(regex) => Production::terminal(regex.as_str()),
            RuleExpr::Node(node) => self.build_node(name, node),
        }
    }

    fn build_node(&self, name: &str, node: &RuleNode) -> Result<Production, GrammarError> {
        let combinators = node.combinators();
        if combinators.len() > 1 {
            return Err(GrammarError::InvalidRule {
                name: name.to_string(),
                message: format!("expected one combinator, found {}", combinators.join(", ")),
            });
        }

        if let Some(regex) = &node.terminal {
            return Production::terminal(regex.as_str());
        }
        if let Some(reference) = &node.reference {
            return self
                .rule(reference)
                .cloned()
                .ok_or_else(|| GrammarError::UnknownRule(reference.clone()));
        }
        if let Some(children) = &node.seq {
            return Ok(Production::sequence(self.build_all(name, children)?));
        }
        if let Some(alternatives) = &node.one_of {
            return Ok(Production::alternation(self.build_all(name, alternatives)?));
        }
        if let Some(child) = &node.opt {
            return Ok(self.build(name, child)?.opt());
        }
        if let Some(child) = &node.repeat {
            return Ok(self.build(name, child)?.repeat());
        }
        Ok(Production::empty())
    }

    fn build_all(&self, name: &str, exprs: &[RuleExpr]) -> Result<Vec<Production>, GrammarError> {
        exprs.iter().map(|expr| self.build(name, expr)).collect()
    }

    /// The production defined under `name`
    pub fn rule(&self, name: &str) -> Option<&Production> {
        self.index.get(name).map(|&position| &self.rules[position].1)
    }

    /// Rules in definition order
    pub fn rules(&self) -> impl Iterator<Item = (&str, &Production)> {
        self.rules
            .iter()
            .map(|(name, production)| (name.as_str(), production))
    }

    /// The entry rule
    pub fn start(&self) -> &Production {
        &self.rules[self.start].1
    }

    pub fn start_name(&self) -> &str {
        &self.rules[self.start].0
    }

    /// The rule name of `production`, if it is the top node of a rule
    pub fn name_of(&self, production: &Production) -> Option<&str> {
        self.names
            .get(&production.id())
            .map(|&position| self.rules[position].0.as_str())
    }

    /// Whole-string validation against the entry rule's derived pattern
    pub fn matches(&self, input: &str) -> Result<bool, GrammarError> {
        self.start().matches(input)
    }

    /// Parse the character tokens of `input` with the entry rule
    pub fn parse_str(&self, input: &str) -> Result<Symbol, ParseError> {
        self.start().parse_str(input)
    }

    /// Like [`Grammar::parse_str`], then fail if any token is left
    pub fn parse_remaining_str(&self, input: &str) -> Result<Symbol, ParseError> {
        self.start().parse_remaining_str(input)
    }

    /// Render `symbol` labelling rule nodes with their names
    pub fn to_treeviz_str(&self, symbol: &Symbol) -> String {
        to_treeviz_str_with(symbol, |origin| match self.name_of(origin) {
            Some(name) => name.to_string(),
            None => origin.pattern().to_string(),
        })
    }
}
