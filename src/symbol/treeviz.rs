//! Treeviz formatter for symbol trees
//!
//! One line per node, nesting drawn with box connectors, 2 columns per level:
//!
//! ```text
//! └─ NonTerminal (?:1)(?:0) "10"
//!   ├─ Terminal 1 "1"
//!   └─ Terminal 0 "0"
//! ```
//!
//! Each line shows the symbol kind, a label for its origin (the derived pattern by
//! default) and the symbol's text, truncated to 30 characters.

use super::{NonTerminalSymbol, SingletonSymbol, Symbol, SymbolVisitor, TerminalSymbol};
use crate::production::Production;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Render `symbol` labelling each origin with its derived pattern
pub fn to_treeviz_str(symbol: &Symbol) -> String {
    to_treeviz_str_with(symbol, |origin| origin.pattern().to_string())
}

/// Render `symbol` with a custom origin label
pub fn to_treeviz_str_with<F>(symbol: &Symbol, label: F) -> String
where
    F: Fn(&Production) -> String,
{
    let mut treeviz = Treeviz {
        result: String::new(),
        label,
    };
    symbol.accept(
        &mut treeviz,
        Indent {
            prefix: String::new(),
            is_last: true,
        },
    );
    treeviz.result
}

struct Indent {
    prefix: String,
    is_last: bool,
}

struct Treeviz<F> {
    result: String,
    label: F,
}

impl<F> Treeviz<F>
where
    F: Fn(&Production) -> String,
{
    fn append_line(&mut self, indent: &Indent, kind: &str, origin: &Production, text: &str) {
        let connector = if indent.is_last { "└─" } else { "├─" };
        self.result.push_str(&format!(
            "{}{} {} {} {:?}\n",
            indent.prefix,
            connector,
            kind,
            (self.label)(origin),
            truncate(text, 30)
        ));
    }

    fn append_children(&mut self, indent: &Indent, children: &[Symbol]) {
        let prefix = format!(
            "{}{}",
            indent.prefix,
            if indent.is_last { "  " } else { "│ " }
        );
        for (i, child) in children.iter().enumerate() {
            child.accept(
                self,
                Indent {
                    prefix: prefix.clone(),
                    is_last: i == children.len() - 1,
                },
            );
        }
    }
}

impl<F> SymbolVisitor<Indent> for Treeviz<F>
where
    F: Fn(&Production) -> String,
{
    type Output = ();

    fn visit_terminal(&mut self, symbol: &TerminalSymbol, indent: Indent) {
        self.append_line(&indent, "Terminal", symbol.origin(), symbol.value());
    }

    fn visit_non_terminal(&mut self, symbol: &NonTerminalSymbol, indent: Indent) {
        self.append_line(&indent, "NonTerminal", symbol.origin(), &symbol.to_string());
        self.append_children(&indent, symbol.children());
    }

    fn visit_singleton(&mut self, symbol: &SingletonSymbol, indent: Indent) {
        self.append_line(&indent, "Singleton", symbol.origin(), &symbol.to_string());
        self.append_children(&indent, symbol.as_non_terminal().children());
    }
}
