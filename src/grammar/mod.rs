/*
    This module is for storing grammars and deciding which of their symbols
    are terminals and which are nonterminals
*/

use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;

use log::debug;

use crate::error_handling::ErrorType;

// The token that denotes the empty string on a right-hand side
pub const EMPTY: &str = "ε";

// The base unit in a grammar rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
    Empty,
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(s) | Symbol::Nonterminal(s) => write!(f, "{}", s),
            Symbol::Empty => write!(f, "{}", EMPTY),
        }
    }
}

// The symbols in a single alternative
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Alternative>;

#[derive(Debug, PartialEq)]
pub enum GrammarErrorType {
    // Input ended before a single rule was entered
    NoRules,
    // The requested start symbol is never defined
    UndefinedStart(String),
}

impl ErrorType for GrammarErrorType {}

impl Display for GrammarErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarErrorType::NoRules => write!(f, "No rules were entered"),
            GrammarErrorType::UndefinedStart(symbol) => write!(f, "Start symbol `{}` has no rule", symbol),
        }
    }
}

/// Accumulates rules while input is still arriving.
///
/// Alternatives are kept as raw tokens: whether a token is a terminal can
/// only be known once every rule has been seen, so classification happens
/// in [`GrammarBuilder::classify_symbols`], which consumes the builder.
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    // Nonterminals in order of first definition
    order: Vec<String>,
    rules: HashMap<String, Vec<Vec<String>>>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `lhs` as a nonterminal and appends `alternatives` to its
    /// rule. Repeated definitions of the same nonterminal extend it.
    pub fn add_rule(&mut self, lhs: &str, alternatives: Vec<Vec<String>>) {
        if !self.rules.contains_key(lhs) {
            self.order.push(lhs.to_string());
        }
        debug!("rule `{}` gets {} more alternative(s)", lhs, alternatives.len());
        self.rules.entry(lhs.to_string()).or_default().extend(alternatives);
    }

    /// Freezes the grammar. Every token that is neither a defined
    /// nonterminal nor the empty marker becomes a terminal.
    ///
    /// The start symbol is `start` when given, otherwise the first
    /// nonterminal that was defined.
    pub fn classify_symbols(self, start: Option<&str>) -> Result<Grammar, GrammarErrorType> {
        let start_symbol = match start {
            Some(symbol) if self.rules.contains_key(symbol) => symbol.to_string(),
            Some(symbol) => return Err(GrammarErrorType::UndefinedStart(symbol.to_string())),
            None => self.order.first().cloned().ok_or(GrammarErrorType::NoRules)?,
        };

        let mut terminals = BTreeSet::new();
        let mut rules = HashMap::with_capacity(self.rules.len());

        for (lhs, alternatives) in &self.rules {
            let rewrite: Rewrite = alternatives
                .iter()
                .map(|alternative| {
                    alternative
                        .iter()
                        .map(|token| {
                            if token == EMPTY {
                                Symbol::Empty
                            } else if self.rules.contains_key(token) {
                                Symbol::Nonterminal(token.clone())
                            } else {
                                terminals.insert(token.clone());
                                Symbol::Terminal(token.clone())
                            }
                        })
                        .collect()
                })
                .collect();
            rules.insert(lhs.clone(), rewrite);
        }

        debug!("classified {} nonterminal(s) and {} terminal(s)", self.order.len(), terminals.len());

        Ok(Grammar {
            start_symbol,
            rules,
            nonterminals: self.order,
            terminals,
        })
    }
}

#[derive(Debug, PartialEq)]
pub struct Grammar {
    pub start_symbol: String,
    pub rules: HashMap<String, Rewrite>,
    // Nonterminals in order of first definition
    pub nonterminals: Vec<String>,
    pub terminals: BTreeSet<String>,
}

impl Grammar {
    pub fn rewrite(&self, nonterminal: &str) -> Option<&Rewrite> {
        self.rules.get(nonterminal)
    }

    // Rules in the order their nonterminals were first defined
    pub fn rules(&self) -> impl Iterator<Item = (&String, &Rewrite)> {
        self.nonterminals
            .iter()
            .filter_map(|nonterminal| self.rules.get(nonterminal).map(|rewrite| (nonterminal, rewrite)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn s_nonterminal(text: &str) -> Symbol {
        Symbol::Nonterminal(text.to_string())
    }

    fn s_terminal(text: &str) -> Symbol {
        Symbol::Terminal(text.to_string())
    }

    #[test]
    fn classify_forward_reference() {
        // `T` is used before its own rule arrives
        let mut builder = GrammarBuilder::new();
        builder.add_rule("E", vec![tokens("T E'")]);
        builder.add_rule("E'", vec![tokens("+ T E'"), tokens("ε")]);
        builder.add_rule("T", vec![tokens("id")]);

        let grammar = builder.classify_symbols(None).unwrap();

        assert_eq!(grammar.start_symbol, "E");
        assert_eq!(grammar.nonterminals, vec!["E", "E'", "T"]);
        assert_eq!(grammar.terminals, BTreeSet::from(["+".to_string(), "id".to_string()]));
        assert_eq!(grammar.rewrite("E"), Some(&vec![vec![s_nonterminal("T"), s_nonterminal("E'")]]));
        assert_eq!(grammar.rewrite("E'"), Some(&vec![
            vec![s_terminal("+"), s_nonterminal("T"), s_nonterminal("E'")],
            vec![Symbol::Empty]
        ]));
    }

    #[test]
    fn repeated_rule_appends() {
        let mut builder = GrammarBuilder::new();
        builder.add_rule("S", vec![tokens("a")]);
        builder.add_rule("A", vec![tokens("c")]);
        builder.add_rule("S", vec![tokens("b"), tokens("A")]);

        let grammar = builder.classify_symbols(None).unwrap();

        assert_eq!(grammar.nonterminals, vec!["S", "A"]);
        assert_eq!(grammar.rewrite("S"), Some(&vec![
            vec![s_terminal("a")],
            vec![s_terminal("b")],
            vec![s_nonterminal("A")]
        ]));
        assert_eq!(grammar.rules().map(|(lhs, _)| lhs.as_str()).collect::<Vec<_>>(), vec!["S", "A"]);
    }

    #[test]
    fn start_override() {
        let mut builder = GrammarBuilder::new();
        builder.add_rule("S", vec![tokens("A")]);
        builder.add_rule("A", vec![tokens("a")]);

        assert_eq!(builder.classify_symbols(Some("A")).unwrap().start_symbol, "A");
    }

    #[test]
    fn classify_many_nonterminals() {
        // A chain N0 -> N1 t0, ..., with the last one only reaching `end`
        let mut builder = GrammarBuilder::new();
        for i in 0..50 {
            builder.add_rule(&format!("N{}", i), vec![vec![format!("N{}", i + 1), format!("t{}", i)]]);
        }
        builder.add_rule("N50", vec![tokens("end")]);

        let grammar = builder.classify_symbols(None).unwrap();

        assert_eq!(grammar.nonterminals.len(), 51);
        assert_eq!(grammar.terminals.len(), 51);
        assert_eq!(grammar.rewrite("N49"), Some(&vec![vec![s_nonterminal("N50"), s_terminal("t49")]]));
        assert_eq!(grammar.rewrite("N50"), Some(&vec![vec![s_terminal("end")]]));
    }

    #[test]
    fn classify_errors() {
        assert_eq!(GrammarBuilder::new().classify_symbols(None), Err(GrammarErrorType::NoRules));

        let mut builder = GrammarBuilder::new();
        builder.add_rule("S", vec![tokens("a")]);
        assert_eq!(
            builder.classify_symbols(Some("a")),
            Err(GrammarErrorType::UndefinedStart("a".to_string()))
        );
    }

    #[test]
    fn display_symbols() {
        assert_eq!(s_terminal("id").to_string(), "id");
        assert_eq!(s_nonterminal("E'").to_string(), "E'");
        assert_eq!(Symbol::Empty.to_string(), "ε");
    }
}
