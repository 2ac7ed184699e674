//! FIRST sets.

use std::collections::HashMap;

use log::{trace, warn};

use crate::grammar::{Grammar, Symbol};

use super::{FirstSet, Lookahead};

/// FIRST sets of every symbol in a grammar.
#[derive(Debug)]
pub struct FirstSets {
    map: HashMap<Symbol, FirstSet>,
}

// Memoized recursive computation over a frozen grammar
struct Collector<'g> {
    grammar: &'g Grammar,
    map: HashMap<Symbol, FirstSet>,
    // Partial FIRST sets of nonterminals still being built
    in_progress: HashMap<String, FirstSet>,
}

impl<'g> Collector<'g> {
    fn first_of(&mut self, symbol: &Symbol) -> FirstSet {
        if let Some(set) = self.map.get(symbol) {
            return set.clone();
        }

        let set = match symbol {
            Symbol::Terminal(t) => FirstSet::from([Lookahead::Terminal(t.clone())]),
            Symbol::Empty => FirstSet::from([Lookahead::Empty]),
            Symbol::Nonterminal(nonterminal) => {
                if let Some(partial) = self.in_progress.get(nonterminal) {
                    // Left recursion through other symbols; whatever has
                    // been collected so far stands in for the full set.
                    warn!("`{}` is left recursive through other symbols, its FIRST set may be incomplete", nonterminal);
                    return partial.clone();
                }
                self.in_progress.insert(nonterminal.clone(), FirstSet::new());
                self.collect_nonterminal(nonterminal);
                self.in_progress.remove(nonterminal).unwrap_or_default()
            }
        };

        trace!("FIRST({}) = {:?}", symbol, set);
        self.map.insert(symbol.clone(), set.clone());
        set
    }

    // Members are published to `in_progress` as soon as they are found, so a
    // re-entrant visit sees them
    fn collect_nonterminal(&mut self, nonterminal: &str) {
        let grammar = self.grammar;

        for alternative in grammar.rewrite(nonterminal).into_iter().flatten() {
            let mut vanishes = true;
            for symbol in alternative {
                let first = self.first_of(symbol);
                vanishes = first.contains(&Lookahead::Empty);
                self.publish(nonterminal, first.into_iter().filter(|l| *l != Lookahead::Empty));
                if !vanishes {
                    break;
                }
            }
            if vanishes {
                self.publish(nonterminal, [Lookahead::Empty]);
            }
        }
    }

    fn publish(&mut self, nonterminal: &str, members: impl IntoIterator<Item = Lookahead>) {
        if let Some(partial) = self.in_progress.get_mut(nonterminal) {
            partial.extend(members);
        }
    }
}

impl FirstSets {
    /// Compute the FIRST set of every nonterminal, terminal and the empty
    /// marker of the grammar.
    pub fn new(grammar: &Grammar) -> Self {
        let mut collector = Collector {
            grammar,
            map: HashMap::new(),
            in_progress: HashMap::new(),
        };

        for nonterminal in &grammar.nonterminals {
            collector.first_of(&Symbol::Nonterminal(nonterminal.clone()));
        }
        for terminal in &grammar.terminals {
            collector.first_of(&Symbol::Terminal(terminal.clone()));
        }
        collector.first_of(&Symbol::Empty);

        FirstSets { map: collector.map }
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&FirstSet> {
        self.map.get(symbol)
    }

    pub fn of_nonterminal(&self, nonterminal: &str) -> Option<&FirstSet> {
        self.get(&Symbol::Nonterminal(nonterminal.to_string()))
    }

    /// FIRST set of a string of symbols. Symbols that are unknown to the
    /// grammar contribute nothing and do not vanish.
    pub fn first_of_sequence(&self, symbols: &[Symbol]) -> FirstSet {
        let mut result = FirstSet::new();

        for symbol in symbols {
            let Some(first) = self.get(symbol) else {
                return result;
            };
            result.extend(first.iter().filter(|l| **l != Lookahead::Empty).cloned());
            if !first.contains(&Lookahead::Empty) {
                return result;
            }
        }

        result.insert(Lookahead::Empty);
        result
    }
}
