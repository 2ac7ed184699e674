/*
    This module computes the FIRST and FOLLOW sets of a grammar
*/

mod first;
mod follow;

use std::collections::BTreeSet;
use std::fmt::Display;

use log::info;

use crate::grammar::{Grammar, EMPTY};

pub use first::FirstSets;
pub use follow::FollowSets;

// The token marking the end of input in FOLLOW sets
pub const END: &str = "$";

// A member of a FIRST or FOLLOW set. Sorts terminals first, then ε, then $.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lookahead {
    Terminal(String),
    Empty,
    End,
}

impl Display for Lookahead {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookahead::Terminal(t) => write!(f, "{}", t),
            Lookahead::Empty => write!(f, "{}", EMPTY),
            Lookahead::End => write!(f, "{}", END),
        }
    }
}

pub type FirstSet = BTreeSet<Lookahead>;
pub type FollowSet = BTreeSet<Lookahead>;

#[derive(Debug)]
pub struct Analysis {
    pub first: FirstSets,
    pub follow: FollowSets,
}

// One line of the final report
#[derive(Debug, PartialEq)]
pub struct Row<'a> {
    pub nonterminal: &'a str,
    pub first: &'a FirstSet,
    pub follow: &'a FollowSet,
}

pub fn analyze(grammar: &Grammar) -> Analysis {
    let first = FirstSets::new(grammar);
    info!("computed FIRST sets of {} nonterminal(s)", grammar.nonterminals.len());

    let follow = FollowSets::new(grammar, &first);
    info!("computed FOLLOW sets from start symbol `{}`", grammar.start_symbol);

    Analysis { first, follow }
}

impl Analysis {
    // Rows in the order the nonterminals were defined
    pub fn rows<'a>(&'a self, grammar: &'a Grammar) -> impl Iterator<Item = Row<'a>> + 'a {
        grammar.nonterminals.iter().filter_map(move |nonterminal| {
            Some(Row {
                nonterminal,
                first: self.first.of_nonterminal(nonterminal)?,
                follow: self.follow.get(nonterminal)?,
            })
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::grammar::GrammarBuilder;

    use super::*;

    // Builds a grammar from lines of the form `A -> b C | ε`
    pub fn grammar(lines: &[&str]) -> Grammar {
        let mut builder = GrammarBuilder::new();
        for line in lines {
            let (lhs, rhs) = line.split_once("->").unwrap();
            let alternatives = rhs
                .split('|')
                .map(|alternative| alternative.split_whitespace().map(str::to_string).collect())
                .collect();
            builder.add_rule(lhs.trim(), alternatives);
        }
        builder.classify_symbols(None).unwrap()
    }

    pub fn set(members: &[&str]) -> BTreeSet<Lookahead> {
        members
            .iter()
            .map(|member| match *member {
                EMPTY => Lookahead::Empty,
                END => Lookahead::End,
                t => Lookahead::Terminal(t.to_string()),
            })
            .collect()
    }
}
