//! FOLLOW sets.

use std::collections::HashMap;

use log::{debug, trace};

use crate::grammar::{Grammar, Symbol};

use super::{FirstSets, FollowSet, Lookahead};

/// FOLLOW sets.
#[derive(Debug)]
pub struct FollowSets {
    /// Mapping from nonterminals to FOLLOW sets.
    map: HashMap<String, FollowSet>,
}

impl FollowSets {
    /// Compute all FOLLOW sets of the grammar, starting from its start
    /// symbol. `first_sets` must already be complete.
    pub fn new(grammar: &Grammar, first_sets: &FirstSets) -> Self {
        Self::compute(grammar, first_sets, &grammar.start_symbol)
    }

    /// Iterates until a whole sweep over the rules adds nothing. Sets only
    /// grow and are bounded by the terminals plus `$`, so this terminates.
    pub fn compute(grammar: &Grammar, first_sets: &FirstSets, start_symbol: &str) -> Self {
        let mut this = FollowSets {
            map: grammar
                .nonterminals
                .iter()
                .map(|nonterminal| (nonterminal.clone(), FollowSet::new()))
                .collect(),
        };
        this.map
            .entry(start_symbol.to_string())
            .or_default()
            .insert(Lookahead::End);

        let mut sweeps = 1;
        while this.sweep(grammar, first_sets) {
            sweeps += 1;
        }
        debug!("FOLLOW sets settled after {} sweep(s)", sweeps);

        this
    }

    /// One pass over every position of every alternative. Returns whether
    /// any FOLLOW set grew.
    pub fn sweep(&mut self, grammar: &Grammar, first_sets: &FirstSets) -> bool {
        let mut changed = false;

        for (lhs, rewrite) in grammar.rules() {
            for alternative in rewrite {
                for (i, symbol) in alternative.iter().enumerate() {
                    let Symbol::Nonterminal(followed) = symbol else {
                        continue;
                    };

                    let mut additions = FollowSet::new();
                    match alternative.get(i + 1) {
                        Some(next) => {
                            let first = first_sets.first_of_sequence(std::slice::from_ref(next));
                            additions.extend(first.iter().filter(|l| **l != Lookahead::Empty).cloned());
                            // `next` can vanish, so whatever follows `lhs`
                            // can follow `followed` too
                            if first.contains(&Lookahead::Empty) {
                                additions.extend(self.follow_set_of(lhs).cloned());
                            }
                        }
                        None => additions.extend(self.follow_set_of(lhs).cloned()),
                    }

                    let follow_set = self.map.entry(followed.clone()).or_default();
                    let prev_cardinality = follow_set.len();
                    follow_set.extend(additions);
                    if follow_set.len() != prev_cardinality {
                        trace!("FOLLOW({}) grew to {:?}", followed, follow_set);
                        changed = true;
                    }
                }
            }
        }

        changed
    }

    pub fn get(&self, nonterminal: &str) -> Option<&FollowSet> {
        self.map.get(nonterminal)
    }

    fn follow_set_of(&self, nonterminal: &str) -> impl Iterator<Item = &Lookahead> {
        self.map.get(nonterminal).into_iter().flatten()
    }
}
