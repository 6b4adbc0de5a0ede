//! # Deterministic Finite Automaton
//! The DFA module includes the [Dfa] struct, created either by
//! [subset construction](crate::nfa::Nfa::to_dfa) from a NFA or by
//! [minimizing](Dfa::minimize) another DFA. Transitions are partial: a state
//! simply has no entry for a byte that can never lead to acceptance, and the
//! evaluator rejects on the first missing transition.
//!
//! ## Example
//! ```
//! use rematch::parser;
//!
//! let dfa = parser::nfa(b"(a|b)*abb").unwrap().to_dfa().minimize();
//! assert!(dfa.accepts(b"babb"));
//! assert!(!dfa.accepts(b"ba"));
//! // The minimal automaton for this language has four states.
//! assert_eq!(dfa.states().len(), 4);
//! ```
//!
//! Evaluation keeps no mutable state on the automaton itself; a compiled [Dfa]
//! can be shared freely between threads and queried concurrently.

use crate::table::Table;
use std::collections::{BTreeMap, BTreeSet};

pub use eval::DfaEvaluator;

pub mod eval;
mod minimize;

/// A deterministic finite automaton over a byte alphabet, defined by its
/// states, one of them initial, and a (possibly partial) transition function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) alphabet: BTreeSet<u8>,
    pub(crate) states: Vec<DfaState>,
    pub(crate) initial_state: usize,
}

/// A state in a DFA, with its accepting flag and at most one transition per
/// alphabet byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DfaState {
    pub(crate) accepting: bool,
    pub(crate) transitions: BTreeMap<u8, usize>,
}

impl DfaState {
    /// Checks if this state is accepting
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Gets the transitions of this state, as target state indices keyed by
    /// byte in ascending order
    pub fn transitions(&self) -> &BTreeMap<u8, usize> {
        &self.transitions
    }

    /// Gets the target state index for one byte, if there is a transition
    pub fn transition(&self, byte: u8) -> Option<usize> {
        self.transitions.get(&byte).copied()
    }
}

impl Dfa {
    /// Checks if this automaton accepts the given input as a whole: starting
    /// at the initial state, every byte must have a transition, and the state
    /// reached after the last byte must be accepting. The empty input is
    /// accepted iff the initial state is accepting.
    pub fn accepts(&self, input: &[u8]) -> bool {
        let mut evaluator = self.evaluator();
        evaluator.step_multiple(input);
        evaluator.is_accepting()
    }

    /// Gets an evaluator, which is a struct that is used to evaluate inputs
    /// byte by byte with the automaton
    pub fn evaluator(&self) -> DfaEvaluator<'_> {
        self.into()
    }

    /// Minimizes this DFA by merging states that cannot be told apart by any
    /// input, using partition refinement over the transition structure. The
    /// result accepts the same language with the least possible number of
    /// states, none of them dead: every state of the minimized automaton lies
    /// on some path from the initial state to an accepting one.
    pub fn minimize(self) -> Dfa {
        minimize::minimize(self)
    }

    /// Gets the alphabet of this DFA in ascending byte order
    pub fn alphabet(&self) -> impl Iterator<Item = u8> + '_ {
        self.alphabet.iter().copied()
    }

    /// Gets the states of this DFA
    pub fn states(&self) -> &[DfaState] {
        self.states.as_slice()
    }

    /// Gets the initial state of this DFA
    pub fn initial_state(&self) -> &DfaState {
        &self.states[self.initial_state]
    }

    /// Get the index of the initial state of this DFA
    pub fn initial_state_index(&self) -> usize {
        self.initial_state
    }

    /// Renders this DFA as a plain-text transition table for inspection. The
    /// initial state is marked with `→`, accepting states with `*`, states are
    /// named by index and missing transitions are shown as `-`.
    pub fn to_table(&self) -> String {
        let mut table = Table::default();

        let mut head = vec![String::new(), String::new(), String::new()];
        head.extend(self.alphabet.iter().map(|&b| b.escape_ascii().to_string()));
        table.push_row(head);

        for (idx, state) in self.states.iter().enumerate() {
            let mut row = vec![
                if idx == self.initial_state {
                    "→".to_string()
                } else {
                    String::new()
                },
                if state.accepting {
                    "*".to_string()
                } else {
                    String::new()
                },
                idx.to_string(),
            ];
            row.extend(self.alphabet.iter().map(|byte| {
                state
                    .transitions
                    .get(byte)
                    .map_or_else(|| "-".to_string(), |target| target.to_string())
            }));
            table.push_row(row);
        }
        table.to_string(" ")
    }
}
