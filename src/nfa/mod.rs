//! # Nondeterministic Finite Automaton construction
//! The NFA module holds the state arena that the pattern parser builds into, the
//! Thompson-style fragment combinators used during parsing, and the subset
//! construction that turns the finished NFA into a [Dfa].
//!
//! States live in a single growable arena and are referred to by index
//! everywhere, so handles stay valid while the automaton grows. A fragment is
//! a `(start, end)` pair of such indices describing a sub-automaton with
//! exactly one entry and one exit; the combinators only ever touch a
//! fragment's two endpoint states, which keeps composition local. The empty
//! fragment (the language containing just the empty word) is represented as
//! `None` wherever fragments are passed around.
//!
//! ## Example
//! ```
//! use rematch::parser;
//!
//! let nfa = parser::nfa(b"(ab)+").unwrap();
//! let dfa = nfa.to_dfa().minimize();
//! assert!(dfa.accepts(b"abab"));
//! assert!(!dfa.accepts(b"aba"));
//! ```

use crate::dfa::{Dfa, DfaState};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A nondeterministic finite automaton with ε-moves, produced by
/// [parser::nfa](crate::parser::nfa). States are stored in an arena and
/// addressed by index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nfa {
    pub(crate) states: Vec<NfaState>,
    pub(crate) alphabet: BTreeSet<u8>,
    pub(crate) initial_state: usize,
}

/// A state in a NFA, with its accepting flag, any number of ε-transitions and
/// any number of transitions per input byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NfaState {
    pub(crate) accepting: bool,
    pub(crate) epsilon_transitions: Vec<usize>,
    pub(crate) transitions: BTreeMap<u8, Vec<usize>>,
}

impl NfaState {
    fn new(accepting: bool) -> Self {
        NfaState {
            accepting,
            epsilon_transitions: Vec::new(),
            transitions: BTreeMap::new(),
        }
    }

    /// Checks if this state is accepting
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Gets the ε-transitions of this state as a list of state indices
    pub fn epsilon_transitions(&self) -> &[usize] {
        self.epsilon_transitions.as_slice()
    }

    /// Gets the byte transitions of this state, each a set of state indices
    pub fn transitions(&self) -> &BTreeMap<u8, Vec<usize>> {
        &self.transitions
    }
}

/// A sub-automaton with exactly one entry and one exit state, both owned by the
/// arena the fragment was built in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Fragment {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl Nfa {
    pub(crate) fn new() -> Self {
        Nfa {
            states: Vec::new(),
            alphabet: BTreeSet::new(),
            initial_state: 0,
        }
    }

    pub(crate) fn add_state(&mut self, accepting: bool) -> usize {
        self.states.push(NfaState::new(accepting));
        self.states.len() - 1
    }

    pub(crate) fn set_initial_state(&mut self, state: usize) {
        self.initial_state = state;
    }

    fn add_epsilon(&mut self, from: usize, to: usize) {
        self.states[from].epsilon_transitions.push(to);
    }

    fn add_transition(&mut self, from: usize, byte: u8, to: usize) {
        self.states[from].transitions.entry(byte).or_default().push(to);
        self.alphabet.insert(byte);
    }

    /// Fragment accepting exactly the one-byte string `byte`.
    pub(crate) fn symbol(&mut self, byte: u8) -> Fragment {
        let start = self.add_state(false);
        let end = self.add_state(true);
        self.add_transition(start, byte, end);
        Fragment { start, end }
    }

    /// Fragment accepting any single byte out of `bytes`. Equivalent to an
    /// alternation of single-symbol fragments, built as one multi-way branch.
    pub(crate) fn charset(&mut self, bytes: &[u8]) -> Fragment {
        let start = self.add_state(false);
        let end = self.add_state(true);
        for &byte in bytes {
            self.add_transition(start, byte, end);
        }
        Fragment { start, end }
    }

    /// Sequences `a` before `b`. The empty fragment is the neutral element.
    pub(crate) fn concat(
        &mut self,
        a: Option<Fragment>,
        b: Option<Fragment>,
    ) -> Option<Fragment> {
        match (a, b) {
            (None, other) | (other, None) => other,
            (Some(a), Some(b)) => {
                self.states[a.end].accepting = false;
                self.add_epsilon(a.end, b.start);
                Some(Fragment {
                    start: a.start,
                    end: b.end,
                })
            }
        }
    }

    /// Branches between `a` and `b`. With one side empty this degrades to
    /// [Nfa::question] of the other; with both sides empty it stays empty.
    pub(crate) fn alt(&mut self, a: Option<Fragment>, b: Option<Fragment>) -> Option<Fragment> {
        match (a, b) {
            (None, None) => None,
            (None, Some(f)) | (Some(f), None) => Some(self.question(f)),
            (Some(a), Some(b)) => {
                let start = self.add_state(false);
                let end = self.add_state(true);
                self.states[a.end].accepting = false;
                self.states[b.end].accepting = false;
                self.add_epsilon(start, a.start);
                self.add_epsilon(start, b.start);
                self.add_epsilon(a.end, end);
                self.add_epsilon(b.end, end);
                Some(Fragment { start, end })
            }
        }
    }

    /// Zero or more repetitions. Modifies the fragment in place: its entry and
    /// exit states stay the same and the exit stays accepting.
    pub(crate) fn kleene(&mut self, fragment: Fragment) -> Fragment {
        self.add_epsilon(fragment.start, fragment.end);
        self.add_epsilon(fragment.end, fragment.start);
        fragment
    }

    /// One or more repetitions.
    pub(crate) fn plus(&mut self, fragment: Fragment) -> Fragment {
        self.add_epsilon(fragment.end, fragment.start);
        fragment
    }

    /// Zero or one repetition.
    pub(crate) fn question(&mut self, fragment: Fragment) -> Fragment {
        self.add_epsilon(fragment.start, fragment.end);
        fragment
    }

    /// Deep-copies the sub-automaton reachable from the fragment's entry,
    /// preserving accepting flags and all transitions between copied states.
    /// Used for counted repetition, where the same fragment is sequenced
    /// several times over.
    pub(crate) fn duplicate(&mut self, fragment: Option<Fragment>) -> Option<Fragment> {
        let fragment = fragment?;
        let mut copies: HashMap<usize, usize> = HashMap::new();
        let start = self.add_state(self.states[fragment.start].accepting);
        copies.insert(fragment.start, start);
        let mut pending = vec![fragment.start];
        while let Some(original) = pending.pop() {
            let epsilon = self.states[original].epsilon_transitions.clone();
            let transitions = self.states[original].transitions.clone();
            for &target in epsilon.iter().chain(transitions.values().flatten()) {
                if let Entry::Vacant(entry) = copies.entry(target) {
                    entry.insert(self.states.len());
                    self.states.push(NfaState::new(self.states[target].accepting));
                    pending.push(target);
                }
            }
            let copy = copies[&original];
            self.states[copy].epsilon_transitions =
                epsilon.iter().map(|target| copies[target]).collect();
            self.states[copy].transitions = transitions
                .iter()
                .map(|(&byte, targets)| {
                    (byte, targets.iter().map(|target| copies[target]).collect())
                })
                .collect();
        }
        debug_assert!(copies.contains_key(&fragment.end));
        Some(Fragment {
            start,
            end: copies[&fragment.end],
        })
    }

    /// Gives the ε-closure of a set of states: the least superset closed under
    /// ε-successor.
    pub(crate) fn closure(&self, seed: impl IntoIterator<Item = usize>) -> BTreeSet<usize> {
        let mut all: BTreeSet<usize> = seed.into_iter().collect();
        let mut pending: Vec<usize> = all.iter().copied().collect();
        while let Some(state) = pending.pop() {
            for &target in &self.states[state].epsilon_transitions {
                if all.insert(target) {
                    pending.push(target);
                }
            }
        }
        all
    }

    /// Converts this NFA to a DFA using the subset construction. Each DFA state
    /// corresponds to the ε-closure of a set of NFA states and is accepting iff
    /// any state of the set is. Only reachable sets are materialized; state 0
    /// of the result is the initial state. The alphabet is walked in ascending
    /// byte order, so state numbering is reproducible across runs.
    ///
    /// The result is not minimal; see [Dfa::minimize].
    pub fn to_dfa(&self) -> Dfa {
        let mut keys: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut sets: Vec<BTreeSet<usize>> = Vec::new();
        let mut states: Vec<DfaState> = Vec::new();
        let mut pending: Vec<usize> = Vec::new();

        let initial_set = self.closure([self.initial_state]);
        keys.insert(initial_set.iter().copied().collect(), 0);
        states.push(DfaState {
            accepting: initial_set.iter().any(|&s| self.states[s].accepting),
            transitions: BTreeMap::new(),
        });
        sets.push(initial_set);
        pending.push(0);

        while let Some(id) = pending.pop() {
            for &byte in &self.alphabet {
                let mut moved = BTreeSet::new();
                for &nfa_state in &sets[id] {
                    if let Some(targets) = self.states[nfa_state].transitions.get(&byte) {
                        moved.extend(targets.iter().copied());
                    }
                }
                if moved.is_empty() {
                    continue;
                }
                let moved = self.closure(moved);
                let target = match keys.entry(moved.iter().copied().collect()) {
                    Entry::Occupied(entry) => *entry.get(),
                    Entry::Vacant(entry) => {
                        let target = states.len();
                        states.push(DfaState {
                            accepting: moved.iter().any(|&s| self.states[s].accepting),
                            transitions: BTreeMap::new(),
                        });
                        sets.push(moved);
                        pending.push(target);
                        entry.insert(target);
                        target
                    }
                };
                states[id].transitions.insert(byte, target);
            }
        }

        Dfa {
            alphabet: self.alphabet.clone(),
            states,
            initial_state: 0,
        }
    }

    /// Gets the alphabet of this NFA in ascending byte order
    pub fn alphabet(&self) -> impl Iterator<Item = u8> + '_ {
        self.alphabet.iter().copied()
    }

    /// Gets the states of this NFA
    pub fn states(&self) -> &[NfaState] {
        self.states.as_slice()
    }

    /// Gets the initial state of this NFA
    pub fn initial_state(&self) -> &NfaState {
        &self.states[self.initial_state]
    }

    /// Get the index of the initial state of this NFA
    pub fn initial_state_index(&self) -> usize {
        self.initial_state
    }
}
