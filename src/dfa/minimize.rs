//! Partition-refinement minimization.
//!
//! The partial transition function is first totalized by routing every missing
//! `(state, byte)` pair to a fresh dead state, so that refinement only ever
//! compares defined transitions. States are then split off the initial
//! {accepting, non-accepting} partition until no group has a byte on which its
//! members disagree about the successor group. The dead state's group is
//! dropped before the output is assembled, which leaves the result partial
//! (and trim) again.

use crate::dfa::{Dfa, DfaState};
use std::collections::{BTreeMap, BTreeSet};

pub(crate) fn minimize(dfa: Dfa) -> Dfa {
    Minimizer::new(dfa).run()
}

/// A set of raw DFA states currently considered equivalent.
struct MergedState {
    accepting: bool,
    members: BTreeSet<usize>,
}

struct Minimizer {
    dfa: Dfa,
    alphabet: Vec<u8>,
    /// Live groups by id. Ids grow monotonically as groups split, so iteration
    /// order (and with it the refinement) is reproducible.
    groups: BTreeMap<usize, MergedState>,
    /// Raw state index → id of the group currently containing it.
    group_of: Vec<usize>,
    next_group_id: usize,
    dead_state: Option<usize>,
}

impl Minimizer {
    fn new(mut dfa: Dfa) -> Self {
        let alphabet: Vec<u8> = dfa.alphabet.iter().copied().collect();
        let dead_state = add_dead_state(&mut dfa, &alphabet);
        let mut minimizer = Minimizer {
            group_of: vec![usize::MAX; dfa.states.len()],
            dfa,
            alphabet,
            groups: BTreeMap::new(),
            next_group_id: 0,
            dead_state,
        };
        minimizer.partition_by_finality();
        minimizer
    }

    /// Initial partition: non-accepting states versus accepting states, either
    /// group omitted when empty.
    fn partition_by_finality(&mut self) {
        let (finals, non_finals): (BTreeSet<usize>, BTreeSet<usize>) =
            (0..self.dfa.states.len()).partition(|&idx| self.dfa.states[idx].accepting);
        for (accepting, members) in [(false, non_finals), (true, finals)] {
            if !members.is_empty() {
                self.add_group(accepting, members);
            }
        }
    }

    fn add_group(&mut self, accepting: bool, members: BTreeSet<usize>) {
        let id = self.next_group_id;
        self.next_group_id += 1;
        for &member in &members {
            self.group_of[member] = id;
        }
        self.groups.insert(id, MergedState { accepting, members });
    }

    fn run(mut self) -> Dfa {
        while let Some((id, byte)) = self.find_ambiguous_symbol() {
            self.split_group(id, byte);
        }

        if let Some(dead) = self.dead_state {
            // Any state still sharing a group with the dead state cannot reach
            // acceptance either, so the whole group goes. For automata built by
            // subset construction the group is just the dead state itself.
            let group = self.group_of[dead];
            self.groups.remove(&group);
        }

        self.build()
    }

    /// Searches for a group with an ambiguous byte: one on which two of its
    /// members transition into different groups. Bytes are tried in ascending
    /// order; the first ambiguity found wins.
    fn find_ambiguous_symbol(&self) -> Option<(usize, u8)> {
        for (&id, group) in &self.groups {
            for &byte in &self.alphabet {
                let mut successor: Option<usize> = None;
                for &member in &group.members {
                    let target = self.group_of[self.dfa.states[member].transitions[&byte]];
                    match successor {
                        None => successor = Some(target),
                        Some(first) if first != target => return Some((id, byte)),
                        Some(_) => {}
                    }
                }
            }
        }
        None
    }

    /// Splits a group on an ambiguous byte: members agreeing on the successor
    /// group stay together, each distinct successor forming a new group.
    fn split_group(&mut self, id: usize, byte: u8) {
        let MergedState { accepting, members } = self
            .groups
            .remove(&id)
            .expect("splitting a group that was just found");
        let mut buckets: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
        for member in members {
            let target = self.group_of[self.dfa.states[member].transitions[&byte]];
            buckets.entry(target).or_default().insert(member);
        }
        for (_, bucket) in buckets {
            self.add_group(accepting, bucket);
        }
    }

    /// Assembles the minimized automaton: one state per surviving group, with
    /// every member transition carried over except those into the dead state.
    fn build(self) -> Dfa {
        let index_of: BTreeMap<usize, usize> = self
            .groups
            .keys()
            .enumerate()
            .map(|(index, &id)| (id, index))
            .collect();

        let mut states: Vec<DfaState> = self
            .groups
            .values()
            .map(|group| DfaState {
                accepting: group.accepting,
                transitions: BTreeMap::new(),
            })
            .collect();

        for (&id, group) in &self.groups {
            let state = &mut states[index_of[&id]];
            for &member in &group.members {
                for (&byte, &target) in &self.dfa.states[member].transitions {
                    // Transitions into the removed dead group can never lead
                    // to acceptance and are left out.
                    let Some(&target_index) = index_of.get(&self.group_of[target]) else {
                        continue;
                    };
                    state.transitions.entry(byte).or_insert(target_index);
                }
            }
        }

        let initial_state = match index_of.get(&self.group_of[self.dfa.initial_state]) {
            Some(&index) => index,
            // The input accepted nothing at all: its initial state sank into
            // the dead group. Keep a lone rejecting state instead.
            None => {
                states.push(DfaState {
                    accepting: false,
                    transitions: BTreeMap::new(),
                });
                states.len() - 1
            }
        };
        Dfa {
            alphabet: self.dfa.alphabet,
            states,
            initial_state,
        }
    }
}

/// Totalizes the transition function: if any transition is missing, a fresh
/// non-accepting state is appended and every undefined `(state, byte)` pair
/// (including the new state's own) is routed to it.
fn add_dead_state(dfa: &mut Dfa, alphabet: &[u8]) -> Option<usize> {
    let total = dfa
        .states
        .iter()
        .all(|state| state.transitions.len() == alphabet.len());
    if total {
        return None;
    }

    let dead = dfa.states.len();
    dfa.states.push(DfaState {
        accepting: false,
        transitions: BTreeMap::new(),
    });
    for state in &mut dfa.states {
        for &byte in alphabet {
            state.transitions.entry(byte).or_insert(dead);
        }
    }
    Some(dead)
}
