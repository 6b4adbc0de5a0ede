use crate::dfa::{Dfa, DfaState};

/// Tracks the current state while running a [Dfa] over an input. Rejection is
/// sticky: once a byte without a transition has been seen, the evaluator stays
/// rejecting no matter what follows.
#[derive(Debug, Clone)]
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    current_state: usize,
    rejected: bool,
}

impl<'a> DfaEvaluator<'a> {
    pub fn is_accepting(&self) -> bool {
        self.current_state().map_or(false, DfaState::is_accepting)
    }

    pub fn current_state(&self) -> Option<&'a DfaState> {
        if self.rejected {
            None
        } else {
            Some(&self.dfa.states[self.current_state])
        }
    }

    pub fn current_state_idx(&self) -> Option<usize> {
        (!self.rejected).then_some(self.current_state)
    }

    /// Advances over one input byte, returning the state entered, or `None`
    /// if the input is now rejected.
    pub fn step(&mut self, byte: u8) -> Option<&'a DfaState> {
        if self.rejected {
            return None;
        }

        match self.dfa.states[self.current_state].transition(byte) {
            None => {
                self.rejected = true;
                None
            }
            Some(next) => {
                self.current_state = next;
                Some(&self.dfa.states[next])
            }
        }
    }

    /// Advances over a sequence of input bytes, returning the state reached,
    /// or `None` if the input is now rejected.
    pub fn step_multiple(&mut self, bytes: &[u8]) -> Option<&'a DfaState> {
        for &byte in bytes {
            self.step(byte)?;
        }
        self.current_state()
    }
}

impl<'a> From<&'a Dfa> for DfaEvaluator<'a> {
    fn from(value: &'a Dfa) -> Self {
        Self {
            dfa: value,
            current_state: value.initial_state,
            rejected: false,
        }
    }
}
