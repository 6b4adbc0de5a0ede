//! # Compiled patterns
//! The [Regex] struct ties the whole pipeline together: compiling a pattern
//! parses it [into a NFA](crate::parser::nfa), converts that to a DFA with the
//! [subset construction](crate::nfa::Nfa::to_dfa) and
//! [minimizes](crate::dfa::Dfa::minimize) the result. Only the minimized
//! automaton is kept; matching is a single walk over it.
//!
//! ```
//! use rematch::Regex;
//!
//! let regex = Regex::compile("a+b+1").unwrap();
//! assert!(regex.match_exact("aaabb1"));
//! assert!(!regex.match_exact("b1"));
//! ```

use crate::dfa::Dfa;
use crate::parser::{self, ParseError};

/// A regular expression compiled down to a minimized DFA. Matching never
/// fails and never allocates; a compiled [Regex] is immutable and can be
/// shared across threads.
#[derive(Clone, Debug)]
pub struct Regex {
    dfa: Dfa,
}

impl Regex {
    /// Compiles a pattern. See the [parser](crate::parser) module for the
    /// accepted syntax and the possible errors.
    ///
    /// ```
    /// use rematch::Regex;
    ///
    /// let regex = Regex::compile(r"(\(\d\d\))?\d+").unwrap();
    /// assert!(regex.match_exact("(01)2345"));
    /// assert!(regex.match_exact("2345"));
    /// assert!(!regex.match_exact("(01)"));
    /// ```
    pub fn compile(pattern: &str) -> Result<Self, ParseError> {
        Self::compile_bytes(pattern.as_bytes())
    }

    /// Compiles a pattern given as raw bytes. Every non-reserved byte matches
    /// itself, so patterns need not be valid UTF-8.
    pub fn compile_bytes(pattern: &[u8]) -> Result<Self, ParseError> {
        let nfa = parser::nfa(pattern)?;
        Ok(Regex {
            dfa: nfa.to_dfa().minimize(),
        })
    }

    /// Checks if the input as a whole belongs to the language of this pattern.
    /// There is no implicit anchoring or substring search: `a` matches only
    /// the one-byte input `a`.
    pub fn match_exact(&self, input: &str) -> bool {
        self.match_exact_bytes(input.as_bytes())
    }

    /// Byte-slice form of [Regex::match_exact].
    pub fn match_exact_bytes(&self, input: &[u8]) -> bool {
        self.dfa.accepts(input)
    }

    /// Reserved for substring search; currently always reports "not found".
    pub fn find(&self, _input: &str) -> Option<usize> {
        None
    }

    /// The minimized automaton backing this pattern.
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }
}
