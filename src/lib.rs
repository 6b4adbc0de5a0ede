//! # rematch
//!
//! `rematch` is a Rust library that compiles regular expressions into
//! minimized deterministic finite automata and answers whole-string
//! membership queries against them.
//!
//! ## Usage
//!
//! ```rust
//! use rematch::Regex;
//!
//! fn main() {
//!     let regex = Regex::compile("1*ab*").unwrap();
//!     assert!(regex.match_exact("111abbbbbb"));
//!     assert!(regex.match_exact("a"));
//!     assert!(!regex.match_exact("11babbbb"));
//!
//!     // Matching is exact: the whole input must belong to the language.
//!     let regex = Regex::compile("(ab){2}").unwrap();
//!     assert!(regex.match_exact("abab"));
//!     assert!(!regex.match_exact("ababab"));
//! }
//! ```
//!
//! ## Syntax
//!
//! | Syntax | Meaning |
//! |---|---|
//! | `c` | the literal byte `c` (any non-reserved byte) |
//! | `(R)` | grouping |
//! | `R₁\|R₂` | alternation |
//! | `R*` | zero or more repetitions |
//! | `R+` | one or more repetitions |
//! | `R?` | zero or one repetition |
//! | `R{n}` | exactly `n` repetitions, `0 ≤ n ≤ 1024` |
//! | `\m` | the literal byte `m`, for `m` one of `( ) { } \| * + ? \` |
//! | `\d` | any decimal digit |
//! | empty pattern | the empty string only |
//!
//! There is no substring search, anchoring, capturing, wildcard or `[...]`
//! class syntax; an unescaped `}` is an error. Malformed patterns are
//! rejected with a structured [ParseError] carrying the byte position of the
//! offense.
//!
//! ## Pipeline
//!
//! Compilation runs in three stages, each available on its own:
//!
//! * [`parser::nfa`] scans the pattern once, left to right, building a
//!   [Nfa](nfa::Nfa) from Thompson-style fragments held on a parsing stack;
//! * [`Nfa::to_dfa`](nfa::Nfa::to_dfa) runs the subset construction, producing
//!   a [Dfa](dfa::Dfa) whose states are ε-closed sets of NFA states;
//! * [`Dfa::minimize`](dfa::Dfa::minimize) merges indistinguishable states by
//!   partition refinement into the unique minimal automaton, which is what a
//!   [Regex] keeps.
//!
//! Compiling the same pattern twice yields automata of identical shape, and a
//! compiled [Regex] is immutable: matching mutates nothing and may happen
//! from any number of threads at once.

pub mod dfa;
pub mod nfa;
pub mod parser;
pub mod regex;
mod table;

pub use crate::parser::ParseError;
pub use crate::regex::Regex;
