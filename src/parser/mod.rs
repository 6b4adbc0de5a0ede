//! # Pattern parser
//! This module contains the single-pass parser that turns a regular-expression
//! pattern into a [Nfa]. The parser scans the pattern byte by byte and builds
//! Thompson fragments as it goes, keeping unfinished work on a stack:
//! literals push a fragment, repetition operators pop one, rewire it and push
//! it back, and `(`, `|` and `)` push and collapse group markers. There is no
//! separate syntax tree.
//!
//! ## Syntax
//! The reserved bytes are `(`, `)`, `{`, `}`, `|`, `*`, `+`, `?` and `\`; any
//! other byte is a literal matching itself. `(`/`)` group, `|` alternates,
//! `*`/`+`/`?` repeat the preceding atom zero-or-more/one-or-more/zero-or-one
//! times, and `{n}` repeats it exactly `n` times with `n` at most
//! [MAX_BRACE_REPETITIONS]. A reserved byte is matched literally by escaping
//! it with `\`, and `\d` matches any decimal digit. The empty pattern matches
//! exactly the empty string. An unescaped `}` is an error, as is a NUL byte
//! anywhere in the pattern.
//!
//! ## Errors
//! Parsing halts on the first error, reporting its kind and byte position in
//! the pattern as a [ParseError]:
//! ```
//! use rematch::parser::{self, ParseError};
//!
//! assert_eq!(parser::nfa(b"(a").unwrap_err(), ParseError::MissingParenthesis(0));
//! assert_eq!(parser::nfa(b"a**").unwrap_err(), ParseError::MultipleRepeat(2));
//! assert_eq!(parser::nfa(br"\e").unwrap_err(), ParseError::EscapeUnknown(b'e', 1));
//! ```

mod stack;

use crate::nfa::{Fragment, Nfa};
use stack::{Marker, ParsingStack};
use thiserror::Error;

/// Largest repetition count accepted inside `{`…`}`.
pub const MAX_BRACE_REPETITIONS: u32 = 1024;

/// An error encountered while parsing a pattern. Positions are byte offsets
/// into the pattern. The rendered messages are informational; the variant and
/// its positions are the contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An open parenthesis at the given position was never closed.
    #[error("missing parenthesis, unterminated open parenthesis at position {0}")]
    MissingParenthesis(usize),
    /// A closing parenthesis at the given position has no matching `(`.
    #[error("unbalanced parenthesis at position {0}")]
    UnbalancedParenthesis(usize),
    /// An open brace at the given position was never closed.
    #[error("missing brace, unterminated open brace at position {0}")]
    MissingBrace(usize),
    /// A closing brace at the given position does not follow a `{`.
    #[error("unbalanced brace at position {0}")]
    UnbalancedBrace(usize),
    /// A byte other than a decimal digit between `{` and `}`.
    #[error("unexpected symbol '{symbol}' in braces at position {1}", symbol = *.0 as char)]
    NondigitInBraces(u8, usize),
    /// `{}` with no digits in between.
    #[error("empty pattern within braces at position {0}")]
    EmptyBraces(usize),
    /// The repetition count inside braces exceeds [MAX_BRACE_REPETITIONS].
    #[error("the repetition number is too large")]
    TooLargeRepetition,
    /// A repetition operator with no atom before it.
    #[error("nothing to repeat at position {0}")]
    NothingToRepeat(usize),
    /// A repetition operator directly following another repetition.
    #[error("multiple repeat at position {0}")]
    MultipleRepeat(usize),
    /// The pattern ends in a lone `\`.
    #[error("escape reaches the end of the pattern")]
    EscapeAtEnd,
    /// `\` followed by a byte that is not a recognized escape.
    #[error("unexpected escape character '{symbol}' at position {1}", symbol = *.0 as char)]
    EscapeUnknown(u8, usize),
    /// Patterns may not contain NUL bytes.
    #[error("NUL byte in pattern at position {0}")]
    NulByte(usize),
}

/// Parses a pattern into a [Nfa]. The returned automaton accepts exactly the
/// language the pattern denotes; convert it with [Nfa::to_dfa] and
/// [minimize](crate::dfa::Dfa::minimize) it to match against it. Most users
/// want [Regex::compile](crate::Regex::compile), which does all three steps.
pub fn nfa(pattern: &[u8]) -> Result<Nfa, ParseError> {
    ReParser::new(pattern).run()
}

struct ReParser<'a> {
    pattern: &'a [u8],
    pos: usize,
    nfa: Nfa,
    stack: ParsingStack,
    /// True iff the previous token was `*`, `+`, `?` or a `{n}` repetition.
    last_was_repetition: bool,
}

impl<'a> ReParser<'a> {
    fn new(pattern: &'a [u8]) -> Self {
        ReParser {
            pattern,
            pos: 0,
            nfa: Nfa::new(),
            stack: ParsingStack::new(),
            last_was_repetition: false,
        }
    }

    fn run(mut self) -> Result<Nfa, ParseError> {
        while self.pos < self.pattern.len() {
            let byte = self.pattern[self.pos];
            match byte {
                0 => return Err(ParseError::NulByte(self.pos)),
                b'|' => {
                    let group = self.close_group(Marker::Bar(self.pos))?;
                    self.stack.push(group);
                    self.stack.open_bar(self.pos);
                }
                b'(' => self.stack.open_parenthesis(self.pos),
                b')' => {
                    let group = self.close_group(Marker::Parenthesis(self.pos))?;
                    self.stack.push(group);
                }
                b'{' => self.repeat_counted()?,
                b'}' => return Err(ParseError::UnbalancedBrace(self.pos)),
                b'*' | b'+' | b'?' => self.repeat(byte)?,
                b'\\' => self.escape()?,
                _ => {
                    let fragment = self.nfa.symbol(byte);
                    self.stack.push(Some(fragment));
                }
            }
            self.last_was_repetition = matches!(byte, b'*' | b'+' | b'?' | b'{');
            self.pos += 1;
        }

        let fragment = self.close_group(Marker::ReStart)?;
        let mut nfa = self.nfa;
        let initial_state = match fragment {
            Some(fragment) => fragment.start,
            // Empty pattern (or one reduced to nothing by `{0}`): a single
            // accepting state recognizing just the empty string.
            None => nfa.add_state(true),
        };
        nfa.set_initial_state(initial_state);
        Ok(nfa)
    }

    /// Collapses the stack down to the innermost group start that the closing
    /// construct cannot see through, concatenating the popped fragments.
    /// Pending alternations on the way down are resolved right-to-left.
    fn close_group(&mut self, closing: Marker) -> Result<Option<Fragment>, ParseError> {
        loop {
            let opened = self.stack.last_group_start();
            let fragments = self.stack.pop_group(closing);
            match opened {
                Marker::Parenthesis(open) => {
                    return match closing {
                        Marker::ReStart => Err(ParseError::MissingParenthesis(open)),
                        _ => Ok(self.concat_all(fragments)),
                    };
                }
                Marker::ReStart => {
                    return match closing {
                        Marker::Parenthesis(close) => {
                            Err(ParseError::UnbalancedParenthesis(close))
                        }
                        _ => Ok(self.concat_all(fragments)),
                    };
                }
                Marker::Bar(_) => {
                    let right = self.concat_all(fragments);
                    let left = self.stack.pop_one();
                    let merged = self.nfa.alt(left, right);
                    self.stack.push(merged);
                }
            }
        }
    }

    fn concat_all(&mut self, fragments: Vec<Option<Fragment>>) -> Option<Fragment> {
        fragments
            .into_iter()
            .fold(None, |sequence, fragment| self.nfa.concat(sequence, fragment))
    }

    fn repeat(&mut self, byte: u8) -> Result<(), ParseError> {
        let fragment = self.check_repetition_and_pop(self.pos)?;
        let repeated = fragment.map(|fragment| match byte {
            b'*' => self.nfa.kleene(fragment),
            b'+' => self.nfa.plus(fragment),
            _ => self.nfa.question(fragment),
        });
        self.stack.push(repeated);
        Ok(())
    }

    /// Handles `{n}`: parses the count, then replaces the preceding fragment
    /// with `n` copies of itself (zero copies erase it entirely). Leaves the
    /// scan position on the closing brace.
    fn repeat_counted(&mut self) -> Result<(), ParseError> {
        let brace_start = self.pos;
        let mut count: u32 = 0;
        loop {
            self.pos += 1;
            let Some(&byte) = self.pattern.get(self.pos) else {
                return Err(ParseError::MissingBrace(brace_start));
            };
            if byte == b'}' {
                break;
            }
            if !byte.is_ascii_digit() {
                return Err(ParseError::NondigitInBraces(byte, self.pos));
            }
            count = count * 10 + u32::from(byte - b'0');
            if count > MAX_BRACE_REPETITIONS {
                return Err(ParseError::TooLargeRepetition);
            }
        }
        if self.pos == brace_start + 1 {
            return Err(ParseError::EmptyBraces(brace_start));
        }

        let fragment = self.check_repetition_and_pop(brace_start)?;
        match count {
            0 => {}
            1 => self.stack.push(fragment),
            _ => {
                for _ in 0..count {
                    let copy = self.nfa.duplicate(fragment);
                    self.stack.push(copy);
                }
            }
        }
        Ok(())
    }

    fn check_repetition_and_pop(&mut self, pos: usize) -> Result<Option<Fragment>, ParseError> {
        let group_opens_just_before = match self.stack.last_group_start() {
            Marker::ReStart => pos == 0,
            marker => marker.opens_at() == Some(pos - 1),
        };
        if group_opens_just_before {
            return Err(ParseError::NothingToRepeat(pos));
        }
        if self.last_was_repetition {
            return Err(ParseError::MultipleRepeat(pos));
        }
        Ok(self.stack.pop_one())
    }

    fn escape(&mut self) -> Result<(), ParseError> {
        self.pos += 1;
        let Some(&byte) = self.pattern.get(self.pos) else {
            return Err(ParseError::EscapeAtEnd);
        };
        let fragment = match byte {
            b'(' | b')' | b'{' | b'}' | b'|' | b'*' | b'+' | b'?' | b'\\' => self.nfa.symbol(byte),
            b'd' => self.nfa.charset(b"0123456789"),
            _ => return Err(ParseError::EscapeUnknown(byte, self.pos)),
        };
        self.stack.push(Some(fragment));
        Ok(())
    }
}
