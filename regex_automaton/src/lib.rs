//! Regex to automaton compiler
//!
//! This library compiles patterns written in a small regex dialect into
//! finite automata:
//!
//! - [`parser`] turns a pattern into a [`SyntaxNode`] tree,
//! - [`compiler`] builds a Thompson [`NFA`] with epsilon transitions,
//! - [`determinize`] runs subset construction to get a [`DFA`],
//! - [`minimize`] collapses that DFA with Hopcroft's algorithm,
//! - [`matcher`] drives a DFA over text.
//!
//! The dialect has literal characters, the `.` wildcard, implicit
//! concatenation, `|`, `*`, `+` and parentheses. There are no character
//! classes, anchors or escapes.

#[macro_use]
mod macros;

pub mod builder;
pub mod compiler;
pub mod determinize;
pub mod dfa;
pub mod matcher;
pub mod minimize;
pub mod nfa;
pub mod parser;
pub mod render;
pub mod symbol;

pub use builder::{compile, Automata, Builder, Config};
pub use compiler::Compiler;
pub use determinize::Determinizer;
pub use dfa::DFA;
pub use matcher::{accepts_word, search_line, Matcher, Span};
pub use minimize::minimize;
pub use nfa::{Fragment, State, StateId, StateSet, Transition, NFA};
pub use parser::{
    parse, parse_with_nest_limit, SyntaxNode, DEFAULT_NEST_LIMIT,
};
pub use symbol::Symbol;

/// The result of compiling a pattern to automata
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that can occur while parsing a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The pattern, or the part of it being parsed, is empty
    EmptyPattern,
    /// `()` with nothing inside, at the offset of `(`
    EmptyGroup { offset: usize },
    /// A `)` without a matching `(`, or a `(` that is never closed
    UnbalancedParenthesis { offset: usize },
    /// `*`, `+` or `|` without the operand it needs
    MissingOperand { operator: char, offset: usize },
    /// The pattern nests groups, repetitions or alternations deeper than the
    /// configured limit
    NestLimitExceeded { limit: u32 },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyPattern => write!(f, "empty pattern"),
            ParseError::EmptyGroup { offset } => {
                write!(f, "empty group at offset {}", offset)
            }
            ParseError::UnbalancedParenthesis { offset } => {
                write!(f, "unbalanced parenthesis at offset {}", offset)
            }
            ParseError::MissingOperand { operator, offset } => write!(
                f,
                "'{}' at offset {} is missing an operand",
                operator, offset
            ),
            ParseError::NestLimitExceeded { limit } => {
                write!(f, "pattern nests deeper than the limit of {}", limit)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors that can occur during compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The pattern could not be parsed
    Parse(ParseError),
    /// Subset construction exceeded the configured number of DFA states
    TooManyStates { limit: usize },
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Parse(err) => write!(f, "parse error: {}", err),
            CompileError::TooManyStates { limit } => {
                write!(f, "DFA exceeds the size limit of {} states", limit)
            }
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Parse(err) => Some(err),
            CompileError::TooManyStates { .. } => None,
        }
    }
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> CompileError {
        CompileError::Parse(err)
    }
}
