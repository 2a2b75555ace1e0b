// SPDX-License-Identifier: Apache-2.0

//!
//! Error codes
//!

use std::fmt::Display;

use crate::names::State;

#[derive(Debug, PartialEq, Eq, Clone)]
///
/// Error codes produced by automaton validation, parsing, evaluation,
/// and the automaton algebra
///
/// Every failure aborts the operation in progress with no partial result.
/// Each variant carries enough context to identify the offending token,
/// transition, or state.
///
pub enum Error {
    /// A transition does not consume a symbol.
    ///
    /// Epsilon transitions exist only transiently during construction and
    /// are rejected when an automaton is validated.
    MalformedTransition(State, State),

    /// Two transitions leave the same state on the same symbol with
    /// different destinations, and nondeterminism was not allowed.
    Nondeterminism {
        /// Common source state of the conflicting transitions
        from: State,
        /// Symbol both transitions consume
        consume: char,
        /// Destination of the transition seen first
        existing: State,
        /// Destination of the conflicting transition
        conflicting: State,
    },

    /// The declared alphabet does not exactly match the symbols consumed
    /// by the transitions.
    AlphabetMismatch {
        /// Symbols consumed but not declared
        undeclared: Vec<char>,
        /// Symbols declared but never consumed
        unused: Vec<char>,
    },

    /// The declared state list does not exactly match the states used in
    /// the transitions.
    StateMismatch {
        /// States used but not declared
        undeclared: Vec<State>,
        /// States declared but never used
        unused: Vec<State>,
    },

    /// A closing parenthesis without a matching opening parenthesis, or an
    /// opening parenthesis left unclosed at the end of the expression.
    UnbalancedParentheses,

    /// A literal token was encountered but the operator table has no
    /// `to_value` function to turn it into a domain value.
    NotAValue(char),

    /// Implicit catenation was required but the operator table declares no
    /// default operator.
    NoDefaultOperator,

    /// The escape token appeared as the last token of the expression.
    DanglingEscape(char),

    /// A postfix sequence referenced an operator symbol that is not in the
    /// operator table.
    UnknownOperator(String),

    /// An operator required more values than the evaluation stack held.
    StackUnderflow(String),

    /// More than one value remained on the stack after the postfix
    /// sequence was consumed.
    UnconsumedValues(usize),

    /// Division by zero.
    DivisionByZero,

    /// Epsilon removal exceeded its iteration ceiling. This indicates a
    /// cycle the algorithm failed to resolve.
    EpsilonRemovalDivergence,

    /// An aggregation was requested for an empty set of states.
    EmptyStateSet,

    /// A state that is itself an aggregate was passed as an input to a
    /// further aggregation.
    AggregateOfAggregate(State),

    /// A repetition count was not a number.
    ArityParseFailure(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedTransition(from, to) => {
                write!(
                    f,
                    "transition {} --> {} does not consume a symbol; \u{03B5}-transitions are not allowed here",
                    from, to
                )
            }
            Self::Nondeterminism {
                from,
                consume,
                existing,
                conflicting,
            } => {
                write!(
                    f,
                    "transition from {} on '{}' creates nondeterminism between {} and {}",
                    from, consume, existing, conflicting
                )
            }
            Self::AlphabetMismatch { undeclared, unused } => {
                write!(
                    f,
                    "declared alphabet does not match usage (undeclared: {:?}, unused: {:?})",
                    undeclared, unused
                )
            }
            Self::StateMismatch { undeclared, unused } => {
                let show = |v: &[State]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
                write!(
                    f,
                    "declared states do not match usage (undeclared: {:?}, unused: {:?})",
                    show(undeclared),
                    show(unused)
                )
            }
            Self::UnbalancedParentheses => "unbalanced parentheses".fmt(f),
            Self::NotAValue(token) => write!(f, "'{}' is not a value", token),
            Self::NoDefaultOperator => {
                "catenation is required but no default operator is defined".fmt(f)
            }
            Self::DanglingEscape(escape) => {
                write!(f, "escape token '{}' has no following symbol", escape)
            }
            Self::UnknownOperator(symbol) => {
                write!(f, "don't know what to do with operator '{}'", symbol)
            }
            Self::StackUnderflow(symbol) => {
                write!(f, "not enough values on the stack to apply '{}'", symbol)
            }
            Self::UnconsumedValues(count) => {
                write!(
                    f,
                    "expected a single result but {} values remain on the stack",
                    count
                )
            }
            Self::DivisionByZero => "division by zero".fmt(f),
            Self::EpsilonRemovalDivergence => {
                "attempted to remove too many \u{03B5}-transitions; possible loop".fmt(f)
            }
            Self::EmptyStateSet => "cannot aggregate an empty set of states".fmt(f),
            Self::AggregateOfAggregate(state) => {
                write!(f, "state {} is already an aggregate", state)
            }
            Self::ArityParseFailure(text) => {
                write!(f, "'{}' does not appear to be a number", text)
            }
        }
    }
}

impl std::error::Error for Error {}
