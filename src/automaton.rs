// SPDX-License-Identifier: Apache-2.0

//!
//! Finite-state automata as immutable value snapshots
//!
//! An [Automaton] is a start state, a list of transitions, and a list of
//! accepting states. Nothing else is stored; the alphabet and the state
//! universe are derived from the transitions on demand. Every operation in
//! [algebra](crate::algebra) consumes automata and produces new ones.
//!
//! [Automaton::validate] checks the well-formedness rules and returns a
//! [Processed] view with the derived indexes (adjacency map, alphabet,
//! state sets). Running an input string is a method on the processed view,
//! so the cost of validation is paid once per automaton, not once per run.
//!

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt::Display;

use crate::errors::Error;
use crate::names::State;

///
/// A single transition: consume a symbol in state `from`, move to state `to`
///
/// A transition with `consume == None` is an epsilon transition. These are
/// legal only transiently, between construction steps of the algebra;
/// validation rejects them.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    /// Source state
    pub from: State,
    /// Symbol consumed, or None for an epsilon transition
    pub consume: Option<char>,
    /// Destination state
    pub to: State,
}

impl Transition {
    /// Transition consuming symbol `consume`
    pub fn new(from: State, consume: char, to: State) -> Self {
        Transition {
            from,
            consume: Some(consume),
            to,
        }
    }

    /// Transition consuming nothing
    pub fn epsilon(from: State, to: State) -> Self {
        Transition {
            from,
            consume: None,
            to,
        }
    }

    /// Whether this transition consumes no symbol
    pub fn is_epsilon(&self) -> bool {
        self.consume.is_none()
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.consume {
            Some(c) => write!(f, "{} --'{}'--> {}", self.from, c, self.to),
            None => write!(f, "{} --\u{03B5}--> {}", self.from, self.to),
        }
    }
}

///
/// A finite-state recognizer
///
/// The declared alphabet and declared state list are optional cross-check
/// data: when present, validation requires them to exactly match what the
/// transitions actually use.
///
#[derive(Debug, Clone)]
pub struct Automaton {
    start: State,
    transitions: Vec<Transition>,
    accepting: Vec<State>,
    declared_alphabet: Option<BTreeSet<char>>,
    declared_states: Option<BTreeSet<State>>,
}

impl Automaton {
    /// Build an automaton from its parts
    pub fn new(start: State, transitions: Vec<Transition>, accepting: Vec<State>) -> Self {
        Automaton {
            start,
            transitions,
            accepting,
            declared_alphabet: None,
            declared_states: None,
        }
    }

    /// Declare the alphabet this automaton is expected to consume
    pub fn with_declared_alphabet(mut self, alphabet: impl IntoIterator<Item = char>) -> Self {
        self.declared_alphabet = Some(alphabet.into_iter().collect());
        self
    }

    /// Declare the states this automaton is expected to use
    pub fn with_declared_states(mut self, states: impl IntoIterator<Item = State>) -> Self {
        self.declared_states = Some(states.into_iter().collect());
        self
    }

    /// Start state
    pub fn start(&self) -> State {
        self.start
    }

    /// Transition list, in construction order
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Accepting states, in construction order
    pub fn accepting(&self) -> &[State] {
        &self.accepting
    }

    ///
    /// Check well-formedness and build the enriched view
    ///
    /// Rules:
    /// - every transition must consume a symbol ([Error::MalformedTransition])
    /// - exact duplicate transitions are dropped silently
    /// - two transitions from one state on one symbol with different
    ///   destinations are [Error::Nondeterminism] unless `allow_nondeterminism`
    /// - a declared alphabet or state list must exactly match usage
    ///   ([Error::AlphabetMismatch], [Error::StateMismatch])
    ///
    pub fn validate(&self, allow_nondeterminism: bool) -> Result<Processed<'_>, Error> {
        let mut state_map: BTreeMap<State, Vec<Transition>> = BTreeMap::new();
        let mut seen: HashSet<Transition> = HashSet::new();
        for &t in &self.transitions {
            let consume = match t.consume {
                Some(c) => c,
                None => return Err(Error::MalformedTransition(t.from, t.to)),
            };
            if !seen.insert(t) {
                continue;
            }
            let outgoing = state_map.entry(t.from).or_insert_with(Vec::new);
            if !allow_nondeterminism {
                if let Some(existing) = outgoing.iter().find(|o| o.consume == t.consume) {
                    return Err(Error::Nondeterminism {
                        from: t.from,
                        consume,
                        existing: existing.to,
                        conflicting: t.to,
                    });
                }
            }
            outgoing.push(t);
        }

        let alphabet: BTreeSet<char> = self.transitions.iter().filter_map(|t| t.consume).collect();
        let transition_states: BTreeSet<State> = self
            .transitions
            .iter()
            .flat_map(|t| [t.from, t.to])
            .collect();
        let mut all_states = transition_states.clone();
        all_states.insert(self.start);
        all_states.extend(self.accepting.iter().copied());

        if let Some(declared) = &self.declared_alphabet {
            let undeclared: Vec<char> = alphabet.difference(declared).copied().collect();
            let unused: Vec<char> = declared.difference(&alphabet).copied().collect();
            if !undeclared.is_empty() || !unused.is_empty() {
                return Err(Error::AlphabetMismatch { undeclared, unused });
            }
        }
        if let Some(declared) = &self.declared_states {
            let undeclared: Vec<State> = all_states.difference(declared).copied().collect();
            let unused: Vec<State> = declared.difference(&all_states).copied().collect();
            if !undeclared.is_empty() || !unused.is_empty() {
                return Err(Error::StateMismatch { undeclared, unused });
            }
        }

        Ok(Processed {
            automaton: self,
            state_map,
            alphabet,
            transition_states,
            all_states,
            accepting: self.accepting.iter().copied().collect(),
        })
    }

    ///
    /// Validate deterministically and run `input`
    ///
    /// Convenience wrapper over [Automaton::validate] + [Processed::run] for
    /// one-shot use.
    ///
    pub fn accepts(&self, input: &str) -> Result<bool, Error> {
        Ok(self.validate(false)?.run(input))
    }
}

impl Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "start: {}", self.start)?;
        write!(f, "accepting:")?;
        for s in &self.accepting {
            write!(f, " {}", s)?;
        }
        writeln!(f)?;
        for t in &self.transitions {
            writeln!(f, "  {}", t)?;
        }
        Ok(())
    }
}

///
/// An automaton together with the indexes derived during validation
///
#[derive(Debug)]
pub struct Processed<'a> {
    automaton: &'a Automaton,
    state_map: BTreeMap<State, Vec<Transition>>,
    alphabet: BTreeSet<char>,
    transition_states: BTreeSet<State>,
    all_states: BTreeSet<State>,
    accepting: BTreeSet<State>,
}

impl<'a> Processed<'a> {
    /// The underlying automaton
    pub fn automaton(&self) -> &'a Automaton {
        self.automaton
    }

    /// Deduplicated transitions grouped by source state
    pub fn state_map(&self) -> &BTreeMap<State, Vec<Transition>> {
        &self.state_map
    }

    /// Symbols consumed by at least one transition
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// States that occur as a transition endpoint
    pub fn transition_states(&self) -> &BTreeSet<State> {
        &self.transition_states
    }

    /// Transition endpoints plus the start and accepting states
    pub fn all_states(&self) -> &BTreeSet<State> {
        &self.all_states
    }

    /// Accepting states as a set
    pub fn accepting(&self) -> &BTreeSet<State> {
        &self.accepting
    }

    /// Whether `state` is accepting
    pub fn is_accepting(&self, state: State) -> bool {
        self.accepting.contains(&state)
    }

    ///
    /// Run `input` through the automaton
    ///
    /// The walk is deterministic: at each step the first transition out of
    /// the current state on the current symbol is taken (validation
    /// guarantees it is the only one unless nondeterminism was allowed).
    /// A missing transition rejects the input.
    ///
    pub fn run(&self, input: &str) -> bool {
        let mut current = self.automaton.start;
        for c in input.chars() {
            let next = self.state_map.get(&current).and_then(|outgoing| {
                outgoing
                    .iter()
                    .find(|t| t.consume == Some(c))
                    .map(|t| t.to)
            });
            match next {
                Some(to) => current = to,
                None => return false,
            }
        }
        self.accepting.contains(&current)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::names::NameGenerator;

    // recognizer for binary numerals: "0", or "1" followed by any bits
    fn binary(names: &NameGenerator) -> Automaton {
        let start = names.fresh();
        let zero = names.fresh();
        let not_zero = names.fresh();
        Automaton::new(
            start,
            vec![
                Transition::new(start, '0', zero),
                Transition::new(start, '1', not_zero),
                Transition::new(not_zero, '0', not_zero),
                Transition::new(not_zero, '1', not_zero),
            ],
            vec![zero, not_zero],
        )
    }

    #[test]
    fn runs_binary_numerals() {
        let names = NameGenerator::from_seed(1);
        let automaton = binary(&names);
        println!("{}", automaton);
        let processed = automaton.validate(false).unwrap();
        for good in ["0", "1", "10", "11010011", "1011"] {
            assert!(processed.run(good), "should accept {:?}", good);
        }
        for bad in ["", "01", "123", "0 1"] {
            assert!(!processed.run(bad), "should reject {:?}", bad);
        }
    }

    #[test]
    fn rejects_epsilon_transitions() {
        let names = NameGenerator::from_seed(1);
        let a = names.fresh();
        let b = names.fresh();
        let automaton = Automaton::new(a, vec![Transition::epsilon(a, b)], vec![b]);
        assert_eq!(
            automaton.validate(false).unwrap_err(),
            Error::MalformedTransition(a, b)
        );
    }

    #[test]
    fn detects_nondeterminism() {
        let names = NameGenerator::from_seed(1);
        let a = names.fresh();
        let b = names.fresh();
        let c = names.fresh();
        let automaton = Automaton::new(
            a,
            vec![Transition::new(a, 'x', b), Transition::new(a, 'x', c)],
            vec![b],
        );
        assert_eq!(
            automaton.validate(false).unwrap_err(),
            Error::Nondeterminism {
                from: a,
                consume: 'x',
                existing: b,
                conflicting: c,
            }
        );
        // the same automaton is fine when nondeterminism is allowed
        let processed = automaton.validate(true).unwrap();
        assert_eq!(processed.state_map()[&a].len(), 2);
    }

    #[test]
    fn deduplicates_exact_copies() {
        let names = NameGenerator::from_seed(1);
        let a = names.fresh();
        let b = names.fresh();
        let automaton = Automaton::new(
            a,
            vec![Transition::new(a, 'x', b), Transition::new(a, 'x', b)],
            vec![b],
        );
        let processed = automaton.validate(false).unwrap();
        assert_eq!(processed.state_map()[&a].len(), 1);
        assert!(processed.run("x"));
    }

    #[test]
    fn checks_declared_alphabet_and_states() {
        let names = NameGenerator::from_seed(1);
        let a = names.fresh();
        let b = names.fresh();
        let stray = names.fresh();
        let automaton = Automaton::new(a, vec![Transition::new(a, 'x', b)], vec![b]);

        let declared = automaton
            .clone()
            .with_declared_alphabet(['x'])
            .with_declared_states([a, b]);
        assert!(declared.validate(false).is_ok());

        let bad_alphabet = automaton.clone().with_declared_alphabet(['x', 'y']);
        assert_eq!(
            bad_alphabet.validate(false).unwrap_err(),
            Error::AlphabetMismatch {
                undeclared: vec![],
                unused: vec!['y'],
            }
        );

        let bad_states = automaton.with_declared_states([a, b, stray]);
        assert_eq!(
            bad_states.validate(false).unwrap_err(),
            Error::StateMismatch {
                undeclared: vec![],
                unused: vec![stray],
            }
        );
    }
}
