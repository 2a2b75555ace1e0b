// SPDX-License-Identifier: Apache-2.0

//!
//! State minimization by signature merging
//!
//! Two states of a deterministic automaton are interchangeable when they
//! have the same outgoing behavior: the same set of (symbol, destination)
//! pairs, and the same acceptance. [merge_equivalent_states] finds such a
//! pair, redirects everything flowing into the duplicate onto the state
//! found first, and rescans, because a merge can make further states
//! interchangeable (the destinations of their transitions may now
//! coincide). The loop terminates because every merge removes a state.
//!
//! [minimize] additionally prunes states unreachable from the start.
//!

use std::collections::HashMap;

use crate::algebra::reachable_from_start;
use crate::automaton::{Automaton, Transition};
use crate::errors::Error;
use crate::names::State;

type Signature = (Vec<(char, State)>, bool);

fn signature(moves: &[Transition], accepting: bool) -> Signature {
    let mut behavior: Vec<(char, State)> = moves
        .iter()
        .filter_map(|t| t.consume.map(|c| (c, t.to)))
        .collect();
    behavior.sort_unstable();
    (behavior, accepting)
}

///
/// Merge states with identical outgoing behavior until none remain
///
/// Only states that take part in a transition are considered; an isolated
/// accepting start state has no behavior to compare. The input must be a
/// valid deterministic automaton.
///
pub fn merge_equivalent_states(a: &Automaton) -> Result<Automaton, Error> {
    let mut current = a.clone();
    loop {
        let duplicate = {
            let processed = current.validate(false)?;
            let mut by_signature: HashMap<Signature, State> = HashMap::new();
            let mut found = None;
            for &state in processed.transition_states() {
                let moves = processed
                    .state_map()
                    .get(&state)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                let key = signature(moves, processed.is_accepting(state));
                match by_signature.get(&key) {
                    Some(&original) => {
                        found = Some((state, original));
                        break;
                    }
                    None => {
                        by_signature.insert(key, state);
                    }
                }
            }
            found
        };
        let (duplicate, original) = match duplicate {
            Some(pair) => pair,
            None => return Ok(current),
        };

        let start = if current.start() == duplicate {
            original
        } else {
            current.start()
        };
        let transitions: Vec<Transition> = current
            .transitions()
            .iter()
            .filter(|t| t.from != duplicate)
            .map(|t| {
                if t.to == duplicate {
                    Transition {
                        to: original,
                        ..*t
                    }
                } else {
                    *t
                }
            })
            .collect();
        let accepting: Vec<State> = current
            .accepting()
            .iter()
            .copied()
            .filter(|&s| s != duplicate)
            .collect();
        current = Automaton::new(start, transitions, accepting);
    }
}

///
/// Merge equivalent states and prune unreachable ones
///
pub fn minimize(a: &Automaton) -> Result<Automaton, Error> {
    Ok(reachable_from_start(&merge_equivalent_states(a)?))
}
