// SPDX-License-Identifier: Apache-2.0

//!
//! From automata back to expressions
//!
//! [regular_expression] reconstructs a textual regular expression by state
//! elimination: the expression for the paths from one state to another is
//! defined recursively over a shrinking list of states the path may pass
//! through. With `via` the next allowed intermediate state, the paths from
//! `from` to `to` either avoid `via` entirely or enter it, loop on it, and
//! leave it, each leg using only the remaining intermediates.
//!
//! The same (from, to, remaining-intermediates) query recurs many times
//! across the recursion, so results are memoized; the intermediates are a
//! fixed ordering of all states, which makes every remaining list a suffix
//! of that ordering and the memo key a plain index.
//!

use std::collections::HashMap;

use crate::algebra::reachable_from_start;
use crate::automaton::{Automaton, Transition};
use crate::errors::Error;
use crate::exprs::{alternate_expr, catenate_expr, to_value_expr, zero_or_more_expr};
use crate::minimizer::merge_equivalent_states;
use crate::names::State;

fn expression(
    transitions: &[Transition],
    order: &[State],
    memo: &mut HashMap<(State, State, usize), String>,
    from: State,
    to: State,
    via: usize,
) -> String {
    if let Some(known) = memo.get(&(from, to, via)) {
        return known.clone();
    }
    let result = if via == order.len() {
        // no intermediate states left: direct transitions only
        let direct: Vec<String> = transitions
            .iter()
            .filter(|t| t.from == from && t.to == to)
            .filter_map(|t| t.consume)
            .map(to_value_expr)
            .collect();
        alternate_expr(&direct)
    } else {
        let waypoint = order[via];
        let enter = expression(transitions, order, memo, from, waypoint, via + 1);
        let stay = zero_or_more_expr(&expression(
            transitions, order, memo, waypoint, waypoint, via + 1,
        ));
        let leave = expression(transitions, order, memo, waypoint, to, via + 1);
        let through = catenate_expr(&[enter, stay, leave]);
        let around = expression(transitions, order, memo, from, to, via + 1);
        alternate_expr(&[through, around])
    };
    memo.insert((from, to, via), result.clone());
    result
}

///
/// A regular expression in the formal dialect accepting exactly the
/// language of `a`
///
/// The automaton is merged and pruned first, which keeps the expression
/// from describing states that cannot matter. An automaton accepting
/// nothing yields `∅`; one whose start state accepts gets `ε` alternated
/// into the result.
///
pub fn regular_expression(a: &Automaton) -> Result<String, Error> {
    let pruned = reachable_from_start(&merge_equivalent_states(a)?);
    let processed = pruned.validate(false)?;
    if processed.accepting().is_empty() {
        return Ok("\u{2205}".to_string());
    }

    let order: Vec<State> = processed.all_states().iter().copied().collect();
    let mut memo = HashMap::new();
    let start = pruned.start();
    let paths: Vec<String> = processed
        .accepting()
        .iter()
        .map(|&to| expression(pruned.transitions(), &order, &mut memo, start, to, 0))
        .collect();
    let combined = alternate_expr(&paths);
    Ok(if processed.is_accepting(start) {
        alternate_expr(&["\u{03B5}".to_string(), combined])
    } else {
        combined
    })
}
