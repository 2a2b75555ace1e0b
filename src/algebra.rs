// SPDX-License-Identifier: Apache-2.0

//!
//! The automaton algebra
//!
//! Primitive recognizers ([empty_set], [empty_string], [literal]) and the
//! operators that combine them: [union], [intersection], [difference],
//! [catenation], [complement], and the Kleene operators [one_or_more],
//! [zero_or_one], [zero_or_more].
//!
//! The compound operators are built from three constructions:
//! - [product_with]: synchronized exploration of two automata, pairs of
//!   states aggregated through a [StateAggregator]
//! - [remove_epsilon_transitions]: resolves the epsilon edges introduced by
//!   [epsilon_catenate] and the loop edges of [one_or_more]
//! - [powerset_with]: subset construction, turning a nondeterministic
//!   recognizer into a deterministic one
//!
//! Every operator returns a valid epsilon-free automaton; [union],
//! [intersection] and [difference] also merge equivalent states so that
//! repeated combination does not accrete redundant states.
//!

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use crate::aggregator::StateAggregator;
use crate::automaton::{Automaton, Transition};
use crate::bfs_queues::BfsQueue;
use crate::errors::Error;
use crate::minimizer::merge_equivalent_states;
use crate::names::{NameGenerator, State};

/// The automaton rejecting everything
pub fn empty_set(names: &NameGenerator) -> Automaton {
    let start = names.fresh();
    Automaton::new(start, Vec::new(), Vec::new())
}

/// The automaton accepting exactly the empty string
pub fn empty_string(names: &NameGenerator) -> Automaton {
    let start = names.fresh();
    Automaton::new(start, Vec::new(), vec![start])
}

/// The automaton accepting exactly the one-symbol string `symbol`
pub fn literal(names: &NameGenerator, symbol: char) -> Automaton {
    let start = names.fresh();
    let end = names.fresh();
    Automaton::new(start, vec![Transition::new(start, symbol, end)], vec![end])
}

/// The automaton accepting every one-symbol string over `alphabet`
pub fn any_symbol(names: &NameGenerator, alphabet: &[char]) -> Result<Automaton, Error> {
    let mut result: Option<Automaton> = None;
    for &symbol in alphabet {
        let single = literal(names, symbol);
        result = Some(match result {
            None => single,
            Some(sum) => union(names, &sum, &single)?,
        });
    }
    Ok(result.unwrap_or_else(|| empty_set(names)))
}

///
/// An isomorphic copy with entirely fresh state ids
///
/// Needed when an automaton is combined with itself; the algebra assumes
/// the two operands of a combination never share a state.
///
pub fn dup(names: &NameGenerator, a: &Automaton) -> Automaton {
    let mut renames: HashMap<State, State> = HashMap::new();
    let renamed =
        |renames: &mut HashMap<State, State>, s: State| *renames.entry(s).or_insert_with(|| names.fresh());
    let start = renamed(&mut renames, a.start());
    let transitions = a
        .transitions()
        .iter()
        .map(|t| Transition {
            from: renamed(&mut renames, t.from),
            consume: t.consume,
            to: renamed(&mut renames, t.to),
        })
        .collect();
    let accepting = a
        .accepting()
        .iter()
        .map(|&s| renamed(&mut renames, s))
        .collect();
    Automaton::new(start, transitions, accepting)
}

fn adjacency(transitions: &[Transition]) -> HashMap<State, Vec<Transition>> {
    let mut map: HashMap<State, Vec<Transition>> = HashMap::new();
    for &t in transitions {
        map.entry(t.from).or_insert_with(Vec::new).push(t);
    }
    map
}

fn states_of(a: &Automaton) -> BTreeSet<State> {
    let mut states: BTreeSet<State> = a
        .transitions()
        .iter()
        .flat_map(|t| [t.from, t.to])
        .collect();
    states.insert(a.start());
    states.extend(a.accepting().iter().copied());
    states
}

// The synchronized moves out of a pair of states. A side without a move on
// a symbol the other side consumes "dies": its half of the pair becomes None.
fn product_moves(
    a_moves: &[Transition],
    b_moves: &[Transition],
) -> Vec<(char, Option<State>, Option<State>)> {
    if a_moves.is_empty() {
        return b_moves
            .iter()
            .filter_map(|t| t.consume.map(|c| (c, None, Some(t.to))))
            .collect();
    }
    if b_moves.is_empty() {
        return a_moves
            .iter()
            .filter_map(|t| t.consume.map(|c| (c, Some(t.to), None)))
            .collect();
    }
    let b_map: HashMap<char, State> = b_moves
        .iter()
        .filter_map(|t| t.consume.map(|c| (c, t.to)))
        .collect();
    let mut joined: HashSet<char> = HashSet::new();
    let mut moves = Vec::new();
    for t in a_moves {
        if let Some(c) = t.consume {
            match b_map.get(&c) {
                Some(&b_to) => {
                    joined.insert(c);
                    moves.push((c, Some(t.to), Some(b_to)));
                }
                None => moves.push((c, Some(t.to), None)),
            }
        }
    }
    for t in b_moves {
        if let Some(c) = t.consume {
            if !joined.contains(&c) {
                moves.push((c, None, Some(t.to)));
            }
        }
    }
    moves
}

///
/// The product automaton of `a` and `b`, with no accepting states
///
/// Each product state stands for a pair: a state of `a` (or None once that
/// side has died) and a state of `b`. [product_operation] decides
/// acceptance from a set combinator; the raw product leaves it empty.
///
pub fn product(names: &NameGenerator, a: &Automaton, b: &Automaton) -> Result<Automaton, Error> {
    product_with(names, a, b, &mut StateAggregator::new())
}

/// [product] with a caller-supplied aggregator, so the pair structure of
/// the product states can be interrogated afterwards
pub fn product_with(
    names: &NameGenerator,
    a: &Automaton,
    b: &Automaton,
    aggregator: &mut StateAggregator,
) -> Result<Automaton, Error> {
    let a_map = adjacency(a.transitions());
    let b_map = adjacency(b.transitions());
    let none: Vec<Transition> = Vec::new();

    let start = aggregator.state_from_set(names, &[Some(a.start()), Some(b.start())])?;
    let mut queue: BfsQueue<(Option<State>, Option<State>)> = BfsQueue::new();
    queue.push((Some(a.start()), Some(b.start())));
    let mut transitions = Vec::new();

    while let Some((a_state, b_state)) = queue.pop() {
        let a_moves = a_state.and_then(|s| a_map.get(&s)).unwrap_or(&none);
        let b_moves = b_state.and_then(|s| b_map.get(&s)).unwrap_or(&none);
        let from = aggregator.state_from_set(names, &[a_state, b_state])?;
        for (consume, a_to, b_to) in product_moves(a_moves, b_moves) {
            let to = aggregator.state_from_set(names, &[a_to, b_to])?;
            transitions.push(Transition::new(from, consume, to));
            queue.push((a_to, b_to));
        }
    }
    Ok(Automaton::new(start, transitions, Vec::new()))
}

///
/// Build the product of `a` and `b` and decide acceptance with a set
/// combinator
///
/// The combinator receives the product states that accept because `a`
/// accepts and those that accept because `b` accepts; union, intersection
/// and set difference of the two give the three boolean operators. The
/// result's accepting list is restricted to product states that are
/// actually reachable, the start state included.
///
pub fn product_operation(
    names: &NameGenerator,
    a: &Automaton,
    b: &Automaton,
    combine: impl Fn(&BTreeSet<State>, &BTreeSet<State>) -> BTreeSet<State>,
) -> Result<Automaton, Error> {
    let mut aggregator = StateAggregator::new();
    let pairs = product_with(names, a, b, &mut aggregator)?;

    let a_side: Vec<Option<State>> = std::iter::once(None)
        .chain(states_of(a).into_iter().map(Some))
        .collect();
    let b_side: Vec<Option<State>> = std::iter::once(None)
        .chain(states_of(b).into_iter().map(Some))
        .collect();

    let mut accepts_a: BTreeSet<State> = BTreeSet::new();
    for &acc in a.accepting() {
        for &b_state in &b_side {
            accepts_a.insert(aggregator.state_from_set(names, &[Some(acc), b_state])?);
        }
    }
    let mut accepts_b: BTreeSet<State> = BTreeSet::new();
    for &acc in b.accepting() {
        for &a_state in &a_side {
            accepts_b.insert(aggregator.state_from_set(names, &[a_state, Some(acc)])?);
        }
    }

    let mut reachable: BTreeSet<State> = pairs
        .transitions()
        .iter()
        .flat_map(|t| [t.from, t.to])
        .collect();
    reachable.insert(pairs.start());

    let accepting: Vec<State> = combine(&accepts_a, &accepts_b)
        .into_iter()
        .filter(|s| reachable.contains(s))
        .collect();
    Ok(Automaton::new(
        pairs.start(),
        pairs.transitions().to_vec(),
        accepting,
    ))
}

/// The automaton accepting what `a` or `b` accepts
pub fn union(names: &NameGenerator, a: &Automaton, b: &Automaton) -> Result<Automaton, Error> {
    let combined = product_operation(names, a, b, |x, y| x.union(y).copied().collect())?;
    merge_equivalent_states(&combined)
}

/// The automaton accepting what both `a` and `b` accept
pub fn intersection(
    names: &NameGenerator,
    a: &Automaton,
    b: &Automaton,
) -> Result<Automaton, Error> {
    let combined = product_operation(names, a, b, |x, y| x.intersection(y).copied().collect())?;
    merge_equivalent_states(&combined)
}

/// The automaton accepting what `a` accepts and `b` does not
pub fn difference(
    names: &NameGenerator,
    a: &Automaton,
    b: &Automaton,
) -> Result<Automaton, Error> {
    let combined = product_operation(names, a, b, |x, y| x.difference(y).copied().collect())?;
    merge_equivalent_states(&combined)
}

/// The automaton accepting every string over `alphabet` that `a` rejects
pub fn complement(
    names: &NameGenerator,
    alphabet: &[char],
    a: &Automaton,
) -> Result<Automaton, Error> {
    let everything = zero_or_more(names, &any_symbol(names, alphabet)?)?;
    difference(names, &everything, a)
}

/// The automaton accepting every one-symbol string over `alphabet` that
/// `a` rejects
pub fn character_complement(
    names: &NameGenerator,
    alphabet: &[char],
    a: &Automaton,
) -> Result<Automaton, Error> {
    intersection(
        names,
        &any_symbol(names, alphabet)?,
        &complement(names, alphabet, a)?,
    )
}

///
/// Join `a` to `b` with epsilon transitions from each accepting state of
/// `a` to the start of `b`
///
/// The result is not a valid automaton until the epsilon transitions are
/// removed; [catenation] does the full pipeline.
///
pub fn epsilon_catenate(a: &Automaton, b: &Automaton) -> Automaton {
    let mut transitions = a.transitions().to_vec();
    transitions.extend(
        a.accepting()
            .iter()
            .map(|&accepting| Transition::epsilon(accepting, b.start())),
    );
    transitions.extend_from_slice(b.transitions());
    Automaton::new(a.start(), transitions, b.accepting().to_vec())
}

fn push_unique(moves: &mut Vec<Transition>, t: Transition) {
    if !moves.iter().any(|m| m.consume == t.consume && m.to == t.to) {
        moves.push(t);
    }
}

///
/// Replace every epsilon transition by copies of the non-epsilon
/// transitions it reaches
///
/// A state whose epsilon targets still have unresolved epsilon transitions
/// of their own is deferred and retried later. The number of retries is
/// bounded by the transition count; exceeding the bound means the epsilon
/// edges form a cycle the deferral cannot untangle, and the whole removal
/// fails with [Error::EpsilonRemovalDivergence]. A state with an epsilon
/// transition to an accepting state becomes accepting itself.
///
pub fn remove_epsilon_transitions(a: &Automaton) -> Result<Automaton, Error> {
    let mut accepting: BTreeSet<State> = a.accepting().iter().copied().collect();

    // non-epsilon adjacency, with key insertion order retained so the
    // flattened output is deterministic
    let mut key_order: Vec<State> = Vec::new();
    let mut state_map: HashMap<State, Vec<Transition>> = HashMap::new();
    for &t in a.transitions().iter().filter(|t| !t.is_epsilon()) {
        if !state_map.contains_key(&t.from) {
            key_order.push(t.from);
        }
        state_map.entry(t.from).or_insert_with(Vec::new).push(t);
    }

    let mut epsilon_order: Vec<State> = Vec::new();
    let mut epsilon_map: HashMap<State, BTreeSet<State>> = HashMap::new();
    for t in a.transitions().iter().filter(|t| t.is_epsilon()) {
        if !epsilon_map.contains_key(&t.from) {
            epsilon_order.push(t.from);
        }
        epsilon_map.entry(t.from).or_insert_with(BTreeSet::new).insert(t.to);
    }

    let mut unresolved: HashSet<State> = epsilon_map.keys().copied().collect();
    let mut queue: VecDeque<(State, BTreeSet<State>)> = epsilon_order
        .iter()
        .map(|&s| (s, epsilon_map[&s].clone()))
        .collect();

    let ceiling = a.transitions().len();
    let mut rounds = 0;
    while let Some((from, to_set)) = queue.pop_front() {
        if rounds > ceiling {
            return Err(Error::EpsilonRemovalDivergence);
        }
        rounds += 1;

        // an epsilon transition to oneself resolves to nothing
        let targets: Vec<State> = to_set.iter().copied().filter(|&to| to != from).collect();
        if targets.iter().any(|to| unresolved.contains(to)) {
            queue.push_back((from, to_set));
            continue;
        }
        for to in targets {
            let copies = state_map.get(&to).cloned().unwrap_or_default();
            if !copies.is_empty() {
                if !state_map.contains_key(&from) {
                    key_order.push(from);
                }
                let moves = state_map.entry(from).or_insert_with(Vec::new);
                for copy in copies {
                    push_unique(
                        moves,
                        Transition {
                            from,
                            consume: copy.consume,
                            to: copy.to,
                        },
                    );
                }
            }
            if accepting.contains(&to) {
                accepting.insert(from);
            }
        }
        unresolved.remove(&from);
    }

    let mut transitions = Vec::new();
    for state in key_order {
        if let Some(moves) = state_map.remove(&state) {
            transitions.extend(moves);
        }
    }
    Ok(Automaton::new(
        a.start(),
        transitions,
        accepting.into_iter().collect(),
    ))
}

///
/// Drop every state (and its transitions) not reachable from the start
///
pub fn reachable_from_start(a: &Automaton) -> Automaton {
    let state_map = adjacency(a.transitions());
    let mut queue = BfsQueue::new();
    queue.push(a.start());
    let mut visited: HashSet<State> = HashSet::new();
    let mut transitions = Vec::new();
    while let Some(state) = queue.pop() {
        visited.insert(state);
        if let Some(moves) = state_map.get(&state) {
            for &t in moves {
                transitions.push(t);
                queue.push(t.to);
            }
        }
    }
    let accepting = a
        .accepting()
        .iter()
        .copied()
        .filter(|s| visited.contains(s))
        .collect();
    Automaton::new(a.start(), transitions, accepting)
}

///
/// Subset construction: the deterministic automaton equivalent to a
/// (possibly nondeterministic) epsilon-free automaton
///
pub fn powerset(names: &NameGenerator, a: &Automaton) -> Result<Automaton, Error> {
    powerset_with(names, a, &mut StateAggregator::new())
}

///
/// [powerset] with a caller-supplied aggregator
///
/// Each output state aggregates the set of input states the automaton
/// could be in; a singleton set is the input state itself, so the start
/// state carries over unchanged.
///
pub fn powerset_with(
    names: &NameGenerator,
    a: &Automaton,
    aggregator: &mut StateAggregator,
) -> Result<Automaton, Error> {
    let processed = a.validate(true)?;
    let mut queue: BfsQueue<BTreeSet<State>> = BfsQueue::new();
    queue.push(std::iter::once(a.start()).collect());
    let mut transitions = Vec::new();
    let mut accepting = Vec::new();

    while let Some(state_set) = queue.pop() {
        let members: Vec<Option<State>> = state_set.iter().copied().map(Some).collect();
        let from = aggregator.state_from_set(names, &members)?;

        // union of destinations per symbol, symbols in first-seen order
        let mut symbol_order: Vec<char> = Vec::new();
        let mut destinations: HashMap<char, BTreeSet<State>> = HashMap::new();
        for state in &state_set {
            if let Some(moves) = processed.state_map().get(state) {
                for t in moves {
                    if let Some(c) = t.consume {
                        if !destinations.contains_key(&c) {
                            symbol_order.push(c);
                        }
                        destinations.entry(c).or_insert_with(BTreeSet::new).insert(t.to);
                    }
                }
            }
        }
        for symbol in symbol_order {
            let to_set = destinations[&symbol].clone();
            let to_members: Vec<Option<State>> = to_set.iter().copied().map(Some).collect();
            let to = aggregator.state_from_set(names, &to_members)?;
            transitions.push(Transition::new(from, symbol, to));
            queue.push(to_set);
        }
        if state_set.iter().any(|s| processed.is_accepting(*s)) {
            accepting.push(from);
        }
    }
    Ok(Automaton::new(a.start(), transitions, accepting))
}

///
/// The automaton accepting a string of `a` followed by a string of `b`
///
pub fn catenation(names: &NameGenerator, a: &Automaton, b: &Automaton) -> Result<Automaton, Error> {
    // catenating an automaton with itself needs a disjoint copy
    let copy;
    let b = if states_of(a).intersection(&states_of(b)).next().is_some() {
        copy = dup(names, b);
        &copy
    } else {
        b
    };
    let joined = remove_epsilon_transitions(&epsilon_catenate(a, b))?;
    powerset(names, &reachable_from_start(&joined))
}

/// The automaton accepting one or more strings of `a`, catenated
pub fn one_or_more(names: &NameGenerator, a: &Automaton) -> Result<Automaton, Error> {
    let mut transitions = a.transitions().to_vec();
    transitions.extend(
        a.accepting()
            .iter()
            .map(|&accepting| Transition::epsilon(accepting, a.start())),
    );
    let looped = Automaton::new(a.start(), transitions, a.accepting().to_vec());
    let deterministic = powerset(names, &remove_epsilon_transitions(&looped)?)?;
    Ok(reachable_from_start(&merge_equivalent_states(
        &deterministic,
    )?))
}

/// The automaton accepting the empty string or a string of `a`
pub fn zero_or_one(names: &NameGenerator, a: &Automaton) -> Result<Automaton, Error> {
    union(names, &empty_string(names), a)
}

/// Kleene star: zero or more strings of `a`, catenated
pub fn zero_or_more(names: &NameGenerator, a: &Automaton) -> Result<Automaton, Error> {
    zero_or_one(names, &one_or_more(names, a)?)
}

#[cfg(test)]
mod test {
    use super::*;

    fn names() -> NameGenerator {
        NameGenerator::from_seed(1)
    }

    // recognizer for binary numerals
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

    // recognizer for one or more zeroes
    fn zeroes(names: &NameGenerator) -> Automaton {
        let start = names.fresh();
        let more = names.fresh();
        Automaton::new(
            start,
            vec![
                Transition::new(start, '0', more),
                Transition::new(more, '0', more),
            ],
            vec![more],
        )
    }

    fn accepts(a: &Automaton, input: &str) -> bool {
        a.accepts(input).unwrap()
    }

    #[test]
    fn primitives() {
        let names = names();
        let nothing = empty_set(&names);
        assert!(!accepts(&nothing, ""));
        assert!(!accepts(&nothing, "a"));

        let just_empty = empty_string(&names);
        assert!(accepts(&just_empty, ""));
        assert!(!accepts(&just_empty, "a"));

        let just_a = literal(&names, 'a');
        assert!(accepts(&just_a, "a"));
        assert!(!accepts(&just_a, ""));
        assert!(!accepts(&just_a, "aa"));
    }

    #[test]
    fn any_symbol_over_an_alphabet() {
        let names = names();
        let any = any_symbol(&names, &['0', '1']).unwrap();
        assert!(accepts(&any, "0"));
        assert!(accepts(&any, "1"));
        assert!(!accepts(&any, ""));
        assert!(!accepts(&any, "2"));
        assert!(!accepts(&any, "01"));

        let none = any_symbol(&names, &[]).unwrap();
        assert!(!accepts(&none, ""));
    }

    #[test]
    fn dup_preserves_the_language_with_fresh_states() {
        let names = names();
        let original = binary(&names);
        let copy = dup(&names, &original);
        for input in ["0", "1", "10", "", "01"] {
            assert_eq!(accepts(&original, input), accepts(&copy, input));
        }
        assert!(states_of(&original).is_disjoint(&states_of(&copy)));
    }

    #[test]
    fn union_of_literals() {
        let names = names();
        let a_or_b = union(&names, &literal(&names, 'a'), &literal(&names, 'b')).unwrap();
        assert!(accepts(&a_or_b, "a"));
        assert!(accepts(&a_or_b, "b"));
        assert!(!accepts(&a_or_b, ""));
        assert!(!accepts(&a_or_b, "ab"));
    }

    #[test]
    fn union_handles_transitionless_operands() {
        let names = names();
        let both_empty = union(&names, &empty_string(&names), &empty_string(&names)).unwrap();
        assert!(accepts(&both_empty, ""));
        assert!(!accepts(&both_empty, "a"));

        let with_nothing = union(&names, &empty_string(&names), &empty_set(&names)).unwrap();
        assert!(accepts(&with_nothing, ""));
    }

    #[test]
    fn union_laws_on_samples() {
        let names = names();
        let a = literal(&names, 'a');
        let b = literal(&names, 'b');
        let c = literal(&names, 'c');
        let ab = union(&names, &a, &b).unwrap();
        let ba = union(&names, &b, &a).unwrap();
        let ab_c = union(&names, &ab, &c).unwrap();
        let a_bc = union(&names, &a, &union(&names, &b, &c).unwrap()).unwrap();
        for input in ["a", "b", "c", "", "ab", "x"] {
            assert_eq!(accepts(&ab, input), accepts(&ba, input));
            assert_eq!(accepts(&ab_c, input), accepts(&a_bc, input));
        }
    }

    #[test]
    fn intersection_and_difference() {
        let names = names();
        let binary = binary(&names);
        let zeroes = zeroes(&names);

        let both = intersection(&names, &binary, &zeroes).unwrap();
        assert!(accepts(&both, "0"));
        assert!(!accepts(&both, "00"));
        assert!(!accepts(&both, "1"));

        let only_binary = difference(&names, &binary, &zeroes).unwrap();
        assert!(accepts(&only_binary, "1"));
        assert!(accepts(&only_binary, "10"));
        assert!(!accepts(&only_binary, "0"));

        let nothing = difference(&names, &binary, &binary).unwrap();
        for input in ["", "0", "1", "10", "11010011"] {
            assert!(!accepts(&nothing, input));
        }
    }

    #[test]
    fn complement_over_an_alphabet() {
        let names = names();
        let binary = binary(&names);
        let other = complement(&names, &['0', '1'], &binary).unwrap();
        assert!(accepts(&other, ""));
        assert!(accepts(&other, "01"));
        assert!(!accepts(&other, "0"));
        assert!(!accepts(&other, "10"));

        let contradiction = intersection(&names, &binary, &other).unwrap();
        for input in ["", "0", "1", "01", "10"] {
            assert!(!accepts(&contradiction, input));
        }
    }

    #[test]
    fn character_complement_is_one_symbol_wide() {
        let names = names();
        let not_zero = character_complement(&names, &['0', '1'], &literal(&names, '0')).unwrap();
        assert!(accepts(&not_zero, "1"));
        assert!(!accepts(&not_zero, "0"));
        assert!(!accepts(&not_zero, ""));
        assert!(!accepts(&not_zero, "11"));
    }

    #[test]
    fn catenation_splits_inputs() {
        let names = names();
        let zeroes = zeroes(&names);
        let binary = binary(&names);
        let catenated = catenation(&names, &zeroes, &binary).unwrap();
        assert!(accepts(&catenated, "00"));
        assert!(accepts(&catenated, "001"));
        assert!(accepts(&catenated, "0010"));
        assert!(!accepts(&catenated, "0"));
        assert!(!accepts(&catenated, "10"));
        assert!(!accepts(&catenated, ""));
    }

    #[test]
    fn catenation_is_associative_on_samples() {
        let names = names();
        let a = literal(&names, 'a');
        let b = literal(&names, 'b');
        let c = literal(&names, 'c');
        let ab_c = catenation(&names, &catenation(&names, &a, &b).unwrap(), &c).unwrap();
        let a_bc = catenation(&names, &a, &catenation(&names, &b, &c).unwrap()).unwrap();
        for input in ["abc", "", "ab", "bc", "abcc", "aabc"] {
            assert_eq!(accepts(&ab_c, input), accepts(&a_bc, input));
        }
    }

    #[test]
    fn catenation_of_an_automaton_with_itself() {
        let names = names();
        let a = literal(&names, 'a');
        let aa = catenation(&names, &a, &a).unwrap();
        assert!(accepts(&aa, "aa"));
        assert!(!accepts(&aa, "a"));
        assert!(!accepts(&aa, "aaa"));
    }

    #[test]
    fn kleene_operators() {
        let names = names();
        let a = literal(&names, 'a');

        let some = one_or_more(&names, &a).unwrap();
        assert!(accepts(&some, "a"));
        assert!(accepts(&some, "aaaa"));
        assert!(!accepts(&some, ""));

        let maybe = zero_or_one(&names, &a).unwrap();
        assert!(accepts(&maybe, ""));
        assert!(accepts(&maybe, "a"));
        assert!(!accepts(&maybe, "aa"));

        let any_number = zero_or_more(&names, &a).unwrap();
        assert!(accepts(&any_number, ""));
        assert!(accepts(&any_number, "a"));
        assert!(accepts(&any_number, "aaaaaaa"));
        assert!(!accepts(&any_number, "b"));
    }

    #[test]
    fn epsilon_removal_resolves_chains() {
        let names = names();
        let joined = epsilon_catenate(&literal(&names, 'a'), &literal(&names, 'b'));
        // the join itself is not valid yet
        assert!(joined.validate(false).is_err());
        let resolved = remove_epsilon_transitions(&joined).unwrap();
        let deterministic = powerset(&names, &reachable_from_start(&resolved)).unwrap();
        assert!(accepts(&deterministic, "ab"));
        assert!(!accepts(&deterministic, "a"));
        assert!(!accepts(&deterministic, "b"));
    }

    #[test]
    fn epsilon_cycles_are_detected() {
        let names = names();
        let a = names.fresh();
        let b = names.fresh();
        let cyclic = Automaton::new(
            a,
            vec![Transition::epsilon(a, b), Transition::epsilon(b, a)],
            vec![b],
        );
        assert_eq!(
            remove_epsilon_transitions(&cyclic).unwrap_err(),
            Error::EpsilonRemovalDivergence
        );
    }

    #[test]
    fn powerset_output_is_deterministic() {
        let names = names();
        let start = names.fresh();
        let left = names.fresh();
        let right = names.fresh();
        let nondeterministic = Automaton::new(
            start,
            vec![
                Transition::new(start, 'x', left),
                Transition::new(start, 'x', right),
                Transition::new(right, 'y', right),
            ],
            vec![left, right],
        );
        assert!(nondeterministic.validate(false).is_err());
        let deterministic = powerset(&names, &nondeterministic).unwrap();
        assert!(deterministic.validate(false).is_ok());
        assert!(accepts(&deterministic, "x"));
        assert!(accepts(&deterministic, "xyy"));
        assert!(!accepts(&deterministic, "y"));
    }

    #[test]
    fn unreachable_states_are_pruned() {
        let names = names();
        let start = names.fresh();
        let end = names.fresh();
        let orphan = names.fresh();
        let a = Automaton::new(
            start,
            vec![
                Transition::new(start, 'a', end),
                Transition::new(orphan, 'b', end),
            ],
            vec![end, orphan],
        );
        let pruned = reachable_from_start(&a);
        assert_eq!(pruned.transitions().len(), 1);
        assert_eq!(pruned.accepting(), &[end]);
        assert!(accepts(&pruned, "a"));
    }
}
