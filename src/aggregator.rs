// SPDX-License-Identifier: Apache-2.0

//!
//! Aggregation of state sets into single states
//!
//! The product and powerset constructions work over sets of input states.
//! A [StateAggregator] assigns each distinct set one representative state
//! and remembers the correspondence in both directions, so that a set seen
//! twice maps to the same representative and the members of a
//! representative can be recovered later (powerset needs this to decide
//! acceptance).
//!
//! A set with exactly one member collapses to that member itself. This
//! aliasing keeps derived automata connected to their inputs' state ids and
//! is why ids must be globally unique (see [names](crate::names)).
//!

use std::collections::{BTreeSet, HashMap};

use crate::errors::Error;
use crate::names::{NameGenerator, State};

///
/// Bidirectional map between sets of states and their representatives
///
#[derive(Debug, Default)]
pub struct StateAggregator {
    forward: HashMap<Vec<State>, State>,
    inverse: HashMap<State, BTreeSet<State>>,
}

impl StateAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        StateAggregator {
            forward: HashMap::new(),
            inverse: HashMap::new(),
        }
    }

    ///
    /// Representative state for the given members
    ///
    /// `members` may contain `None` entries (a side of a product that has
    /// died); they are ignored. If no members remain the aggregation fails
    /// with [Error::EmptyStateSet]. A single member is returned unchanged.
    /// A member that is itself a representative handed out by this
    /// aggregator is rejected with [Error::AggregateOfAggregate].
    ///
    pub fn state_from_set(
        &mut self,
        names: &NameGenerator,
        members: &[Option<State>],
    ) -> Result<State, Error> {
        let mut key: Vec<State> = members.iter().filter_map(|m| *m).collect();
        key.sort_unstable();
        key.dedup();
        if key.is_empty() {
            return Err(Error::EmptyStateSet);
        }
        for member in &key {
            if self.inverse.contains_key(member) {
                return Err(Error::AggregateOfAggregate(*member));
            }
        }
        if key.len() == 1 {
            return Ok(key[0]);
        }
        if let Some(&existing) = self.forward.get(&key) {
            return Ok(existing);
        }
        let fresh = names.fresh();
        self.inverse.insert(fresh, key.iter().copied().collect());
        self.forward.insert(key, fresh);
        Ok(fresh)
    }

    ///
    /// Members of a representative state
    ///
    /// A state this aggregator never handed out is its own singleton set.
    ///
    pub fn set_from_state(&self, state: State) -> BTreeSet<State> {
        match self.inverse.get(&state) {
            Some(members) => members.clone(),
            None => std::iter::once(state).collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn same_set_same_representative() {
        let names = NameGenerator::from_seed(1);
        let a = names.fresh();
        let b = names.fresh();
        let mut aggregator = StateAggregator::new();
        let ab = aggregator
            .state_from_set(&names, &[Some(a), Some(b)])
            .unwrap();
        // order and dead members do not matter
        let ba = aggregator
            .state_from_set(&names, &[Some(b), None, Some(a)])
            .unwrap();
        assert_eq!(ab, ba);
        assert_ne!(ab, a);
        assert_ne!(ab, b);
        assert_eq!(
            aggregator.set_from_state(ab),
            [a, b].iter().copied().collect()
        );
    }

    #[test]
    fn singleton_collapses_to_member() {
        let names = NameGenerator::from_seed(1);
        let a = names.fresh();
        let mut aggregator = StateAggregator::new();
        assert_eq!(
            aggregator.state_from_set(&names, &[Some(a), None]).unwrap(),
            a
        );
        assert_eq!(
            aggregator.set_from_state(a),
            std::iter::once(a).collect()
        );
    }

    #[test]
    fn rejects_an_empty_member_list() {
        let names = NameGenerator::from_seed(1);
        let mut aggregator = StateAggregator::new();
        assert_eq!(
            aggregator.state_from_set(&names, &[]),
            Err(Error::EmptyStateSet)
        );
        assert_eq!(
            aggregator.state_from_set(&names, &[None, None]),
            Err(Error::EmptyStateSet)
        );
    }

    #[test]
    fn rejects_nested_aggregation() {
        let names = NameGenerator::from_seed(1);
        let a = names.fresh();
        let b = names.fresh();
        let c = names.fresh();
        let mut aggregator = StateAggregator::new();
        let ab = aggregator
            .state_from_set(&names, &[Some(a), Some(b)])
            .unwrap();
        assert_eq!(
            aggregator.state_from_set(&names, &[Some(ab), Some(c)]),
            Err(Error::AggregateOfAggregate(ab))
        );
    }
}
