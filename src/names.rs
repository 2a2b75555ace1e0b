// SPDX-License-Identifier: Apache-2.0

//!
//! State identifiers and the fresh-name generator
//!
//! Every automaton state is an opaque id carrying no data beyond identity.
//! Fresh ids come from a [NameGenerator]. The default generator draws from
//! one process-wide atomic counter, so any number of generators created
//! with [NameGenerator::new] hand out globally unique ids and automata
//! derived from a common ancestor can be built in parallel without locks.
//!
//! Sharing identifiers is what makes state aliasing safe: operations such
//! as product and powerset may reuse states of their inputs directly (see
//! [algebra](crate::algebra)), which is only sound while no two live states
//! share an id. Generators created with [NameGenerator::from_seed] are
//! independent counters for deterministic tests; mixing automata produced
//! by two seeded generators risks id collisions that would silently merge
//! unrelated states.
//!

use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_STATE_ID: AtomicU64 = AtomicU64::new(1);

///
/// Opaque automaton state identifier
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State(u64);

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.0)
    }
}

///
/// Generator of fresh, unique state identifiers
///
#[derive(Debug)]
pub struct NameGenerator {
    counter: Counter,
}

#[derive(Debug)]
enum Counter {
    Global,
    Seeded(AtomicU64),
}

impl NameGenerator {
    /// Create a generator backed by the process-wide counter
    pub fn new() -> Self {
        NameGenerator {
            counter: Counter::Global,
        }
    }

    ///
    /// Create an independent generator starting at `seed`
    ///
    /// Useful for deterministic tests. Ids from two seeded generators, or
    /// from a seeded generator and the process-wide one, may collide.
    ///
    pub fn from_seed(seed: u64) -> Self {
        NameGenerator {
            counter: Counter::Seeded(AtomicU64::new(seed)),
        }
    }

    /// Produce a fresh state identifier
    pub fn fresh(&self) -> State {
        let id = match &self.counter {
            Counter::Global => NEXT_STATE_ID.fetch_add(1, Ordering::Relaxed),
            Counter::Seeded(counter) => counter.fetch_add(1, Ordering::Relaxed),
        };
        State(id)
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        NameGenerator::new()
    }
}
