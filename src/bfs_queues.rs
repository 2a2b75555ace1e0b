// SPDX-License-Identifier: Apache-2.0

//!
//! Queue + set for breadth-first exploration of states
//!

use std::{
    collections::{HashSet, VecDeque},
    hash::Hash,
};

///
/// A BfsQueue is a FIFO queue that never holds or re-admits a duplicate:
/// pushing an element that was ever pushed before is a no-op. This is the
/// frontier structure used by the product, powerset, and reachability
/// explorations.
///
#[derive(Debug)]
pub struct BfsQueue<T> {
    queue: VecDeque<T>,
    seen: HashSet<T>,
}

impl<T: Eq + Hash + Clone> BfsQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        BfsQueue {
            queue: VecDeque::new(),
            seen: HashSet::new(),
        }
    }

    ///
    /// Add an element at the end of the queue unless it was seen before
    /// - return true if the element is new
    ///
    pub fn push(&mut self, element: T) -> bool {
        if self.seen.insert(element.clone()) {
            self.queue.push_back(element);
            true
        } else {
            false
        }
    }

    /// Take the element at the front of the queue, if any
    pub fn pop(&mut self) -> Option<T> {
        self.queue.pop_front()
    }
}
