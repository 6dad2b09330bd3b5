//! Per-seed expansion state.

use crate::{expansion::queue::MinPriorityQueue, FxHashMap, FxHashSet};

pub(super) struct Frontier {
    pub(super) seed: String,
    pub(super) queue: MinPriorityQueue<String>,
    pub(super) visited: FxHashSet<String>,
    /// `child → (parent, relationship type)`; the seed has no entry.
    pub(super) parents: FxHashMap<String, (String, String)>,
}

impl Frontier {
    pub(super) fn new(seed: String) -> Self {
        Self {
            seed,
            queue: MinPriorityQueue::new(),
            visited: FxHashSet::default(),
            parents: FxHashMap::default(),
        }
    }

    /// Walks parent pointers from `from` back to the seed, both inclusive.
    pub(super) fn walk_to_seed(&self, from: &str) -> Vec<String> {
        let mut path = vec![from.to_owned()];
        let mut current = from;
        while let Some((parent, _)) = self.parents.get(current) {
            path.push(parent.clone());
            current = parent;
        }
        debug_assert_eq!(path.last().map(String::as_str), Some(self.seed.as_str()));
        path
    }
}
