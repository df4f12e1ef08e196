//! Indexed (mutable-key) max-heap.
//!
//! Keyed by vertex identity rather than by insertion order: every key lives
//! at exactly one array slot, tracked through a `key -> slot` map, so that
//! priority updates triggered by the Sloan/MPG labelers are `O(log size)`
//! in-place operations instead of a lazy-deletion stale-pop sweep (spec.md
//! §4.2, §9 "Mutable heap keyed by vertex").
//!
//! The bubble-up/bubble-down structure follows the teacher's `KAryHeap`
//! (`examples/vigna-webgraph-rs/src/utils/kary_heap.rs`), generalized to
//! arity 2, turned into a max-heap, and extended with a key index so
//! individual keys can be found and updated rather than only popped.

use std::collections::HashMap;

/// A max-heap over `(key, priority)` pairs with O(log n) insert,
/// extract-max, change-priority and remove, and O(1) membership/lookup.
#[derive(Clone, Debug, Default)]
pub struct IndexedMaxHeap<P: PartialOrd + Copy> {
    // heap[slot] = (key, priority)
    heap: Vec<(usize, P)>,
    // key -> slot
    index: HashMap<usize, usize>,
}

impl<P: PartialOrd + Copy> IndexedMaxHeap<P> {
    pub fn new() -> Self {
        IndexedMaxHeap {
            heap: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        IndexedMaxHeap {
            heap: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn contains(&self, key: usize) -> bool {
        self.index.contains_key(&key)
    }

    #[inline]
    pub fn priority_of(&self, key: usize) -> Option<P> {
        self.index.get(&key).map(|&slot| self.heap[slot].1)
    }

    /// All keys currently held, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.heap.iter().map(|&(k, _)| k)
    }

    /// Priority of the current maximum, without removing it.
    pub fn peek_priority(&self) -> Option<P> {
        self.heap.first().map(|&(_, p)| p)
    }

    /// Inserts `key` with `priority`. `key` must not already be present.
    pub fn insert(&mut self, key: usize, priority: P) {
        debug_assert!(!self.index.contains_key(&key), "key already in heap");
        let slot = self.heap.len();
        self.heap.push((key, priority));
        self.index.insert(key, slot);
        self.bubble_up(slot);
    }

    /// Removes and returns the maximum-priority `(key, priority)` pair.
    pub fn extract_max(&mut self) -> Option<(usize, P)> {
        if self.heap.is_empty() {
            return None;
        }
        let top = self.heap[0];
        self.index.remove(&top.0);
        let last = self.heap.pop().unwrap();
        if !self.heap.is_empty() {
            self.heap[0] = last;
            self.index.insert(last.0, 0);
            self.bubble_down(0);
        }
        Some(top)
    }

    /// Sets `key`'s priority to `new_priority` and restores the heap
    /// property. `key` must already be present.
    pub fn change_priority(&mut self, key: usize, new_priority: P) {
        let slot = *self.index.get(&key).expect("change_priority: key absent");
        let old_priority = self.heap[slot].1;
        self.heap[slot].1 = new_priority;
        if new_priority > old_priority {
            self.bubble_up(slot);
        } else {
            self.bubble_down(slot);
        }
    }

    /// Removes `key` from the heap entirely. `key` must already be present.
    pub fn remove(&mut self, key: usize) {
        let slot = *self.index.get(&key).expect("remove: key absent");
        let last_slot = self.heap.len() - 1;
        if slot == last_slot {
            self.heap.pop();
            self.index.remove(&key);
            return;
        }
        self.heap[slot] = self.heap[last_slot];
        self.heap.pop();
        self.index.insert(self.heap[slot].0, slot);
        self.index.remove(&key);
        let parent = Self::parent(slot);
        if slot > 0 && self.heap[slot].1 > self.heap[parent].1 {
            self.bubble_up(slot);
        } else {
            self.bubble_down(slot);
        }
    }

    #[inline(always)]
    fn parent(slot: usize) -> usize {
        (slot - 1) / 2
    }

    #[inline(always)]
    fn children(slot: usize) -> (usize, usize) {
        (2 * slot + 1, 2 * slot + 2)
    }

    fn bubble_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = Self::parent(slot);
            if self.heap[parent].1 >= self.heap[slot].1 {
                break;
            }
            self.swap(parent, slot);
            slot = parent;
        }
    }

    fn bubble_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let (left, right) = Self::children(slot);
            let mut largest = slot;
            if left < len && self.heap[left].1 > self.heap[largest].1 {
                largest = left;
            }
            if right < len && self.heap[right].1 > self.heap[largest].1 {
                largest = right;
            }
            if largest == slot {
                break;
            }
            self.swap(slot, largest);
            slot = largest;
        }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.index.insert(self.heap[a].0, a);
        self.index.insert(self.heap[b].0, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_extract_is_sorted_descending() {
        let mut h = IndexedMaxHeap::new();
        for (k, p) in [(0, 3), (1, 1), (2, 4), (3, 1), (4, 5), (5, 9)] {
            h.insert(k, p);
        }
        let mut out = Vec::new();
        while let Some((k, p)) = h.extract_max() {
            out.push((k, p));
        }
        let priorities: Vec<_> = out.iter().map(|&(_, p)| p).collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn change_priority_preserves_heap_property() {
        let mut h = IndexedMaxHeap::new();
        for k in 0..20 {
            h.insert(k, k as i64);
        }
        h.change_priority(0, 100);
        assert_eq!(h.extract_max(), Some((0, 100)));
        h.change_priority(1, -100);
        // drain and make sure 1 comes out last
        let mut last = None;
        while let Some((k, _)) = h.extract_max() {
            last = Some(k);
        }
        assert_eq!(last, Some(1));
    }

    #[test]
    fn remove_arbitrary_key() {
        let mut h = IndexedMaxHeap::new();
        for k in 0..10 {
            h.insert(k, k as i64);
        }
        h.remove(5);
        assert!(!h.contains(5));
        assert_eq!(h.len(), 9);
        let mut seen = Vec::new();
        while let Some((k, _)) = h.extract_max() {
            seen.push(k);
        }
        assert!(!seen.contains(&5));
    }

    #[test]
    fn priority_of_and_contains() {
        let mut h = IndexedMaxHeap::new();
        h.insert(7, 42i64);
        assert!(h.contains(7));
        assert_eq!(h.priority_of(7), Some(42));
        assert_eq!(h.priority_of(8), None);
    }
}
