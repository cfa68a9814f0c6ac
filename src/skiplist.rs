//! The ordered skip list over arena-allocated nodes.
//!
//! Nodes are stored in a [`slab::Slab`] and addressed by slot index; freed
//! slots go back to the slab's free list and are reused by later inserts.
//! Every link in the structure is a slot index, with [`NIL`] standing in for
//! "no successor". The head is a vector of level links owned by the list
//! itself — a virtual minimum that precedes every key without storing one.
//!
//! All operations descend from the highest active level toward level 0,
//! advancing while the next key is strictly less than the target before
//! dropping down a level.

use core::fmt;

use rand_core::RngCore;
use slab::Slab;

use crate::level::random_level;

/// Sentinel slot index meaning "no successor".
const NIL: usize = usize::MAX;

// ============================================================================
// Node
// ============================================================================

/// A node holding one key-value pair and its forward links.
#[derive(Debug, Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    /// Forward slot indices, one per level this node participates in.
    /// `links[0]` is the bottom level. Sized exactly `chosen_level + 1` at
    /// insertion and never resized.
    links: Vec<usize>,
}

// ============================================================================
// OrderedSkipList
// ============================================================================

/// A sorted map of unique keys with O(log n) expected operations.
///
/// Duplicate keys are rejected: inserting a key that is already present
/// returns `false` and leaves the structure untouched.
///
/// # Type Parameters
///
/// - `K`: key type, must implement `Ord`
/// - `V`: value type
/// - `R`: random number generator implementing [`RngCore`], injected at
///   construction so tests can seed it
#[derive(Debug)]
pub struct OrderedSkipList<K, V, R> {
    /// Node storage with stable slot indices and slot reuse.
    arena: Slab<Node<K, V>>,
    /// Level links of the virtual minimum; `head[i]` is the first slot at
    /// level `i`. Length is always `level + 1`.
    head: Vec<usize>,
    /// Highest level index in use (0-indexed).
    level: usize,
    /// Number of stored keys.
    len: usize,
    /// Random number generator for level assignment.
    rng: R,
}

impl<K, V, R> OrderedSkipList<K, V, R>
where
    K: Ord,
    R: RngCore,
{
    /// Creates a new empty list with the given RNG.
    pub fn new(rng: R) -> Self {
        Self {
            arena: Slab::new(),
            head: vec![NIL],
            level: 0,
            len: 0,
            rng,
        }
    }

    /// Returns the number of stored keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no keys are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of levels currently in use, always at least 1.
    #[inline]
    pub fn num_levels(&self) -> usize {
        self.level + 1
    }

    /// Returns `true` if the list contains the given key.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_slot(key).is_some()
    }

    /// Returns a reference to the value for the given key, or `None` if
    /// not found.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find_slot(key).map(|slot| &self.node(slot).value)
    }

    /// Returns a mutable reference to the value for the given key, or
    /// `None` if not found.
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let slot = self.find_slot(key)?;
        Some(&mut self.arena.get_mut(slot).expect("invalid slot").value)
    }

    /// Returns the highest level at which the key appears, or `None` if
    /// the key is absent.
    ///
    /// The search descends from the top level and reports the level where
    /// it first sees the key. Since no level exists above a node's own top
    /// link, the first hit from above is the node's top level.
    pub fn level_of(&self, key: &K) -> Option<usize> {
        let mut pred = NIL;
        for i in (0..=self.level).rev() {
            let mut next = self.forward(pred, i);
            while next != NIL {
                let node = self.node(next);
                if node.key >= *key {
                    break;
                }
                pred = next;
                next = node.links[i];
            }
            if next != NIL && self.node(next).key == *key {
                return Some(i);
            }
        }
        None
    }

    /// Inserts a key-value pair.
    ///
    /// Returns `false` without mutating anything if the key is already
    /// present.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let mut update = Vec::new();
        if self.search(&key, &mut update).is_some() {
            return false;
        }

        // Level for the new node, drawn against the pre-insertion size.
        let chosen = random_level(&mut self.rng, self.len);
        if chosen > self.level {
            // The head is the predecessor at every newly created level.
            self.head.resize(chosen + 1, NIL);
            update.resize(chosen + 1, NIL);
            self.level = chosen;
        }

        let mut links = vec![NIL; chosen + 1];
        for (i, link) in links.iter_mut().enumerate() {
            *link = self.forward(update[i], i);
        }

        let slot = self.arena.insert(Node { key, value, links });
        for (i, &pred) in update.iter().enumerate().take(chosen + 1) {
            match pred {
                NIL => self.head[i] = slot,
                pred => self.node_mut(pred).links[i] = slot,
            }
        }

        self.len += 1;
        true
    }

    /// Removes the entry for the given key and returns its value, or
    /// `None` if the key is absent.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let mut update = Vec::new();
        let slot = self.search(key, &mut update)?;

        // Unlink at every level of the node's footprint. Levels above it
        // never pointed at it, so they need no patching.
        let node = self.arena.remove(slot);
        for (i, &next) in node.links.iter().enumerate() {
            match update[i] {
                NIL => self.head[i] = next,
                pred => self.node_mut(pred).links[i] = next,
            }
        }

        while self.level > 0 && self.head[self.level] == NIL {
            self.head.pop();
            self.level -= 1;
        }

        self.len -= 1;
        Some(node.value)
    }

    /// Removes all entries, resetting to a single empty level.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head.clear();
        self.head.push(NIL);
        self.level = 0;
        self.len = 0;
    }

    /// Returns the smallest key-value pair, or `None` if empty.
    #[inline]
    pub fn first(&self) -> Option<(&K, &V)> {
        if self.head[0] == NIL {
            return None;
        }
        let node = self.node(self.head[0]);
        Some((&node.key, &node.value))
    }

    /// Returns the largest key-value pair, or `None` if empty.
    ///
    /// O(log n): descends rightward from the top level.
    pub fn last(&self) -> Option<(&K, &V)> {
        if self.is_empty() {
            return None;
        }
        let mut pred = NIL;
        for i in (0..=self.level).rev() {
            let mut next = self.forward(pred, i);
            while next != NIL {
                pred = next;
                next = self.node(next).links[i];
            }
        }
        let node = self.node(pred);
        Some((&node.key, &node.value))
    }

    /// Returns `true` if the given key is the smallest stored key.
    /// Always `false` on an empty list.
    #[inline]
    pub fn is_smallest(&self, key: &K) -> bool {
        self.first().map_or(false, |(k, _)| k == key)
    }

    /// Returns `true` if the given key is the largest stored key.
    /// Always `false` on an empty list or if the key is absent.
    pub fn is_largest(&self, key: &K) -> bool {
        match self.find_slot(key) {
            Some(slot) => self.node(slot).links[0] == NIL,
            None => false,
        }
    }

    /// Returns an iterator over key-value pairs in ascending key order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            arena: &self.arena,
            slot: self.head[0],
        }
    }

    /// Returns an iterator over keys in ascending order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over values in ascending order of their keys.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    #[inline]
    fn node(&self, slot: usize) -> &Node<K, V> {
        self.arena.get(slot).expect("invalid slot")
    }

    #[inline]
    fn node_mut(&mut self, slot: usize) -> &mut Node<K, V> {
        self.arena.get_mut(slot).expect("invalid slot")
    }

    /// Successor of `pred` at `lvl`, where `NIL` means the head.
    #[inline]
    fn forward(&self, pred: usize, lvl: usize) -> usize {
        if pred == NIL {
            self.head[lvl]
        } else {
            self.node(pred).links[lvl]
        }
    }

    /// Finds the slot of a key without computing predecessors.
    /// Used by read-only operations.
    fn find_slot(&self, key: &K) -> Option<usize> {
        let mut pred = NIL;
        for i in (0..=self.level).rev() {
            let mut next = self.forward(pred, i);
            while next != NIL {
                let node = self.node(next);
                if node.key >= *key {
                    break;
                }
                pred = next;
                next = node.links[i];
            }
        }

        let next = self.forward(pred, 0);
        if next != NIL && self.node(next).key == *key {
            Some(next)
        } else {
            None
        }
    }

    /// Searches for a key, filling `update` with the rightmost predecessor
    /// at each level (`NIL` where the head is the predecessor). Used by
    /// mutations. Returns the slot if the key is present.
    fn search(&self, key: &K, update: &mut Vec<usize>) -> Option<usize> {
        update.clear();
        update.resize(self.level + 1, NIL);

        let mut pred = NIL;
        for i in (0..=self.level).rev() {
            let mut next = self.forward(pred, i);
            while next != NIL {
                let node = self.node(next);
                if node.key >= *key {
                    break;
                }
                pred = next;
                next = node.links[i];
            }
            update[i] = pred;
        }

        let next = self.forward(pred, 0);
        if next != NIL && self.node(next).key == *key {
            Some(next)
        } else {
            None
        }
    }
}

impl<'a, K, V, R> IntoIterator for &'a OrderedSkipList<K, V, R>
where
    K: Ord,
    R: RngCore,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Iterators
// ============================================================================

/// An iterator over key-value pairs in ascending key order.
pub struct Iter<'a, K, V> {
    arena: &'a Slab<Node<K, V>>,
    slot: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.slot == NIL {
            return None;
        }
        let node = self.arena.get(self.slot).expect("invalid slot");
        self.slot = node.links[0];
        Some((&node.key, &node.value))
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("slot", &self.slot).finish()
    }
}

/// An iterator over keys in ascending order.
#[derive(Debug)]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over values in ascending order of their keys.
#[derive(Debug)]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}
