//! An ordered, in-memory map backed by a skip list.
//!
//! A skip list keeps its keys sorted across multiple linked levels, giving
//! O(log n) expected time for insert, lookup, and removal without any
//! rebalancing. Nodes live in a slab arena addressed by stable indices, so
//! the structure never touches raw pointers; links are slot indices with a
//! sentinel for "no successor".
//!
//! ```text
//! Level 2:  HEAD ──────────────────────► 50 ─────────────────► NIL
//!             │                           │
//! Level 1:  HEAD ─────────► 20 ──────────► 50 ─────────────────► NIL
//!             │             │              │
//! Level 0:  HEAD ──► 10 ──► 20 ──► 30 ───► 50 ──► 60 ─────────► NIL
//! ```
//!
//! Randomness for level assignment is injected at construction, which makes
//! behavior reproducible with a seeded generator.
//!
//! # Example
//!
//! ```
//! use ordered_skiplist::OrderedSkipList;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let rng = SmallRng::seed_from_u64(12345);
//! let mut map = OrderedSkipList::new(rng);
//!
//! assert!(map.insert(50, "fifty"));
//! assert!(map.insert(10, "ten"));
//! assert!(!map.insert(50, "duplicate")); // rejected, nothing changes
//!
//! assert_eq!(map.get(&50), Some(&"fifty"));
//! assert!(map.is_smallest(&10));
//!
//! // Keys enumerate in ascending order regardless of insertion order.
//! let keys: Vec<_> = map.keys().copied().collect();
//! assert_eq!(keys, vec![10, 50]);
//! ```

mod level;
mod skiplist;

pub use crate::skiplist::{Iter, Keys, OrderedSkipList, Values};
