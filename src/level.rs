//! Randomized level selection for new nodes.
//!
//! The level drawn for a node decides how many forward links it carries and
//! is fixed for the node's lifetime. The draw is uniform below a ceiling
//! that tracks the current size of the list, so the tallest possible node
//! stays proportional to log2 of the key count.

use rand_core::RngCore;

/// Picks the level for the next node to insert.
///
/// `len` is the key count *before* the insertion. An empty list always gets
/// a level-0 node; otherwise the level is uniform in `[0, level_ceiling(len))`.
pub(crate) fn random_level(rng: &mut impl RngCore, len: usize) -> usize {
    rng.next_u32() as usize % level_ceiling(len)
}

/// Exclusive upper bound on the level drawn for the next insertion.
///
/// 13 for lists of up to 16 keys, `3 * ceil(log2(len)) + 1` beyond that.
/// With no keys stored only level 0 is available.
pub(crate) fn level_ceiling(len: usize) -> usize {
    if len == 0 {
        1
    } else if len <= 16 {
        13
    } else {
        3 * ceil_log2(len) + 1
    }
}

/// `ceil(log2(n))` for `n > 1`, in integer arithmetic.
fn ceil_log2(n: usize) -> usize {
    (usize::BITS - (n - 1).leading_zeros()) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn ceiling_empty_permits_only_level_zero() {
        assert_eq!(level_ceiling(0), 1);
    }

    #[test]
    fn ceiling_is_thirteen_up_to_sixteen_keys() {
        for len in 1..=16 {
            assert_eq!(level_ceiling(len), 13, "len {}", len);
        }
    }

    #[test]
    fn ceiling_follows_log_formula_above_sixteen() {
        assert_eq!(level_ceiling(17), 3 * 5 + 1);
        assert_eq!(level_ceiling(32), 3 * 5 + 1);
        assert_eq!(level_ceiling(33), 3 * 6 + 1);
        assert_eq!(level_ceiling(1024), 3 * 10 + 1);
        assert_eq!(level_ceiling(1025), 3 * 11 + 1);
    }

    #[test]
    fn empty_list_always_draws_zero() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(random_level(&mut rng, 0), 0);
        }
    }

    #[test]
    fn draws_stay_below_ceiling() {
        let mut rng = SmallRng::seed_from_u64(2);
        for len in [1, 5, 16, 17, 100, 4096] {
            let ceiling = level_ceiling(len);
            for _ in 0..200 {
                assert!(random_level(&mut rng, len) < ceiling);
            }
        }
    }
}
