// File: src/core/orders.rs
use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::core::types::RawOrder;

/// The pool of raw orders plus a presentation permutation over them.
///
/// Membership is fixed at construction. `shuffle` replaces the permutation
/// without touching the orders, so taking a prefix never consumes anything:
/// a later take after a fresh shuffle redraws from the full pool.
#[derive(Debug, Clone)]
pub struct OrderPool {
    orders: Vec<RawOrder>,
    presentation: Vec<usize>,
}

impl OrderPool {
    /// Normalizes the raw order table into the pool. Orders enter in
    /// ascending numeric id, which fixes the unshuffled presentation.
    pub fn new(order_table: BTreeMap<u64, RawOrder>) -> Self {
        let orders: Vec<RawOrder> = order_table.into_values().collect();
        let presentation = (0..orders.len()).collect();
        Self {
            orders,
            presentation,
        }
    }

    /// Rebuilds the presentation permutation from the identity ordering.
    /// Starting from identity rather than the previous permutation keeps
    /// each shuffle a pure function of the random stream position.
    pub fn shuffle(&mut self, rng: &mut ChaCha8Rng) {
        let mut presentation: Vec<usize> = (0..self.orders.len()).collect();
        presentation.shuffle(rng);
        self.presentation = presentation;
    }

    /// Clones the first `n` orders of the current presentation. Asking for
    /// more than the pool holds yields the whole pool.
    pub fn take(&self, n: usize) -> Vec<RawOrder> {
        self.presentation
            .iter()
            .take(n)
            .map(|&slot| self.orders[slot].clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn pool_of(orders: &[(u64, &[u32])]) -> OrderPool {
        let table: BTreeMap<u64, RawOrder> = orders
            .iter()
            .map(|&(id, items)| (id, items.to_vec()))
            .collect();
        OrderPool::new(table)
    }

    #[test]
    fn unshuffled_presentation_is_ascending_id_order() {
        let pool = pool_of(&[(3, &[30]), (1, &[10]), (2, &[20])]);
        assert_eq!(pool.take(3), vec![vec![10], vec![20], vec![30]]);
    }

    #[test]
    fn take_clamps_and_does_not_consume() {
        let pool = pool_of(&[(1, &[10]), (2, &[20]), (3, &[30])]);
        assert_eq!(pool.take(5).len(), 3);
        assert_eq!(pool.take(2), pool.take(2));
    }

    #[test]
    fn shuffle_permutes_without_changing_membership() {
        let mut pool = pool_of(&[(1, &[10]), (2, &[20]), (3, &[30]), (4, &[40]), (5, &[50])]);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        pool.shuffle(&mut rng);
        let mut taken = pool.take(5);
        taken.sort();
        assert_eq!(
            taken,
            vec![vec![10], vec![20], vec![30], vec![40], vec![50]]
        );
    }

    #[test]
    fn shuffle_depends_only_on_stream_position() {
        // Two pools with identical membership and identically seeded streams
        // present the same order, regardless of how often either was
        // shuffled before: the permutation is rebuilt from identity.
        let layout: &[(u64, &[u32])] = &[(1, &[10]), (2, &[20]), (3, &[30]), (4, &[40])];
        let mut first = pool_of(layout);
        let mut second = pool_of(layout);

        let mut rng_a = ChaCha8Rng::seed_from_u64(42);
        let mut scratch = ChaCha8Rng::seed_from_u64(7);
        second.shuffle(&mut scratch);
        second.shuffle(&mut scratch);

        first.shuffle(&mut rng_a);
        let mut rng_b = ChaCha8Rng::seed_from_u64(42);
        second.shuffle(&mut rng_b);

        assert_eq!(first.take(4), second.take(4));
    }
}
