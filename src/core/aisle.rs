// File: src/core/aisle.rs
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::catalog::ItemCatalog;
use crate::core::types::{AisleId, RawItemId};

/// One aisle's sampling table: member items sorted by frequency descending
/// (raw index ascending on ties) with the parallel running frequency sums.
#[derive(Debug, Clone)]
pub struct AisleGroup {
    pub items: Vec<RawItemId>,
    pub cumulative: Vec<u64>,
}

impl AisleGroup {
    /// Sum of member frequencies, i.e. the last cumulative entry.
    pub fn total_weight(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Members with nonzero frequency. Only these can ever come out of a
    /// weighted draw, so eligibility checks count them rather than `len`.
    pub fn weighted_item_count(&self) -> usize {
        let mut prev = 0u64;
        let mut count = 0;
        for &sum in &self.cumulative {
            if sum > prev {
                count += 1;
            }
            prev = sum;
        }
        count
    }

    /// One frequency-weighted draw: a uniform cut in `[0, total)` resolved
    /// by cut-point search over the cumulative table. An item is picked with
    /// probability `frequency / total`; zero-frequency members are
    /// unreachable. `None` when every member has zero weight.
    pub fn draw(&self, rng: &mut ChaCha8Rng) -> Option<RawItemId> {
        let total = self.total_weight();
        if total == 0 {
            return None;
        }
        let cut = rng.gen_range(0..total);
        let slot = self.cumulative.partition_point(|&sum| sum <= cut);
        self.items.get(slot).copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Aisle id to sampling table, built once from the catalog and read-only
/// during generation.
#[derive(Debug, Clone)]
pub struct AisleIndex {
    groups: HashMap<AisleId, AisleGroup>,
}

impl AisleIndex {
    pub fn build(catalog: &ItemCatalog) -> Self {
        let mut members: BTreeMap<AisleId, Vec<(RawItemId, u64)>> = BTreeMap::new();
        for item in catalog.iter() {
            if let Some(aisle) = item.aisle {
                members
                    .entry(aisle)
                    .or_default()
                    .push((item.index, item.frequency));
            }
        }

        let mut groups = HashMap::with_capacity(members.len());
        for (aisle, mut list) in members {
            // The tie rule keeps the table order independent of map
            // iteration order.
            list.sort_by_key(|&(index, frequency)| (Reverse(frequency), index));
            let mut items = Vec::with_capacity(list.len());
            let mut cumulative = Vec::with_capacity(list.len());
            let mut running = 0u64;
            for (index, frequency) in list {
                running += frequency;
                items.push(index);
                cumulative.push(running);
            }
            groups.insert(aisle, AisleGroup { items, cumulative });
        }
        Self { groups }
    }

    pub fn group(&self, aisle: AisleId) -> Option<&AisleGroup> {
        self.groups.get(&aisle)
    }

    /// Number of aisles with at least one cataloged member.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    fn index_for(frequencies: &[u64], aisles: &[(AisleId, &[RawItemId])]) -> AisleIndex {
        let table: BTreeMap<AisleId, Vec<RawItemId>> = aisles
            .iter()
            .map(|&(aisle, members)| (aisle, members.to_vec()))
            .collect();
        let catalog = ItemCatalog::build(frequencies, &table);
        AisleIndex::build(&catalog)
    }

    #[test]
    fn orders_members_by_descending_frequency() {
        let index = index_for(&[10, 5, 1], &[(1, &[1, 2, 3])]);
        let group = index.group(1).unwrap();
        assert_eq!(group.items, vec![1, 2, 3]);
        assert_eq!(group.cumulative, vec![10, 15, 16]);
        assert_eq!(group.total_weight(), 16);
    }

    #[test]
    fn breaks_frequency_ties_by_raw_index() {
        let index = index_for(&[5, 9, 5], &[(7, &[1, 2, 3])]);
        let group = index.group(7).unwrap();
        assert_eq!(group.items, vec![2, 1, 3]);
        assert_eq!(group.cumulative, vec![9, 14, 19]);
    }

    #[test]
    fn draw_converges_to_frequency_proportions() {
        let index = index_for(&[5, 3, 2], &[(1, &[1, 2, 3])]);
        let group = index.group(1).unwrap();
        assert_eq!(group.cumulative, vec![5, 8, 10]);

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut hits = [0u32; 3];
        let draws = 20_000;
        for _ in 0..draws {
            let raw = group.draw(&mut rng).unwrap();
            hits[raw as usize - 1] += 1;
        }
        let share = |h: u32| f64::from(h) / f64::from(draws);
        assert!((share(hits[0]) - 0.5).abs() < 0.02, "{hits:?}");
        assert!((share(hits[1]) - 0.3).abs() < 0.02, "{hits:?}");
        assert!((share(hits[2]) - 0.2).abs() < 0.02, "{hits:?}");
    }

    #[test]
    fn zero_frequency_members_are_never_drawn() {
        let index = index_for(&[4, 0, 6], &[(1, &[1, 2, 3])]);
        let group = index.group(1).unwrap();
        assert_eq!(group.weighted_item_count(), 2);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1_000 {
            assert_ne!(group.draw(&mut rng), Some(2));
        }
    }

    #[test]
    fn all_zero_group_draws_nothing() {
        let index = index_for(&[0, 0], &[(1, &[1, 2])]);
        let group = index.group(1).unwrap();
        assert_eq!(group.weighted_item_count(), 0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(group.draw(&mut rng), None);
    }

    #[test]
    fn items_without_aisles_join_no_group() {
        let index = index_for(&[10, 5, 1], &[(1, &[1, 3])]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.group(1).unwrap().items, vec![1, 3]);
    }
}
