// File: src/core/catalog.rs
use std::collections::{BTreeMap, HashMap};

use crate::core::types::{AisleId, Item, RawItemId};

/// The item catalog: one entry per raw index of the frequency table.
///
/// Backed by a dense Vec, raw index `i` living at slot `i - 1`. Lookups are
/// explicit bounds checks; absence is a miss, never a zero-frequency item.
#[derive(Debug, Clone)]
pub struct ItemCatalog {
    items: Vec<Item>,
    missing_aisle: Vec<RawItemId>,
}

impl ItemCatalog {
    /// Builds the catalog by joining the frequency slice (element `i`
    /// belongs to raw index `i + 1`) with the aisle membership table.
    ///
    /// Items no aisle lists are kept with `aisle: None` and reported through
    /// [`missing_aisle_items`](Self::missing_aisle_items). Indices the aisle
    /// table mentions but the frequency table does not are ignored; they
    /// name products that never occur in the order log.
    pub fn build(frequencies: &[u64], aisle_table: &BTreeMap<AisleId, Vec<RawItemId>>) -> Self {
        // Invert membership. Walking aisles in ascending id order makes the
        // smallest aisle win when an item is listed more than once.
        let mut aisle_of: HashMap<RawItemId, AisleId> = HashMap::new();
        for (&aisle, members) in aisle_table {
            for &raw in members {
                aisle_of.entry(raw).or_insert(aisle);
            }
        }

        let mut items = Vec::with_capacity(frequencies.len());
        let mut missing_aisle = Vec::new();
        for (slot, &frequency) in frequencies.iter().enumerate() {
            let index = (slot + 1) as RawItemId;
            let aisle = aisle_of.get(&index).copied();
            if aisle.is_none() {
                missing_aisle.push(index);
            }
            items.push(Item {
                index,
                frequency,
                aisle,
            });
        }
        Self {
            items,
            missing_aisle,
        }
    }

    /// Looks up an item by raw index. Index 0 and anything past the table
    /// end miss; callers treat such indices as upstream parsing noise.
    pub fn get(&self, raw: RawItemId) -> Option<&Item> {
        if raw == 0 {
            return None;
        }
        self.items.get(raw as usize - 1)
    }

    pub fn contains(&self, raw: RawItemId) -> bool {
        self.get(raw).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in raw-index order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Raw indices present in the frequency table but absent from every
    /// aisle. Surfaced as a startup warning; such items are kept in orders
    /// but never receive substitutions.
    pub fn missing_aisle_items(&self) -> &[RawItemId] {
        &self.missing_aisle
    }
}
