// src/core/types.rs
use serde::{Deserialize, Serialize};

/// Raw catalog index of an item, 1-based. Index 0 is reserved by the input
/// format and never names a real item.
pub type RawItemId = u32;

/// Shelf-category bucket shared by related items.
pub type AisleId = u32;

/// One raw order: item indices exactly as the order log recorded them.
/// Duplicate occurrences are preserved.
pub type RawOrder = Vec<RawItemId>;

/// A cataloged item. Built once from the frequency and aisle tables and
/// immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub index: RawItemId,
    /// Number of orders containing this item across the full raw log.
    pub frequency: u64,
    /// `None` marks the integrity fault where the frequency table knows the
    /// item but no aisle lists it.
    pub aisle: Option<AisleId>,
}

/// A substitution set attached to one item occurrence of an order. All
/// indices are dataset-local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// Compact index of the item the set substitutes for.
    pub index: i32,
    /// Compact indices of the candidate replacements, in draw order. Never
    /// contains `index` itself and never empty in an emitted record.
    pub sub_idxs: Vec<i32>,
}

/// One emitted order: kept items (duplicates intact) plus substitution sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub items: Vec<i32>,
    pub subs: Vec<Substitution>,
}

/// One self-contained dataset file. Every index is local to this record and
/// lies in `[0, item_count)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub orders: Vec<Order>,
    pub item_count: i32,
}

impl Dataset {
    /// Checks the record invariants: index bounds, the dense zero-based
    /// renumbering, substitution closure over the order items, and
    /// source/candidate disjointness. Returns the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        if self.item_count < 0 {
            return Err(format!("negative item_count {}", self.item_count));
        }
        let n = self.item_count as usize;
        let in_range = |idx: i32| idx >= 0 && (idx as usize) < n;

        // First pass collects the item universe; substitutions are checked
        // against it afterwards.
        let mut used = vec![false; n];
        let mut is_item = vec![false; n];
        for (slot, order) in self.orders.iter().enumerate() {
            for &idx in &order.items {
                if !in_range(idx) {
                    return Err(format!(
                        "order {} item index {} outside [0, {})",
                        slot, idx, n
                    ));
                }
                used[idx as usize] = true;
                is_item[idx as usize] = true;
            }
        }

        for (slot, order) in self.orders.iter().enumerate() {
            for sub in &order.subs {
                if !in_range(sub.index) {
                    return Err(format!(
                        "order {} substitution source {} outside [0, {})",
                        slot, sub.index, n
                    ));
                }
                if !is_item[sub.index as usize] {
                    return Err(format!(
                        "substitution source {} never appears as an order item",
                        sub.index
                    ));
                }
                if sub.sub_idxs.is_empty() {
                    return Err(format!(
                        "order {} carries an empty substitution set for {}",
                        slot, sub.index
                    ));
                }
                for &cand in &sub.sub_idxs {
                    if !in_range(cand) {
                        return Err(format!(
                            "substitution candidate {} outside [0, {})",
                            cand, n
                        ));
                    }
                    if cand == sub.index {
                        return Err(format!(
                            "substitution set for {} lists its own source",
                            sub.index
                        ));
                    }
                    if !is_item[cand as usize] {
                        return Err(format!(
                            "substitution candidate {} never appears as an order item",
                            cand
                        ));
                    }
                    used[cand as usize] = true;
                }
            }
        }

        if let Some(gap) = used.iter().position(|&u| !u) {
            return Err(format!("compact index {} is never referenced", gap));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dataset() -> Dataset {
        Dataset {
            orders: vec![
                Order {
                    items: vec![0, 1, 2],
                    subs: vec![Substitution {
                        index: 0,
                        sub_idxs: vec![1, 2],
                    }],
                },
                Order {
                    items: vec![1, 0],
                    subs: vec![],
                },
            ],
            item_count: 3,
        }
    }

    #[test]
    fn accepts_well_formed_record() {
        assert!(valid_dataset().validate().is_ok());
    }

    #[test]
    fn accepts_empty_record() {
        let empty = Dataset {
            orders: vec![],
            item_count: 0,
        };
        assert!(empty.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_item() {
        let mut ds = valid_dataset();
        ds.orders[0].items.push(3);
        assert!(ds.validate().is_err());
    }

    #[test]
    fn rejects_unused_compact_index() {
        let mut ds = valid_dataset();
        ds.item_count = 4;
        let err = ds.validate().unwrap_err();
        assert!(err.contains("never referenced"), "{err}");
    }

    #[test]
    fn rejects_self_candidate() {
        let mut ds = valid_dataset();
        ds.orders[0].subs[0].sub_idxs.push(0);
        let err = ds.validate().unwrap_err();
        assert!(err.contains("own source"), "{err}");
    }

    #[test]
    fn rejects_empty_substitution_set() {
        let mut ds = valid_dataset();
        ds.orders[0].subs[0].sub_idxs.clear();
        assert!(ds.validate().is_err());
    }

    #[test]
    fn rejects_candidate_outside_item_universe() {
        // Index 2 exists only as a candidate, never as an order item.
        let ds = Dataset {
            orders: vec![Order {
                items: vec![0, 1],
                subs: vec![Substitution {
                    index: 0,
                    sub_idxs: vec![2],
                }],
            }],
            item_count: 3,
        };
        let err = ds.validate().unwrap_err();
        assert!(err.contains("never appears"), "{err}");
    }

    #[test]
    fn source_scope_is_dataset_wide() {
        let ds = Dataset {
            orders: vec![
                Order {
                    items: vec![0, 1],
                    subs: vec![],
                },
                Order {
                    items: vec![2],
                    subs: vec![Substitution {
                        index: 0,
                        sub_idxs: vec![1],
                    }],
                },
            ],
            item_count: 3,
        };
        // Source 0 is an item of another order, not of this one. The record
        // format scopes sources per dataset, not per order, so this passes.
        assert!(ds.validate().is_ok());
    }
}
