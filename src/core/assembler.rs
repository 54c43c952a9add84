// File: src/core/assembler.rs
use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::aisle::AisleIndex;
use crate::core::catalog::ItemCatalog;
use crate::core::engine::{RunStats, SUB_PROBABILITY};
use crate::core::sampler::synthesize_candidates;
use crate::core::types::{Dataset, Order, RawItemId, RawOrder, Substitution};
use crate::error::SubstitutionSkip;

/// Raw-to-compact index map for one dataset assembly. First encounter of a
/// raw index claims the next unused compact slot, starting at 0; repeated
/// encounters return the claimed slot.
struct IndexRemap {
    slots: HashMap<RawItemId, i32>,
}

impl IndexRemap {
    fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    fn assign(&mut self, raw: RawItemId) -> i32 {
        let next = self.slots.len() as i32;
        *self.slots.entry(raw).or_insert(next)
    }

    fn len(&self) -> usize {
        self.slots.len()
    }
}

struct PendingSub {
    source: RawItemId,
    candidates: Vec<RawItemId>,
}

struct PendingOrder {
    items: Vec<RawItemId>,
    subs: Vec<PendingSub>,
}

/// Builds one self-contained dataset from a drawn order slice.
///
/// Item occurrences outside the catalog range are dropped without touching
/// the random stream; every kept occurrence rolls the substitution
/// probability and, on success, receives a candidate set from its aisle.
/// Candidates are then pruned to the dataset's item universe (substitution
/// sets that empty out are removed whole, the item stays bare) and all
/// surviving indices are renumbered through a fresh [`IndexRemap`], items
/// first in order-then-item scan order.
pub fn assemble_dataset(
    catalog: &ItemCatalog,
    aisles: &AisleIndex,
    drawn: Vec<RawOrder>,
    rng: &mut ChaCha8Rng,
    stats: &mut RunStats,
) -> Dataset {
    let mut pending: Vec<PendingOrder> = Vec::with_capacity(drawn.len());
    for raw_order in &drawn {
        let mut items = Vec::with_capacity(raw_order.len());
        let mut subs = Vec::new();
        for &raw in raw_order {
            if !catalog.contains(raw) {
                stats.out_of_range_dropped += 1;
                continue;
            }
            items.push(raw);
            if rng.gen_bool(SUB_PROBABILITY) {
                match synthesize_candidates(catalog, aisles, raw, rng) {
                    Ok(candidates) => {
                        stats.substitutions_attached += 1;
                        subs.push(PendingSub {
                            source: raw,
                            candidates,
                        });
                    }
                    Err(SubstitutionSkip::MissingAisle { .. }) => stats.missing_aisle_skips += 1,
                    Err(SubstitutionSkip::SaturatedAisle { .. }) => {
                        stats.saturated_aisle_skips += 1
                    }
                }
            }
        }
        pending.push(PendingOrder { items, subs });
    }

    // Closure pruning against the dataset-wide item universe.
    let universe: HashSet<RawItemId> = pending
        .iter()
        .flat_map(|order| order.items.iter().copied())
        .collect();
    for order in &mut pending {
        order.subs.retain_mut(|sub| {
            sub.candidates.retain(|candidate| universe.contains(candidate));
            if sub.candidates.is_empty() {
                stats.substitutions_pruned_empty += 1;
                return false;
            }
            true
        });
    }

    // Items claim compact indices first, across the whole dataset; sources
    // and surviving candidates are items too, so the second pass only looks
    // slots up.
    let mut remap = IndexRemap::new();
    let mut orders: Vec<Order> = pending
        .iter()
        .map(|order| Order {
            items: order.items.iter().map(|&raw| remap.assign(raw)).collect(),
            subs: Vec::new(),
        })
        .collect();
    for (slot, order) in pending.iter().enumerate() {
        orders[slot].subs = order
            .subs
            .iter()
            .map(|sub| Substitution {
                index: remap.assign(sub.source),
                sub_idxs: sub
                    .candidates
                    .iter()
                    .map(|&candidate| remap.assign(candidate))
                    .collect(),
            })
            .collect();
    }

    Dataset {
        orders,
        item_count: remap.len() as i32,
    }
}
