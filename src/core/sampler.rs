// File: src/core/sampler.rs
use rand_chacha::ChaCha8Rng;

use crate::core::aisle::AisleIndex;
use crate::core::catalog::ItemCatalog;
use crate::core::types::RawItemId;
use crate::error::SubstitutionSkip;

/// Distinct candidates collected per substitution before the source is
/// stripped back out.
pub const CANDIDATE_SET_SIZE: usize = 3;

/// Redraw batches allowed before an occurrence is abandoned. With three or
/// more weighted members the union completes within a couple of batches in
/// practice; the cap only matters under extreme frequency skew.
const MAX_SAMPLE_BATCHES: usize = 16;

/// Draws the substitution candidate set for one kept item occurrence.
///
/// Batches of [`CANDIDATE_SET_SIZE`] weighted picks from the source's aisle
/// are unioned until that many distinct members are collected, then the
/// source itself is stripped. The result holds two or three raw indices and
/// never the source.
///
/// Fails with [`SubstitutionSkip::MissingAisle`] when the source has no
/// aisle assignment and with [`SubstitutionSkip::SaturatedAisle`] when the
/// aisle cannot yield enough distinct weighted members. Neither failure
/// consumes randomness before the first draw.
pub fn synthesize_candidates(
    catalog: &ItemCatalog,
    aisles: &AisleIndex,
    source: RawItemId,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<RawItemId>, SubstitutionSkip> {
    let aisle = catalog
        .get(source)
        .and_then(|item| item.aisle)
        .ok_or(SubstitutionSkip::MissingAisle { item: source })?;
    let group = aisles
        .group(aisle)
        .ok_or(SubstitutionSkip::MissingAisle { item: source })?;

    // Zero-frequency members can never be drawn, so they do not count
    // towards eligibility.
    if group.weighted_item_count() < CANDIDATE_SET_SIZE {
        return Err(SubstitutionSkip::SaturatedAisle { aisle });
    }

    let mut union: Vec<RawItemId> = Vec::with_capacity(CANDIDATE_SET_SIZE);
    for _ in 0..MAX_SAMPLE_BATCHES {
        for _ in 0..CANDIDATE_SET_SIZE {
            let pick = match group.draw(rng) {
                Some(pick) => pick,
                None => return Err(SubstitutionSkip::SaturatedAisle { aisle }),
            };
            if union.len() < CANDIDATE_SET_SIZE && !union.contains(&pick) {
                union.push(pick);
            }
        }
        if union.len() == CANDIDATE_SET_SIZE {
            union.retain(|&candidate| candidate != source);
            return Ok(union);
        }
    }
    Err(SubstitutionSkip::SaturatedAisle { aisle })
}
