// File: src/core/engine.rs
use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::aisle::AisleIndex;
use crate::core::assembler::assemble_dataset;
use crate::core::catalog::ItemCatalog;
use crate::core::orders::OrderPool;
use crate::error::DatasetResult;
use crate::input::RawTables;
use crate::persistence::write_dataset;

/// Fixed base seed of the generation stream.
pub const BASE_SEED: u64 = 4224;
/// Probability that a kept item occurrence receives a substitution set.
pub const SUB_PROBABILITY: f64 = 1.0 / 3.0;
/// Orders drawn per dataset, one tier each.
pub const TIER_SIZES: [usize; 3] = [10, 25, 50];
/// Iterations of the tier schedule; total datasets = iterations × tiers.
pub const DATASET_ITERATIONS: usize = 10;

/// Run counters surfaced in the end-of-run summary. Per-occurrence
/// anomalies land here instead of aborting the batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunStats {
    pub datasets_written: usize,
    pub out_of_range_dropped: usize,
    pub substitutions_attached: usize,
    pub substitutions_pruned_empty: usize,
    pub missing_aisle_skips: usize,
    pub saturated_aisle_skips: usize,
}

/// The batch pipeline: catalog, aisle sampling tables, order pool and the
/// single random stream, driven through the iteration × tier schedule.
pub struct DatasetGenerator {
    catalog: ItemCatalog,
    aisles: AisleIndex,
    pool: OrderPool,
    rng: ChaCha8Rng,
    stats: RunStats,
}

impl DatasetGenerator {
    /// Builds every derived structure from the raw tables and performs the
    /// initial pool shuffle, leaving the generator ready for iteration 0.
    pub fn new(tables: RawTables, seed: u64) -> Self {
        let catalog = ItemCatalog::build(&tables.frequencies, &tables.aisle_table);
        let aisles = AisleIndex::build(&catalog);
        let mut pool = OrderPool::new(tables.order_table);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        pool.shuffle(&mut rng);
        Self {
            catalog,
            aisles,
            pool,
            rng,
            stats: RunStats::default(),
        }
    }

    /// Output file name for one (tier slot, iteration) job: tiers occupy
    /// blocks of ten, `orders0..9` small through `orders20..29` large.
    pub fn output_name(tier: usize, iteration: usize) -> String {
        format!("orders{}.data", 10 * tier + iteration)
    }

    /// Assembles and writes all three tiers from the current pool
    /// presentation, then reshuffles for the next iteration. A write
    /// failure aborts the iteration; files already persisted stay valid.
    pub fn run_iteration(&mut self, iteration: usize, out_dir: &Path) -> DatasetResult<()> {
        for (tier, &size) in TIER_SIZES.iter().enumerate() {
            let drawn = self.pool.take(size);
            let dataset = assemble_dataset(
                &self.catalog,
                &self.aisles,
                drawn,
                &mut self.rng,
                &mut self.stats,
            );
            write_dataset(&dataset, &out_dir.join(Self::output_name(tier, iteration)))?;
            self.stats.datasets_written += 1;
        }
        self.pool.shuffle(&mut self.rng);
        Ok(())
    }

    /// Runs the full schedule: all iterations, all tiers, one file each.
    pub fn run(&mut self, out_dir: &Path) -> DatasetResult<()> {
        for iteration in 0..DATASET_ITERATIONS {
            self.run_iteration(iteration, out_dir)?;
        }
        Ok(())
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }
}
