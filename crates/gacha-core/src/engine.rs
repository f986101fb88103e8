//! Gacha draw engine — end-to-end draw orchestration

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::GachaRegistry;
use crate::error::{DrawError, DrawOutcome};
use crate::frequency::{compute_frequencies, total_weight};
use crate::materializer::{GachaItem, select_item};
use crate::picker::pick_category;
use crate::random::{RandomSource, RngSource};
use crate::rarity::RarityTag;
use crate::rates::RateTable;
use crate::stats::DrawStats;

/// Result of a single draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    pub item: GachaItem,
    pub rarity: RarityTag,
}

/// Gacha draw engine
///
/// Owns a read-only [`GachaRegistry`] and a [`RandomSource`]. A draw is
/// `frequencies -> pick category -> materialize item`, synchronous and
/// without retries. Apart from the random source the engine keeps no state
/// between draws.
pub struct GachaEngine<S = RngSource<ChaCha8Rng>> {
    /// Version configs
    registry: GachaRegistry,
    /// Randomness for category and item picks
    source: S,
}

impl GachaEngine {
    /// Engine seeded from the operating system
    pub fn new(registry: GachaRegistry) -> Self {
        Self::with_source(registry, RngSource::from_os_rng())
    }

    /// Engine with a reproducible seed
    pub fn seeded(registry: GachaRegistry, seed: u64) -> Self {
        Self::with_source(registry, RngSource::seeded(seed))
    }

    /// Reseed for reproducible results
    pub fn seed(&mut self, seed: u64) {
        self.source = RngSource::seeded(seed);
    }
}

impl<S: RandomSource> GachaEngine<S> {
    /// Engine drawing from a caller-supplied source
    pub fn with_source(registry: GachaRegistry, source: S) -> Self {
        Self { registry, source }
    }

    pub fn registry(&self) -> &GachaRegistry {
        &self.registry
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // DRAWS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Draw one item from `version`
    pub fn draw(&mut self, version: &str) -> DrawOutcome<DrawResult> {
        let config = self
            .registry
            .get(version)
            .ok_or_else(|| DrawError::UnknownVersion(version.to_string()))?;

        let frequencies = compute_frequencies(&config.categories);
        let total = total_weight(&frequencies);

        let r = self.source.next_f64() * total;
        let picked = pick_category(&frequencies, r, total)?;

        let item = select_item(
            version,
            picked.category,
            &config.extension,
            self.source.next_f64(),
        )?;

        log::debug!(
            "Drew {} #{} from {} ({})",
            picked.category.name,
            item.id,
            version,
            item.src
        );

        Ok(DrawResult {
            item,
            rarity: picked.category.name,
        })
    }

    /// `count` independent draws; the first failure aborts the batch
    pub fn draw_many(&mut self, version: &str, count: usize) -> DrawOutcome<Vec<DrawResult>> {
        (0..count).map(|_| self.draw(version)).collect()
    }

    /// Offering rates of `version`
    pub fn rates(&self, version: &str) -> DrawOutcome<RateTable> {
        let config = self
            .registry
            .get(version)
            .ok_or_else(|| DrawError::UnknownVersion(version.to_string()))?;
        RateTable::for_version(version, config)
    }

    /// Run `trials` draws and aggregate them
    pub fn simulate(&mut self, version: &str, trials: u64) -> DrawOutcome<DrawStats> {
        let mut stats = DrawStats::new(version);
        for _ in 0..trials {
            let result = self.draw(version)?;
            stats.record(&result);
        }

        log::info!(
            "Simulated {} draws of {} ({} rarities hit)",
            stats.total_draws,
            version,
            stats.by_rarity.len()
        );
        Ok(stats)
    }
}
