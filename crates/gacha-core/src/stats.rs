//! Aggregated draw statistics

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::DrawResult;
use crate::rarity::RarityTag;
use crate::rates::RateTable;

/// Counts collected over a batch of draws
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawStats {
    pub version: String,
    pub total_draws: u64,
    pub by_rarity: BTreeMap<RarityTag, u64>,
}

impl DrawStats {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, result: &DrawResult) {
        self.total_draws += 1;
        *self.by_rarity.entry(result.rarity).or_insert(0) += 1;
    }

    pub fn count(&self, rarity: RarityTag) -> u64 {
        self.by_rarity.get(&rarity).copied().unwrap_or(0)
    }

    /// Observed fraction of draws with `rarity`
    pub fn observed_rate(&self, rarity: RarityTag) -> f64 {
        if self.total_draws > 0 {
            self.count(rarity) as f64 / self.total_draws as f64
        } else {
            0.0
        }
    }

    /// Pearson chi-square of observed counts against `rates`
    ///
    /// Rows with zero expectation are skipped.
    pub fn chi_square(&self, rates: &RateTable) -> f64 {
        let total = self.total_draws as f64;
        rates
            .entries
            .iter()
            .filter_map(|entry| {
                let expected = entry.share * total;
                if expected > 0.0 {
                    let diff = self.count(entry.rarity) as f64 - expected;
                    Some(diff * diff / expected)
                } else {
                    None
                }
            })
            .sum()
    }
}
